use rust_decimal::Decimal;

/// Errors raised by the financial calculator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("rent roll is empty")]
    EmptyRentRoll,
    #[error("invalid input: {what} is zero")]
    DivisionByZero { what: &'static str },
    #[error("invalid input: {what} must not be negative (got {value})")]
    Negative { what: &'static str, value: Decimal },
    #[error("invalid loan term: {years} years")]
    InvalidTerm { years: u32 },
    #[error("invalid loan-to-value ratio: {0}")]
    InvalidLtv(Decimal),
    #[error("invalid pricing range: low {low}, high {high}, step {step}")]
    InvalidRange {
        low: Decimal,
        high: Decimal,
        step: Decimal,
    },
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

/// Divide, failing with [`CalcError::DivisionByZero`] instead of panicking.
pub(crate) fn ratio(
    numerator: Decimal,
    denominator: Decimal,
    what: &'static str,
) -> Result<Decimal, CalcError> {
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero { what });
    }
    numerator
        .checked_div(denominator)
        .ok_or(CalcError::Overflow(what))
}

pub(crate) fn non_negative(value: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(CalcError::Negative { what, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ratio_rejects_zero_denominator() {
        assert_eq!(
            ratio(dec!(1), Decimal::ZERO, "price"),
            Err(CalcError::DivisionByZero { what: "price" })
        );
        assert_eq!(ratio(dec!(3), dec!(4), "price"), Ok(dec!(0.75)));
    }

    #[test]
    fn negative_zero_is_accepted() {
        assert!(non_negative(-Decimal::ZERO, "rate").is_ok());
        assert!(non_negative(dec!(-0.01), "rate").is_err());
    }
}
