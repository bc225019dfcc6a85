use super::error::{non_negative, CalcError};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Acquisition financing assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancingTerms {
    /// Loan-to-value ratio, e.g. 0.60
    #[schemars(with = "f64")]
    pub ltv: Decimal,
    /// Annual interest rate, e.g. 0.0575
    #[schemars(with = "f64")]
    pub interest_rate: Decimal,
    /// Amortization period in years
    pub amortization_years: u32,
    /// Loan term in years (informational; balloon is not modelled)
    pub loan_term_years: u32,
}

impl FinancingTerms {
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.ltv < Decimal::ZERO || self.ltv > Decimal::ONE {
            return Err(CalcError::InvalidLtv(self.ltv));
        }
        non_negative(self.interest_rate, "interest rate")?;
        if self.amortization_years == 0 {
            return Err(CalcError::InvalidTerm { years: 0 });
        }
        Ok(())
    }

    /// Annual debt service per dollar borrowed
    pub fn loan_constant(&self) -> Result<Decimal, CalcError> {
        loan_constant(self.interest_rate, self.amortization_years)
    }

    pub fn loan_amount(&self, price: Decimal) -> Decimal {
        price * self.ltv
    }

    pub fn down_payment(&self, price: Decimal) -> Decimal {
        price * (Decimal::ONE - self.ltv)
    }

    /// Debt service for a year on the loan at `price`
    pub fn annual_debt_service(&self, price: Decimal, loan_constant: Decimal) -> Decimal {
        self.loan_amount(price) * loan_constant
    }
}

/// Fixed monthly payment that fully amortizes `principal` over `years`.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate: Decimal,
    years: u32,
) -> Result<Decimal, CalcError> {
    non_negative(principal, "principal")?;
    non_negative(annual_rate, "interest rate")?;
    if years == 0 {
        return Err(CalcError::InvalidTerm { years });
    }

    let r = annual_rate / MONTHS_PER_YEAR;
    let n = i64::from(years) * 12;
    if r.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let growth = (Decimal::ONE + r)
        .checked_powi(n)
        .ok_or(CalcError::Overflow("compound growth factor"))?;
    let payment = principal
        .checked_mul(r * growth)
        .and_then(|num| num.checked_div(growth - Decimal::ONE))
        .ok_or(CalcError::Overflow("monthly payment"))?;
    log::debug!("Monthly payment on {principal} at {annual_rate} over {years}y: {payment}");
    Ok(payment)
}

/// Annual loan constant: twelve monthly payments on one unit of principal.
pub fn loan_constant(annual_rate: Decimal, years: u32) -> Result<Decimal, CalcError> {
    Ok(monthly_payment(Decimal::ONE, annual_rate, years)? * MONTHS_PER_YEAR)
}
