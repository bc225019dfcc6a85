use super::error::{non_negative, ratio, CalcError};
use super::financing::FinancingTerms;
use super::operating::OperatingStatement;
use rust_decimal::Decimal;
use serde::Serialize;

/// Denominators for per-unit and per-area pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyScale {
    pub units: u32,
    pub building_sf: u32,
}

/// Yield and leverage metrics at a given price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnMetrics {
    pub price: Decimal,
    pub cap_rate: Decimal,
    pub grm: Decimal,
    pub price_per_unit: Decimal,
    pub price_per_sf: Decimal,
    pub loan_amount: Decimal,
    pub down_payment: Decimal,
    pub annual_debt_service: Decimal,
    pub cash_on_cash: Decimal,
    pub debt_coverage_ratio: Decimal,
}

impl ReturnMetrics {
    /// `loan_constant` is passed in so a price sweep reuses one amortization result.
    pub fn compute(
        noi: Decimal,
        gross_scheduled_rent: Decimal,
        price: Decimal,
        financing: &FinancingTerms,
        loan_constant: Decimal,
        scale: PropertyScale,
    ) -> Result<Self, CalcError> {
        non_negative(price, "price")?;
        let loan_amount = financing.loan_amount(price);
        let down_payment = financing.down_payment(price);
        let annual_debt_service = financing.annual_debt_service(price, loan_constant);

        Ok(Self {
            price,
            cap_rate: ratio(noi, price, "price")?,
            grm: ratio(price, gross_scheduled_rent, "gross scheduled rent")?,
            price_per_unit: ratio(price, scale.units.into(), "unit count")?,
            price_per_sf: ratio(price, scale.building_sf.into(), "building area")?,
            loan_amount,
            down_payment,
            annual_debt_service,
            cash_on_cash: ratio(noi - annual_debt_service, down_payment, "down payment")?,
            debt_coverage_ratio: ratio(noi, annual_debt_service, "annual debt service")?,
        })
    }

    pub fn for_statement(
        statement: &OperatingStatement,
        price: Decimal,
        financing: &FinancingTerms,
        loan_constant: Decimal,
        scale: PropertyScale,
    ) -> Result<Self, CalcError> {
        Self::compute(
            statement.net_operating_income,
            statement.gross_scheduled_rent,
            price,
            financing,
            loan_constant,
            scale,
        )
    }

    /// Pre-tax cash flow after debt service
    pub fn cash_flow(&self, noi: Decimal) -> Decimal {
        noi - self.annual_debt_service
    }
}
