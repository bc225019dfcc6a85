use super::error::{non_negative, CalcError};
use super::financing::FinancingTerms;
use super::operating::{OperatingStatement, Scenarios};
use super::returns::{PropertyScale, ReturnMetrics};
use super::warnings::Warning;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const MAX_ROWS: u32 = 10_000;

/// Inclusive price sweep `low..=high` by `step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceRange {
    #[schemars(with = "f64")]
    pub low: Decimal,
    #[schemars(with = "f64")]
    pub high: Decimal,
    #[schemars(with = "f64")]
    pub step: Decimal,
}

impl PriceRange {
    fn validate(&self) -> Result<(), CalcError> {
        non_negative(self.low, "pricing matrix low")?;
        if self.step <= Decimal::ZERO || self.high < self.low {
            return Err(CalcError::InvalidRange {
                low: self.low,
                high: self.high,
                step: self.step,
            });
        }
        Ok(())
    }

    /// Price points at exact multiples of `step` above `low`.
    pub fn prices(&self) -> Result<Vec<Decimal>, CalcError> {
        self.validate()?;
        let count = (self.high - self.low)
            .checked_div(self.step)
            .and_then(|steps| steps.floor().to_u32())
            .filter(|&count| count < MAX_ROWS)
            .ok_or(CalcError::Overflow("pricing matrix size"))?;
        Ok((0..=count)
            .map(|k| self.low + self.step * Decimal::from(k))
            .collect())
    }

    /// Find why `price` cannot be highlighted, if it cannot.
    pub fn check(&self, price: Decimal) -> Option<Warning> {
        if price < self.low || price > self.high {
            Some(Warning::SuggestedPriceOutOfRange {
                price,
                low: self.low,
                high: self.high,
            })
        } else if !((price - self.low) % self.step).is_zero() {
            Some(Warning::SuggestedPriceOffGrid {
                price,
                step: self.step,
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingMatrixRow {
    pub price: Decimal,
    pub cap_rate_current: Decimal,
    pub cap_rate_market: Decimal,
    pub price_per_unit: Decimal,
    pub price_per_sf: Decimal,
    pub grm: Decimal,
    pub cash_on_cash: Decimal,
    pub debt_coverage_ratio: Decimal,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingMatrix {
    pub range: PriceRange,
    pub rows: Vec<PricingMatrixRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

impl PricingMatrix {
    /// Sweep the range with market NOI/GSR, flagging the row priced at `suggested`.
    pub fn generate(
        range: PriceRange,
        suggested: Decimal,
        statements: &Scenarios<OperatingStatement>,
        financing: &FinancingTerms,
        loan_constant: Decimal,
        scale: PropertyScale,
    ) -> Result<Self, CalcError> {
        let rows = range
            .prices()?
            .into_iter()
            .map(|price| {
                let market = ReturnMetrics::for_statement(
                    &statements.market,
                    price,
                    financing,
                    loan_constant,
                    scale,
                )?;
                let current = ReturnMetrics::for_statement(
                    &statements.current,
                    price,
                    financing,
                    loan_constant,
                    scale,
                )?;
                Ok(PricingMatrixRow {
                    price,
                    cap_rate_current: current.cap_rate,
                    cap_rate_market: market.cap_rate,
                    price_per_unit: market.price_per_unit,
                    price_per_sf: market.price_per_sf,
                    grm: market.grm,
                    cash_on_cash: market.cash_on_cash,
                    debt_coverage_ratio: market.debt_coverage_ratio,
                    highlight: price == suggested,
                })
            })
            .collect::<Result<Vec<_>, CalcError>>()?;

        let warning = range.check(suggested);
        log::debug!("Pricing matrix: {} rows", rows.len());

        Ok(Self {
            range,
            rows,
            warning,
        })
    }

    pub fn highlighted(&self) -> Option<&PricingMatrixRow> {
        self.rows.iter().find(|r| r.highlight)
    }
}
