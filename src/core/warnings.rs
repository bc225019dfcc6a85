use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Non-fatal findings emitted while computing an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Suggested price lies inside the matrix range but not on a step boundary,
    /// so no row is highlighted.
    SuggestedPriceOffGrid {
        #[schemars(with = "f64")]
        price: Decimal,
        #[schemars(with = "f64")]
        step: Decimal,
    },
    /// Suggested price lies outside the matrix range.
    SuggestedPriceOutOfRange {
        #[schemars(with = "f64")]
        price: Decimal,
        #[schemars(with = "f64")]
        low: Decimal,
        #[schemars(with = "f64")]
        high: Decimal,
    },
    /// Property unit count differs from the number of rent roll entries.
    UnitCountMismatch { configured: u32, rent_roll: usize },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::SuggestedPriceOffGrid { price, step } => write!(
                f,
                "suggested price {price} is not a multiple of the {step} matrix step; no row highlighted"
            ),
            Warning::SuggestedPriceOutOfRange { price, low, high } => write!(
                f,
                "suggested price {price} is outside the matrix range {low}..={high}; no row highlighted"
            ),
            Warning::UnitCountMismatch {
                configured,
                rent_roll,
            } => write!(
                f,
                "property lists {configured} units but the rent roll has {rent_roll}"
            ),
        }
    }
}
