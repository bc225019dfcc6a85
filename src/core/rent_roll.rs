use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Which rent column a calculation reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RentColumn {
    /// In-place rents
    Current,
    /// Market (pro forma) rents
    Market,
}

impl RentColumn {
    pub const BOTH: [RentColumn; 2] = [RentColumn::Current, RentColumn::Market];

    pub fn label(self) -> &'static str {
        match self {
            RentColumn::Current => "Current",
            RentColumn::Market => "Pro Forma",
        }
    }
}

/// A single unit on the rent roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RentUnit {
    /// Unit identifier, e.g. "#101"
    pub unit: String,
    /// Bedroom / bath description, e.g. "3 Bed / 1.5 Bath"
    #[serde(rename = "type")]
    pub unit_type: String,
    /// Floor area in square feet
    pub sf: u32,
    /// Current monthly rent
    #[schemars(with = "f64")]
    pub current_rent: Decimal,
    /// Market monthly rent
    #[schemars(with = "f64")]
    pub market_rent: Decimal,
}

impl RentUnit {
    pub fn rent(&self, column: RentColumn) -> Decimal {
        match column {
            RentColumn::Current => self.current_rent,
            RentColumn::Market => self.market_rent,
        }
    }

    /// Monthly rent per square foot, `None` for a unit with no recorded area.
    pub fn rent_per_sf(&self, column: RentColumn) -> Option<Decimal> {
        if self.sf == 0 {
            None
        } else {
            Some(self.rent(column) / Decimal::from(self.sf))
        }
    }
}

pub const CSV_COLUMNS: &[&str] = &["unit", "type", "sf", "current_rent", "market_rent"];

/// Sum of monthly rents for the selected column
pub fn total_monthly(units: &[RentUnit], column: RentColumn) -> Decimal {
    units.iter().map(|u| u.rent(column)).sum()
}

/// Total rentable area across all units
pub fn total_sf(units: &[RentUnit]) -> u32 {
    units.iter().map(|u| u.sf).sum()
}

/// Read a rent roll from CSV with the columns in [`CSV_COLUMNS`].
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RentUnit>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let units = rdr.deserialize().collect::<Result<Vec<RentUnit>, _>>()?;
    log::info!("Read {} rent roll records", units.len());
    Ok(units)
}
