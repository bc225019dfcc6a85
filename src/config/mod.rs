//! Report input document.
//!
//! The listing this tool was built for is embedded in the binary; any other
//! listing can be supplied as a JSON file with the same shape (see
//! `bov schema`).

use crate::core::{
    Coords, ExpenseLedger, FinancingTerms, OperatingAssumptions, PriceRange, RentCompGroup,
    RentUnit, SaleComp,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

const EMBEDDED: &str = include_str!("owensmouth.json");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid report configuration")]
    Json(#[from] serde_json::Error),
    #[error("invalid rent roll csv")]
    Csv(#[from] csv::Error),
}

/// Root of the report configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    /// Date the market data was collected
    pub as_of: NaiveDate,
    pub property: Property,
    pub rent_roll: Vec<RentUnit>,
    pub operating: OperatingAssumptions,
    pub expenses: ExpenseLedger,
    pub financing: FinancingTerms,
    pub pricing_matrix: PriceRange,
    #[serde(default)]
    pub sale_comps: SaleCompSection,
    #[serde(default)]
    pub rent_comps: RentCompSection,
    #[serde(default)]
    pub building_systems: BuildingSystems,
    #[serde(default)]
    pub regulatory: Regulatory,
    #[serde(default)]
    pub transaction_history: Vec<HistoryEntry>,
    #[serde(default)]
    pub narrative: Narrative,
    #[serde(default)]
    pub buyer_profile: BuyerProfile,
    pub photos: Photos,
    pub branding: Branding,
    #[serde(default)]
    pub team: Vec<TeamMember>,
}

/// Subject property attributes
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Property {
    pub address: String,
    pub city_state_zip: String,
    pub apn: String,
    pub year_built: u32,
    pub units: u32,
    pub building_sf: u32,
    pub lot_sf: u32,
    #[schemars(with = "f64")]
    pub lot_acres: Decimal,
    pub stories: u32,
    pub construction: String,
    pub zoning: String,
    pub toc_tier: String,
    pub rent_control: String,
    pub parking: String,
    pub community_plan: String,
    #[schemars(with = "f64")]
    pub suggested_price: Decimal,
    pub owner: String,
    pub ownership_since: String,
    #[schemars(with = "f64")]
    pub assessed_value: Decimal,
    #[schemars(with = "f64")]
    pub annual_tax: Decimal,
    pub coords: Coords,
}

impl Property {
    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.city_state_zip)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SaleCompSection {
    pub comps: Vec<SaleComp>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RentCompSection {
    pub groups: Vec<RentCompGroup>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildingSystem {
    pub system: String,
    pub condition: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BuildingSystems {
    pub items: Vec<BuildingSystem>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegulatoryItem {
    pub item: String,
    pub status: String,
}

/// A titled callout paragraph
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Note {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Regulatory {
    pub items: Vec<RegulatoryItem>,
    /// Data sources, rendered with the "as of" month appended
    #[serde(default)]
    pub sources: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// A prior event in the property's ownership history
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryEntry {
    pub date: String,
    pub event: String,
    #[schemars(with = "Option<f64>")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
}

/// Section prose. Paragraphs may reference computed values as `{name}`
/// placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Narrative {
    pub overview: Vec<String>,
    pub history: Vec<String>,
    pub sale_comps: Vec<String>,
    pub financial: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BuyerProfile {
    pub segments: Vec<Note>,
    pub closing: String,
}

/// Image paths, relative to the asset directory
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Photos {
    pub hero: PathBuf,
    #[serde(default)]
    pub grid: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Branding {
    pub team_name: String,
    pub logo: PathBuf,
    pub office: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub license: Option<String>,
    pub headshot: PathBuf,
}

impl ReportConfig {
    /// The built-in listing
    pub fn embedded() -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(EMBEDDED)?)
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading report configuration from {}", path.display());
        Self::read_json(std::io::BufReader::new(file))
    }

    /// Replace the rent roll with units read from a CSV file.
    pub fn with_rent_roll_csv(mut self, path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.rent_roll = crate::core::rent_roll::read_csv(file)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn embedded_config_parses() {
        let config = ReportConfig::embedded().unwrap();
        assert_eq!(config.property.units, 20);
        assert_eq!(config.rent_roll.len(), 20);
        assert_eq!(config.property.suggested_price, dec!(4850000));
        assert_eq!(config.expenses.total(), dec!(218555));
        assert_eq!(config.financing.interest_rate, dec!(0.0575));
        assert_eq!(config.sale_comps.comps.len(), 3);
        assert_eq!(config.rent_comps.groups.len(), 2);
        assert_eq!(config.photos.grid.len(), 4);
        assert_eq!(config.team.len(), 3);
    }

    #[test]
    fn full_address_joins_lines() {
        let config = ReportConfig::embedded().unwrap();
        assert_eq!(
            config.property.full_address(),
            "9015 N. Owensmouth Avenue, Canoga Park, CA 91304"
        );
    }

    #[test]
    fn embedded_config_round_trips_through_json() {
        let config = ReportConfig::embedded().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let again = ReportConfig::read_json(json.as_bytes()).unwrap();
        assert_eq!(again.rent_roll, config.rent_roll);
        assert_eq!(again.pricing_matrix, config.pricing_matrix);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ReportConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
