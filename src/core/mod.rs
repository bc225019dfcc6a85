pub mod analysis;
pub mod comps;
pub mod error;
pub mod expenses;
pub mod financing;
pub mod matrix;
pub mod operating;
pub mod rent_roll;
pub mod returns;
pub mod warnings;

pub use analysis::{Analysis, RentCompGroupSummary};
pub use comps::{Coords, RentCompGroup, SaleComp};
pub use expenses::ExpenseLedger;
pub use financing::FinancingTerms;
pub use matrix::{PriceRange, PricingMatrixRow};
pub use operating::{OperatingAssumptions, OperatingStatement};
pub use rent_roll::{RentColumn, RentUnit};
pub use warnings::Warning;
