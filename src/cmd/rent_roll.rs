//! Rent roll command - unit-level rents with totals

use super::ConfigArgs;
use crate::core::{rent_roll, RentColumn, RentUnit};
use crate::format::{number, usd, usd_cents};
use crate::utils;
use clap::Args;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RentRollCommand {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl RentRollCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = self.config.load()?;
        if self.csv {
            utils::write_csv(&config.rent_roll, io::stdout())
        } else {
            self.print_table(&config.rent_roll);
            Ok(())
        }
    }

    fn print_table(&self, units: &[RentUnit]) {
        if units.is_empty() {
            println!("Rent roll is empty");
            return;
        }

        let per_sf = |v: Option<_>| v.map(usd_cents).unwrap_or_default();
        let mut rows: Vec<_> = units
            .iter()
            .map(|u| RentRollRow {
                unit: u.unit.clone(),
                unit_type: u.unit_type.clone(),
                sf: number(u.sf.into(), 0),
                current: usd(u.current_rent),
                current_sf: per_sf(u.rent_per_sf(RentColumn::Current)),
                market: usd(u.market_rent),
                market_sf: per_sf(u.rent_per_sf(RentColumn::Market)),
            })
            .collect();

        let total_sf = rent_roll::total_sf(units);
        let total = |column| rent_roll::total_monthly(units, column);
        let total_per_sf = |column| {
            (total_sf > 0)
                .then(|| total(column) / rust_decimal::Decimal::from(total_sf))
                .map(usd_cents)
                .unwrap_or_default()
        };
        rows.push(RentRollRow {
            unit: String::new(),
            unit_type: "Totals / Avg".to_string(),
            sf: number(total_sf.into(), 0),
            current: usd(total(RentColumn::Current)),
            current_sf: total_per_sf(RentColumn::Current),
            market: usd(total(RentColumn::Market)),
            market_sf: total_per_sf(RentColumn::Market),
        });

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

#[derive(Debug, Clone, Tabled)]
struct RentRollRow {
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Type")]
    unit_type: String,
    #[tabled(rename = "SF")]
    sf: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Rent/SF")]
    current_sf: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Mkt Rent/SF")]
    market_sf: String,
}
