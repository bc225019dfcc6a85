//! Matrix command - returns across a sweep of list prices

use super::ConfigArgs;
use crate::core::{Analysis, PricingMatrixRow};
use crate::format::{multiple, pct, usd, usd_cents};
use crate::utils;
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct MatrixCommand {
    #[command(flatten)]
    config: ConfigArgs,

    /// Lowest price in the sweep
    #[arg(long)]
    low: Option<Decimal>,

    /// Highest price in the sweep
    #[arg(long)]
    high: Option<Decimal>,

    /// Price increment
    #[arg(long)]
    step: Option<Decimal>,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl MatrixCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut config = self.config.load()?;
        let range = &mut config.pricing_matrix;
        range.low = self.low.unwrap_or(range.low);
        range.high = self.high.unwrap_or(range.high);
        range.step = self.step.unwrap_or(range.step);

        let analysis = Analysis::compute(&config)?;
        if self.csv {
            utils::write_csv(&analysis.matrix.rows, io::stdout())
        } else {
            self.print_table(&analysis.matrix.rows);
            if let Some(row) = analysis.matrix.highlighted() {
                println!("* suggested list price {}", usd(row.price));
            }
            Ok(())
        }
    }

    fn print_table(&self, rows: &[PricingMatrixRow]) {
        let rows: Vec<_> = rows.iter().map(MatrixRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

#[derive(Debug, Clone, Tabled)]
struct MatrixRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Cap (Mkt)")]
    cap_market: String,
    #[tabled(rename = "Cap (Cur)")]
    cap_current: String,
    #[tabled(rename = "$/Unit")]
    per_unit: String,
    #[tabled(rename = "$/SF")]
    per_sf: String,
    #[tabled(rename = "GRM")]
    grm: String,
    #[tabled(rename = "Cash-on-Cash")]
    cash_on_cash: String,
    #[tabled(rename = "DCR")]
    dcr: String,
}

impl From<&PricingMatrixRow> for MatrixRow {
    fn from(r: &PricingMatrixRow) -> Self {
        Self {
            marker: if r.highlight { "*" } else { "" },
            price: usd(r.price),
            cap_market: pct(r.cap_rate_market),
            cap_current: pct(r.cap_rate_current),
            per_unit: usd(r.price_per_unit),
            per_sf: usd_cents(r.price_per_sf),
            grm: multiple(r.grm),
            cash_on_cash: pct(r.cash_on_cash),
            dcr: multiple(r.debt_coverage_ratio),
        }
    }
}
