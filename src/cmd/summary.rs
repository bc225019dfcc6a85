//! Summary command - headline valuation figures at a price

use super::ConfigArgs;
use crate::core::{Analysis, RentColumn, Warning};
use crate::format::{multiple, pct, usd, usd_cents};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    #[command(flatten)]
    config: ConfigArgs,

    /// Price to analyze (defaults to the suggested list price)
    #[arg(short, long)]
    price: Option<Decimal>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData<'a> {
    address: String,
    price: String,
    price_per_unit: String,
    price_per_sf: String,
    loan_amount: String,
    down_payment: String,
    annual_debt_service: String,
    current: ScenarioSummary,
    market: ScenarioSummary,
    rent_upside_pct: String,
    warnings: &'a [Warning],
}

#[derive(Debug, Serialize)]
struct ScenarioSummary {
    gross_scheduled_rent: String,
    effective_gross_income: String,
    total_expenses: String,
    net_operating_income: String,
    cash_flow: String,
    cap_rate_pct: String,
    grm: String,
    cash_on_cash_pct: String,
    debt_coverage_ratio: String,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = self.config.load()?;
        let price = self.price.unwrap_or(config.property.suggested_price);
        let analysis = Analysis::at_price(&config, price)?;

        if self.json {
            self.print_json(&config.property.full_address(), &analysis)
        } else {
            self.print_summary(&config.property.full_address(), &analysis);
            Ok(())
        }
    }

    fn print_summary(&self, address: &str, analysis: &Analysis) {
        let market = &analysis.returns.market;
        println!();
        println!("BROKER OPINION OF VALUE - {address}");
        println!();
        println!(
            "  Price: {} | {}/unit | {}/SF",
            usd(analysis.price),
            usd(market.price_per_unit),
            usd_cents(market.price_per_sf)
        );
        println!(
            "  Loan: {} | Down: {} | Debt Service: {}/yr",
            usd(market.loan_amount),
            usd(market.down_payment),
            usd(market.annual_debt_service)
        );
        println!();

        for column in RentColumn::BOTH {
            let s = analysis.statements.get(column);
            let r = analysis.returns.get(column);
            println!("{}", column.label().to_uppercase());
            println!(
                "  GSR: {} | EGI: {} | Expenses: {} | NOI: {}",
                usd(s.gross_scheduled_rent),
                usd(s.effective_gross_income),
                usd(s.total_expenses),
                usd(s.net_operating_income)
            );
            println!(
                "  Cap: {} | GRM: {} | Cash-on-Cash: {} | DCR: {}",
                pct(r.cap_rate),
                multiple(r.grm),
                pct(r.cash_on_cash),
                multiple(r.debt_coverage_ratio)
            );
            println!();
        }

        println!("RENT UPSIDE: {}", pct(analysis.rent_roll.rent_upside));
        for w in &analysis.warnings {
            println!("WARNING: {w}");
        }
        println!();
    }

    fn print_json(&self, address: &str, analysis: &Analysis) -> anyhow::Result<()> {
        let scenario = |column: RentColumn| {
            let s = analysis.statements.get(column);
            let r = analysis.returns.get(column);
            ScenarioSummary {
                gross_scheduled_rent: format!("{:.2}", s.gross_scheduled_rent),
                effective_gross_income: format!("{:.2}", s.effective_gross_income),
                total_expenses: format!("{:.2}", s.total_expenses),
                net_operating_income: format!("{:.2}", s.net_operating_income),
                cash_flow: format!("{:.2}", r.cash_flow(s.net_operating_income)),
                cap_rate_pct: format!("{:.2}", r.cap_rate * Decimal::ONE_HUNDRED),
                grm: format!("{:.2}", r.grm),
                cash_on_cash_pct: format!("{:.2}", r.cash_on_cash * Decimal::ONE_HUNDRED),
                debt_coverage_ratio: format!("{:.2}", r.debt_coverage_ratio),
            }
        };
        let market = &analysis.returns.market;

        let data = SummaryData {
            address: address.to_string(),
            price: format!("{:.2}", analysis.price),
            price_per_unit: format!("{:.2}", market.price_per_unit),
            price_per_sf: format!("{:.2}", market.price_per_sf),
            loan_amount: format!("{:.2}", market.loan_amount),
            down_payment: format!("{:.2}", market.down_payment),
            annual_debt_service: format!("{:.2}", market.annual_debt_service),
            current: scenario(RentColumn::Current),
            market: scenario(RentColumn::Market),
            rent_upside_pct: format!("{:.2}", analysis.rent_roll.rent_upside * Decimal::ONE_HUNDRED),
            warnings: &analysis.warnings,
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
