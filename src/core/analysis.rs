use super::comps::{self, RentCompSummary, SaleCompSummary};
use super::error::{ratio, CalcError};
use super::matrix::PricingMatrix;
use super::operating::{build_scenarios, OperatingStatement, Scenarios};
use super::rent_roll;
use super::returns::{PropertyScale, ReturnMetrics};
use super::warnings::Warning;
use crate::config::ReportConfig;
use rust_decimal::Decimal;
use serde::Serialize;

/// Rent roll aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentRollSummary {
    pub unit_count: usize,
    pub total_sf: u32,
    pub monthly: Scenarios<Decimal>,
    pub average_rent: Scenarios<Decimal>,
    pub rent_per_sf: Scenarios<Decimal>,
    /// Market over current monthly rent, minus one
    pub rent_upside: Decimal,
}

/// Rent comp statistics for one group, next to the subject's own numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentCompGroupSummary {
    pub comps: Option<RentCompSummary>,
    pub subject_current_average: Option<Decimal>,
    /// Market assumption over current average, minus one
    pub subject_discount: Option<Decimal>,
}

/// Every derived figure the report shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub price: Decimal,
    pub loan_constant: Decimal,
    pub rent_roll: RentRollSummary,
    pub statements: Scenarios<OperatingStatement>,
    pub returns: Scenarios<ReturnMetrics>,
    pub matrix: PricingMatrix,
    pub sale_comps: Option<SaleCompSummary>,
    pub rent_comps: Vec<RentCompGroupSummary>,
    pub warnings: Vec<Warning>,
}

impl Analysis {
    /// Analyze the configured listing at its suggested price.
    pub fn compute(config: &ReportConfig) -> Result<Self, CalcError> {
        Self::at_price(config, config.property.suggested_price)
    }

    pub fn at_price(config: &ReportConfig, price: Decimal) -> Result<Self, CalcError> {
        config.financing.validate()?;
        let units = &config.rent_roll;
        let mut warnings = Vec::new();

        if config.property.units as usize != units.len() {
            warnings.push(Warning::UnitCountMismatch {
                configured: config.property.units,
                rent_roll: units.len(),
            });
        }

        let statements = build_scenarios(units, &config.operating, &config.expenses)?;
        let loan_constant = config.financing.loan_constant()?;
        let scale = PropertyScale {
            units: config.property.units,
            building_sf: config.property.building_sf,
        };
        let returns = Scenarios::try_new(|column| {
            ReturnMetrics::for_statement(
                statements.get(column),
                price,
                &config.financing,
                loan_constant,
                scale,
            )
        })?;

        let matrix = PricingMatrix::generate(
            config.pricing_matrix,
            price,
            &statements,
            &config.financing,
            loan_constant,
            scale,
        )?;
        warnings.extend(matrix.warning.clone());

        let rent_roll = summarize_rent_roll(config)?;
        let sale_comps = comps::summarize_sales(&config.sale_comps.comps)?;
        let rent_comps = config
            .rent_comps
            .groups
            .iter()
            .map(|group| {
                let subject_current_average = group.subject_current_average(units);
                let subject_discount = subject_current_average
                    .map(|avg| ratio(group.subject_rent - avg, avg, "subject current rent"))
                    .transpose()?;
                Ok(RentCompGroupSummary {
                    comps: comps::summarize_rents(&group.comps)?,
                    subject_current_average,
                    subject_discount,
                })
            })
            .collect::<Result<Vec<_>, CalcError>>()?;

        for w in &warnings {
            log::warn!("{w}");
        }

        Ok(Self {
            price,
            loan_constant,
            rent_roll,
            statements,
            returns,
            matrix,
            sale_comps,
            rent_comps,
            warnings,
        })
    }
}

fn summarize_rent_roll(config: &ReportConfig) -> Result<RentRollSummary, CalcError> {
    let units = &config.rent_roll;
    let total_sf = rent_roll::total_sf(units);
    let monthly: Scenarios<Decimal> =
        Scenarios::try_new(|c| Ok::<_, CalcError>(rent_roll::total_monthly(units, c)))?;
    let count = Decimal::from(units.len());

    Ok(RentRollSummary {
        unit_count: units.len(),
        total_sf,
        average_rent: Scenarios::try_new(|c| ratio(*monthly.get(c), count, "rent roll"))?,
        rent_per_sf: Scenarios::try_new(|c| {
            ratio(*monthly.get(c), total_sf.into(), "rent roll area")
        })?,
        rent_upside: ratio(
            monthly.market - monthly.current,
            monthly.current,
            "current monthly rent",
        )?,
        monthly,
    })
}
