use super::error::{ratio, CalcError};
use super::rent_roll::RentUnit;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Latitude / longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

/// A closed comparable sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SaleComp {
    pub address: String,
    pub city: String,
    pub units: u32,
    pub sf: u32,
    /// Month of sale, e.g. "12/2025"
    pub sale_date: String,
    #[schemars(with = "f64")]
    pub price: Decimal,
    /// Annual gross income
    #[schemars(with = "f64")]
    pub gross: Decimal,
    #[schemars(with = "f64")]
    pub noi: Decimal,
    /// Days on market, if known
    pub dom: Option<u32>,
    #[serde(default)]
    pub notes: String,
    pub coords: Coords,
}

/// Derived pricing metrics for one sale comp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleCompMetrics {
    pub price_per_unit: Decimal,
    pub price_per_sf: Decimal,
    pub cap_rate: Decimal,
    pub grm: Decimal,
}

impl SaleComp {
    pub fn metrics(&self) -> Result<SaleCompMetrics, CalcError> {
        Ok(SaleCompMetrics {
            price_per_unit: ratio(self.price, self.units.into(), "comp unit count")?,
            price_per_sf: ratio(self.price, self.sf.into(), "comp building area")?,
            cap_rate: ratio(self.noi, self.price, "comp price")?,
            grm: ratio(self.price, self.gross, "comp gross income")?,
        })
    }
}

/// A leased comparable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RentComp {
    pub address: String,
    /// Bed/bath shorthand, e.g. "3/2"
    #[serde(rename = "type")]
    pub unit_type: String,
    pub sf: u32,
    #[schemars(with = "f64")]
    pub rent: Decimal,
    /// Month leased, e.g. "02/2025"
    pub date: String,
    pub coords: Coords,
}

impl RentComp {
    pub fn rent_per_sf(&self) -> Result<Decimal, CalcError> {
        ratio(self.rent, self.sf.into(), "comp unit area")
    }
}

/// Rent comps for one bedroom count, compared against the subject's market rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RentCompGroup {
    /// Heading, e.g. "3-Bedroom Comparables"
    pub title: String,
    /// Rent roll unit types starting with this prefix are the subject's
    /// counterpart, e.g. "3 Bed"
    pub subject_type: String,
    /// Subject market rent assumption for this unit type
    #[schemars(with = "f64")]
    pub subject_rent: Decimal,
    pub comps: Vec<RentComp>,
    #[serde(default)]
    pub narrative: Vec<String>,
}

impl RentCompGroup {
    /// Average in-place rent of the subject's units of this type
    pub fn subject_current_average(&self, rent_roll: &[RentUnit]) -> Option<Decimal> {
        let rents: Vec<_> = rent_roll
            .iter()
            .filter(|u| u.unit_type.starts_with(&self.subject_type))
            .map(|u| u.current_rent)
            .collect();
        if rents.is_empty() {
            None
        } else {
            Some(mean(rents.into_iter()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleCompSummary {
    pub rows: Vec<SaleCompMetrics>,
    pub average_price: Decimal,
    pub average_price_per_unit: Decimal,
    pub average_cap_rate: Decimal,
    pub average_grm: Decimal,
    pub min_cap_rate: Decimal,
    pub max_cap_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentCompSummary {
    pub rent_per_sf: Vec<Decimal>,
    pub average_rent: Decimal,
    pub average_rent_per_sf: Decimal,
}

fn mean(values: impl ExactSizeIterator<Item = Decimal>) -> Decimal {
    let n = values.len();
    let total: Decimal = values.sum();
    total / Decimal::from(n)
}

/// Per-comp metrics and set averages; `None` for an empty set.
pub fn summarize_sales(comps: &[SaleComp]) -> Result<Option<SaleCompSummary>, CalcError> {
    if comps.is_empty() {
        return Ok(None);
    }
    let rows = comps
        .iter()
        .map(SaleComp::metrics)
        .collect::<Result<Vec<_>, _>>()?;
    let caps = || rows.iter().map(|m| m.cap_rate);

    Ok(Some(SaleCompSummary {
        average_price: mean(comps.iter().map(|c| c.price)),
        average_price_per_unit: mean(rows.iter().map(|m| m.price_per_unit)),
        average_cap_rate: mean(caps()),
        average_grm: mean(rows.iter().map(|m| m.grm)),
        min_cap_rate: caps().min().unwrap_or_default(),
        max_cap_rate: caps().max().unwrap_or_default(),
        rows,
    }))
}

pub fn summarize_rents(comps: &[RentComp]) -> Result<Option<RentCompSummary>, CalcError> {
    if comps.is_empty() {
        return Ok(None);
    }
    let rent_per_sf = comps
        .iter()
        .map(RentComp::rent_per_sf)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(RentCompSummary {
        average_rent: mean(comps.iter().map(|c| c.rent)),
        average_rent_per_sf: mean(rent_per_sf.iter().copied()),
        rent_per_sf,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HERE: Coords = Coords { lat: 34.0, lng: -118.0 };

    fn sale(units: u32, price: Decimal, gross: Decimal, noi: Decimal) -> SaleComp {
        SaleComp {
            address: "1 Main St".to_string(),
            city: "Canoga Park".to_string(),
            units,
            sf: 20000,
            sale_date: "10/2025".to_string(),
            price,
            gross,
            noi,
            dom: None,
            notes: String::new(),
            coords: HERE,
        }
    }

    fn lease(sf: u32, rent: Decimal) -> RentComp {
        RentComp {
            address: "2 Main St".to_string(),
            unit_type: "3/2".to_string(),
            sf,
            rent,
            date: "02/2025".to_string(),
            coords: HERE,
        }
    }

    #[test]
    fn sale_comp_metrics() {
        let m = sale(28, dec!(4800000), dec!(510924), dec!(276000))
            .metrics()
            .unwrap();
        assert_eq!(m.price_per_sf, dec!(240));
        assert_eq!(m.cap_rate, dec!(0.0575));
        assert_eq!(m.price_per_unit.round_dp(2), dec!(171428.57));
        assert_eq!(m.grm.round_dp(2), dec!(9.39));
    }

    #[test]
    fn sale_summary_averages() {
        let comps = vec![
            sale(10, dec!(1000000), dec!(100000), dec!(50000)),
            sale(20, dec!(3000000), dec!(250000), dec!(180000)),
        ];
        let s = summarize_sales(&comps).unwrap().unwrap();
        assert_eq!(s.average_price, dec!(2000000));
        assert_eq!(s.average_price_per_unit, dec!(125000));
        assert_eq!(s.average_cap_rate, dec!(0.055));
        assert_eq!(s.average_grm, dec!(11));
        assert_eq!(s.min_cap_rate, dec!(0.05));
        assert_eq!(s.max_cap_rate, dec!(0.06));
    }

    #[test]
    fn empty_sets_have_no_summary() {
        assert_eq!(summarize_sales(&[]), Ok(None));
        assert_eq!(summarize_rents(&[]), Ok(None));
    }

    #[test]
    fn rent_summary_averages() {
        let comps = vec![lease(1000, dec!(3000)), lease(1500, dec!(3600))];
        let s = summarize_rents(&comps).unwrap().unwrap();
        assert_eq!(s.average_rent, dec!(3300));
        assert_eq!(s.rent_per_sf, vec![dec!(3), dec!(2.4)]);
        assert_eq!(s.average_rent_per_sf, dec!(2.7));
    }

    #[test]
    fn subject_average_matches_unit_type_prefix() {
        let unit = |t: &str, rent: Decimal| RentUnit {
            unit: "#1".to_string(),
            unit_type: t.to_string(),
            sf: 1100,
            current_rent: rent,
            market_rent: rent,
        };
        let roll = vec![
            unit("3 Bed / 1.5 Bath", dec!(1830)),
            unit("3 Bed / 1.5 Bath", dec!(2020)),
            unit("4 Bed / 2 Bath (Mgr)", dec!(3200)),
        ];
        let group = RentCompGroup {
            title: "3-Bedroom Comparables".to_string(),
            subject_type: "3 Bed".to_string(),
            subject_rent: dec!(2950),
            comps: vec![],
            narrative: vec![],
        };
        assert_eq!(group.subject_current_average(&roll), Some(dec!(1925)));

        let group = RentCompGroup {
            subject_type: "2 Bed".to_string(),
            ..group
        };
        assert_eq!(group.subject_current_average(&roll), None);
    }

    #[test]
    fn zero_area_comp_is_invalid() {
        assert!(lease(0, dec!(3000)).rent_per_sf().is_err());
    }
}
