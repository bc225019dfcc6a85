//! `{placeholder}` substitution for configured prose.

use super::escape;
use crate::config::ReportConfig;
use crate::core::{Analysis, RentCompGroup, RentCompGroupSummary};
use crate::format;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Named values available to narrative paragraphs
#[derive(Debug, Clone, Default)]
pub struct Vars(BTreeMap<&'static str, String>);

impl Vars {
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.0.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Replace each `{name}` with its escaped value. Braces that do not
    /// enclose a known name are copied through unchanged.
    pub fn fill(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let name = after
                .find('}')
                .map(|close| &after[..close])
                .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            match name.map(|n| (n, self.get(n))) {
                Some((n, Some(value))) => {
                    out.push_str(&escape(value));
                    rest = &after[n.len() + 1..];
                }
                Some((n, None)) => {
                    log::warn!("Unknown narrative placeholder {{{n}}}");
                    out.push('{');
                    rest = after;
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Values describing the subject listing and its analysis
    pub fn for_report(config: &ReportConfig, analysis: &Analysis) -> Self {
        let p = &config.property;
        let f = &config.financing;
        let rr = &analysis.rent_roll;
        let avg_unit_sf = if p.units == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(p.building_sf) / Decimal::from(p.units)
        };

        let mut vars = Vars::default();
        vars.set("address", p.address.as_str())
            .set("full_address", p.full_address())
            .set("units", p.units.to_string())
            .set("year_built", p.year_built.to_string())
            .set("building_sf", format::number(p.building_sf.into(), 0))
            .set("lot_acres", p.lot_acres.to_string())
            .set("avg_unit_sf", format::number(avg_unit_sf, 0))
            .set("owner", p.owner.as_str())
            .set("ownership_since", p.ownership_since.as_str())
            .set("assessed_value", format::usd(p.assessed_value))
            .set("annual_tax", format::usd(p.annual_tax))
            .set("price", format::usd(analysis.price))
            .set("price_per_unit", format::usd(analysis.returns.market.price_per_unit))
            .set("price_per_sf", format::usd_cents(analysis.returns.market.price_per_sf))
            .set("current_cap_rate", format::pct(analysis.returns.current.cap_rate))
            .set("market_cap_rate", format::pct(analysis.returns.market.cap_rate))
            .set("market_grm", format::multiple(analysis.returns.market.grm))
            .set("current_gsr", format::usd(analysis.statements.current.gross_scheduled_rent))
            .set("market_gsr", format::usd(analysis.statements.market.gross_scheduled_rent))
            .set("rent_upside", format::pct(rr.rent_upside))
            .set("avg_current_rent", format::usd(rr.average_rent.current))
            .set("ltv", format::pct(f.ltv))
            .set("interest_rate", format::pct(f.interest_rate))
            .set("amortization_years", f.amortization_years.to_string())
            .set("market_cash_on_cash", format::pct(analysis.returns.market.cash_on_cash))
            .set("market_dcr", format::multiple(analysis.returns.market.debt_coverage_ratio))
            .set(
                "occupancy",
                format::pct(Decimal::ONE - config.operating.vacancy_rate),
            );

        if let Some(sales) = &analysis.sale_comps {
            vars.set("sale_avg_price_per_unit", format::usd(sales.average_price_per_unit))
                .set("sale_min_cap_rate", format::pct(sales.min_cap_rate))
                .set("sale_max_cap_rate", format::pct(sales.max_cap_rate));
        }
        vars
    }

    /// Report values plus the statistics of one rent comp group
    pub fn with_rent_group(&self, group: &RentCompGroup, summary: &RentCompGroupSummary) -> Self {
        let mut vars = self.clone();
        vars.set("subject_rent", format::usd(group.subject_rent));
        if let Some(comps) = &summary.comps {
            vars.set("comp_avg_rent", format::usd(comps.average_rent))
                .set("comp_avg_rent_per_sf", format::usd_cents(comps.average_rent_per_sf));
        }
        if let Some(avg) = summary.subject_current_average {
            vars.set("subject_current_rent", format::usd(avg));
        }
        if let Some(discount) = summary.subject_discount {
            vars.set("subject_discount", format::pct_dp(discount, 0));
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Vars {
        let mut v = Vars::default();
        v.set("price", "$4,850,000").set("owner", "H & Y");
        v
    }

    #[test]
    fn substitutes_known_names() {
        assert_eq!(
            vars().fill("List at {price} for {owner}."),
            "List at $4,850,000 for H &amp; Y."
        );
    }

    #[test]
    fn leaves_other_braces_alone() {
        assert_eq!(vars().fill("{unknown} {price"), "{unknown} {price");
        assert_eq!(vars().fill("a {} b { c }"), "a {} b { c }");
        assert_eq!(vars().fill("{{price}}"), "{$4,850,000}");
    }

    #[test]
    fn embedded_narrative_has_no_unresolved_placeholders() {
        let config = ReportConfig::embedded().unwrap();
        let analysis = Analysis::compute(&config).unwrap();
        let v = Vars::for_report(&config, &analysis);
        let n = &config.narrative;
        for p in n.overview.iter().chain(&n.history).chain(&n.sale_comps).chain(&n.financial) {
            let filled = v.fill(p);
            assert!(!filled.contains('{'), "unresolved placeholder in: {filled}");
        }
        for (group, summary) in config.rent_comps.groups.iter().zip(&analysis.rent_comps) {
            let gv = v.with_rent_group(group, summary);
            for p in &group.narrative {
                assert!(!gv.fill(p).contains('{'));
            }
        }
        assert_eq!(v.get("avg_unit_sf"), Some("1,217"));
        assert_eq!(v.get("market_dcr"), Some("2.33x"));
    }
}
