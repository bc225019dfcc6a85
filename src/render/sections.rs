use super::escape;
use super::maps::{popup, CompMap, Marker};
use super::narrative::Vars;
use super::ImageSet;
use crate::config::ReportConfig;
use crate::core::{Analysis, OperatingStatement, RentColumn};
use crate::format::{multiple, number, pct, pct_dp, usd, usd_cents};
use chrono::Datelike;
use rust_decimal::Decimal;

fn paragraphs(vars: &Vars, templates: &[String]) -> String {
    if templates.is_empty() {
        return String::new();
    }
    let body: String = templates
        .iter()
        .map(|p| format!("\n    <p>{}</p>", vars.fill(p)))
        .collect();
    format!("\n  <div class=\"narrative\">{body}\n  </div>")
}

fn note(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("\n  <p class=\"table-note\">{}</p>", escape(text))
    }
}

fn heading(config: &ReportConfig, title: &str) -> String {
    format!(
        r##"  <h2 class="section-title">{}</h2>
  <div class="section-subtitle">{}</div>
  <div class="gold-divider"></div>"##,
        escape(title),
        escape(&config.property.full_address())
    )
}

fn table(headers: &[&str], rows: &str) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    format!(
        r##"
  <div class="table-scroll">
  <table>
    <thead><tr>{head}</tr></thead>
    <tbody>{rows}</tbody>
  </table>
  </div>"##
    )
}

pub fn cover(config: &ReportConfig, images: &ImageSet) -> String {
    let p = &config.property;
    format!(
        r##"<div class="cover">
  <img src="{logo}" alt="{team}" class="cover-logo">
  <div class="cover-label">Broker Opinion of Value</div>
  <h1 class="cover-title">{address}</h1>
  <p class="cover-address">{city}</p>
  <div class="cover-divider"></div>
  <div class="cover-price-label">Suggested List Price</div>
  <div class="cover-price">{price}</div>
  <div class="cover-stats">
    <div class="cover-stat"><span class="cover-stat-value">{units}</span><span class="cover-stat-label">Units</span></div>
    <div class="cover-stat"><span class="cover-stat-value">{sf}</span><span class="cover-stat-label">Square Feet</span></div>
    <div class="cover-stat"><span class="cover-stat-value">{year}</span><span class="cover-stat-label">Year Built</span></div>
    <div class="cover-stat"><span class="cover-stat-value">{acres}</span><span class="cover-stat-label">Acres</span></div>
  </div>
  <p class="client-greeting" id="client-greeting">Prepared Exclusively for {owner}</p>
  <img src="{hero}" alt="{address}" class="cover-photo">
</div>"##,
        logo = images.logo,
        team = escape(&config.branding.team_name),
        address = escape(&p.address),
        city = escape(&p.city_state_zip),
        price = usd(p.suggested_price),
        units = p.units,
        sf = number(p.building_sf.into(), 0),
        year = p.year_built,
        acres = p.lot_acres,
        owner = escape(&p.owner),
        hero = images.hero,
    )
}

pub fn property_overview(config: &ReportConfig, images: &ImageSet, vars: &Vars) -> String {
    let p = &config.property;
    let grid: String = images
        .grid
        .iter()
        .map(|src| format!(r#"<img src="{src}" alt="Property Photo">"#))
        .collect();

    let profile = &config.buyer_profile;
    let buyer_profile = if profile.segments.is_empty() {
        String::new()
    } else {
        let items: String = profile
            .segments
            .iter()
            .map(|s| {
                format!(
                    "\n      <li><strong>{}</strong> &mdash; {}</li>",
                    escape(&s.title),
                    vars.fill(&s.body)
                )
            })
            .collect();
        format!(
            r##"
  <div class="buyer-profile">
    <div class="buyer-profile-label">Target Buyer Profile</div>
    <ul>{items}
    </ul>
    <p class="bp-closing">{closing}</p>
  </div>"##,
            closing = vars.fill(&profile.closing)
        )
    };

    let info = [
        ("Address", escape(&p.full_address())),
        ("APN", escape(&p.apn)),
        ("Year Built", p.year_built.to_string()),
        ("Total Units", p.units.to_string()),
        ("Building Size", format!("&plusmn;{} SF", number(p.building_sf.into(), 0))),
        (
            "Lot Size",
            format!("&plusmn;{} SF / {} Acres", number(p.lot_sf.into(), 0), p.lot_acres),
        ),
        ("Construction", escape(&p.construction)),
        ("Stories", p.stories.to_string()),
        ("Zoning", escape(&p.zoning)),
        ("TOC Tier", escape(&p.toc_tier)),
        ("Rent Control", escape(&p.rent_control)),
        ("Parking", escape(&p.parking)),
        ("Community Plan", escape(&p.community_plan)),
    ]
    .iter()
    .map(|(k, v)| format!("\n    <tr><td>{k}</td><td>{v}</td></tr>"))
    .collect::<String>();

    format!(
        r##"<div class="section">
{heading}
  <div class="photo-grid">{grid}</div>{narrative}{buyer_profile}
  <table class="info-table">{info}
  </table>
</div>"##,
        heading = heading(config, "Property Overview"),
        narrative = paragraphs(vars, &config.narrative.overview),
    )
}

pub fn building_systems(config: &ReportConfig) -> String {
    let rows: String = config
        .building_systems
        .items
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&s.system),
                escape(&s.condition),
                escape(&s.year)
            )
        })
        .collect();
    format!(
        r##"<div class="section section-alt">
{heading}{table}{note}
</div>"##,
        heading = heading(config, "Building Systems & Capital Improvements"),
        table = table(&["System", "Condition / Status", "Year"], &rows),
        note = note(&config.building_systems.note),
    )
}

pub fn regulatory(config: &ReportConfig) -> String {
    let reg = &config.regulatory;
    let rows: String = reg
        .items
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&r.item),
                escape(&r.status)
            )
        })
        .collect();
    let sources = format!(
        "{} Data as of {}.",
        reg.sources,
        config.as_of.format("%B %Y")
    );
    let notes: String = reg
        .notes
        .iter()
        .map(|n| {
            format!(
                "\n  <div class=\"condition-note\">\n    <strong>{}.</strong> {}\n  </div>",
                escape(&n.title),
                n.body
            )
        })
        .collect();
    format!(
        r##"<div class="section">
{heading}{table}{sources}{notes}
</div>"##,
        heading = heading(config, "Regulatory & Compliance Summary"),
        table = table(&["Item", "Status"], &rows),
        sources = note(sources.trim()),
    )
}

fn per_unit(config: &ReportConfig, amount: Decimal) -> String {
    match config.property.units {
        0 => "N/A".to_string(),
        n => usd(amount / Decimal::from(n)),
    }
}

pub fn transaction_history(config: &ReportConfig, analysis: &Analysis, vars: &Vars) -> String {
    let p = &config.property;
    let year = config.as_of.year();
    let mut rows: String = config
        .transaction_history
        .iter()
        .map(|h| {
            let (amount, each) = match h.amount {
                Some(a) => (usd(a), per_unit(config, a)),
                None => ("N/A".to_string(), "N/A".to_string()),
            };
            format!(
                "\n      <tr><td>{}</td><td>{}</td><td>{amount}</td><td>{each}</td><td>{}</td></tr>",
                escape(&h.date),
                escape(&h.event),
                escape(&h.notes)
            )
        })
        .collect();
    rows.push_str(&format!(
        "\n      <tr><td>{}</td><td>Assessed Value</td><td>{}</td><td>{}</td><td>Total assessed value; annual tax: {}</td></tr>",
        year - 1,
        usd(p.assessed_value),
        per_unit(config, p.assessed_value),
        usd(p.annual_tax)
    ));
    rows.push_str(&format!(
        "\n      <tr class=\"highlight\"><td>{year}</td><td>Suggested List Price</td><td>{}</td><td>{}</td><td>{} Broker Opinion of Value</td></tr>\n    ",
        usd(analysis.price),
        usd(analysis.returns.market.price_per_unit),
        escape(&config.branding.team_name)
    ));

    format!(
        r##"<div class="section section-alt">
{heading}{table}{narrative}
</div>"##,
        heading = heading(config, "Transaction History"),
        table = table(&["Date", "Event", "Amount", "$/Unit", "Notes"], &rows),
        narrative = paragraphs(vars, &config.narrative.history),
    )
}

pub fn sale_comps(config: &ReportConfig, analysis: &Analysis, vars: &Vars) -> String {
    let comps = &config.sale_comps.comps;
    let Some(summary) = &analysis.sale_comps else {
        return String::new();
    };

    let mut rows: String = comps
        .iter()
        .zip(&summary.rows)
        .enumerate()
        .map(|(i, (c, m))| {
            format!(
                "<tr><td>{}</td><td>{}, {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                i + 1,
                escape(&c.address),
                escape(&c.city),
                c.units,
                escape(&c.sale_date),
                usd(c.price),
                usd(m.price_per_unit),
                pct(m.cap_rate),
                multiple(m.grm),
                c.dom.map_or_else(|| "N/A".to_string(), |d| d.to_string()),
                escape(&c.notes)
            )
        })
        .collect();
    rows.push_str(&format!(
        r#"<tr class="summary"><td></td><td>Average</td><td></td><td></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td></td><td></td></tr>"#,
        usd(summary.average_price),
        usd(summary.average_price_per_unit),
        pct(summary.average_cap_rate),
        multiple(summary.average_grm)
    ));

    let map = CompMap {
        id: "saleMap",
        zoom: 13,
        padding: 0.15,
        subject: subject_marker(
            config,
            &format!("{} units | {}", config.property.units, usd(analysis.price)),
        ),
        comps: comps
            .iter()
            .zip(&summary.rows)
            .enumerate()
            .map(|(i, (c, m))| Marker {
                coords: c.coords,
                label: (i + 1).to_string(),
                popup: popup(
                    &c.address,
                    &format!(
                        "{} units | {} | {}/unit",
                        c.units,
                        usd(c.price),
                        usd(m.price_per_unit)
                    ),
                ),
            })
            .collect(),
    };

    format!(
        r##"<div class="section">
{heading}
  {map}{table}{note}{narrative}
</div>"##,
        heading = heading(config, "Comparable Sales (Closed)"),
        map = map.script(),
        table = table(
            &["#", "Address", "Units", "Sale Date", "Price", "$/Unit", "Cap", "GRM", "DOM", "Notes"],
            &rows
        ),
        note = note(&config.sale_comps.note),
        narrative = paragraphs(vars, &config.narrative.sale_comps),
    )
}

fn subject_marker(config: &ReportConfig, detail: &str) -> Marker {
    Marker {
        coords: config.property.coords,
        label: "&#9733;".to_string(),
        popup: popup(&format!("Subject: {}", config.property.address), detail),
    }
}

pub fn rent_comps(config: &ReportConfig, analysis: &Analysis, vars: &Vars) -> String {
    let groups = &config.rent_comps.groups;
    if groups.iter().all(|g| g.comps.is_empty()) {
        return String::new();
    }

    // Comps are numbered across groups so table rows match map pins.
    let mut number_from = 1;
    let mut tables = String::new();
    for (group, summary) in groups.iter().zip(&analysis.rent_comps) {
        let mut rows: String = group
            .comps
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let per_sf = c
                    .rent_per_sf()
                    .map(usd_cents)
                    .unwrap_or_else(|_| "N/A".to_string());
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{per_sf}</td></tr>\n",
                    number_from + i,
                    escape(&c.address),
                    escape(&c.unit_type),
                    number(c.sf.into(), 0),
                    usd(c.rent)
                )
            })
            .collect();
        number_from += group.comps.len();
        if let Some(s) = &summary.comps {
            rows.push_str(&format!(
                r#"<tr class="summary"><td></td><td>Average</td><td></td><td></td><td>{}</td><td>{}</td></tr>"#,
                usd(s.average_rent),
                usd_cents(s.average_rent_per_sf)
            ));
        }
        tables.push_str(&format!(
            "\n  <h3 class=\"sub-heading\">{}</h3>{}",
            escape(&group.title),
            table(&["#", "Address", "Type", "SF", "Rent", "$/SF"], &rows)
        ));
    }

    let narrative: String = groups
        .iter()
        .zip(&analysis.rent_comps)
        .flat_map(|(group, summary)| {
            let gv = vars.with_rent_group(group, summary);
            group
                .narrative
                .iter()
                .map(move |p| format!("\n    <p>{}</p>", gv.fill(p)))
                .collect::<Vec<_>>()
        })
        .collect();
    let narrative = if narrative.is_empty() {
        narrative
    } else {
        format!("\n  <div class=\"narrative\">{narrative}\n  </div>")
    };

    let map = CompMap {
        id: "rentMap",
        zoom: 12,
        padding: 0.1,
        subject: subject_marker(config, &format!("{} units", config.property.units)),
        comps: groups
            .iter()
            .flat_map(|g| &g.comps)
            .enumerate()
            .map(|(i, c)| Marker {
                coords: c.coords,
                label: (i + 1).to_string(),
                popup: popup(
                    &c.address,
                    &format!(
                        "{} | {} SF | {}/mo",
                        c.unit_type,
                        number(c.sf.into(), 0),
                        usd(c.rent)
                    ),
                ),
            })
            .collect(),
    };

    format!(
        r##"<div class="section section-alt">
{heading}
  {map}{tables}{note}{narrative}
</div>"##,
        heading = heading(config, "Rent Comparables"),
        map = map.script(),
        note = note(&config.rent_comps.note),
    )
}

pub fn financial_analysis(config: &ReportConfig, analysis: &Analysis, vars: &Vars) -> String {
    let rr = &analysis.rent_roll;
    let cur = &analysis.statements.current;
    let mkt = &analysis.statements.market;
    let ret = &analysis.returns;
    let f = &config.financing;
    let op = &config.operating;

    let per_sf = |rent: Option<Decimal>| rent.map(usd_cents).unwrap_or_else(|| "N/A".to_string());
    let mut rent_roll: String = config
        .rent_roll
        .iter()
        .map(|u| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&u.unit),
                escape(&u.unit_type),
                number(u.sf.into(), 0),
                usd(u.current_rent),
                per_sf(u.rent_per_sf(RentColumn::Current)),
                usd(u.market_rent),
                per_sf(u.rent_per_sf(RentColumn::Market))
            )
        })
        .collect();
    rent_roll.push_str(&format!(
        r#"<tr class="summary"><td></td><td>Totals / Avg</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        number(rr.total_sf.into(), 0),
        usd(rr.monthly.current),
        usd_cents(rr.rent_per_sf.current),
        usd(rr.monthly.market),
        usd_cents(rr.rent_per_sf.market)
    ));

    let both = |label: &str, a: String, b: String| {
        format!("\n          <tr><td>{label}</td><td>{a}</td><td>{b}</td></tr>")
    };
    let bold = |label: &str, a: Decimal, b: Decimal| {
        format!(
            "\n          <tr class=\"summary\"><td><strong>{label}</strong></td><td><strong>{}</strong></td><td><strong>{}</strong></td></tr>",
            usd(a),
            usd(b)
        )
    };

    let income = [
        both("Gross Scheduled Rent", usd(cur.gross_scheduled_rent), usd(mkt.gross_scheduled_rent)),
        both(
            &format!("Less: Vacancy ({})", pct(op.vacancy_rate)),
            format!("({})", usd(cur.vacancy_loss)),
            format!("({})", usd(mkt.vacancy_loss)),
        ),
        both(
            "Effective Rental Income",
            usd(cur.effective_rental_income),
            usd(mkt.effective_rental_income),
        ),
        both("Other Income", usd(cur.other_income), usd(mkt.other_income)),
        bold("Effective Gross Income", cur.effective_gross_income, mkt.effective_gross_income),
    ]
    .concat();

    let ratio = |s: &OperatingStatement| {
        s.expense_ratio()
            .map(|r| pct_dp(r, 1))
            .unwrap_or_else(|_| "N/A".to_string())
    };
    let mut expenses: String = config
        .expenses
        .items()
        .iter()
        .map(|e| both(&escape(&e.name), usd(e.amount), usd(e.amount)))
        .collect();
    expenses.push_str(&both(
        &format!("Management Fee ({})", pct(op.management_fee_pct)),
        usd(cur.management_fee),
        usd(mkt.management_fee),
    ));
    expenses.push_str(&bold("Total Expenses", cur.total_expenses, mkt.total_expenses));
    expenses.push_str(&both("Expenses % of EGI", ratio(cur), ratio(mkt)));
    expenses.push_str(&bold("Net Operating Income", cur.net_operating_income, mkt.net_operating_income));

    let returns = [
        both("Cap Rate", pct(ret.current.cap_rate), pct(ret.market.cap_rate)),
        both("GRM", multiple(ret.current.grm), multiple(ret.market.grm)),
        both("Cash-on-Cash", pct(ret.current.cash_on_cash), pct(ret.market.cash_on_cash)),
        both(
            "Debt Coverage Ratio",
            multiple(ret.current.debt_coverage_ratio),
            multiple(ret.market.debt_coverage_ratio),
        ),
    ]
    .concat();

    let terms = [
        ("Purchase Price".to_string(), usd(analysis.price)),
        (
            format!("Down Payment ({})", pct(Decimal::ONE - f.ltv)),
            usd(ret.market.down_payment),
        ),
        (format!("Loan Amount ({})", pct(f.ltv)), usd(ret.market.loan_amount)),
        ("Interest Rate".to_string(), pct(f.interest_rate)),
        ("Amortization".to_string(), format!("{} Years", f.amortization_years)),
        ("Loan Term".to_string(), format!("{} Years", f.loan_term_years)),
        ("Annual Debt Service".to_string(), usd(ret.market.annual_debt_service)),
    ]
    .iter()
    .map(|(k, v)| format!("\n          <tr><td>{k}</td><td>{v}</td></tr>"))
    .collect::<String>();

    let matrix: String = analysis
        .matrix
        .rows
        .iter()
        .map(|r| {
            format!(
                "<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                if r.highlight { r#" class="highlight""# } else { "" },
                usd(r.price),
                pct(r.cap_rate_market),
                pct(r.cap_rate_current),
                usd(r.price_per_unit),
                usd_cents(r.price_per_sf),
                multiple(r.grm),
                pct(r.cash_on_cash),
                multiple(r.debt_coverage_ratio)
            )
        })
        .collect();
    let matrix_note = format!(
        "Highlighted row indicates suggested list price. Returns based on {} LTV, {} interest rate, {}-year amortization. Cap rate and GRM based on pro forma income.",
        pct(f.ltv),
        pct(f.interest_rate),
        f.amortization_years
    );

    format!(
        r##"<div class="section section-alt">
{heading}
  <div class="metrics-grid">
    <div class="metric-card">
      <span class="metric-value">{cur_cap}</span>
      <span class="metric-label">Current Cap Rate</span>
      <span class="metric-sub">{mkt_cap} Market</span>
    </div>
    <div class="metric-card">
      <span class="metric-value">{ppu}</span>
      <span class="metric-label">Price Per Unit</span>
      <span class="metric-sub">{ppsf}/SF</span>
    </div>
    <div class="metric-card">
      <span class="metric-value">{upside}</span>
      <span class="metric-label">Rent Upside</span>
      <span class="metric-sub">{cur_psf} &rarr; {mkt_psf}/SF</span>
    </div>
  </div>

  <h3 class="sub-heading">Unit Mix &amp; Rent Roll</h3>{rent_roll}

  <div class="two-col">
    <div>
      <h3>Operating Statement</h3>
      <table>
        <thead><tr><th>Income</th><th>{cur_label}</th><th>{mkt_label}</th></tr></thead>
        <tbody>{income}
        </tbody>
      </table>
      <table>
        <thead><tr><th>Expenses</th><th>{cur_label}</th><th>{mkt_label}</th></tr></thead>
        <tbody>{expenses}
        </tbody>
      </table>
    </div>
    <div>
      <h3>Returns at Asking Price</h3>
      <table>
        <thead><tr><th>Metric</th><th>Current</th><th>Market</th></tr></thead>
        <tbody>{returns}
        </tbody>
      </table>
      <h3>Financing Terms</h3>
      <table>
        <tbody>{terms}
        </tbody>
      </table>
    </div>
  </div>

  <h3 class="sub-heading">Pricing Matrix</h3>{matrix}{matrix_note}{narrative}
</div>"##,
        heading = heading(config, "Financial Analysis"),
        cur_cap = pct(ret.current.cap_rate),
        mkt_cap = pct(ret.market.cap_rate),
        ppu = usd(ret.market.price_per_unit),
        ppsf = usd_cents(ret.market.price_per_sf),
        upside = pct(rr.rent_upside),
        cur_psf = usd_cents(rr.rent_per_sf.current),
        mkt_psf = usd_cents(rr.rent_per_sf.market),
        rent_roll = table(
            &["Unit", "Type", "SF", "Current Rent", "Rent/SF", "Market Rent", "Mkt Rent/SF"],
            &rent_roll
        ),
        cur_label = RentColumn::Current.label(),
        mkt_label = RentColumn::Market.label(),
        matrix = table(
            &["Price", "Cap Rate (Mkt)", "Cap Rate (Cur)", "$/Unit", "$/SF", "GRM", "Cash-on-Cash", "DCR"],
            &matrix
        ),
        matrix_note = note(&matrix_note),
        narrative = paragraphs(vars, &config.narrative.financial),
    )
}

pub fn footer(config: &ReportConfig, images: &ImageSet) -> String {
    let team: String = config
        .team
        .iter()
        .zip(&images.headshots)
        .map(|(m, headshot)| {
            let tel: String = m.phone.chars().filter(char::is_ascii_digit).collect();
            let license = m
                .license
                .as_deref()
                .map(|l| format!("<br>\n        License: {}", escape(l)))
                .unwrap_or_default();
            format!(
                r##"
    <div class="footer-person">
      <img src="{headshot}" alt="{name}" class="footer-headshot">
      <span class="footer-name">{name}</span>
      <span class="footer-title">{title}</span>
      <div class="footer-contact">
        <a href="tel:{tel}">{phone}</a><br>
        <a href="mailto:{email}">{email}</a>{license}
      </div>
    </div>"##,
                name = escape(&m.name),
                title = escape(&m.title),
                phone = escape(&m.phone),
                email = escape(&m.email),
            )
        })
        .collect();
    let b = &config.branding;
    format!(
        r##"<div class="footer">
  <img src="{logo}" alt="{team_name}" class="footer-logo">
  <div class="footer-team">{team}
  </div>
  <p class="footer-office">{office}</p>
  <p class="footer-disclaimer">{disclaimer}</p>
</div>"##,
        logo = images.logo,
        team_name = escape(&b.team_name),
        office = escape(&b.office),
        disclaimer = escape(&b.disclaimer),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ReportConfig, Analysis, Vars) {
        let config = ReportConfig::embedded().unwrap();
        let analysis = Analysis::compute(&config).unwrap();
        let vars = Vars::for_report(&config, &analysis);
        (config, analysis, vars)
    }

    #[test]
    fn history_appends_assessed_and_list_price_rows() {
        let (config, analysis, vars) = setup();
        let html = transaction_history(&config, &analysis, &vars);
        assert!(html.contains("H &amp; Y Investments LP"));
        assert!(html.contains("<td>Dec 2021</td><td>Refinance</td><td>$1,800,000</td><td>$90,000</td>"));
        assert!(html.contains("<td>2025</td><td>Assessed Value</td>"));
        assert!(html.contains(
            r#"<tr class="highlight"><td>2026</td><td>Suggested List Price</td><td>$4,850,000</td><td>$242,500</td>"#
        ));
    }

    #[test]
    fn regulatory_sources_carry_as_of_month() {
        let (config, _, _) = setup();
        let html = regulatory(&config);
        assert!(html.contains("Data as of February 2026."));
        assert_eq!(html.matches("condition-note").count(), config.regulatory.notes.len());
    }

    #[test]
    fn sale_comp_table_has_average_row() {
        let (config, analysis, vars) = setup();
        let html = sale_comps(&config, &analysis, &vars);
        assert!(html.contains("<td>1</td><td>20951 Roscoe Blvd, Canoga Park</td><td>34</td>"));
        assert_eq!(html.matches(r#"<tr class="summary">"#).count(), 1);
        assert!(html.contains("Average"));
    }

    #[test]
    fn sale_comps_section_is_omitted_without_comps() {
        let (mut config, _, _) = setup();
        config.sale_comps.comps.clear();
        let analysis = Analysis::compute(&config).unwrap();
        let vars = Vars::for_report(&config, &analysis);
        assert!(sale_comps(&config, &analysis, &vars).is_empty());
    }

    #[test]
    fn rent_comp_numbering_continues_across_groups() {
        let (config, analysis, vars) = setup();
        let html = rent_comps(&config, &analysis, &vars);
        let first = config.rent_comps.groups[0].comps.len();
        let second_group = &config.rent_comps.groups[1].comps[0];
        assert!(html.contains(&format!(
            "<td>{}</td><td>{}</td>",
            first + 1,
            escape(&second_group.address)
        )));
        assert!(html.contains("3-Bedroom Comparables"));
        assert!(html.contains("$2,975"));
    }

    #[test]
    fn financial_section_lists_every_expense() {
        let (config, analysis, vars) = setup();
        let html = financial_analysis(&config, &analysis, &vars);
        for item in config.expenses.items() {
            assert!(html.contains(&escape(&item.name)), "missing {}", item.name);
        }
        assert!(html.contains("Management Fee (4.00%)"));
        assert!(html.contains("<th>Pro Forma</th>"));
        assert!(html.contains("<td>Totals / Avg</td><td>24,500</td><td>$42,783</td>"));
        assert_eq!(
            html.matches("<tr class=\"highlight\">").count(),
            1,
            "one highlighted matrix row"
        );
    }

    #[test]
    fn footer_lists_team_with_optional_license() {
        let (config, _, _) = setup();
        let images = ImageSet {
            headshots: vec!["data:image/png;base64,AA==".to_string(); config.team.len()],
            ..ImageSet::default()
        };
        let html = footer(&config, &images);
        assert!(html.contains(r#"<a href="tel:8182122808">(818) 212-2808</a>"#));
        assert_eq!(html.matches("<br>\n        License:").count(), 2);
        assert!(html.contains("Marcus &amp; Millichap"));
    }
}
