//! HTML report generation.
//!
//! Produces one self-contained document: styles are inlined, images are
//! embedded as data URIs, and the only external references are the Leaflet
//! library and OpenStreetMap tiles used by the comp maps.

pub mod assets;
mod maps;
pub mod narrative;
mod sections;

use crate::config::ReportConfig;
use crate::core::Analysis;
pub use assets::ImageSet;
use narrative::Vars;

const CSS: &str = include_str!("report.css");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Replaces the cover greeting with `?client=` from the page URL.
const CLIENT_GREETING_JS: &str = r#"var params = new URLSearchParams(window.location.search);
var client = params.get('client');
if (client) {
  var el = document.getElementById('client-greeting');
  if (el) el.textContent = 'Prepared Exclusively for ' + client;
}"#;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the complete report document.
pub fn generate_html(config: &ReportConfig, analysis: &Analysis, images: &ImageSet) -> String {
    let vars = Vars::for_report(config, analysis);
    let body = [
        sections::cover(config, images),
        sections::property_overview(config, images, &vars),
        sections::building_systems(config),
        sections::regulatory(config),
        sections::transaction_history(config, analysis, &vars),
        sections::sale_comps(config, analysis, &vars),
        sections::rent_comps(config, analysis, &vars),
        sections::financial_analysis(config, analysis, &vars),
        sections::footer(config, images),
    ]
    .join("\n");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>BOV - {address}, {city}</title>
  <link rel="stylesheet" href="{leaflet_css}" />
  <script src="{leaflet_js}"></script>
  <style>
{css}
  </style>
</head>
<body>
<div class="page">
{body}
</div>
<script>
{greeting}
</script>
</body>
</html>"##,
        address = escape(&config.property.address),
        city = escape(&config.property.city_state_zip),
        leaflet_css = LEAFLET_CSS,
        leaflet_js = LEAFLET_JS,
        css = CSS,
        body = body,
        greeting = CLIENT_GREETING_JS,
    )
}
