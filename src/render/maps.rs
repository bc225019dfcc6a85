//! Leaflet map scripts for the comp sections.

use super::escape;
use crate::core::Coords;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

const SUBJECT_PIN: &str = "background:#C5A258;color:#fff;width:32px;height:32px;border-radius:50%;display:flex;align-items:center;justify-content:center;font-size:16px;font-weight:700;border:2px solid #fff;box-shadow:0 2px 6px rgba(0,0,0,0.4);";
const COMP_PIN: &str = "background:#1B3A5C;color:#fff;width:26px;height:26px;border-radius:50%;display:flex;align-items:center;justify-content:center;font-size:12px;font-weight:700;border:2px solid #fff;box-shadow:0 2px 4px rgba(0,0,0,0.3);";

/// A pin with its popup; `popup` is HTML.
#[derive(Debug, Clone)]
pub struct Marker {
    pub coords: Coords,
    pub label: String,
    pub popup: String,
}

/// Map centred on the subject, with numbered comp pins, fit to all points.
#[derive(Debug, Clone)]
pub struct CompMap<'a> {
    /// Element id and JS variable name
    pub id: &'a str,
    pub zoom: u8,
    pub padding: f64,
    pub subject: Marker,
    pub comps: Vec<Marker>,
}

/// Quote text for a single-quoted JS string literal.
fn js_str(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', " ")
}

fn marker_js(map: &str, m: &Marker, style: &str, size: u8) -> String {
    let half = size / 2;
    format!(
        "L.marker([{lat}, {lng}], {{icon: L.divIcon({{className: '', html: '<div style=\"{style}\">{label}</div>', iconSize: [{size}, {size}], iconAnchor: [{half}, {half}]}}) }}).addTo({map}).bindPopup('{popup}');",
        lat = m.coords.lat,
        lng = m.coords.lng,
        label = js_str(&m.label),
        popup = js_str(&m.popup),
    )
}

impl CompMap<'_> {
    pub fn script(&self) -> String {
        let id = self.id;
        let centre = self.subject.coords;
        let bounds = std::iter::once(&self.subject)
            .chain(&self.comps)
            .map(|m| format!("[{},{}]", m.coords.lat, m.coords.lng))
            .collect::<Vec<_>>()
            .join(",");
        let mut lines = vec![
            format!(
                "var {id} = L.map('{id}').setView([{}, {}], {});",
                centre.lat, centre.lng, self.zoom
            ),
            format!(
                "L.tileLayer('{TILE_URL}', {{ attribution: '&copy; OpenStreetMap contributors' }}).addTo({id});"
            ),
            marker_js(id, &self.subject, SUBJECT_PIN, 32),
        ];
        lines.extend(self.comps.iter().map(|m| marker_js(id, m, COMP_PIN, 26)));
        lines.push(format!(
            "{id}.fitBounds(L.latLngBounds([{bounds}]).pad({}));",
            self.padding
        ));

        format!(
            "<div id=\"{id}\" class=\"leaflet-map\"></div>\n<p class=\"map-fallback\">Interactive map available at the live URL.</p>\n<script>\nif (window.L) {{\n{}\n}}\n</script>",
            lines.join("\n")
        )
    }
}

/// Popup heading: escaped address in bold followed by an escaped detail line.
pub fn popup(title: &str, detail: &str) -> String {
    format!("<strong>{}</strong><br>{}", escape(title), escape(detail))
}
