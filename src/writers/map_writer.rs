//! Self-contained Leaflet map documents.

use crate::error::Result;
use crate::processors::SiteMarker;
use crate::utils::settings::Settings;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const STROKE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl MapOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            center: (0.0, 0.0),
            zoom: settings.map_zoom,
            tile_url: settings.tile_url.clone(),
            tile_attribution: settings.tile_attribution.clone(),
        }
    }
}

#[derive(Serialize)]
struct PlacedIcon<'a> {
    lat: f64,
    lon: f64,
    popup: &'a str,
    icon: String,
    size: f64,
}

pub struct MapWriter {
    options: MapOptions,
    title: String,
}

impl MapWriter {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            title: "Proxy network by data type".to_string(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Render the document for the given markers.
    pub fn render(&self, markers: &[SiteMarker]) -> Result<String> {
        let icons: Vec<PlacedIcon> = markers
            .iter()
            .map(|m| PlacedIcon {
                lat: m.latitude,
                lon: m.longitude,
                popup: &m.popup,
                icon: polygon_svg(m.sides, m.radius, &m.fill_color),
                size: icon_size(m.radius),
            })
            .collect();

        let legend: BTreeSet<(&str, &str)> = markers
            .iter()
            .map(|m| (m.label.as_str(), m.fill_color.as_str()))
            .collect();
        let legend_rows: String = legend
            .iter()
            .map(|(label, color)| {
                format!(
                    "<div><span class=\"swatch\" style=\"background:{}\"></span>{}</div>",
                    escape_html(color),
                    escape_html(label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let title = escape_html(&self.title);
        let generated = Utc::now().to_rfc3339();
        let center_lat = self.options.center.0.to_string();
        let center_lon = self.options.center.1.to_string();
        let zoom = self.options.zoom.to_string();
        let tile_url = script_json(&self.options.tile_url)?;
        let tile_attribution = script_json(&self.options.tile_attribution)?;
        let markers_json = script_json(&icons)?;

        let document = fill_template(TEMPLATE, |key| match key {
            "TITLE" => Some(title.as_str()),
            "GENERATED" => Some(generated.as_str()),
            "LEAFLET_CSS" => Some(LEAFLET_CSS),
            "LEAFLET_JS" => Some(LEAFLET_JS),
            "LEGEND" => Some(legend_rows.as_str()),
            "CENTER_LAT" => Some(center_lat.as_str()),
            "CENTER_LON" => Some(center_lon.as_str()),
            "ZOOM" => Some(zoom.as_str()),
            "TILE_URL" => Some(tile_url.as_str()),
            "TILE_ATTRIBUTION" => Some(tile_attribution.as_str()),
            "MARKERS" => Some(markers_json.as_str()),
            _ => None,
        });

        Ok(document)
    }

    /// Render and write the document. The file appears at `path` only once
    /// it has been fully written.
    pub fn write(&self, markers: &[SiteMarker], path: &Path) -> Result<()> {
        let document = self.render(markers)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        std::fs::create_dir_all(&dir)?;

        let mut partial = tempfile::Builder::new()
            .prefix(".map.")
            .suffix(".partial")
            .tempfile_in(&dir)?;
        partial.write_all(document.as_bytes())?;
        partial.flush()?;
        partial.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), markers = markers.len(), "Map written");
        Ok(())
    }
}

impl Default for MapWriter {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

fn icon_size(radius: u32) -> f64 {
    2.0 * (radius as f64 + STROKE_WIDTH)
}

/// Substitute every `{{KEY}}` in `template` in one left-to-right pass.
///
/// Substituted text is never scanned again, so a title or label that
/// happens to contain `{{...}}` comes out literally. Unknown keys are
/// left as they are.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}").and_then(|end| lookup(&after[..end]).map(|v| (end, v))) {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Inline SVG for a regular polygon with one vertex pointing up.
pub fn polygon_svg(sides: u32, radius: u32, fill_color: &str) -> String {
    let size = icon_size(radius);
    let center = size / 2.0;
    let r = radius as f64;
    let n = sides.max(1);

    let points: Vec<String> = (0..n)
        .map(|k| {
            let angle = -std::f64::consts::FRAC_PI_2
                + 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            format!(
                "{:.2},{:.2}",
                center + r * angle.cos(),
                center + r * angle.sin()
            )
        })
        .collect();

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\">\
         <polygon points=\"{}\" fill=\"{}\" fill-opacity=\"0.9\" stroke=\"#333\" stroke-width=\"{}\"/></svg>",
        points.join(" "),
        escape_html(fill_color),
        STROKE_WIDTH
    )
}

fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<!-- Generated by paleoclimate at {{GENERATED}} -->
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{TITLE}}</title>
<link rel="stylesheet" href="{{LEAFLET_CSS}}">
<script src="{{LEAFLET_JS}}"></script>
<style>
  html, body, #map { height: 100%; margin: 0; }
  .proxy-marker { background: none; border: none; }
  .legend { position: absolute; bottom: 24px; left: 12px; z-index: 1000;
            background: white; padding: 8px 10px; font: 12px sans-serif;
            border-radius: 4px; box-shadow: 0 1px 4px rgba(0,0,0,0.3); }
  .legend .swatch { display: inline-block; width: 10px; height: 10px;
                    margin-right: 6px; border: 1px solid #333; }
</style>
</head>
<body>
<div id="map"></div>
<div class="legend"><strong>{{TITLE}}</strong>
{{LEGEND}}
</div>
<script>
  var map = L.map('map').setView([{{CENTER_LAT}}, {{CENTER_LON}}], {{ZOOM}});
  L.tileLayer({{TILE_URL}}, { attribution: {{TILE_ATTRIBUTION}}, maxZoom: 18 }).addTo(map);

  var sites = {{MARKERS}};
  sites.forEach(function (s) {
    var icon = L.divIcon({
      html: s.icon,
      className: 'proxy-marker',
      iconSize: [s.size, s.size],
      iconAnchor: [s.size / 2, s.size / 2]
    });
    var popup = document.createElement('span');
    popup.textContent = s.popup;
    L.marker([s.lat, s.lon], { icon: icon }).bindPopup(popup).addTo(map);
  });
</script>
</body>
</html>
"#;
