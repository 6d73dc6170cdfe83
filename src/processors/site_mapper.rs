use crate::error::{PaleoError, Result};
use crate::models::{MarkerStyler, ProxySite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A styled marker ready to be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
    pub label: String,
    pub fill_color: String,
    pub sides: u32,
    pub radius: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    pub total_sites: usize,
    /// Site count per label, with the colour used for that label's band.
    pub categories: BTreeMap<String, CategoryCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCount {
    pub sites: usize,
    pub fill_colors: Vec<String>,
}

impl MappingReport {
    pub fn generate_summary(&self) -> String {
        let mut summary = format!("Proxy Sites: {}\n", self.total_sites);
        for (label, count) in &self.categories {
            summary.push_str(&format!(
                "  {:<12} {:>5} ({})\n",
                label,
                count.sites,
                count.fill_colors.join(", ")
            ));
        }
        summary
    }
}

/// Turns proxy sites into styled markers. Fails on the first site whose code
/// cannot be styled; no markers are produced in that case.
pub struct SiteMapper {
    styler: MarkerStyler,
}

impl SiteMapper {
    pub fn new(styler: MarkerStyler) -> Self {
        Self { styler }
    }

    pub fn styler(&self) -> &MarkerStyler {
        &self.styler
    }

    pub fn map_sites(&self, sites: &[ProxySite]) -> Result<(Vec<SiteMarker>, MappingReport)> {
        let mut markers = Vec::with_capacity(sites.len());
        let mut report = MappingReport {
            total_sites: sites.len(),
            ..Default::default()
        };

        for site in sites {
            let style = self
                .styler
                .style(site.code)
                .ok_or(PaleoError::UnrecognizedCategory {
                    code: site.code,
                    site: site.index,
                })?;

            let entry = report.categories.entry(style.label.clone()).or_default();
            entry.sites += 1;
            if !entry.fill_colors.contains(&style.fill_color) {
                entry.fill_colors.push(style.fill_color.clone());
            }

            markers.push(SiteMarker {
                latitude: site.latitude,
                longitude: site.longitude,
                popup: format!("ix: {}; data: {}", site.index, style.label),
                label: style.label,
                fill_color: style.fill_color,
                sides: style.sides,
                radius: style.radius,
            });
        }

        Ok((markers, report))
    }
}

impl Default for SiteMapper {
    fn default() -> Self {
        Self::new(MarkerStyler::default())
    }
}
