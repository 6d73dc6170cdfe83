//! Proxy category codes, their labels, and the marker styling derived from them.
//!
//! Category codes are grouped in bands of 1000: the band selects the polygon
//! side count (`code / 1000`) and the palette entry (`code / 1000 - 2`), so the
//! supported range is 2000..=9999.

use crate::utils::constants::{
    CATEGORY_BAND_OFFSET, CATEGORY_BAND_WIDTH, DEFAULT_MARKER_RADIUS, MAX_CATEGORY_CODE,
    MIN_CATEGORY_CODE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static mapping from category code to a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyTypeTable {
    labels: BTreeMap<i32, String>,
}

impl ProxyTypeTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        Self {
            labels: entries
                .into_iter()
                .map(|(code, label)| (code, label.into()))
                .collect(),
        }
    }

    /// Data type codes used by the Mann et al. (2008) proxy network.
    pub fn mann2008() -> Self {
        Self::new([
            (2000, "Lutenbacher"),
            (3000, "Tree ring"),
            (3001, "Sediment"),
            (4000, "Sediment"),
            (4001, "Sediment"),
            (5000, "Document"),
            (5001, "Document"),
            (6000, "Speleothem"),
            (6001, "Speleothem"),
            (7000, "Coral"),
            (7001, "Coral"),
            (7500, "MXD"),
            (8000, "Ice cores"),
            (8001, "Ice cores"),
            (9000, "Tree ring"),
        ])
    }

    pub fn label(&self, code: i32) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ProxyTypeTable {
    fn default() -> Self {
        Self::mann2008()
    }
}

/// Fill colours indexed by category band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn brown() -> Self {
        Self::new([
            "#f5deb3", "#d2b48c", "#bc8f8f", "#f4a460", "#daa520", "#d2691e", "#8b4513",
            "#800000",
        ])
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::brown()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub label: String,
    pub fill_color: String,
    pub sides: u32,
    pub radius: u32,
}

/// Resolves a category code into a label and marker style.
#[derive(Debug, Clone, Default)]
pub struct MarkerStyler {
    table: ProxyTypeTable,
    palette: Palette,
    radius: Option<u32>,
}

impl MarkerStyler {
    pub fn new(table: ProxyTypeTable, palette: Palette) -> Self {
        Self {
            table,
            palette,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn table(&self) -> &ProxyTypeTable {
        &self.table
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns `None` when the code has no label, lies outside
    /// 2000..=9999, or its band has no palette entry.
    pub fn style(&self, code: i32) -> Option<MarkerStyle> {
        if !(MIN_CATEGORY_CODE..=MAX_CATEGORY_CODE).contains(&code) {
            return None;
        }
        let label = self.table.label(code)?;

        let band = code / CATEGORY_BAND_WIDTH;
        let color_index = usize::try_from(band - CATEGORY_BAND_OFFSET).ok()?;
        let fill_color = self.palette.get(color_index)?;

        Some(MarkerStyle {
            label: label.to_string(),
            fill_color: fill_color.to_string(),
            sides: band as u32,
            radius: self.radius.unwrap_or(DEFAULT_MARKER_RADIUS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tree_ring_style() {
        let styler = MarkerStyler::default();
        let style = styler.style(3000).unwrap();

        assert_eq!(
            style,
            MarkerStyle {
                label: "Tree ring".to_string(),
                fill_color: "#d2b48c".to_string(),
                sides: 3,
                radius: 4,
            }
        );
    }

    #[test]
    fn test_ice_core_style() {
        let styler = MarkerStyler::default();
        let style = styler.style(8001).unwrap();

        assert_eq!(style.label, "Ice cores");
        assert_eq!(style.sides, 8);
        assert_eq!(style.fill_color, Palette::brown().get(6).unwrap());
        assert_eq!(style.fill_color, "#8b4513");
    }

    #[test]
    fn test_band_edges() {
        let styler = MarkerStyler::default();
        assert_eq!(styler.style(2000).unwrap().fill_color, "#f5deb3");
        assert_eq!(styler.style(9000).unwrap().fill_color, "#800000");
        assert_eq!(styler.style(9000).unwrap().sides, 9);
        assert_eq!(styler.style(7500).unwrap().sides, 7);
    }

    #[test]
    fn test_unmapped_code() {
        let styler = MarkerStyler::default();
        assert!(styler.style(3500).is_none());
    }

    #[test]
    fn test_out_of_range_codes() {
        let table = ProxyTypeTable::new([(1000, "Too low"), (10000, "Too high"), (-3000, "Neg")]);
        let styler = MarkerStyler::new(table, Palette::brown());

        assert!(styler.style(1000).is_none());
        assert!(styler.style(10000).is_none());
        assert!(styler.style(-3000).is_none());
    }

    #[test]
    fn test_injected_table_and_palette() {
        let table = ProxyTypeTable::new([(2500, "Pollen"), (4000, "Varve")]);
        let palette = Palette::new(["red", "green"]);
        let styler = MarkerStyler::new(table, palette).with_radius(6);

        let pollen = styler.style(2500).unwrap();
        assert_eq!(pollen.label, "Pollen");
        assert_eq!(pollen.fill_color, "red");
        assert_eq!(pollen.sides, 2);
        assert_eq!(pollen.radius, 6);

        // Band 4 needs a third palette entry.
        assert!(styler.style(4000).is_none());
    }

    #[test]
    fn test_default_table_covers_original_codes() {
        let table = ProxyTypeTable::mann2008();
        assert_eq!(table.len(), 15);
        assert_eq!(table.label(7500), Some("MXD"));
        assert_eq!(table.label(2000), Some("Lutenbacher"));
        assert_eq!(table.label(1234), None);
    }
}
