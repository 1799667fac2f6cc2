//! Sheet options and style configuration.
//!
//! Field names serialize in camelCase so option files written for the
//! renderer can be loaded as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cell-painting strategy the renderer uses for data cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellRendererVariant {
    /// The renderer's stock data cell.
    #[default]
    Standard,
    /// Data cell that stacks nested `values` vertically.
    Tabular,
}

/// How row headers are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HierarchyType {
    #[default]
    Grid,
    Tree,
}

/// Column width strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColWidthType {
    /// Widths come from explicit configuration.
    #[default]
    Fixed,
    /// Columns share the available width.
    Adaptive,
}

/// Target device class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Device {
    #[default]
    Pc,
    Mobile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColCfg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_width_type: Option<ColWidthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_measure_column: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub width_by_field: BTreeMap<String, f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub height_by_field: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCfg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Explicit row height. Always wins over the derived height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Height of one stacked line, used to derive the row height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCfg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub height_by_field: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default)]
    pub col_cfg: ColCfg,
    #[serde(default)]
    pub cell_cfg: CellCfg,
    #[serde(default)]
    pub row_cfg: RowCfg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
}

/// Options passed to the renderer.
///
/// Callers supply their own options; the controller folds its adaptive-layout
/// overrides and the derived row height into a copy before every push.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub hierarchy_type: HierarchyType,
    #[serde(default)]
    pub data_cell: CellRendererVariant,
    #[serde(default)]
    pub style: Style,
}

impl SheetOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canvas size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets an explicit row height.
    pub fn with_cell_height(mut self, height: f32) -> Self {
        self.style.cell_cfg.height = Some(height);
        self
    }

    /// Sets the line-height unit for derived row heights.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.style.cell_cfg.line_height = Some(line_height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let options: SheetOptions = serde_json::from_value(json!({
            "width": 600,
            "height": 480,
            "hierarchyType": "tree",
            "style": {
                "cellCfg": { "width": 100, "height": 90 },
                "colCfg": { "widthByField": { "city": 120 } },
                "rowCfg": { "heightByField": { "root[&]Zhejiang": 30 } }
            }
        }))
        .unwrap();

        assert_eq!(options.hierarchy_type, HierarchyType::Tree);
        assert_eq!(options.style.cell_cfg.height, Some(90.0));
        assert_eq!(options.style.col_cfg.width_by_field["city"], 120.0);
        assert_eq!(options.style.row_cfg.height_by_field.len(), 1);
        assert_eq!(options.data_cell, CellRendererVariant::Standard);
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let value = serde_json::to_value(SheetOptions::new().with_line_height(24.0)).unwrap();
        assert_eq!(value["style"]["cellCfg"], json!({ "lineHeight": 24.0 }));
        assert!(value.get("width").is_none());
    }
}
