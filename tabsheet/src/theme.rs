//! Renderer theme.
//!
//! The theme schema belongs to the renderer, so the controller treats it as an
//! opaque JSON document. Callers tend to rebuild equivalent themes on every
//! render pass, so change detection compares document values rather than
//! identity.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Opaque theme document passed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetTheme(Value);

impl SheetTheme {
    /// Wraps a theme document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The default theme for tabular sheets: flat headers, light grid lines,
    /// left-aligned stacked values.
    pub fn tabular() -> Self {
        Self(json!({
            "cornerCell": {
                "cell": { "backgroundColor": "#FAFAFA", "horizontalBorderColor": "#E8E8E8" },
                "text": { "fontSize": 12, "fontWeight": "bold", "fill": "#000000" }
            },
            "rowCell": {
                "cell": { "backgroundColor": "#FAFAFA", "horizontalBorderColor": "#E8E8E8" },
                "text": { "fontSize": 12, "fill": "#000000", "textAlign": "left" }
            },
            "colCell": {
                "cell": { "backgroundColor": "#FAFAFA", "verticalBorderColor": "#E8E8E8" },
                "text": { "fontSize": 12, "fontWeight": "bold", "fill": "#000000" }
            },
            "dataCell": {
                "cell": {
                    "backgroundColor": "#FFFFFF",
                    "crossBackgroundColor": "#FFFFFF",
                    "horizontalBorderColor": "#E8E8E8",
                    "verticalBorderColor": "#E8E8E8",
                    "padding": { "top": 0, "right": 8, "bottom": 0, "left": 8 }
                },
                "text": { "fontSize": 12, "fill": "#000000", "textAlign": "left" }
            }
        }))
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Deep-value comparison. Object key order is ignored.
    pub fn same_as(&self, other: &SheetTheme) -> bool {
        self.0 == other.0
    }
}

impl Default for SheetTheme {
    fn default() -> Self {
        Self::tabular()
    }
}

impl From<Value> for SheetTheme {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_documents_compare_same() {
        let a = SheetTheme::new(json!({ "dataCell": { "text": { "fill": "#000" } } }));
        let b = SheetTheme::new(json!({ "dataCell": { "text": { "fill": "#000" } } }));
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_key_order_ignored() {
        let mut first = serde_json::Map::new();
        first.insert("rowCell".into(), json!({ "fill": "#fff" }));
        first.insert("colCell".into(), json!({ "fill": "#eee" }));
        let mut second = serde_json::Map::new();
        second.insert("colCell".into(), json!({ "fill": "#eee" }));
        second.insert("rowCell".into(), json!({ "fill": "#fff" }));

        let a = SheetTheme::new(Value::Object(first));
        let b = SheetTheme::new(Value::Object(second));
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_nested_difference_detected() {
        let a = SheetTheme::new(json!({ "dataCell": { "text": { "fill": "#000" } } }));
        let b = SheetTheme::new(json!({ "dataCell": { "text": { "fill": "#111" } } }));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_default_is_tabular() {
        assert!(SheetTheme::default().same_as(&SheetTheme::tabular()));
        assert!(SheetTheme::tabular().as_value()["dataCell"].is_object());
    }
}
