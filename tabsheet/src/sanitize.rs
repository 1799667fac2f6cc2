//! Validation and normalization of caller-supplied structures.
//!
//! The controller calls the sanitizer before every push into the renderer and
//! treats its verdict as authoritative.

use crate::data::DataConfig;
use crate::error::SanitizeError;
use crate::options::SheetOptions;

/// Default canvas width when the options leave it unset.
pub const DEFAULT_WIDTH: f32 = 600.0;

/// Default canvas height when the options leave it unset.
pub const DEFAULT_HEIGHT: f32 = 480.0;

/// Validates and normalizes data configs and options.
///
/// Implementations must be pure: no side effects, same input same output.
pub trait Sanitize {
    /// Sanitize a data config.
    fn data_config(&self, raw: &DataConfig) -> Result<DataConfig, SanitizeError>;

    /// Sanitize merged options.
    fn options(&self, raw: &SheetOptions) -> Result<SheetOptions, SanitizeError>;
}

/// Sanitizer used when the caller does not supply one.
///
/// - Removes duplicate and empty field names, keeping first occurrences.
/// - Rejects rows with empty keys.
/// - Fills the canvas size with 600x480 when unset.
/// - Rejects negative or non-finite sizes and line heights, and cell heights
///   that are not positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSanitizer;

impl Sanitize for DefaultSanitizer {
    fn data_config(&self, raw: &DataConfig) -> Result<DataConfig, SanitizeError> {
        if raw.data.keys().any(|key| key.is_empty()) {
            return Err(SanitizeError::EmptyRowKey);
        }

        let mut cfg = raw.clone();
        dedupe(&mut cfg.fields.rows);
        dedupe(&mut cfg.fields.columns);
        dedupe(&mut cfg.fields.values);
        Ok(cfg)
    }

    fn options(&self, raw: &SheetOptions) -> Result<SheetOptions, SanitizeError> {
        let mut options = raw.clone();

        options.width = Some(check_size("width", options.width.unwrap_or(DEFAULT_WIDTH))?);
        options.height = Some(check_size("height", options.height.unwrap_or(DEFAULT_HEIGHT))?);

        let style = &options.style;
        if let Some(width) = style.col_cfg.width {
            check_size("column width", width)?;
        }
        if let Some(width) = style.cell_cfg.width {
            check_size("cell width", width)?;
        }
        if let Some(width) = style.row_cfg.width {
            check_size("row width", width)?;
        }
        if let Some(height) = style.cell_cfg.height
            && !is_positive(height)
        {
            return Err(SanitizeError::InvalidCellHeight(height));
        }
        // Zero means unset and falls back to the default unit.
        if let Some(line_height) = style.cell_cfg.line_height
            && !(line_height.is_finite() && line_height >= 0.0)
        {
            return Err(SanitizeError::InvalidLineHeight(line_height));
        }

        Ok(options)
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_size(field: &'static str, value: f32) -> Result<f32, SanitizeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SanitizeError::InvalidSize { field, value })
    }
}

fn dedupe(names: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    names.retain(|name| !name.is_empty() && seen.insert(name.clone()));
}
