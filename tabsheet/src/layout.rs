//! Row height derivation and option merging.
//!
//! The renderer uses one shared row height across the grid, so the height is
//! derived from the densest row in the whole dataset: a cell stacking N nested
//! values needs N line heights.

use crate::data::DataConfig;
use crate::options::{CellRendererVariant, ColWidthType, Device, SheetOptions};

/// Row height for `data` under `options`.
///
/// An explicit `cell_cfg.height` is returned unchanged. Otherwise the height
/// is the longest nested `values` breakdown times the line-height unit, with
/// empty datasets and datasets without breakdowns getting one line.
///
/// A zero or NaN height or line height counts as unset.
pub fn compute_cell_height(data: &DataConfig, options: &SheetOptions, default_line_height: f32) -> f32 {
    let cell_cfg = &options.style.cell_cfg;
    if let Some(height) = cell_cfg.height.filter(|h| is_set(*h)) {
        return height;
    }

    let line_height = cell_cfg
        .line_height
        .filter(|l| is_set(*l))
        .unwrap_or(default_line_height);
    if data.is_empty() {
        return line_height;
    }

    // Empty breakdowns still occupy one line.
    let max_len = data.max_nested_len().filter(|len| *len > 0).unwrap_or(1);
    max_len as f32 * line_height
}

fn is_set(value: f32) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Caller options with the controller's overrides folded in.
///
/// The adaptive-layout fields always take the controller's values; the row
/// height is the caller's explicit height or the derived one. The caller's
/// options are left untouched, so a later dataset change derives afresh.
pub fn build_options(options: &SheetOptions, data: &DataConfig, default_line_height: f32) -> SheetOptions {
    let height = compute_cell_height(data, options, default_line_height);

    let mut merged = options.clone();
    merged.data_cell = CellRendererVariant::Tabular;
    merged.style.col_cfg.col_width_type = Some(ColWidthType::Adaptive);
    merged.style.col_cfg.hide_measure_column = Some(true);
    merged.style.cell_cfg.height = Some(height);
    merged.style.device = Some(Device::Pc);
    merged
}
