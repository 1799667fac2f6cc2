//! Error types for the sheet controller.

use thiserror::Error;

/// Errors raised while sanitizing a data config or options before they are
/// pushed into the renderer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SanitizeError {
    /// A sheet or column size is negative or not finite.
    #[error("Invalid {field} size: {value}")]
    InvalidSize {
        /// Name of the offending option (e.g. "width").
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The line-height unit used for row height derivation is unusable.
    #[error("Invalid line height: {0}")]
    InvalidLineHeight(f32),

    /// An explicit cell height is unusable.
    #[error("Invalid cell height: {0}")]
    InvalidCellHeight(f32),

    /// A row record in the data config has an empty key.
    #[error("Row record has an empty key")]
    EmptyRowKey,
}

/// Errors surfaced by [`TabularSheet`](crate::TabularSheet).
///
/// Updates that arrive before the renderer exists are not errors; they are
/// absorbed silently.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The data config or options were rejected by the sanitizer.
    #[error("Sanitize failed: {0}")]
    Sanitize(#[from] SanitizeError),

    /// An adaptive sheet was mounted outside a tokio runtime, so the resize
    /// debouncer has nowhere to schedule its timer.
    #[error("Adaptive sheets must be mounted inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
