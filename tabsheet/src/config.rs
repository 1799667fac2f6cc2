//! Controller configuration.

use std::time::Duration;

/// Quiet period applied to window resize bursts.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Height of one stacked line inside a cell, in pixels.
pub const DEFAULT_LINE_HEIGHT: f32 = 30.0;

/// Configuration for a [`TabularSheet`](crate::TabularSheet).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tabsheet::SheetConfig;
///
/// let config = SheetConfig::default()
///     .with_resize_debounce(Duration::from_millis(100))
///     .with_default_line_height(24.0);
/// ```
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Debounce window for window resize signals.
    ///
    /// Default: 200ms
    pub resize_debounce: Duration,

    /// Line-height unit used when the options carry neither an explicit cell
    /// height nor a line height.
    ///
    /// Default: 30px
    pub default_line_height: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            default_line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl SheetConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resize debounce window.
    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }

    /// Sets the fallback line-height unit.
    pub fn with_default_line_height(mut self, line_height: f32) -> Self {
        self.default_line_height = line_height;
        self
    }
}
