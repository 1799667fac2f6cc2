//! Lifecycle controller bridging a declarative view layer and an imperative,
//! canvas-based table renderer.
//!
//! The renderer owns a persistent render tree, data model and theme, so it is
//! built once per mount and mutated in place afterwards. [`TabularSheet`]
//! owns that single instance, derives the row height from the dataset, pushes
//! prop changes into it, debounces window resizes onto it, and forwards its
//! interaction events to caller callbacks.

pub mod config;
pub mod data;
pub mod debounce;
pub mod error;
pub mod events;
pub mod header;
pub mod layout;
pub mod options;
pub mod renderer;
pub mod sanitize;
pub mod sheet;
pub mod surface;
pub mod theme;

pub use config::SheetConfig;
pub use data::DataConfig;
pub use error::{SanitizeError, SheetError};
pub use sheet::{SheetProps, TabularSheet};

pub mod prelude {
    pub use crate::config::SheetConfig;
    pub use crate::data::{DataConfig, Fields, Record};
    pub use crate::error::{SanitizeError, SheetError};
    pub use crate::events::{CellData, CellMeta, EventTarget, RawEvent, SheetCallbacks, SheetEvent};
    pub use crate::header::{HeaderProps, HeaderView};
    pub use crate::layout::{build_options, compute_cell_height};
    pub use crate::options::SheetOptions;
    pub use crate::renderer::{EventHandler, SheetFactory, SheetRenderer, factory};
    pub use crate::sanitize::{DefaultSanitizer, Sanitize};
    pub use crate::sheet::{SheetProps, TabularSheet};
    pub use crate::surface::{ListenerId, ResizeListener, ResizeSample, Size, Surface, WindowEvents};
    pub use crate::theme::SheetTheme;
}
