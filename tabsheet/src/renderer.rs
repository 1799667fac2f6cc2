//! The imperative table renderer the controller drives.

use std::rc::Rc;

use crate::data::DataConfig;
use crate::events::{RawEvent, SheetEvent};
use crate::options::SheetOptions;
use crate::surface::Surface;
use crate::theme::SheetTheme;

/// Handler the renderer invokes when one of its interaction events fires.
pub type EventHandler = Box<dyn Fn(&RawEvent)>;

/// A stateful, canvas-based table engine.
///
/// The engine owns its render tree, data model and theme. It is mutated in
/// place; the controller never recreates it for ordinary prop changes. Calling
/// anything after [`destroy`](SheetRenderer::destroy) is undefined for the
/// engine, and the controller never does.
pub trait SheetRenderer {
    /// Replace the dataset.
    fn set_data_config(&mut self, data_cfg: DataConfig);

    /// Replace the options.
    fn set_options(&mut self, options: SheetOptions);

    /// Replace the theme.
    fn set_theme(&mut self, theme: SheetTheme);

    /// Repaint. With `reload` false, existing node positions are reused and
    /// only the drawing surface changes.
    fn render(&mut self, reload: bool);

    /// Resize the drawing surface.
    fn change_size(&mut self, width: f32, height: f32);

    /// Release every resource the engine holds.
    fn destroy(&mut self);

    /// Subscribe to an interaction event.
    fn on(&mut self, event: SheetEvent, handler: EventHandler);

    /// Remove every handler for an interaction event.
    fn off(&mut self, event: SheetEvent);
}

/// Builds a renderer bound to a container.
///
/// Compared by identity: swapping in a different factory rebuilds the
/// renderer, while cloning the same `Rc` does not.
pub type SheetFactory = Rc<dyn Fn(&dyn Surface, &DataConfig, &SheetOptions) -> Box<dyn SheetRenderer>>;

/// Wraps a closure as a [`SheetFactory`].
pub fn factory<F>(build: F) -> SheetFactory
where
    F: Fn(&dyn Surface, &DataConfig, &SheetOptions) -> Box<dyn SheetRenderer> + 'static,
{
    Rc::new(build)
}

pub(crate) fn same_factory(a: Option<&SheetFactory>, b: Option<&SheetFactory>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
