//! Stand-in host: a fixed container, a manually driven window and a renderer
//! that logs what it is asked to do.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info};
use tabsheet::prelude::*;

// ============================================================================
// Renderer
// ============================================================================

/// Handlers subscribed on the renderer, shared so the demo can fire events.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Rc<RefCell<HashMap<SheetEvent, Vec<Rc<dyn Fn(&RawEvent)>>>>>,
}

impl EventBus {
    pub fn emit(&self, event: SheetEvent, raw: &RawEvent) {
        let handlers = self.handlers.borrow().get(&event).cloned().unwrap_or_default();
        debug!("emit {} to {} handler(s)", event, handlers.len());
        for handler in handlers {
            handler(raw);
        }
    }

    fn subscribe(&self, event: SheetEvent, handler: EventHandler) {
        self.handlers
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(Rc::from(handler));
    }

    fn clear(&self, event: SheetEvent) {
        self.handlers.borrow_mut().remove(&event);
    }
}

pub struct LoggingRenderer {
    size: Size,
    rows: usize,
    bus: EventBus,
}

impl LoggingRenderer {
    pub fn new(size: Option<Size>, bus: EventBus) -> Self {
        let size = size.unwrap_or(Size::new(0.0, 0.0));
        info!("renderer created at {}x{}", size.width, size.height);
        Self { size, rows: 0, bus }
    }
}

impl SheetRenderer for LoggingRenderer {
    fn set_data_config(&mut self, data_cfg: DataConfig) {
        self.rows = data_cfg.data.len();
        info!("data config: {} rows, fields {:?}", self.rows, data_cfg.fields.values);
    }

    fn set_options(&mut self, options: SheetOptions) {
        info!(
            "options: {:?}x{:?}, cell height {:?}",
            options.width, options.height, options.style.cell_cfg.height
        );
    }

    fn set_theme(&mut self, theme: SheetTheme) {
        info!("theme: {}", theme.as_value());
    }

    fn render(&mut self, reload: bool) {
        info!(
            "render {} rows at {}x{} (reload: {})",
            self.rows, self.size.width, self.size.height, reload
        );
    }

    fn change_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        info!("size changed to {}x{}", width, height);
    }

    fn destroy(&mut self) {
        info!("renderer destroyed");
    }

    fn on(&mut self, event: SheetEvent, handler: EventHandler) {
        self.bus.subscribe(event, handler);
    }

    fn off(&mut self, event: SheetEvent) {
        self.bus.clear(event);
    }
}

/// A click on the cell with `id`.
pub fn click(id: &str) -> RawEvent {
    RawEvent {
        x: 120.0,
        y: 64.0,
        timestamp: 0,
        target: Some(EventTarget::Cell(CellMeta {
            id: id.to_string(),
            ..CellMeta::default()
        })),
    }
}

// ============================================================================
// Container and window
// ============================================================================

pub struct StaticSurface {
    size: Cell<Size>,
}

impl StaticSurface {
    pub fn new(width: f32, height: f32) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Size::new(width, height)),
        })
    }

    pub fn grow(&self, width: f32, height: f32) {
        let size = self.size.get();
        self.size.set(Size::new(size.width + width, size.height + height));
    }
}

impl Surface for StaticSurface {
    fn measure(&self) -> Option<Size> {
        Some(self.size.get())
    }
}

#[derive(Default)]
pub struct ManualWindow {
    listeners: RefCell<Vec<(ListenerId, ResizeListener)>>,
}

impl ManualWindow {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn fire(&self, timestamp: u64) {
        for (_, listener) in self.listeners.borrow().iter() {
            listener(ResizeSample::new(timestamp));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl WindowEvents for ManualWindow {
    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(listener, _)| *listener != id);
    }
}
