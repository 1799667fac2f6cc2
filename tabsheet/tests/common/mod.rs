//! Test doubles for the renderer, container and window.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tabsheet::prelude::*;

/// One call made against a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetDataConfig(DataConfig),
    SetOptions(SheetOptions),
    SetTheme(SheetTheme),
    Render(bool),
    ChangeSize(f32, f32),
    Destroy,
    On(SheetEvent),
    Off(SheetEvent),
}

#[derive(Default)]
struct RecorderState {
    built: usize,
    calls: Vec<(usize, Call)>,
    handlers: HashMap<(usize, SheetEvent), Vec<Rc<dyn Fn(&RawEvent)>>>,
}

/// Shared log of every renderer a factory has built.
#[derive(Clone, Default)]
pub struct Recorder {
    state: Rc<RefCell<RecorderState>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory building recording renderers.
    pub fn factory(&self) -> SheetFactory {
        let recorder = self.clone();
        factory(move |_surface: &dyn Surface, _data: &DataConfig, _options: &SheetOptions| {
            let id = {
                let mut state = recorder.state.borrow_mut();
                state.built += 1;
                state.built
            };
            Box::new(RecordingRenderer {
                id,
                recorder: recorder.clone(),
            }) as Box<dyn SheetRenderer>
        })
    }

    /// Number of renderers built.
    pub fn built(&self) -> usize {
        self.state.borrow().built
    }

    /// Every call, across all instances.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.iter().map(|(_, c)| c.clone()).collect()
    }

    /// Calls made against one instance (1-based, in build order).
    pub fn calls_for(&self, instance: usize) -> Vec<Call> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|(id, _)| *id == instance)
            .map(|(_, c)| c.clone())
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.state.borrow().calls.iter().filter(|(_, c)| c == call).count()
    }

    pub fn destroyed(&self) -> usize {
        self.count(&Call::Destroy)
    }

    /// Forget recorded calls, keeping subscriptions.
    pub fn clear(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Live handlers for an event, across all instances.
    pub fn handler_count(&self, event: SheetEvent) -> usize {
        self.state
            .borrow()
            .handlers
            .iter()
            .filter(|((_, e), _)| *e == event)
            .map(|(_, handlers)| handlers.len())
            .sum()
    }

    /// Fire an event on every live handler, as the renderer would.
    pub fn emit(&self, event: SheetEvent, raw: &RawEvent) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .handlers
            .iter()
            .filter(|((_, e), _)| *e == event)
            .flat_map(|(_, handlers)| handlers.iter().cloned())
            .collect();
        for handler in handlers {
            handler(raw);
        }
    }

    fn record(&self, id: usize, call: Call) {
        self.state.borrow_mut().calls.push((id, call));
    }
}

struct RecordingRenderer {
    id: usize,
    recorder: Recorder,
}

impl SheetRenderer for RecordingRenderer {
    fn set_data_config(&mut self, data_cfg: DataConfig) {
        self.recorder.record(self.id, Call::SetDataConfig(data_cfg));
    }

    fn set_options(&mut self, options: SheetOptions) {
        self.recorder.record(self.id, Call::SetOptions(options));
    }

    fn set_theme(&mut self, theme: SheetTheme) {
        self.recorder.record(self.id, Call::SetTheme(theme));
    }

    fn render(&mut self, reload: bool) {
        self.recorder.record(self.id, Call::Render(reload));
    }

    fn change_size(&mut self, width: f32, height: f32) {
        self.recorder.record(self.id, Call::ChangeSize(width, height));
    }

    fn destroy(&mut self) {
        self.recorder.record(self.id, Call::Destroy);
    }

    fn on(&mut self, event: SheetEvent, handler: EventHandler) {
        self.recorder.record(self.id, Call::On(event));
        self.recorder
            .state
            .borrow_mut()
            .handlers
            .entry((self.id, event))
            .or_default()
            .push(Rc::from(handler));
    }

    fn off(&mut self, event: SheetEvent) {
        self.recorder.record(self.id, Call::Off(event));
        self.recorder.state.borrow_mut().handlers.remove(&(self.id, event));
    }
}

/// Container whose box can be changed or detached by the test.
pub struct FakeSurface {
    size: Cell<Option<Size>>,
}

impl FakeSurface {
    pub fn new(width: f32, height: f32) -> Rc<Self> {
        Rc::new(Self {
            size: Cell::new(Some(Size::new(width, height))),
        })
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.size.set(Some(Size::new(width, height)));
    }

    pub fn detach(&self) {
        self.size.set(None);
    }
}

impl Surface for FakeSurface {
    fn measure(&self) -> Option<Size> {
        self.size.get()
    }
}

/// Window that fires resize signals on demand.
#[derive(Default)]
pub struct FakeWindow {
    listeners: RefCell<Vec<(ListenerId, ResizeListener)>>,
}

impl FakeWindow {
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

impl WindowEvents for FakeWindow {
    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(listener, _)| *listener != id);
    }
}

/// Mount `sheet` on a fresh surface and window.
pub fn mount(sheet: &mut TabularSheet) -> (Rc<FakeSurface>, Rc<FakeWindow>) {
    let surface = FakeSurface::new(800.0, 600.0);
    let window = FakeWindow::new();
    sheet
        .mount(surface.clone(), window.clone())
        .expect("mount failed");
    (surface, window)
}

pub fn data(value: serde_json::Value) -> DataConfig {
    serde_json::from_value(serde_json::json!({ "data": value })).expect("invalid data config")
}

pub fn raw_cell_event(id: &str) -> RawEvent {
    RawEvent {
        x: 12.0,
        y: 34.0,
        timestamp: 99,
        target: Some(EventTarget::Cell(CellMeta {
            id: id.to_string(),
            ..CellMeta::default()
        })),
    }
}

pub fn options_of(call: &Call) -> Option<&SheetOptions> {
    match call {
        Call::SetOptions(options) => Some(options),
        _ => None,
    }
}
