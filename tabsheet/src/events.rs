//! Interaction events bridged from the renderer to caller callbacks.
//!
//! Every event goes through a fixed binding table. Subscribing and
//! unsubscribing both walk the same table, so the two stay symmetric whether
//! or not a callback is currently set.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;
use serde_json::Value;

use crate::renderer::SheetRenderer;

/// Interaction events emitted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetEvent {
    DataCellMouseUp,
    RowCellClick,
    ColCellClick,
    MergedCellsClick,
}

impl SheetEvent {
    /// Event name on the renderer's bus.
    pub const fn name(self) -> &'static str {
        match self {
            SheetEvent::DataCellMouseUp => "data-cell:mouse-up",
            SheetEvent::RowCellClick => "row-cell:click",
            SheetEvent::ColCellClick => "col-cell:click",
            SheetEvent::MergedCellsClick => "merged-cells:click",
        }
    }
}

impl std::fmt::Display for SheetEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata of the cell an event landed on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellMeta {
    pub id: String,
    pub row_index: Option<usize>,
    pub col_index: Option<usize>,
    pub field: Option<String>,
    pub value: Option<Value>,
}

/// What the renderer hit.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTarget {
    Cell(CellMeta),
    Merged(Vec<CellMeta>),
}

/// Native event payload as emitted by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub x: f32,
    pub y: f32,
    pub timestamp: u64,
    pub target: Option<EventTarget>,
}

/// Caller-facing cell data.
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub x: f32,
    pub y: f32,
    pub timestamp: u64,
    /// The hit cell, for single-cell targets.
    pub view_meta: Option<CellMeta>,
    /// The member cells, for merged targets.
    pub merged_cells: Vec<CellMeta>,
}

impl CellData {
    /// Normalize a renderer payload.
    pub fn from_event(raw: &RawEvent) -> Self {
        let (view_meta, merged_cells) = match &raw.target {
            Some(EventTarget::Cell(meta)) => (Some(meta.clone()), Vec::new()),
            Some(EventTarget::Merged(cells)) => (None, cells.clone()),
            None => (None, Vec::new()),
        };

        Self {
            x: raw.x,
            y: raw.y,
            timestamp: raw.timestamp,
            view_meta,
            merged_cells,
        }
    }
}

/// Caller callback for a cell interaction.
pub type CellCallback = Rc<dyn Fn(CellData)>;

/// Optional caller callbacks, one per interaction event.
#[derive(Clone, Default)]
pub struct SheetCallbacks {
    pub on_data_cell_mouse_up: Option<CellCallback>,
    pub on_row_cell_click: Option<CellCallback>,
    pub on_col_cell_click: Option<CellCallback>,
    pub on_merged_cells_click: Option<CellCallback>,
}

impl std::fmt::Debug for SheetCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetCallbacks")
            .field("on_data_cell_mouse_up", &self.on_data_cell_mouse_up.is_some())
            .field("on_row_cell_click", &self.on_row_cell_click.is_some())
            .field("on_col_cell_click", &self.on_col_cell_click.is_some())
            .field("on_merged_cells_click", &self.on_merged_cells_click.is_some())
            .finish()
    }
}

/// One row of the binding table.
#[derive(Clone, Copy)]
pub struct Binding {
    pub event: SheetEvent,
    pub normalize: fn(&RawEvent) -> CellData,
    pub callback: fn(&SheetCallbacks) -> Option<&CellCallback>,
}

fn data_cell_mouse_up(callbacks: &SheetCallbacks) -> Option<&CellCallback> {
    callbacks.on_data_cell_mouse_up.as_ref()
}

fn row_cell_click(callbacks: &SheetCallbacks) -> Option<&CellCallback> {
    callbacks.on_row_cell_click.as_ref()
}

fn col_cell_click(callbacks: &SheetCallbacks) -> Option<&CellCallback> {
    callbacks.on_col_cell_click.as_ref()
}

fn merged_cells_click(callbacks: &SheetCallbacks) -> Option<&CellCallback> {
    callbacks.on_merged_cells_click.as_ref()
}

/// Every interaction event the controller subscribes.
pub const INTERACTION_EVENTS: [Binding; 4] = [
    Binding {
        event: SheetEvent::DataCellMouseUp,
        normalize: CellData::from_event,
        callback: data_cell_mouse_up,
    },
    Binding {
        event: SheetEvent::RowCellClick,
        normalize: CellData::from_event,
        callback: row_cell_click,
    },
    Binding {
        event: SheetEvent::ColCellClick,
        normalize: CellData::from_event,
        callback: col_cell_click,
    },
    Binding {
        event: SheetEvent::MergedCellsClick,
        normalize: CellData::from_event,
        callback: merged_cells_click,
    },
];

/// Subscribe every binding on the renderer.
///
/// Handlers read `callbacks` when they fire, so replacing a callback takes
/// effect without resubscribing.
pub(crate) fn bind(renderer: &mut dyn SheetRenderer, callbacks: &Rc<RefCell<SheetCallbacks>>) {
    for binding in INTERACTION_EVENTS {
        let callbacks = Rc::clone(callbacks);
        renderer.on(
            binding.event,
            Box::new(move |raw: &RawEvent| {
                let data = (binding.normalize)(raw);
                let callback = (binding.callback)(&*callbacks.borrow()).cloned();
                match callback {
                    Some(callback) => callback(data),
                    None => trace!("[sheet] no callback for {}, dropped", binding.event),
                }
            }),
        );
    }
}

/// Unsubscribe every binding from the renderer.
pub(crate) fn unbind(renderer: &mut dyn SheetRenderer) {
    for binding in INTERACTION_EVENTS {
        renderer.off(binding.event);
    }
}
