//! The sheet controller.
//!
//! `TabularSheet` keeps exactly one renderer alive between `mount` and
//! `unmount`, and translates declarative prop changes into in-place renderer
//! mutations:
//!
//! | Prop        | Compared by      | On change                               |
//! |-------------|------------------|-----------------------------------------|
//! | data config | identity         | push data config, rebuild options       |
//! | options     | identity         | rebuild options                         |
//! | theme       | document value   | push theme                              |
//! | factory     | identity         | teardown, then rebuild                  |
//! | callbacks   | never            | adopted; live handlers read them        |
//!
//! Themes are compared by value because callers routinely rebuild an
//! equivalent theme on every pass.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::SheetConfig;
use crate::data::DataConfig;
use crate::debounce::{Debouncer, Settled};
use crate::error::SheetError;
use crate::events::{self, CellCallback, CellData, SheetCallbacks};
use crate::header::{HeaderProps, HeaderView};
use crate::layout::build_options;
use crate::options::SheetOptions;
use crate::renderer::{SheetFactory, SheetRenderer, same_factory};
use crate::sanitize::{DefaultSanitizer, Sanitize};
use crate::surface::{ListenerId, ResizeSample, Surface, WindowEvents};
use crate::theme::SheetTheme;

/// Called once the renderer has been built and painted.
pub type ReadyCallback = Rc<dyn Fn(&dyn SheetRenderer)>;

/// Declarative inputs of a sheet.
#[derive(Clone)]
pub struct SheetProps {
    pub data_cfg: Arc<DataConfig>,
    pub options: Arc<SheetOptions>,
    pub theme: SheetTheme,
    /// Follow window resizes. Read at mount.
    pub adaptive: bool,
    pub header: Option<HeaderProps>,
    /// Overrides the internal loading flag when set.
    pub is_loading: Option<bool>,
    /// Custom renderer construction.
    pub factory: Option<SheetFactory>,
    pub callbacks: SheetCallbacks,
    pub on_ready: Option<ReadyCallback>,
}

impl SheetProps {
    pub fn new(data_cfg: impl Into<Arc<DataConfig>>) -> Self {
        Self {
            data_cfg: data_cfg.into(),
            options: Arc::new(SheetOptions::default()),
            theme: SheetTheme::tabular(),
            adaptive: true,
            header: None,
            is_loading: None,
            factory: None,
            callbacks: SheetCallbacks::default(),
            on_ready: None,
        }
    }

    pub fn with_data_cfg(mut self, data_cfg: impl Into<Arc<DataConfig>>) -> Self {
        self.data_cfg = data_cfg.into();
        self
    }

    pub fn with_options(mut self, options: impl Into<Arc<SheetOptions>>) -> Self {
        self.options = options.into();
        self
    }

    pub fn with_theme(mut self, theme: SheetTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn with_header(mut self, header: HeaderProps) -> Self {
        self.header = Some(header);
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    pub fn with_factory(mut self, factory: SheetFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn on_data_cell_mouse_up(mut self, f: impl Fn(CellData) + 'static) -> Self {
        self.callbacks.on_data_cell_mouse_up = Some(Rc::new(f) as CellCallback);
        self
    }

    pub fn on_row_cell_click(mut self, f: impl Fn(CellData) + 'static) -> Self {
        self.callbacks.on_row_cell_click = Some(Rc::new(f) as CellCallback);
        self
    }

    pub fn on_col_cell_click(mut self, f: impl Fn(CellData) + 'static) -> Self {
        self.callbacks.on_col_cell_click = Some(Rc::new(f) as CellCallback);
        self
    }

    pub fn on_merged_cells_click(mut self, f: impl Fn(CellData) + 'static) -> Self {
        self.callbacks.on_merged_cells_click = Some(Rc::new(f) as CellCallback);
        self
    }

    pub fn on_ready(mut self, f: impl Fn(&dyn SheetRenderer) + 'static) -> Self {
        self.on_ready = Some(Rc::new(f) as ReadyCallback);
        self
    }
}

/// Window listener plus the debouncer it feeds.
struct ResizeBridge {
    window: Rc<dyn WindowEvents>,
    listener: ListenerId,
    debouncer: Debouncer<ResizeSample>,
    settled: Settled<ResizeSample>,
}

/// Prop values the renderer last accepted.
///
/// Diffs run against this rather than the previous props, so a rejected push
/// is retried by the next `set_props`.
struct Pushed {
    data_cfg: Arc<DataConfig>,
    options: Arc<SheetOptions>,
    theme: SheetTheme,
}

impl Pushed {
    fn of(props: &SheetProps) -> Self {
        Self {
            data_cfg: Arc::clone(&props.data_cfg),
            options: Arc::clone(&props.options),
            theme: props.theme.clone(),
        }
    }
}

/// Renderer mutation run by [`TabularSheet::apply_update`].
type Mutator = fn(&TabularSheet, &mut dyn SheetRenderer) -> Result<(), SheetError>;

/// Lifecycle controller for one mounted sheet.
///
/// Single-threaded: lives on the host's UI thread. Dropping the controller
/// unmounts it.
pub struct TabularSheet {
    config: SheetConfig,
    props: SheetProps,
    pushed: Pushed,
    default_factory: SheetFactory,
    sanitizer: Box<dyn Sanitize>,
    callbacks: Rc<RefCell<SheetCallbacks>>,
    container: Option<Rc<dyn Surface>>,
    instance: Option<Box<dyn SheetRenderer>>,
    resize: Option<ResizeBridge>,
    loading: bool,
}

impl TabularSheet {
    /// Create an unmounted controller.
    ///
    /// `default_factory` builds the renderer unless the props carry their own
    /// factory.
    pub fn new(default_factory: SheetFactory, props: SheetProps) -> Self {
        let callbacks = Rc::new(RefCell::new(props.callbacks.clone()));
        Self {
            config: SheetConfig::default(),
            pushed: Pushed::of(&props),
            props,
            default_factory,
            sanitizer: Box::new(DefaultSanitizer),
            callbacks,
            container: None,
            instance: None,
            resize: None,
            loading: true,
        }
    }

    /// Replace the configuration. Takes effect at the next mount.
    pub fn with_config(mut self, config: SheetConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: impl Sanitize + 'static) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount into `container`, building the renderer.
    ///
    /// Adaptive sheets also listen to `window` for resizes and must be
    /// mounted inside a tokio runtime. Mounting twice is a no-op.
    pub fn mount(&mut self, container: Rc<dyn Surface>, window: Rc<dyn WindowEvents>) -> Result<(), SheetError> {
        if self.container.is_some() {
            warn!("[sheet] mount() called on a mounted sheet, ignored");
            return Ok(());
        }

        let resize = if self.props.adaptive {
            Some(Debouncer::new(self.config.resize_debounce)?)
        } else {
            None
        };

        self.container = Some(container);
        if let Err(err) = self.ensure_instance() {
            self.container = None;
            return Err(err);
        }

        if let Some((debouncer, settled)) = resize {
            let signal = debouncer.clone();
            let listener = window.add_resize_listener(Box::new(move |sample: ResizeSample| signal.signal(sample)));
            debug!("[sheet] resize listener {} registered", listener);
            self.resize = Some(ResizeBridge {
                window,
                listener,
                debouncer,
                settled,
            });
        }

        Ok(())
    }

    /// Tear everything down. Calling it again is a no-op.
    pub fn unmount(&mut self) {
        if let Some(bridge) = self.resize.take() {
            bridge.debouncer.cancel();
            bridge.window.remove_resize_listener(bridge.listener);
            debug!("[sheet] resize listener {} removed", bridge.listener);
        }
        self.teardown();
        self.container = None;
    }

    /// Build the renderer if none exists.
    ///
    /// Sequence: sanitize, construct, subscribe events, push data config,
    /// options and theme, render, clear loading, notify `on_ready`.
    fn ensure_instance(&mut self) -> Result<(), SheetError> {
        if self.instance.is_some() {
            return Ok(());
        }
        let Some(container) = self.container.clone() else {
            return Ok(());
        };

        let data_cfg = self.sanitizer.data_config(&self.props.data_cfg)?;
        let options = self.sanitized_options()?;
        let factory = self
            .props
            .factory
            .clone()
            .unwrap_or_else(|| Rc::clone(&self.default_factory));

        let mut instance = factory(&*container, &data_cfg, &options);
        events::bind(&mut *instance, &self.callbacks);
        instance.set_data_config(data_cfg);
        instance.set_options(options);
        instance.set_theme(self.props.theme.clone());
        instance.render(true);
        self.loading = false;
        self.pushed = Pushed::of(&self.props);
        debug!("[sheet] renderer built");

        if let Some(on_ready) = &self.props.on_ready {
            on_ready(&*instance);
        }
        self.instance = Some(instance);
        Ok(())
    }

    /// Unsubscribe and destroy the renderer. The only path to `destroy()`.
    fn teardown(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            events::unbind(&mut *instance);
            instance.destroy();
            debug!("[sheet] renderer destroyed");
        }
    }

    // =========================================================================
    // Prop synchronization
    // =========================================================================

    /// Adopt new props and push whatever changed into the renderer.
    ///
    /// Changes arriving before the renderer exists are absorbed. A sanitizer
    /// rejection leaves that part of the renderer in its last good state and
    /// is retried on the next call; the theme is pushed either way. The first
    /// error is returned.
    pub fn set_props(&mut self, props: SheetProps) -> Result<(), SheetError> {
        let prev = std::mem::replace(&mut self.props, props);
        *self.callbacks.borrow_mut() = self.props.callbacks.clone();

        if prev.adaptive != self.props.adaptive {
            debug!("[sheet] adaptive changed after mount, applies at next mount");
        }

        if !same_factory(prev.factory.as_ref(), self.props.factory.as_ref()) && self.instance.is_some() {
            debug!("[sheet] factory changed, rebuilding renderer");
            self.teardown();
            return self.ensure_instance();
        }

        // A data change rebuilds options too, which covers an options change.
        let mut result = Ok(());
        if !Arc::ptr_eq(&self.pushed.data_cfg, &self.props.data_cfg) {
            result = self.apply_update(Self::push_data_config, Some(Self::push_options as Mutator));
            if result.is_ok() {
                self.pushed.data_cfg = Arc::clone(&self.props.data_cfg);
                self.pushed.options = Arc::clone(&self.props.options);
            }
        } else if !Arc::ptr_eq(&self.pushed.options, &self.props.options) {
            result = self.apply_update(Self::push_options, None);
            if result.is_ok() {
                self.pushed.options = Arc::clone(&self.props.options);
            }
        }

        if !self.pushed.theme.same_as(&self.props.theme) {
            let theme = self.apply_update(Self::push_theme, None);
            if theme.is_ok() {
                self.pushed.theme = self.props.theme.clone();
            }
            result = result.and(theme);
        }
        result
    }

    /// Two-phase update: mutator, then callback, then repaint.
    ///
    /// Both phases only run against a live renderer. Loading is cleared once
    /// either way.
    fn apply_update(&mut self, mutator: Mutator, callback: Option<Mutator>) -> Result<(), SheetError> {
        let result = match self.instance.take() {
            Some(mut instance) => {
                let mut result = mutator(self, &mut *instance);
                if result.is_ok()
                    && let Some(callback) = callback
                {
                    result = callback(self, &mut *instance);
                }
                match &result {
                    Ok(()) => instance.render(true),
                    Err(err) => warn!("[sheet] update rejected: {}", err),
                }
                self.instance = Some(instance);
                result
            }
            None => Ok(()),
        };
        self.loading = false;
        result
    }

    fn push_data_config(&self, instance: &mut dyn SheetRenderer) -> Result<(), SheetError> {
        instance.set_data_config(self.sanitizer.data_config(&self.props.data_cfg)?);
        Ok(())
    }

    fn push_options(&self, instance: &mut dyn SheetRenderer) -> Result<(), SheetError> {
        instance.set_options(self.sanitized_options()?);
        Ok(())
    }

    fn push_theme(&self, instance: &mut dyn SheetRenderer) -> Result<(), SheetError> {
        instance.set_theme(self.props.theme.clone());
        Ok(())
    }

    fn sanitized_options(&self) -> Result<SheetOptions, SheetError> {
        let merged = build_options(
            &self.props.options,
            &self.props.data_cfg,
            self.config.default_line_height,
        );
        Ok(self.sanitizer.options(&merged)?)
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Wait for the next settled resize.
    ///
    /// Returns `None` immediately when the sheet is not adaptive or not
    /// mounted.
    pub async fn next_resize(&mut self) -> Option<ResizeSample> {
        match &mut self.resize {
            Some(bridge) => bridge.settled.recv().await,
            None => None,
        }
    }

    /// Resize the renderer to the container's current box and repaint
    /// without relayout.
    ///
    /// Dropped when the sheet is not adaptive, has been unmounted, or the
    /// container no longer has a box.
    pub fn apply_resize(&mut self, sample: ResizeSample) {
        if self.resize.is_none() {
            debug!("[sheet] resize {} dropped, not listening", sample.timestamp);
            return;
        }
        let (Some(container), Some(instance)) = (self.container.as_ref(), self.instance.as_mut()) else {
            debug!("[sheet] resize {} dropped, no renderer", sample.timestamp);
            return;
        };
        let Some(size) = container.measure() else {
            debug!("[sheet] resize {} dropped, container detached", sample.timestamp);
            return;
        };

        instance.change_size(size.width, size.height);
        instance.render(false);
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// Loading indicator state.
    pub fn loading(&self) -> bool {
        self.props.is_loading.unwrap_or(self.loading)
    }

    /// Header bound to the live renderer, if both exist.
    pub fn header(&self) -> Option<HeaderView<'_>> {
        let props = self.props.header.as_ref()?;
        let sheet = self.instance.as_deref()?;
        Some(HeaderView::new(props, sheet))
    }

    /// The live renderer, read-only.
    pub fn instance(&self) -> Option<&dyn SheetRenderer> {
        self.instance.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn props(&self) -> &SheetProps {
        &self.props
    }
}

impl Drop for TabularSheet {
    fn drop(&mut self) {
        self.unmount();
    }
}
