//! Host collaborators: the drawable container and the window resize signal.

use uuid::Uuid;

/// Current box of a container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A mountable drawable region the renderer paints into.
pub trait Surface {
    /// The container's current computed box.
    ///
    /// Returns `None` once the container has been detached from the host.
    fn measure(&self) -> Option<Size>;
}

/// One window resize signal. Only used as a change trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSample {
    /// Milliseconds since the host's time origin.
    pub timestamp: u64,
}

impl ResizeSample {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

/// Callback invoked on every window resize signal.
pub type ResizeListener = Box<dyn Fn(ResizeSample)>;

/// Handle for a registered resize listener.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Create a new unique listener ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Window-level resize signal source.
///
/// Registrations are process-wide; every listener added must be removed
/// exactly once.
pub trait WindowEvents {
    /// Register a resize listener.
    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId;

    /// Remove a previously registered listener.
    fn remove_resize_listener(&self, id: ListenerId);
}
