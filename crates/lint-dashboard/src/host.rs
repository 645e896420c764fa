//! Editor host interface.
//!
//! The dashboard never owns windows, views or text. Everything it needs from the surrounding
//! editor goes through [`EditorHost`]: enumerating windows and their views, creating the panel,
//! replacing panel content, converting between `(line, column)` and character offsets, and
//! moving focus/selection in source views.
//!
//! [`MemoryHost`](crate::MemoryHost) is an in-memory implementation used by tests and the demo
//! TUI.

use crate::error::HostError;

/// Opaque identifier for a top-level editor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub(crate) u64);

impl WindowId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for a view (an open document or a panel) in some window.
///
/// Diagnostics are keyed by this handle: it is the "document" a lint result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub(crate) u64);

impl ViewId {
    /// Create a view id from a raw host handle.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A selection region in character offsets. `a` is the anchor, `b` the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Anchor offset.
    pub a: usize,
    /// Caret offset.
    pub b: usize,
}

impl Region {
    /// Create a region from anchor and caret offsets.
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// An empty region (a plain caret) at `point`.
    pub fn caret(point: usize) -> Self {
        Self { a: point, b: point }
    }

    /// Whether the region is a plain caret.
    pub fn is_empty(&self) -> bool {
        self.a == self.b
    }
}

/// How [`EditorHost::show`] scrolls a view to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    /// Scroll only as far as needed for the point to be visible.
    Visible,
    /// Scroll so the point's line sits in the middle of the viewport.
    Centered,
}

/// Attributes of a freshly created panel view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    /// Reserved view name used to find the panel again.
    pub name: String,
    /// Syntax identifier the host should color the panel with.
    pub syntax: Option<String>,
    /// Whether the view starts read-only.
    pub read_only: bool,
    /// Scratch views never prompt to save when closed.
    pub scratch: bool,
}

/// The editor window/view API surface consumed by the dashboard.
///
/// Implementations are expected to be driven from a single UI thread.
pub trait EditorHost {
    /// All top-level windows, in host order.
    fn windows(&self) -> Vec<WindowId>;

    /// The window that currently has input focus, if any.
    fn active_window(&self) -> Option<WindowId>;

    /// Views open in `window`, in tab order.
    fn views(&self, window: WindowId) -> Vec<ViewId>;

    /// The window owning `view`.
    fn window_of(&self, view: ViewId) -> Option<WindowId>;

    /// The display name assigned to `view` (panels carry a reserved name).
    fn view_name(&self, view: ViewId) -> Option<String>;

    /// The file path backing `view`, if it has one.
    fn file_name(&self, view: ViewId) -> Option<String>;

    /// Create a new panel view in `window`.
    fn create_panel(
        &mut self,
        window: WindowId,
        options: &PanelOptions,
    ) -> Result<ViewId, HostError>;

    /// Close `view`. Returns `false` if it was not open.
    fn close_view(&mut self, view: ViewId) -> bool;

    /// Activate `view`'s window and give `view` input focus.
    fn focus_view(&mut self, view: ViewId) -> Result<(), HostError>;

    /// The view with input focus in `window`.
    fn focused_view(&self, window: WindowId) -> Option<ViewId>;

    /// Focus the most recently focused view in `window` other than `excluding`.
    ///
    /// Returns `false` if there is no such view.
    fn focus_last_editor(&mut self, window: WindowId, excluding: ViewId) -> bool;

    /// Whether `view` rejects content changes.
    fn is_read_only(&self, view: ViewId) -> Result<bool, HostError>;

    /// Toggle `view`'s read-only flag.
    fn set_read_only(&mut self, view: ViewId, read_only: bool) -> Result<(), HostError>;

    /// Replace the entire content of `view` with `text`.
    ///
    /// Fails with [`HostError::ReadOnly`] if the view is read-only.
    fn replace_all(&mut self, view: ViewId, text: &str) -> Result<(), HostError>;

    /// Full text of `view`.
    fn text(&self, view: ViewId) -> Result<String, HostError>;

    /// Character offset of `(line, column)` in `view`, clamped to the document.
    fn text_point(&self, view: ViewId, line: usize, column: usize) -> Result<usize, HostError>;

    /// `(line, column)` of character offset `point` in `view`.
    fn row_col(&self, view: ViewId, point: usize) -> Result<(usize, usize), HostError>;

    /// Current selection regions of `view` (primary first).
    fn selections(&self, view: ViewId) -> Result<Vec<Region>, HostError>;

    /// Replace every selection of `view` with the single `region`.
    fn set_selection(&mut self, view: ViewId, region: Region) -> Result<(), HostError>;

    /// Scroll `view` so `point` is on screen.
    fn show(&mut self, view: ViewId, point: usize, mode: ShowMode) -> Result<(), HostError>;
}
