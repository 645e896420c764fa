//! In-memory editor host.
//!
//! [`MemoryHost`] models just enough of a multi-window editor to drive the dashboard:
//!
//! - windows, each with an ordered list of views and a focus history
//! - views with rope-backed text, a name, an optional file path, a read-only flag and selections
//! - scroll state driven by [`EditorHost::show`]
//!
//! It backs the integration tests and the demo TUI. Real editors implement [`EditorHost`] over
//! their own window model instead.

use crate::error::HostError;
use crate::host::{EditorHost, PanelOptions, Region, ShowMode, ViewId, WindowId};
use crate::line_index::LineIndex;
use std::collections::{BTreeMap, HashMap};

const DEFAULT_VIEWPORT_HEIGHT: usize = 24;

/// The last scroll request a view received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Character offset that was brought into view.
    pub point: usize,
    /// How it was brought into view.
    pub mode: ShowMode,
}

#[derive(Debug, Default)]
struct WindowEntry {
    views: Vec<ViewId>,
    /// Most recently focused last.
    focus_history: Vec<ViewId>,
}

#[derive(Debug)]
struct ViewEntry {
    window: WindowId,
    name: Option<String>,
    file_name: Option<String>,
    text: LineIndex,
    read_only: bool,
    scratch: bool,
    syntax: Option<String>,
    selections: Vec<Region>,
    scroll_top: usize,
    viewport_height: usize,
    last_scroll: Option<ScrollRequest>,
}

impl ViewEntry {
    fn new(window: WindowId, text: &str) -> Self {
        Self {
            window,
            name: None,
            file_name: None,
            text: LineIndex::from_text(text),
            read_only: false,
            scratch: false,
            syntax: None,
            selections: vec![Region::caret(0)],
            scroll_top: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            last_scroll: None,
        }
    }
}

/// An in-memory [`EditorHost`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    windows: BTreeMap<WindowId, WindowEntry>,
    views: HashMap<ViewId, ViewEntry>,
    active_window: Option<WindowId>,
}

impl MemoryHost {
    /// Create a host with no windows.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn view(&self, view: ViewId) -> Result<&ViewEntry, HostError> {
        self.views.get(&view).ok_or(HostError::ViewNotFound(view))
    }

    fn view_mut(&mut self, view: ViewId) -> Result<&mut ViewEntry, HostError> {
        self.views
            .get_mut(&view)
            .ok_or(HostError::ViewNotFound(view))
    }

    fn add_view(&mut self, window: WindowId, entry: ViewEntry) -> Result<ViewId, HostError> {
        if !self.windows.contains_key(&window) {
            return Err(HostError::WindowNotFound(window));
        }
        let id = ViewId(self.next_id());
        self.views.insert(id, entry);
        if let Some(w) = self.windows.get_mut(&window) {
            w.views.push(id);
        }
        Ok(id)
    }

    /// Open a new window and make it active.
    pub fn open_window(&mut self) -> WindowId {
        let id = WindowId(self.next_id());
        self.windows.insert(id, WindowEntry::default());
        self.active_window = Some(id);
        id
    }

    /// Make `window` the active window.
    pub fn set_active_window(&mut self, window: WindowId) -> Result<(), HostError> {
        if !self.windows.contains_key(&window) {
            return Err(HostError::WindowNotFound(window));
        }
        self.active_window = Some(window);
        Ok(())
    }

    /// Open a file-backed view in `window` and focus it.
    pub fn open_file(
        &mut self,
        window: WindowId,
        path: impl Into<String>,
        text: &str,
    ) -> Result<ViewId, HostError> {
        let mut entry = ViewEntry::new(window, text);
        entry.file_name = Some(path.into());
        let id = self.add_view(window, entry)?;
        self.focus_view(id)?;
        Ok(id)
    }

    /// Open an unsaved view (no file path) in `window` and focus it.
    pub fn open_untitled(&mut self, window: WindowId, text: &str) -> Result<ViewId, HostError> {
        let id = self.add_view(window, ViewEntry::new(window, text))?;
        self.focus_view(id)?;
        Ok(id)
    }

    /// Whether `view` is a scratch view.
    pub fn is_scratch(&self, view: ViewId) -> Result<bool, HostError> {
        Ok(self.view(view)?.scratch)
    }

    /// Syntax assigned to `view`.
    pub fn syntax(&self, view: ViewId) -> Result<Option<String>, HostError> {
        Ok(self.view(view)?.syntax.clone())
    }

    /// Number of lines in `view`.
    pub fn line_count(&self, view: ViewId) -> Result<usize, HostError> {
        Ok(self.view(view)?.text.line_count())
    }

    /// Text of one line of `view`, without its newline.
    pub fn line_text(&self, view: ViewId, line: usize) -> Result<Option<String>, HostError> {
        Ok(self.view(view)?.text.get_line_text(line))
    }

    /// Place a single caret at `(line, column)` in `view`.
    pub fn move_caret(
        &mut self,
        view: ViewId,
        line: usize,
        column: usize,
    ) -> Result<(), HostError> {
        let point = self.text_point(view, line, column)?;
        self.set_selection(view, Region::caret(point))
    }

    /// Remove every selection of `view`.
    pub fn clear_selections(&mut self, view: ViewId) -> Result<(), HostError> {
        self.view_mut(view)?.selections.clear();
        Ok(())
    }

    /// First visible line of `view`.
    pub fn scroll_top(&self, view: ViewId) -> Result<usize, HostError> {
        Ok(self.view(view)?.scroll_top)
    }

    /// Set the number of visible lines of `view`.
    pub fn set_viewport_height(&mut self, view: ViewId, height: usize) -> Result<(), HostError> {
        self.view_mut(view)?.viewport_height = height.max(1);
        Ok(())
    }

    /// The last [`EditorHost::show`] request `view` received.
    pub fn last_scroll(&self, view: ViewId) -> Result<Option<ScrollRequest>, HostError> {
        Ok(self.view(view)?.last_scroll)
    }
}

impl EditorHost for MemoryHost {
    fn windows(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    fn views(&self, window: WindowId) -> Vec<ViewId> {
        self.windows
            .get(&window)
            .map(|w| w.views.clone())
            .unwrap_or_default()
    }

    fn window_of(&self, view: ViewId) -> Option<WindowId> {
        self.views.get(&view).map(|v| v.window)
    }

    fn view_name(&self, view: ViewId) -> Option<String> {
        self.views.get(&view).and_then(|v| v.name.clone())
    }

    fn file_name(&self, view: ViewId) -> Option<String> {
        self.views.get(&view).and_then(|v| v.file_name.clone())
    }

    fn create_panel(
        &mut self,
        window: WindowId,
        options: &PanelOptions,
    ) -> Result<ViewId, HostError> {
        let mut entry = ViewEntry::new(window, "");
        entry.name = Some(options.name.clone());
        entry.syntax = options.syntax.clone();
        entry.read_only = options.read_only;
        entry.scratch = options.scratch;
        self.add_view(window, entry)
    }

    fn close_view(&mut self, view: ViewId) -> bool {
        let Some(entry) = self.views.remove(&view) else {
            return false;
        };
        if let Some(window) = self.windows.get_mut(&entry.window) {
            window.views.retain(|id| *id != view);
            window.focus_history.retain(|id| *id != view);
        }
        true
    }

    fn focus_view(&mut self, view: ViewId) -> Result<(), HostError> {
        let window = self.view(view)?.window;
        let entry = self
            .windows
            .get_mut(&window)
            .ok_or(HostError::WindowNotFound(window))?;
        entry.focus_history.retain(|id| *id != view);
        entry.focus_history.push(view);
        self.active_window = Some(window);
        Ok(())
    }

    fn focused_view(&self, window: WindowId) -> Option<ViewId> {
        self.windows
            .get(&window)
            .and_then(|w| w.focus_history.last().copied())
    }

    fn focus_last_editor(&mut self, window: WindowId, excluding: ViewId) -> bool {
        let candidate = self.windows.get(&window).and_then(|w| {
            w.focus_history
                .iter()
                .rev()
                .chain(w.views.iter().rev())
                .find(|id| **id != excluding)
                .copied()
        });
        match candidate {
            Some(view) => self.focus_view(view).is_ok(),
            None => false,
        }
    }

    fn is_read_only(&self, view: ViewId) -> Result<bool, HostError> {
        Ok(self.view(view)?.read_only)
    }

    fn set_read_only(&mut self, view: ViewId, read_only: bool) -> Result<(), HostError> {
        self.view_mut(view)?.read_only = read_only;
        Ok(())
    }

    fn replace_all(&mut self, view: ViewId, text: &str) -> Result<(), HostError> {
        let entry = self.view_mut(view)?;
        if entry.read_only {
            return Err(HostError::ReadOnly(view));
        }
        entry.text.replace_all(text);

        let len = entry.text.char_count();
        for region in &mut entry.selections {
            region.a = region.a.min(len);
            region.b = region.b.min(len);
        }
        let last_line = entry.text.line_count().saturating_sub(1);
        entry.scroll_top = entry.scroll_top.min(last_line);
        Ok(())
    }

    fn text(&self, view: ViewId) -> Result<String, HostError> {
        Ok(self.view(view)?.text.get_text())
    }

    fn text_point(&self, view: ViewId, line: usize, column: usize) -> Result<usize, HostError> {
        Ok(self.view(view)?.text.position_to_char_offset(line, column))
    }

    fn row_col(&self, view: ViewId, point: usize) -> Result<(usize, usize), HostError> {
        Ok(self.view(view)?.text.char_offset_to_position(point))
    }

    fn selections(&self, view: ViewId) -> Result<Vec<Region>, HostError> {
        Ok(self.view(view)?.selections.clone())
    }

    fn set_selection(&mut self, view: ViewId, region: Region) -> Result<(), HostError> {
        let entry = self.view_mut(view)?;
        let len = entry.text.char_count();
        entry.selections = vec![Region::new(region.a.min(len), region.b.min(len))];
        Ok(())
    }

    fn show(&mut self, view: ViewId, point: usize, mode: ShowMode) -> Result<(), HostError> {
        let entry = self.view_mut(view)?;
        let (line, _) = entry.text.char_offset_to_position(point);
        let height = entry.viewport_height;

        entry.scroll_top = match mode {
            ShowMode::Centered => line.saturating_sub(height / 2),
            ShowMode::Visible if line < entry.scroll_top => line,
            ShowMode::Visible if line >= entry.scroll_top + height => line + 1 - height,
            ShowMode::Visible => entry.scroll_top,
        };
        entry.last_scroll = Some(ScrollRequest { point, mode });
        Ok(())
    }
}
