//! Dashboard panel rendering and state.
//!
//! A [`Dashboard`] owns the display toggles, the last rendered text and the
//! [`NavigationIndex`] for it. The panel surface itself belongs to the host window: it is looked
//! up by its reserved name, created on first [`Dashboard::show`], and kept read-only except while
//! [`Dashboard::write`] replaces its content.
//!
//! One `Dashboard` serves every window, so toggles are shared across windows.

use crate::diagnostics::LintState;
use crate::error::{DashboardError, HostError};
use crate::format::{
    DisplayToggles, NavigationIndex, OpenDocument, RenderedDashboard, format_dashboard,
};
use crate::host::{EditorHost, PanelOptions, ViewId, WindowId};
use crate::line_index::LineIndex;

/// Reserved view name of the dashboard panel.
pub const DASHBOARD_PANEL_NAME: &str = "LintDashboard";

/// Text written into every open panel before the first refresh.
pub const LOADING_PLACEHOLDER: &str = "<Loading>";

/// Syntax id the panel is created with (see [`crate::syntax`]).
pub const DASHBOARD_SYNTAX: &str = "lint-dashboard";

/// Header path used for documents with neither a file name nor a view name.
pub const UNTITLED_PATH: &str = "untitled";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Reserved panel name. Must be unique among view names.
    pub panel_name: String,
    /// Placeholder written by [`Dashboard::clear_all`].
    pub placeholder: String,
    /// Syntax id assigned to new panels.
    pub syntax: Option<String>,
    /// Initial `show_warnings` toggle.
    pub show_warnings: bool,
    /// Initial `show_help` toggle.
    pub show_help: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            panel_name: DASHBOARD_PANEL_NAME.to_string(),
            placeholder: LOADING_PLACEHOLDER.to_string(),
            syntax: Some(DASHBOARD_SYNTAX.to_string()),
            show_warnings: true,
            show_help: false,
        }
    }
}

/// Toggles and last rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    /// Render warning lines.
    pub show_warnings: bool,
    /// Render help instead of diagnostics.
    pub show_help: bool,
    text: String,
}

impl PanelState {
    /// Toggles as consumed by the formatter.
    pub fn toggles(&self) -> DisplayToggles {
        DisplayToggles {
            show_warnings: self.show_warnings,
            show_help: self.show_help,
        }
    }

    /// Text of the last successful refresh.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Temporarily writable panel. Read-only is restored on drop, whatever happened in between.
struct Writable<'a, H: EditorHost + ?Sized> {
    host: &'a mut H,
    view: ViewId,
}

impl<'a, H: EditorHost + ?Sized> Writable<'a, H> {
    fn acquire(host: &'a mut H, view: ViewId) -> Result<Self, HostError> {
        host.set_read_only(view, false)?;
        Ok(Self { host, view })
    }

    fn replace_all(&mut self, text: &str) -> Result<(), HostError> {
        self.host.replace_all(self.view, text)
    }
}

impl<H: EditorHost + ?Sized> Drop for Writable<'_, H> {
    fn drop(&mut self) {
        if let Err(err) = self.host.set_read_only(self.view, true) {
            tracing::warn!(view = self.view.get(), %err, "failed to restore read-only panel");
        }
    }
}

/// The diagnostics dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    state: PanelState,
    index: NavigationIndex,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl Dashboard {
    /// Create a dashboard. Nothing is rendered until the first refresh.
    pub fn new(config: DashboardConfig) -> Self {
        let state = PanelState {
            show_warnings: config.show_warnings,
            show_help: config.show_help,
            text: String::new(),
        };
        Self {
            config,
            state,
            index: NavigationIndex::default(),
        }
    }

    /// Settings this dashboard was created with.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Current toggles and text.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Navigation index of the last successful refresh.
    pub fn navigation_index(&self) -> &NavigationIndex {
        &self.index
    }

    /// Whether `view` is a dashboard panel.
    pub fn is_panel<H: EditorHost + ?Sized>(&self, host: &H, view: ViewId) -> bool {
        host.view_name(view).as_deref() == Some(self.config.panel_name.as_str())
    }

    /// The dashboard panel of `window`, if one is open.
    pub fn find_panel<H: EditorHost + ?Sized>(
        &self,
        host: &H,
        window: WindowId,
    ) -> Option<ViewId> {
        host.views(window)
            .into_iter()
            .find(|view| self.is_panel(host, *view))
    }

    /// The dashboard panel of the active window, if one is open.
    pub fn active_panel<H: EditorHost + ?Sized>(&self, host: &H) -> Option<(WindowId, ViewId)> {
        let window = host.active_window()?;
        Some((window, self.find_panel(host, window)?))
    }

    /// Find or create the active window's panel and focus it.
    pub fn show<H: EditorHost + ?Sized>(&self, host: &mut H) -> Result<ViewId, DashboardError> {
        let window = host.active_window().ok_or(DashboardError::NoActiveWindow)?;

        let panel = match self.find_panel(host, window) {
            Some(panel) => panel,
            None => {
                let options = PanelOptions {
                    name: self.config.panel_name.clone(),
                    syntax: self.config.syntax.clone(),
                    read_only: true,
                    scratch: true,
                };
                let panel = host.create_panel(window, &options)?;
                tracing::debug!(
                    window = window.get(),
                    panel = panel.get(),
                    "created dashboard panel"
                );
                panel
            }
        };

        host.focus_view(panel)?;
        Ok(panel)
    }

    /// Replace the whole content of `panel` with `text`.
    ///
    /// The panel is writable only for the duration of the replace.
    pub fn write<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        panel: ViewId,
        text: &str,
    ) -> Result<(), DashboardError> {
        let mut writable = Writable::acquire(host, panel)?;
        writable.replace_all(text)?;
        Ok(())
    }

    /// Replace the active window's panel content with `text` that did not come from the
    /// formatter.
    ///
    /// Every line of `text` is non-navigable until the next refresh. Returns `Ok(None)` when the
    /// active window has no panel open.
    pub fn write_active<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        text: &str,
    ) -> Result<Option<ViewId>, DashboardError> {
        let Some((_, panel)) = self.active_panel(host) else {
            return Ok(None);
        };
        self.write(host, panel, text)?;

        self.state.text = text.to_string();
        self.index = NavigationIndex::inert(LineIndex::from_text(text).line_count());
        Ok(Some(panel))
    }

    /// Write the loading placeholder into every open panel. Returns how many were cleared.
    pub fn clear_all<H: EditorHost + ?Sized>(&self, host: &mut H) -> usize {
        let mut cleared = 0;
        for window in host.windows() {
            let Some(panel) = self.find_panel(host, window) else {
                continue;
            };
            match self.write(host, panel, &self.config.placeholder) {
                Ok(()) => cleared += 1,
                Err(err) => {
                    tracing::warn!(window = window.get(), %err, "failed to clear dashboard panel");
                }
            }
        }
        cleared
    }

    /// Documents open in `window`, with the path their header will show.
    pub fn open_documents<H: EditorHost + ?Sized>(
        &self,
        host: &H,
        window: WindowId,
    ) -> Vec<OpenDocument> {
        host.views(window)
            .into_iter()
            .filter(|view| !self.is_panel(host, *view))
            .map(|view| {
                let path = host
                    .file_name(view)
                    .or_else(|| host.view_name(view))
                    .unwrap_or_else(|| UNTITLED_PATH.to_string());
                OpenDocument::new(view, path)
            })
            .collect()
    }

    /// Format the dashboard for `window` with the current toggles, without touching any panel.
    pub fn render<H: EditorHost + ?Sized>(
        &self,
        host: &H,
        window: WindowId,
        lint: &LintState,
    ) -> RenderedDashboard {
        let open = self.open_documents(host, window);
        format_dashboard(&open, &lint.errors, &lint.highlights, self.state.toggles())
    }

    /// Re-render the active window's panel from `lint`.
    ///
    /// Returns `Ok(None)` when the active window has no panel open. The navigation index is
    /// replaced only after the panel accepted the new text.
    pub fn refresh<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        lint: &LintState,
    ) -> Result<Option<ViewId>, DashboardError> {
        let Some((window, panel)) = self.active_panel(host) else {
            tracing::trace!("no dashboard panel in the active window");
            return Ok(None);
        };

        let rendered = self.render(host, window, lint);
        self.write(host, panel, &rendered.text)?;

        tracing::debug!(
            panel = panel.get(),
            lines = rendered.index.len(),
            documents = lint.errors.len(),
            "dashboard refreshed"
        );
        self.state.text = rendered.text;
        self.index = rendered.index;
        Ok(Some(panel))
    }

    /// Flip `show_warnings` and refresh.
    pub fn toggle_warnings<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        lint: &LintState,
    ) -> Result<Option<ViewId>, DashboardError> {
        self.state.show_warnings = !self.state.show_warnings;
        self.refresh(host, lint)
    }

    /// Flip `show_help` and refresh.
    pub fn toggle_help<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        lint: &LintState,
    ) -> Result<Option<ViewId>, DashboardError> {
        self.state.show_help = !self.state.show_help;
        self.refresh(host, lint)
    }
}
