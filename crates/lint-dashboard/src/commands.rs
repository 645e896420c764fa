//! Command interface.
//!
//! Every user-facing dashboard action is a [`DashboardCommand`]. Hosts bind keys and mouse
//! gestures to commands and run them through [`Dashboard::execute`].
//!
//! # Example
//!
//! ```rust
//! use lint_dashboard::{CommandResult, Dashboard, DashboardCommand, LintState, MemoryHost};
//!
//! let mut host = MemoryHost::new();
//! let window = host.open_window();
//! host.open_file(window, "src/main.rs", "fn main() {}\n").unwrap();
//!
//! let mut dashboard = Dashboard::default();
//! let lint = LintState::new();
//!
//! let result = dashboard
//!     .execute(&mut host, &lint, DashboardCommand::Open)
//!     .unwrap();
//! assert!(matches!(result, CommandResult::Rendered { .. }));
//! assert!(dashboard.state().text().ends_with("No errors or warnings found!"));
//! ```

use crate::diagnostics::LintState;
use crate::error::DashboardError;
use crate::format::NavTarget;
use crate::host::{EditorHost, ViewId};
use crate::navigation::{NavigationMode, focus_from_selection};
use crate::panel::Dashboard;

/// A user-facing dashboard action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Show (creating if needed) the active window's panel and refresh it.
    Open,
    /// Replace the active window's panel content with `text`. Its lines are not navigable.
    Write {
        /// New panel content.
        text: String,
    },
    /// Jump to the location under the panel's caret.
    Jump,
    /// Reveal the location under the panel's caret without leaving the panel.
    Peek,
    /// Close the active window's panel and focus the editor.
    Close,
    /// Show or hide warning lines.
    ToggleWarnings,
    /// Show or hide the help text.
    ToggleHelp,
    /// Move focus from the panel back to the editor, leaving the panel open.
    Unfocus,
    /// A double click landed in `view`.
    DoubleClick {
        /// The clicked view.
        view: ViewId,
    },
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The command completed.
    Success,
    /// The panel was (re)rendered.
    Rendered {
        /// The rendered panel.
        panel: ViewId,
    },
    /// The caret moved to a source location.
    Navigated(NavTarget),
    /// Nothing to do: no panel open, no caret, or a non-navigable line.
    Ignored,
    /// The command is not meant for the dashboard; the host should run its default action.
    PassThrough,
}

impl CommandResult {
    fn rendered(panel: Option<ViewId>) -> Self {
        match panel {
            Some(panel) => CommandResult::Rendered { panel },
            None => CommandResult::Ignored,
        }
    }

    fn navigated(target: Option<NavTarget>) -> Self {
        match target {
            Some(target) => CommandResult::Navigated(target),
            None => CommandResult::Ignored,
        }
    }
}

impl Dashboard {
    /// Execute a single command against `host`, reading diagnostics from `lint`.
    pub fn execute<H: EditorHost + ?Sized>(
        &mut self,
        host: &mut H,
        lint: &LintState,
        command: DashboardCommand,
    ) -> Result<CommandResult, DashboardError> {
        tracing::trace!(?command, "executing dashboard command");
        match command {
            DashboardCommand::Open => {
                self.show(host)?;
                Ok(CommandResult::rendered(self.refresh(host, lint)?))
            }
            DashboardCommand::Write { text } => match self.write_active(host, &text)? {
                Some(_) => Ok(CommandResult::Success),
                None => Ok(CommandResult::Ignored),
            },
            DashboardCommand::Jump => self.navigate(host, NavigationMode::Jump),
            DashboardCommand::Peek => self.navigate(host, NavigationMode::Peek),
            DashboardCommand::Close => {
                let Some((window, panel)) = self.active_panel(host) else {
                    return Ok(CommandResult::Ignored);
                };
                host.close_view(panel);
                host.focus_last_editor(window, panel);
                Ok(CommandResult::Success)
            }
            DashboardCommand::ToggleWarnings => {
                Ok(CommandResult::rendered(self.toggle_warnings(host, lint)?))
            }
            DashboardCommand::ToggleHelp => {
                Ok(CommandResult::rendered(self.toggle_help(host, lint)?))
            }
            DashboardCommand::Unfocus => {
                let Some((window, panel)) = self.active_panel(host) else {
                    return Ok(CommandResult::Ignored);
                };
                if host.focus_last_editor(window, panel) {
                    Ok(CommandResult::Success)
                } else {
                    Ok(CommandResult::Ignored)
                }
            }
            DashboardCommand::DoubleClick { view } => {
                if !self.is_panel(host, view) {
                    return Ok(CommandResult::PassThrough);
                }
                let index = self.navigation_index();
                let target = focus_from_selection(host, index, view, NavigationMode::Jump)?;
                Ok(CommandResult::navigated(target))
            }
        }
    }

    fn navigate<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        mode: NavigationMode,
    ) -> Result<CommandResult, DashboardError> {
        let Some((_, panel)) = self.active_panel(host) else {
            return Ok(CommandResult::Ignored);
        };
        let target = focus_from_selection(host, self.navigation_index(), panel, mode)?;
        Ok(CommandResult::navigated(target))
    }
}
