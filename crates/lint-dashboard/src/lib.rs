#![warn(missing_docs)]
//! Lint Dashboard - a diagnostics panel for editors
//!
//! # Overview
//!
//! `lint-dashboard` collects the diagnostics a host linting engine keeps for every open document
//! and renders them into a single read-only panel per window. Moving the caret onto a diagnostic
//! line and jumping (or peeking) takes the user back to the source location.
//!
//! The crate computes no diagnostics of its own. It reads the engine's shared registry
//! ([`LintState`]), and learns about updates by intercepting the engine's highlight routine
//! ([`HighlightInterceptor`]) and from post-save notifications.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Plugin lifecycle & refresh triggers        │  ← start / stop / on_post_save
//! ├─────────────────────────────────────────────┤
//! │  Commands (open, jump, peek, toggles, ...)  │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  Panel renderer      │  Navigation          │
//! ├──────────────────────┴──────────────────────┤
//! │  Line formatter + navigation index          │
//! ├─────────────────────────────────────────────┤
//! │  Lint registry (diagnostics + severities)   │  ← owned by the engine
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The editor itself is reached through the [`EditorHost`] trait; [`MemoryHost`] implements it
//! in memory.
//!
//! # Quick Start
//!
//! ```rust
//! use lint_dashboard::{
//!     Dashboard, DashboardCommand, EditorHost, HighlightSpan, LineDiagnostic, LintState,
//!     MemoryHost, Severity,
//! };
//!
//! let mut host = MemoryHost::new();
//! let window = host.open_window();
//! let view = host.open_file(window, "a/b/c.py", "x = 1\ny = 2\nz = 3\nbad\n").unwrap();
//!
//! let mut lint = LintState::new();
//! lint.errors.push(view, 3, LineDiagnostic::new(0, "bad thing"));
//! lint.highlights.replace(view, vec![HighlightSpan::new(Severity::Error, [3])]);
//!
//! let mut dashboard = Dashboard::default();
//! dashboard.execute(&mut host, &lint, DashboardCommand::Open).unwrap();
//!
//! let text = dashboard.state().text();
//! assert!(text.contains("c.py/b/a:"));
//! assert!(text.contains(" !  4: bad thing"));
//!
//! // Put the caret on the diagnostic line and jump to it.
//! let (_, panel) = dashboard.active_panel(&host).unwrap();
//! host.move_caret(panel, 3, 0).unwrap();
//! dashboard.execute(&mut host, &lint, DashboardCommand::Jump).unwrap();
//! assert_eq!(host.focused_view(window), Some(view));
//! ```
//!
//! # Module Description
//!
//! - [`host`] - Editor host interface
//! - [`workspace`] - In-memory editor host
//! - [`diagnostics`] - Shared lint registry
//! - [`linter`] - Host linting engine and its highlight routine slot
//! - [`hook`] - Reversible highlight interception
//! - [`format`] - Dashboard text and navigation index
//! - [`panel`] - Panel rendering and toggle state
//! - [`navigation`] - Jump / peek to source locations
//! - [`commands`] - Command interface
//! - [`plugin`] - Refresh triggers and lifecycle
//! - [`syntax`] - Dashboard line classification for coloring

pub mod commands;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod hook;
pub mod host;
pub mod line_index;
pub mod linter;
pub mod navigation;
pub mod panel;
pub mod plugin;
pub mod syntax;
pub mod workspace;

pub use commands::{CommandResult, DashboardCommand};
pub use diagnostics::{
    DiagnosticsSource, DocumentDiagnostics, HighlightSpan, LineDiagnostic, LintState, Severity,
    SeverityIndex,
};
pub use error::{DashboardError, HostError};
pub use format::{
    DisplayToggles, HELP_LINES, HINT_LINE, NO_DIAGNOSTICS_LINE, NavTarget, NavigationIndex,
    OpenDocument, RenderedDashboard, fold_line_breaks, format_dashboard, format_diagnostic_line,
    format_file_path, format_header_line,
};
pub use hook::{HighlightInterceptor, RefreshListener};
pub use host::{EditorHost, PanelOptions, Region, ShowMode, ViewId, WindowId};
pub use line_index::{LineIndex, is_line_break};
pub use linter::{HighlightFn, LintEngine, LintReport, store_report};
pub use navigation::{NavigationMode, focus_from_cursor, focus_from_selection};
pub use panel::{
    DASHBOARD_PANEL_NAME, DASHBOARD_SYNTAX, Dashboard, DashboardConfig, LOADING_PLACEHOLDER,
    PanelState,
};
pub use plugin::DashboardPlugin;
pub use syntax::{DashboardScope, DashboardSyntax, LineKind, StyledSpan};
pub use workspace::{MemoryHost, ScrollRequest};
