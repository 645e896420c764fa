//! Refresh triggers and plugin lifecycle.
//!
//! [`DashboardPlugin`] ties a host, a [`Dashboard`] and a [`HighlightInterceptor`] together:
//!
//! - [`start`](DashboardPlugin::start): intercept the engine's highlight routine, clear every
//!   panel to the loading placeholder, refresh once
//! - [`stop`](DashboardPlugin::stop): restore the original highlight routine
//! - [`on_post_save`](DashboardPlugin::on_post_save): refresh after a document was saved
//! - [`run`](DashboardPlugin::run): execute a user command
//!
//! Nothing here reports failures to the user. Errors are logged and the action is dropped.
//!
//! # Example
//!
//! ```rust
//! use lint_dashboard::{
//!     DashboardCommand, DashboardPlugin, HighlightSpan, LineDiagnostic, LintEngine, LintReport,
//!     MemoryHost, Severity,
//! };
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let host = Rc::new(RefCell::new(MemoryHost::new()));
//! let window = host.borrow_mut().open_window();
//! let view = host
//!     .borrow_mut()
//!     .open_file(window, "src/lib.rs", "fn f() {}\n")
//!     .unwrap();
//!
//! let mut engine = LintEngine::new();
//! let mut plugin = DashboardPlugin::new(Rc::clone(&host), Default::default());
//! plugin.start(&mut engine);
//! plugin.run(engine.state(), DashboardCommand::Open);
//!
//! let mut report = LintReport::clean(view);
//! report.errors.insert(0, vec![LineDiagnostic::new(3, "missing docs")]);
//! report.highlights.push(HighlightSpan::new(Severity::Error, [0]));
//! engine.highlight(report);
//!
//! assert!(plugin.dashboard().state().text().contains(" !  1: missing docs"));
//! plugin.stop(&mut engine);
//! ```

use crate::commands::{CommandResult, DashboardCommand};
use crate::diagnostics::LintState;
use crate::hook::{HighlightInterceptor, RefreshListener};
use crate::host::EditorHost;
use crate::linter::LintEngine;
use crate::panel::{Dashboard, DashboardConfig};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

fn refresh_shared<H: EditorHost>(
    host: &RefCell<H>,
    dashboard: &RefCell<Dashboard>,
    lint: &LintState,
) {
    let (Ok(mut host), Ok(mut dashboard)) = (host.try_borrow_mut(), dashboard.try_borrow_mut())
    else {
        tracing::debug!("dashboard busy; skipping nested refresh");
        return;
    };
    if let Err(err) = dashboard.refresh(&mut *host, lint) {
        tracing::warn!(%err, "dashboard refresh failed");
    }
}

/// The dashboard wired into a host and a lint engine.
pub struct DashboardPlugin<H: EditorHost + 'static> {
    host: Rc<RefCell<H>>,
    dashboard: Rc<RefCell<Dashboard>>,
    interceptor: HighlightInterceptor,
}

impl<H: EditorHost + 'static> DashboardPlugin<H> {
    /// Create a plugin for `host`. Nothing is hooked until [`start`](Self::start).
    pub fn new(host: Rc<RefCell<H>>, config: DashboardConfig) -> Self {
        Self {
            host,
            dashboard: Rc::new(RefCell::new(Dashboard::new(config))),
            interceptor: HighlightInterceptor::new(),
        }
    }

    /// The shared host.
    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.host
    }

    /// The dashboard.
    pub fn dashboard(&self) -> Ref<'_, Dashboard> {
        self.dashboard.borrow()
    }

    /// Whether the highlight routine is currently intercepted.
    pub fn is_hooked(&self) -> bool {
        self.interceptor.is_installed()
    }

    fn listener(&self) -> RefreshListener {
        let host = Rc::clone(&self.host);
        let dashboard = Rc::clone(&self.dashboard);
        Rc::new(move |lint: &LintState| refresh_shared(&host, &dashboard, lint))
    }

    /// Hook into `engine`, reset open panels to the placeholder and render once.
    pub fn start(&mut self, engine: &mut LintEngine) {
        let listener = self.listener();
        self.interceptor.install(engine, listener);

        let cleared = match (self.host.try_borrow_mut(), self.dashboard.try_borrow()) {
            (Ok(mut host), Ok(dashboard)) => dashboard.clear_all(&mut *host),
            _ => 0,
        };
        tracing::debug!(cleared, "dashboard plugin started");

        self.refresh(engine.state());
    }

    /// Unhook from `engine`.
    pub fn stop(&mut self, engine: &mut LintEngine) {
        self.interceptor.uninstall(engine);
        tracing::debug!("dashboard plugin stopped");
    }

    /// Re-render the active window's panel.
    pub fn refresh(&self, lint: &LintState) {
        refresh_shared(&self.host, &self.dashboard, lint);
    }

    /// A document was saved.
    pub fn on_post_save(&self, lint: &LintState) {
        self.refresh(lint);
    }

    /// Execute a user command. Failures are logged and reported as [`CommandResult::Ignored`].
    pub fn run(&self, lint: &LintState, command: DashboardCommand) -> CommandResult {
        let (Ok(mut host), Ok(mut dashboard)) =
            (self.host.try_borrow_mut(), self.dashboard.try_borrow_mut())
        else {
            tracing::debug!(?command, "dashboard busy; dropping command");
            return CommandResult::Ignored;
        };

        match dashboard.execute(&mut *host, lint, command) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%err, "dashboard command failed");
                CommandResult::Ignored
            }
        }
    }
}

impl<H: EditorHost + 'static> std::fmt::Debug for DashboardPlugin<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardPlugin")
            .field("dashboard", &self.dashboard)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}
