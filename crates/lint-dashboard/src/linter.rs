//! Host linting engine.
//!
//! [`LintEngine`] stands in for the external engine that computes diagnostics. It owns the
//! shared [`LintState`] and runs a replaceable highlight routine after each lint pass. The
//! routine lives in a slot so that [`HighlightInterceptor`](crate::HighlightInterceptor) can
//! wrap it and restore it later.

use crate::diagnostics::{DocumentDiagnostics, HighlightSpan, LintState};
use crate::host::ViewId;
use std::rc::Rc;

/// Result of one lint pass over a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    /// Linted document.
    pub view: ViewId,
    /// Diagnostics by zero-based line.
    pub errors: DocumentDiagnostics,
    /// Severity spans for the same document.
    pub highlights: Vec<HighlightSpan>,
}

impl LintReport {
    /// A report with no findings.
    pub fn clean(view: ViewId) -> Self {
        Self {
            view,
            errors: DocumentDiagnostics::new(),
            highlights: Vec::new(),
        }
    }
}

/// The engine's highlight routine: applies a report to the shared registry.
pub type HighlightFn = Rc<dyn Fn(&mut LintState, &LintReport)>;

/// Default highlight routine: store the report's diagnostics and spans for its document.
pub fn store_report(state: &mut LintState, report: &LintReport) {
    state.errors.replace(report.view, report.errors.clone());
    state
        .highlights
        .replace(report.view, report.highlights.clone());
}

/// The host linting engine.
pub struct LintEngine {
    state: LintState,
    highlight: HighlightFn,
}

impl LintEngine {
    /// Create an engine with an empty registry and the default highlight routine.
    pub fn new() -> Self {
        Self {
            state: LintState::new(),
            highlight: Rc::new(store_report),
        }
    }

    /// The shared registry.
    pub fn state(&self) -> &LintState {
        &self.state
    }

    /// Apply a lint pass result through the current highlight routine.
    pub fn highlight(&mut self, report: LintReport) {
        let routine = Rc::clone(&self.highlight);
        routine(&mut self.state, &report);
    }

    /// Drop everything known about a closed document.
    pub fn forget(&mut self, view: ViewId) {
        self.state.errors.remove(view);
        self.state.highlights.remove(view);
    }

    /// The routine currently in the highlight slot.
    pub fn highlight_routine(&self) -> HighlightFn {
        Rc::clone(&self.highlight)
    }

    /// Swap the highlight slot, returning the previous routine.
    pub fn replace_highlight_routine(&mut self, routine: HighlightFn) -> HighlightFn {
        std::mem::replace(&mut self.highlight, routine)
    }
}

impl Default for LintEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LintEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
