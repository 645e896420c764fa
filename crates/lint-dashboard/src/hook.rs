//! Reversible interception of the engine's highlight routine.
//!
//! The dashboard has to learn when the engine has finished updating the shared registry. The
//! engine offers no subscription API, so [`HighlightInterceptor`] wraps the routine in the
//! engine's slot: the wrapper calls the original, then the listener.
//!
//! Invariants:
//! - the true original is captured exactly once; a second `install` is a no-op
//! - `uninstall` puts back the very same `Rc` that was taken out
//! - `uninstall` only restores when the slot still holds this interceptor's wrapper, so a routine
//!   installed on top by someone else is never silently dropped; the interceptor then stays
//!   installed

use crate::diagnostics::LintState;
use crate::linter::{HighlightFn, LintEngine, LintReport};
use std::rc::Rc;

/// Called after every highlight pass with the updated registry.
pub type RefreshListener = Rc<dyn Fn(&LintState)>;

/// Wraps [`LintEngine`]'s highlight routine with a post-update listener.
#[derive(Default)]
pub struct HighlightInterceptor {
    original: Option<HighlightFn>,
    wrapper: Option<HighlightFn>,
}

impl HighlightInterceptor {
    /// Create an interceptor that has not been installed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this interceptor's wrapper is currently installed.
    pub fn is_installed(&self) -> bool {
        self.wrapper.is_some()
    }

    /// The routine that was in the slot before installation.
    pub fn original(&self) -> Option<&HighlightFn> {
        self.original.as_ref()
    }

    /// Wrap the engine's highlight routine so `listener` runs after it.
    ///
    /// Returns `false` (and changes nothing) if already installed.
    pub fn install(&mut self, engine: &mut LintEngine, listener: RefreshListener) -> bool {
        if self.is_installed() {
            tracing::debug!("highlight interceptor already installed");
            return false;
        }

        let original = engine.highlight_routine();
        let inner = Rc::clone(&original);
        let wrapper: HighlightFn = Rc::new(move |state: &mut LintState, report: &LintReport| {
            inner(state, report);
            listener(state);
        });

        engine.replace_highlight_routine(Rc::clone(&wrapper));
        self.original = Some(original);
        self.wrapper = Some(wrapper);
        tracing::debug!("highlight interceptor installed");
        true
    }

    /// Restore the original highlight routine.
    ///
    /// Returns `false` if nothing was installed, or if the slot no longer holds this
    /// interceptor's wrapper. In that case the slot is left alone and the interceptor stays
    /// installed, since the foreign routine on top still calls through to it.
    pub fn uninstall(&mut self, engine: &mut LintEngine) -> bool {
        let Some(wrapper) = self.wrapper.as_ref() else {
            return false;
        };

        if !Rc::ptr_eq(&engine.highlight_routine(), wrapper) {
            tracing::warn!("highlight routine was replaced by another hook; leaving it in place");
            return false;
        }

        self.wrapper = None;
        let Some(original) = self.original.take() else {
            return false;
        };
        engine.replace_highlight_routine(original);
        tracing::debug!("highlight interceptor uninstalled");
        true
    }
}

impl std::fmt::Debug for HighlightInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightInterceptor")
            .field("installed", &self.is_installed())
            .finish()
    }
}
