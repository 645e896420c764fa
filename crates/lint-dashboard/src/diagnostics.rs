//! Shared lint registry.
//!
//! The host linting engine maintains two per-document tables that the dashboard reads but never
//! mutates:
//!
//! - [`DiagnosticsSource`]: document → line → `(column, message)` list
//! - [`SeverityIndex`]: document → highlight spans, each tagging a set of lines as error or
//!   warning
//!
//! [`LintState`] bundles both, the way the engine keeps them side by side.

use crate::host::ViewId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Severity tag of a highlight span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Error.
    Error,
    /// Warning. Lines with no covering span are classified as warnings too.
    Warning,
}

impl Severity {
    /// Parse a host severity tag (`"error"` / `"warning"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            _ => None,
        }
    }

    /// The host severity tag.
    pub fn as_tag(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single diagnostic on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// Zero-based column in characters.
    pub column: usize,
    /// Diagnostic message.
    pub message: String,
}

impl LineDiagnostic {
    /// Create a diagnostic at `column`.
    pub fn new(column: usize, message: impl Into<String>) -> Self {
        Self {
            column,
            message: message.into(),
        }
    }
}

/// Diagnostics of one document, ordered by zero-based line number.
pub type DocumentDiagnostics = BTreeMap<usize, Vec<LineDiagnostic>>;

/// Document → diagnostics table.
///
/// Iteration follows first-insertion order of documents; replacing an existing document's
/// entries keeps its position.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSource {
    order: Vec<ViewId>,
    entries: HashMap<ViewId, DocumentDiagnostics>,
}

impl DiagnosticsSource {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all diagnostics of `view`.
    pub fn replace(&mut self, view: ViewId, diagnostics: DocumentDiagnostics) {
        if self.entries.insert(view, diagnostics).is_none() {
            self.order.push(view);
        }
    }

    /// Append a single diagnostic.
    pub fn push(&mut self, view: ViewId, line: usize, diagnostic: LineDiagnostic) {
        if !self.entries.contains_key(&view) {
            self.order.push(view);
        }
        self.entries
            .entry(view)
            .or_default()
            .entry(line)
            .or_default()
            .push(diagnostic);
    }

    /// Drop every entry of `view`.
    pub fn remove(&mut self, view: ViewId) -> Option<DocumentDiagnostics> {
        let removed = self.entries.remove(&view)?;
        self.order.retain(|id| *id != view);
        Some(removed)
    }

    /// Diagnostics of `view`.
    pub fn get(&self, view: ViewId) -> Option<&DocumentDiagnostics> {
        self.entries.get(&view)
    }

    /// Iterate documents in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &DocumentDiagnostics)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|diagnostics| (*id, diagnostics)))
    }

    /// Number of documents with an entry (possibly empty).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table has no documents.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A highlight span: a set of lines sharing one severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Severity of every covered line.
    pub severity: Severity,
    /// Covered zero-based line numbers.
    pub lines: BTreeSet<usize>,
}

impl HighlightSpan {
    /// Create a span covering `lines`.
    pub fn new(severity: Severity, lines: impl IntoIterator<Item = usize>) -> Self {
        Self {
            severity,
            lines: lines.into_iter().collect(),
        }
    }

    /// Whether `line` is covered by this span.
    pub fn covers(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }
}

/// Document → highlight spans table.
#[derive(Debug, Clone, Default)]
pub struct SeverityIndex {
    spans: HashMap<ViewId, Vec<HighlightSpan>>,
}

impl SeverityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all spans of `view`.
    pub fn replace(&mut self, view: ViewId, spans: Vec<HighlightSpan>) {
        self.spans.insert(view, spans);
    }

    /// Drop every span of `view`.
    pub fn remove(&mut self, view: ViewId) -> Option<Vec<HighlightSpan>> {
        self.spans.remove(&view)
    }

    /// Spans of `view` in stored order.
    pub fn spans(&self, view: ViewId) -> &[HighlightSpan] {
        self.spans.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classify `line` of `view`: the first span covering it wins, no span means warning.
    pub fn classify(&self, view: ViewId, line: usize) -> Severity {
        self.spans(view)
            .iter()
            .find(|span| span.covers(line))
            .map(|span| span.severity)
            .unwrap_or(Severity::Warning)
    }
}

/// The engine's shared registry: diagnostics plus their severity classification.
#[derive(Debug, Clone, Default)]
pub struct LintState {
    /// Per-document diagnostics.
    pub errors: DiagnosticsSource,
    /// Per-document highlight spans.
    pub highlights: SeverityIndex,
}

impl LintState {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}
