//! Dashboard text formatting.
//!
//! [`format_dashboard`] turns the shared lint registry into the panel text plus a
//! [`NavigationIndex`] whose entry `i` describes display line `i`. The index always has exactly
//! one entry per line of the text, and is rebuilt from scratch on every call.
//!
//! Text layout:
//!
//! ```text
//! <hint line>
//!
//! c.py/b/a:
//!  !  4: bad thing
//!     9: unused variable
//!
//! ```
//!
//! Each diagnostic line is `" " + marker + "  " + (line + 1) + ": " + message`, where the marker
//! is `!` for errors and a space for warnings.

use crate::diagnostics::{DiagnosticsSource, Severity, SeverityIndex};
use crate::host::ViewId;
use crate::line_index::is_line_break;
use std::collections::HashMap;

/// First line of every rendering.
pub const HINT_LINE: &str =
    "Lint Dashboard: [enter] jump  [space] peek  [w] warnings  [?] help  [esc] close";

/// Shown instead of diagnostics when help is toggled on.
pub const HELP_LINES: &[&str] = &[
    "Key bindings",
    "  enter / double-click   jump to the diagnostic under the cursor",
    "  space                  show the diagnostic without leaving the dashboard",
    "  w                      show or hide warnings",
    "  ?                      show or hide this help",
    "  tab                    move focus back to the editor",
    "  esc                    close the dashboard",
    "",
    "Lines marked with ! are errors; unmarked lines are warnings.",
    "Line numbers are 1-based.",
];

/// Shown when no open document has diagnostics.
pub const NO_DIAGNOSTICS_LINE: &str = "No errors or warnings found!";

/// Marker prefixed to error lines.
pub const ERROR_MARKER: char = '!';

/// Marker prefixed to warning lines.
pub const WARNING_MARKER: char = ' ';

/// Display toggles consulted by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    /// Render lines classified as warnings.
    pub show_warnings: bool,
    /// Render the help text instead of diagnostics.
    pub show_help: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_warnings: true,
            show_help: false,
        }
    }
}

/// Where a dashboard line navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTarget {
    /// Document the diagnostic belongs to.
    pub view: ViewId,
    /// Zero-based line, if the entry points at a line.
    pub line: Option<usize>,
    /// Zero-based column, if the entry points at a column.
    pub column: Option<usize>,
}

impl NavTarget {
    /// A target at `(line, column)` in `view`.
    pub fn at(view: ViewId, line: usize, column: usize) -> Self {
        Self {
            view,
            line: Some(line),
            column: Some(column),
        }
    }
}

/// Display line → navigation target. `None` marks a line that is not navigable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationIndex {
    entries: Vec<Option<NavTarget>>,
}

impl NavigationIndex {
    /// An index of `lines` non-navigable entries, for text the formatter did not produce.
    pub fn inert(lines: usize) -> Self {
        Self {
            entries: vec![None; lines],
        }
    }

    /// Target of display line `line`, if it is in range and navigable.
    pub fn get(&self, line: usize) -> Option<&NavTarget> {
        self.entries.get(line).and_then(Option::as_ref)
    }

    /// All entries, one per display line.
    pub fn entries(&self) -> &[Option<NavTarget>] {
        &self.entries
    }

    /// Number of entries (equals the number of display lines).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty (nothing rendered yet).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formatter output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDashboard {
    /// Newline-joined display text.
    pub text: String,
    /// One entry per line of `text`.
    pub index: NavigationIndex,
}

/// A document open in the window being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    /// View handle the diagnostics are keyed by.
    pub view: ViewId,
    /// Path shown in the document header.
    pub path: String,
}

impl OpenDocument {
    /// Create an open document entry.
    pub fn new(view: ViewId, path: impl Into<String>) -> Self {
        Self {
            view,
            path: path.into(),
        }
    }
}

/// Reverse the `/`-separated segments of `path`: `a/b/c.py` becomes `c.py/b/a`.
pub fn format_file_path(path: &str) -> String {
    path.split('/').rev().collect::<Vec<_>>().join("/")
}

/// Replace every line break (see [`is_line_break`]) with a space, so `text` renders as exactly
/// one panel line.
pub fn fold_line_breaks(text: &str) -> String {
    text.chars()
        .map(|c| if is_line_break(c) { ' ' } else { c })
        .collect()
}

/// Format a document header line for `path`.
pub fn format_header_line(path: &str) -> String {
    format!("{}:", fold_line_breaks(&format_file_path(path)))
}

/// Format one diagnostic line.
///
/// Line breaks inside `message` are folded into spaces so one diagnostic stays one display line.
pub fn format_diagnostic_line(severity: Severity, line: usize, message: &str) -> String {
    let marker = match severity {
        Severity::Error => ERROR_MARKER,
        Severity::Warning => WARNING_MARKER,
    };
    format!(" {marker}  {}: {}", line + 1, fold_line_breaks(message))
}

#[derive(Default)]
struct LineBuffer {
    lines: Vec<String>,
    entries: Vec<Option<NavTarget>>,
}

impl LineBuffer {
    fn push(&mut self, line: impl Into<String>, target: Option<NavTarget>) {
        self.lines.push(line.into());
        self.entries.push(target);
    }

    fn finish(self) -> RenderedDashboard {
        RenderedDashboard {
            text: self.lines.join("\n"),
            index: NavigationIndex {
                entries: self.entries,
            },
        }
    }
}

/// Render the dashboard for the documents in `open`.
///
/// Documents are visited in `errors` order; documents with no diagnostic lines, or not present
/// in `open`, are skipped. With warnings hidden, a document whose lines are all warnings still
/// gets its header and trailing blank line.
pub fn format_dashboard(
    open: &[OpenDocument],
    errors: &DiagnosticsSource,
    highlights: &SeverityIndex,
    toggles: DisplayToggles,
) -> RenderedDashboard {
    let mut out = LineBuffer::default();
    out.push(HINT_LINE, None);
    out.push("", None);

    if toggles.show_help {
        for line in HELP_LINES {
            out.push(*line, None);
        }
        return out.finish();
    }

    let paths: HashMap<ViewId, &str> = open
        .iter()
        .map(|doc| (doc.view, doc.path.as_str()))
        .collect();

    let mut emitted = false;
    for (view, lines) in errors.iter() {
        if lines.is_empty() {
            continue;
        }
        let Some(path) = paths.get(&view) else {
            continue;
        };

        emitted = true;
        out.push(format_header_line(path), None);

        for (&line, diagnostics) in lines {
            let severity = highlights.classify(view, line);
            if !toggles.show_warnings && severity != Severity::Error {
                continue;
            }
            for diagnostic in diagnostics {
                out.push(
                    format_diagnostic_line(severity, line, &diagnostic.message),
                    Some(NavTarget::at(view, line, diagnostic.column)),
                );
            }
        }

        out.push("", None);
    }

    if !emitted {
        out.push(NO_DIAGNOSTICS_LINE, None);
    }

    out.finish()
}
