//! Dashboard syntax.
//!
//! Classifies rendered dashboard lines and produces styled spans for diagnostic lines, so hosts
//! can color the panel (errors vs. warnings, line numbers, file headers). Regex rules only; the
//! dashboard text shape is fixed by [`crate::format`].

use crate::format::HINT_LINE;
use crate::line_index::LineIndex;
use regex::Regex;

/// Kind of a dashboard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// The hint line at the top.
    Hint,
    /// An empty separator line.
    Blank,
    /// A `reversed/path:` document header.
    FileHeader,
    /// A diagnostic line marked as error.
    Error,
    /// A diagnostic line marked as warning.
    Warning,
    /// Anything else (help text, placeholders, the empty-state message).
    Info,
}

/// Styled part of a dashboard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardScope {
    /// The header path, without its trailing colon.
    Path,
    /// The `!` error marker.
    ErrorMarker,
    /// The 1-based line number of a diagnostic.
    LineNumber,
    /// The message of an error line.
    ErrorMessage,
    /// The message of a warning line.
    WarningMessage,
}

/// A styled character range (half-open, char offsets into the whole text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Scope of the range.
    pub scope: DashboardScope,
}

/// Regex-based dashboard line classifier.
#[derive(Debug, Clone)]
pub struct DashboardSyntax {
    diagnostic: Regex,
    header: Regex,
}

impl DashboardSyntax {
    /// Compile the dashboard rules.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            diagnostic: Regex::new(r"^ ([! ])  (\d+): (.*)$")?,
            header: Regex::new(r"^([^ ].*):$")?,
        })
    }

    /// Classify one dashboard line by its content.
    pub fn classify_line(&self, text: &str) -> LineKind {
        if text == HINT_LINE {
            return LineKind::Hint;
        }
        if text.is_empty() {
            return LineKind::Blank;
        }
        if let Some(caps) = self.diagnostic.captures(text) {
            return match caps.get(1).map(|m| m.as_str()) {
                Some("!") => LineKind::Error,
                _ => LineKind::Warning,
            };
        }
        if self.header.is_match(text) {
            return LineKind::FileHeader;
        }
        LineKind::Info
    }

    /// Classify every line of `text`.
    pub fn classify(&self, text: &str) -> Vec<LineKind> {
        text.split('\n')
            .map(|line| self.classify_line(line))
            .collect()
    }

    /// Styled spans for headers and diagnostic lines of `index`'s text.
    pub fn highlight(&self, index: &LineIndex) -> Vec<StyledSpan> {
        let mut spans = Vec::new();

        for line in 0..index.line_count() {
            let Some(text) = index.get_line_text(line) else {
                continue;
            };
            let line_start = index.position_to_char_offset(line, 0);
            let span = |start: usize, end: usize, scope| StyledSpan {
                start: line_start + char_len(&text[..start]),
                end: line_start + char_len(&text[..end]),
                scope,
            };

            match self.classify_line(&text) {
                LineKind::FileHeader => {
                    spans.push(span(0, text.len() - 1, DashboardScope::Path));
                }
                kind @ (LineKind::Error | LineKind::Warning) => {
                    let Some(caps) = self.diagnostic.captures(&text) else {
                        continue;
                    };
                    let (Some(number), Some(message)) = (caps.get(2), caps.get(3)) else {
                        continue;
                    };
                    let message_scope = if kind == LineKind::Error {
                        if let Some(marker) = caps.get(1) {
                            spans.push(span(
                                marker.start(),
                                marker.end(),
                                DashboardScope::ErrorMarker,
                            ));
                        }
                        DashboardScope::ErrorMessage
                    } else {
                        DashboardScope::WarningMessage
                    };
                    spans.push(span(number.start(), number.end(), DashboardScope::LineNumber));
                    spans.push(span(message.start(), message.end(), message_scope));
                }
                _ => {}
            }
        }

        spans
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
