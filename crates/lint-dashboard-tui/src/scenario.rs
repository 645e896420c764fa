//! Scenario files: the documents to open and the diagnostics the fake linter reports for them.

use lint_dashboard::{
    DocumentDiagnostics, HighlightSpan, LineDiagnostic, LintReport, Severity, ViewId,
};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub files: Vec<ScenarioFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFile {
    pub path: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub diagnostics: Vec<ScenarioDiagnostic>,
}

/// One diagnostic. `line` and `column` are 0-based.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioDiagnostic {
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
}

impl Scenario {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), files = scenario.files.len(), "scenario loaded");
        Ok(scenario)
    }
}

impl ScenarioFile {
    /// The lint pass result for this file, opened as `view`.
    pub fn report(&self, view: ViewId) -> LintReport {
        let mut errors = DocumentDiagnostics::new();
        let mut error_lines = Vec::new();
        let mut warning_lines = Vec::new();

        for diagnostic in &self.diagnostics {
            errors
                .entry(diagnostic.line)
                .or_default()
                .push(LineDiagnostic::new(diagnostic.column, diagnostic.message.clone()));

            match diagnostic.severity() {
                Severity::Error => error_lines.push(diagnostic.line),
                Severity::Warning => warning_lines.push(diagnostic.line),
            }
        }

        let mut highlights = Vec::new();
        if !error_lines.is_empty() {
            highlights.push(HighlightSpan::new(Severity::Error, error_lines));
        }
        if !warning_lines.is_empty() {
            highlights.push(HighlightSpan::new(Severity::Warning, warning_lines));
        }

        LintReport {
            view,
            errors,
            highlights,
        }
    }
}

impl ScenarioDiagnostic {
    fn severity(&self) -> Severity {
        match self.severity.as_deref() {
            None => Severity::Warning,
            Some(tag) => Severity::from_tag(tag).unwrap_or_else(|| {
                tracing::warn!(tag, "unknown severity; treating as warning");
                Severity::Warning
            }),
        }
    }
}
