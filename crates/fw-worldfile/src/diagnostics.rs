use std::fmt;
use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

/// Severity level for load diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The world cannot be used.
    Error,
    /// Suspicious but loadable.
    Warning,
}

/// A load diagnostic with a byte span into the source text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How bad it is.
    pub severity: Severity,
    /// Byte range of the offending input.
    pub span: Range<usize>,
    /// Human-readable description.
    pub message: String,
    /// Optional label shown at the span instead of the message.
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a span label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

/// Render diagnostics against their source using ariadne.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match diag.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let span = (filename, diag.span.clone());
        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        let report = Report::build(kind, span)
            .with_message(&diag.message)
            .with_label(
                Label::new((filename, diag.span.clone()))
                    .with_message(label_text)
                    .with_color(color),
            )
            .finish();

        report
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(0..7, "exit destination \"Attic\" does not name a known location");
        assert_eq!(
            d.to_string(),
            "error: exit destination \"Attic\" does not name a known location"
        );
    }

    #[test]
    fn render_produces_output() {
        let source = ":Garage\nA garage.\nE:Attic\n";
        let diags = vec![
            Diagnostic::error(18..25, "unresolved exit destination").with_label("no such location"),
        ];
        let output = render_diagnostics(source, "world.txt", &diags);
        assert!(!output.is_empty());
        assert!(output.contains("unresolved exit destination"));
    }
}
