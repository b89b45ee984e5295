//! Error types for scene loading and validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene syntax error: {message}")]
    Syntax { span: Option<Span>, message: String },

    #[error("duplicate box id '{id}'")]
    DuplicateBox { id: String },

    #[error("undefined box '{name}'{}", format_suggestions(.suggestions))]
    UndefinedBox {
        name: String,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean '{}'?", suggestions.join("', '"))
    }
}

impl From<toml::de::Error> for SceneError {
    fn from(err: toml::de::Error) -> Self {
        SceneError::Syntax {
            span: err.span(),
            message: err.message().to_string(),
        }
    }
}

impl SceneError {
    /// Byte range of the offending text in `source`, when it can be located
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            SceneError::Io(_) => None,
            SceneError::Syntax { span, .. } => span.clone(),
            // The second definition is the duplicate
            SceneError::DuplicateBox { id } => find_quoted(source, id, true),
            SceneError::UndefinedBox { name, .. } => find_quoted(source, name, false),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };

        let label_message = match self {
            SceneError::Syntax { message, .. } => message.clone(),
            SceneError::DuplicateBox { .. } => "defined again here".to_string(),
            SceneError::UndefinedBox { suggestions, .. } if !suggestions.is_empty() => {
                format!("not defined; did you mean '{}'?", suggestions.join("', '"))
            }
            SceneError::UndefinedBox { .. } => "not defined".to_string(),
            SceneError::Io(_) => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(label_message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match (written, String::from_utf8(buf)) {
            (Ok(()), Ok(report)) => report,
            _ => self.to_string(),
        }
    }
}

/// Locate a quoted string literal, the first or last occurrence
fn find_quoted(source: &str, text: &str, last: bool) -> Option<Span> {
    let needle = format!("\"{}\"", text);
    let start = if last {
        source.rfind(&needle)?
    } else {
        source.find(&needle)?
    };
    Some(start..start + needle.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_box_message_lists_suggestions() {
        let err = SceneError::UndefinedBox {
            name: "serer".to_string(),
            suggestions: vec!["server".to_string()],
        };
        assert_eq!(err.to_string(), "undefined box 'serer', did you mean 'server'?");
    }

    #[test]
    fn test_span_of_duplicate_is_second_definition() {
        let source = "id = \"a\"\nid = \"a\"\n";
        let err = SceneError::DuplicateBox { id: "a".to_string() };
        assert_eq!(err.span(source), Some(14..17));
    }

    #[test]
    fn test_format_includes_filename_and_label() {
        let source = "[[line]]\nfrom = \"serer\"\n";
        let err = SceneError::UndefinedBox {
            name: "serer".to_string(),
            suggestions: vec!["server".to_string()],
        };
        let report = err.format(source, "scene.toml");
        assert!(report.contains("scene.toml"));
        assert!(report.contains("did you mean 'server'?"));
    }

    #[test]
    fn test_format_without_span_falls_back_to_message() {
        let err = SceneError::DuplicateBox { id: "missing".to_string() };
        assert_eq!(err.format("", "scene.toml"), "duplicate box id 'missing'");
    }
}
