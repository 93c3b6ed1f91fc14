use thiserror::Error;

/// Errors raised while parsing or building chapter data.
///
/// Every variant is fatal to the operation that raised it; no partial result
/// is returned alongside.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChapterError {
    #[error("Invalid duration '{value}'. Use HH:MM:SS.ss or MM:SS.ss")]
    InvalidDuration { value: String },

    #[error(
        "Invalid format in line {line}: '{content}'. Each line should contain the chapter title followed by its duration, e.g. 'Opening Credits 00:17.90'"
    )]
    MalformedLine { line: usize, content: String },

    #[error("No chapters supplied")]
    EmptyInput,

    #[error("Chapter metadata does not start with ;FFMETADATA1")]
    MissingHeader,

    #[error("Malformed metadata entry in line {line}: '{content}'")]
    MalformedEntry { line: usize, content: String },

    #[error("Invalid {field} value in line {line}: '{value}'")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Chapter starting in line {line} has no {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("Number of chapter titles ({titles}) does not match number of parts ({parts})")]
    TitleCountMismatch { titles: usize, parts: usize },
}
