use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw pretty-printer failure, before it is tied to a catalog position.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to format {section} / {subsection} #{index} ({variant}): {message}")]
    Format {
        section: String,
        subsection: String,
        index: usize,
        variant: String,
        message: String,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown subsection '{subsection}' in section '{section}'")]
    UnknownSubsection { section: String, subsection: String },

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Error: {0}")]
    Other(String),
}

impl VersusError {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        VersusError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VersusError>;
