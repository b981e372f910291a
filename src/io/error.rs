use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("invalid species metadata: {0}")]
    Metadata(String),

    #[error("species metadata is not valid JSON: {0}")]
    MetadataJson(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn metadata(details: impl Into<String>) -> Self {
        Self::Metadata(details.into())
    }
}
