use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathShiftError {
    #[error("Replacement rule #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("Invalid rule '{0}': expected OLD=NEW")]
    InvalidRuleSpec(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, PathShiftError>;
