//! Error types for ats-match-core.
//!
//! The scoring pipeline itself is infallible. Errors only arise at the edges:
//! loading configuration, building a vocabulary scanner, and parsing resume
//! documents handed in by a caller.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// A vocabulary file referenced from configuration does not exist.
    #[error("vocabulary file not found: {path}")]
    VocabularyFileMissing {
        /// The resolved path that was attempted.
        path: Utf8PathBuf,
    },

    /// A vocabulary file referenced from configuration could not be parsed.
    #[error("failed to read vocabulary file {path}: {source}")]
    VocabularyFile {
        /// The resolved path that was attempted.
        path: Utf8PathBuf,
        /// The underlying parse error.
        source: Box<figment::Error>,
    },

    /// The configured vocabulary could not be built.
    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when building a [`Vocabulary`](crate::vocabulary::Vocabulary).
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// The multi-pattern scanner could not be compiled.
    #[error("vocabulary scanner build failed: {0}")]
    Build(#[from] aho_corasick::BuildError),

    /// Every tier of the vocabulary is empty.
    #[error("vocabulary has no terms")]
    Empty,
}

/// Result type alias using [`VocabularyError`].
pub type VocabularyResult<T> = Result<T, VocabularyError>;

/// Errors that can occur when reading caller-supplied documents.
#[derive(Error, Debug)]
pub enum InputError {
    /// The resume document is not valid resume JSON.
    #[error("invalid resume document: {0}")]
    Resume(#[from] serde_json::Error),
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;
