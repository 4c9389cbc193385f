use std::path::PathBuf;

use thiserror::Error;

/// Failure inside one field group. Rule tables are compiled once and the
/// outcome is cached, so this has to be `Clone` to be reported on every call.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    #[error("invalid pattern in rule table `{table}`: {source}")]
    Pattern {
        table: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("rule table `{table}` asks for capture group {group} but `{pattern}` has only {available}")]
    MissingGroup {
        table: &'static str,
        pattern: &'static str,
        group: usize,
        available: usize,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported document format `{extension}` for {path:?} (plain text only)")]
    Unsupported { path: PathBuf, extension: String },
    #[error("{path:?} is not valid UTF-8 text")]
    NotUtf8 { path: PathBuf },
}
