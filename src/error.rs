//! error taxonomy for the fetch/extract/save pipeline
use std::path::PathBuf;

use thiserror::Error;

/// The error type surfaced by pagesift operations.
///
/// Transport-level failures never appear here directly; they're absorbed by
/// the retry loop and only escalate as `Connection` once the attempt budget
/// is spent. A selector matching zero elements is a normal value, not an
/// error.
#[derive(Debug, Error)]
pub enum SiftError {
    /// every connection attempt in the retry budget failed
    #[error("could not connect to {url} after {attempts} attempts")]
    Connection {
        /// the endpoint that never answered
        url: String,

        /// how many attempts were made before giving up
        attempts: usize,
    },

    /// the caller-supplied css selector expression couldn't be parsed
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// the expression as given
        selector: String,

        /// what the selector engine disliked about it
        reason: String,
    },

    /// the output file couldn't be opened, written, or flushed
    #[error("could not write {}: {source}", path.display())]
    Write {
        /// target of the failed write
        path: PathBuf,

        /// underlying io error
        #[source]
        source: std::io::Error,
    },

    /// a pending backoff wait was interrupted by a cancellation signal
    #[error("cancelled while waiting to retry")]
    Cancelled,
}
