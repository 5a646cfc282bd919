//! Error types for parsing and lookups.

use std::io;

/// Failure while reading a configuration source.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The named file could not be opened.
    #[error("{path}: {source}")]
    Open {
        /// Path of the file that failed to open.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The line reader failed mid-stream (I/O error or invalid UTF-8).
    ///
    /// Entries appended before the failure stay in the configuration.
    #[error("{source_name}: line {lineno}: {source}")]
    Read {
        /// File path or synthetic source name.
        source_name: String,
        /// Line number of the line being read when the failure hit.
        lineno: usize,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Failure of a single-value lookup
/// ([`Section::get_arg`](crate::Section::get_arg)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No entry exists for the keyword.
    #[error("missing keyword: {0}")]
    Missing(String),

    /// The keyword has other than exactly one entry.
    #[error("{keyword}: expected exactly one entry, found {count}")]
    EntryCount {
        /// The keyword looked up.
        keyword: String,
        /// How many entries it actually has.
        count: usize,
    },

    /// The entry has other than exactly one token.
    #[error("{keyword}: expected exactly one token, found {count}")]
    TokenCount {
        /// The keyword looked up.
        keyword: String,
        /// How many tokens its entry actually has.
        count: usize,
    },
}
