//! Error types for walking and building.

use std::io;

use thiserror::Error;

pub use tmpltree_glob::PatternError;

/// Errors from walking a store or building a namespace.
///
/// Every failure is terminal for the call that produced it; wrapped
/// variants carry the operation and the offending path.
#[derive(Debug, Error)]
pub enum Error {
    /// The walk completed but no file name matched the pattern.
    #[error("no files matched")]
    NoFilesMatched,

    /// The glob pattern failed to compile. Surfaces before any I/O, so a
    /// bad pattern is reported even over an empty store.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The root path handed to [`parse_dir`](crate::parse_dir) could not
    /// be resolved.
    #[error("cannot resolve {path:?}: {source}")]
    Resolve {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed mid-walk.
    #[error("cannot list {path:?}: {source}")]
    List {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A matched file could not be read.
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A matched file could not be parsed into its unit. The cause is
    /// either the engine's parse error or invalid UTF-8 in the file.
    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The opt-in depth guard tripped, most likely on a symlink cycle.
    #[error("symlink recursion exceeded depth {depth} at {path:?}")]
    DepthExceeded { depth: usize, path: String },
}
