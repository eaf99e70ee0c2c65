//! tmpltree: recursive template loading with directory-structured names.
//!
//! Flat template loading throws away directory structure: every file
//! lands in the collection under its base name alone. This crate walks a
//! tree instead, so `mail/welcome.txt` is addressable as
//! `mail/welcome.txt`: slash-separated on every platform, relative to
//! the tree root.
//!
//! - The glob applies only to a file's final path segment: `k*.html`
//!   matches `foo/bar/kxxx.html`. Directories are never filtered by
//!   it; all of them are walked.
//! - Symbolic links are followed; files beneath a linked directory are
//!   named under the link's own path segment. A symlink cycle recurses
//!   until the process runs out of stack, unless
//!   [`WalkOptions::max_depth`] turns that into an error.
//! - If nothing matches, the call fails with [`Error::NoFilesMatched`].
//!
//! Pass `None` to start a namespace from scratch (the first matched file
//! names it), or `Some(namespace)` to add the files to an existing one:
//!
//! ```
//! use tmpltree::{parse_store, MemoryStore, TextEngine};
//!
//! let mut store = MemoryStore::new();
//! store.add_file("greet.txt", "hello {{name}}");
//!
//! let ns = parse_store::<TextEngine, _>(None, &store, "*.txt").unwrap();
//! let out = ns.render("greet.txt", &serde_json::json!({ "name": "ada" })).unwrap();
//! assert_eq!(out, "hello ada");
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod store;
pub mod walker;

pub use engine::{Engine, HtmlEngine, Namespace, TextEngine};
pub use error::{Error, PatternError};
pub use store::{DirEntry, DirStore, EntryKind, FileStore, MemoryStore, Metadata};
pub use walker::{walk, walk_with, WalkOptions};

use std::path::Path;

/// A namespace loaded through the literal back-end.
pub type TextNamespace = Namespace<TextEngine>;

/// A namespace loaded through the escaping back-end.
pub type HtmlNamespace = Namespace<HtmlEngine>;

/// Walk `store` and parse every file matching `pattern` into a namespace.
///
/// See the [crate docs](crate) for the naming and symlink contract.
pub fn parse_store<E, S>(
    existing: Option<Namespace<E>>,
    store: &S,
    pattern: &str,
) -> Result<Namespace<E>, Error>
where
    E: Engine,
    S: FileStore + ?Sized,
{
    parse_store_with(existing, store, pattern, &WalkOptions::default())
}

/// [`parse_store`] with explicit walk options.
pub fn parse_store_with<E, S>(
    existing: Option<Namespace<E>>,
    store: &S,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Namespace<E>, Error>
where
    E: Engine,
    S: FileStore + ?Sized,
{
    let matched = walker::walk_with(store, pattern, options)?;
    builder::build(existing, store, &matched)
}

/// Open `dir` as a store and parse every file matching `pattern`.
///
/// Symlinks on `dir` itself are resolved before the store opens; a path
/// that cannot be resolved fails with [`Error::Resolve`].
pub fn parse_dir<E: Engine>(
    existing: Option<Namespace<E>>,
    dir: impl AsRef<Path>,
    pattern: &str,
) -> Result<Namespace<E>, Error> {
    parse_dir_with(existing, dir, pattern, &WalkOptions::default())
}

/// [`parse_dir`] with explicit walk options.
pub fn parse_dir_with<E: Engine>(
    existing: Option<Namespace<E>>,
    dir: impl AsRef<Path>,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Namespace<E>, Error> {
    let dir = dir.as_ref();
    let resolved = dir.canonicalize().map_err(|source| Error::Resolve {
        path: dir.display().to_string(),
        source,
    })?;

    let store = DirStore::new(resolved);
    parse_store_with(existing, &store, pattern, options)
}
