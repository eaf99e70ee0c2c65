//! Recursive discovery of template files in a store.
//!
//! The walker descends depth-first from the store root, testing every
//! file's base name against a glob and collecting the slash-joined
//! relative paths of the matches. Directories are never filtered by the
//! pattern; every one is entered. Symbolic links whose own name matches
//! are recorded as-is; links to directories are entered under the link's
//! own path, so everything found beneath them is named through the link.

use tracing::{debug, trace};

use tmpltree_glob::Pattern;

use crate::error::Error;
use crate::store::{EntryKind, FileStore};

/// Options for a walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Maximum directory depth before the walk aborts with
    /// [`Error::DepthExceeded`]. The store root is depth 0.
    ///
    /// `None` (the default) recurses without bound: a symlink cycle then
    /// runs until the process exhausts its stack. Set a limit to turn
    /// that into an error instead.
    pub max_depth: Option<usize>,
}

/// Walk the store and return every matched path, in traversal order.
///
/// Equivalent to [`walk_with`] with default options.
pub fn walk<S: FileStore + ?Sized>(store: &S, pattern: &str) -> Result<Vec<String>, Error> {
    walk_with(store, pattern, &WalkOptions::default())
}

/// Walk the store and return every matched path, in traversal order.
///
/// The pattern is compiled before any I/O, so a syntax error surfaces
/// even when the store is empty. Order is deterministic: entries are
/// taken per directory in the lexical order the store lists them, and
/// subdirectories are entered in place. Any listing error aborts the
/// walk; paths accumulated up to that point are discarded.
pub fn walk_with<S: FileStore + ?Sized>(
    store: &S,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<String>, Error> {
    let compiled = Pattern::new(pattern)?;

    let mut matched = Vec::new();
    walk_dir(store, ".", &compiled, 0, options, &mut matched)?;

    debug!(pattern, count = matched.len(), "walk finished");
    Ok(matched)
}

fn walk_dir<S: FileStore + ?Sized>(
    store: &S,
    dir: &str,
    pattern: &Pattern,
    depth: usize,
    options: &WalkOptions,
    matched: &mut Vec<String>,
) -> Result<(), Error> {
    if let Some(max) = options.max_depth {
        if depth > max {
            return Err(Error::DepthExceeded {
                depth: max,
                path: dir.to_string(),
            });
        }
    }

    let entries = store.list(dir).map_err(|source| Error::List {
        path: dir.to_string(),
        source,
    })?;

    for entry in entries {
        let path = join(dir, &entry.name);
        match entry.kind {
            // Directories are entered unconditionally, whatever their name
            EntryKind::Directory => {
                walk_dir(store, &path, pattern, depth + 1, options, matched)?;
            }
            EntryKind::File => {
                if pattern.matches(&entry.name) {
                    trace!(%path, "matched");
                    matched.push(path);
                }
            }
            EntryKind::Symlink => {
                // A link whose own name matches is a match, undereferenced
                if pattern.matches(&entry.name) {
                    trace!(%path, "matched symlink by name");
                    matched.push(path);
                    continue;
                }
                match store.stat(&path) {
                    Ok(meta) if meta.is_dir => {
                        // Recurse under the link's own path, not its target
                        walk_dir(store, &path, pattern, depth + 1, options, matched)?;
                    }
                    Ok(_) => {}
                    // Dangling target: the link is skipped, never fatal
                    Err(err) => trace!(%path, %err, "skipping unresolvable symlink"),
                }
            }
        }
    }

    Ok(())
}

fn join(dir: &str, name: &str) -> String {
    if dir == "." {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn flat_directory_in_lexical_order() {
        let mut store = MemoryStore::new();
        store.add_file("3.html", "three");
        store.add_file("1.html", "one");
        store.add_file("2.txt", "two");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["1.html", "3.html"]);
    }

    #[test]
    fn nested_directories_walked_in_place() {
        let mut store = MemoryStore::new();
        store.add_file("1.html", "one");
        store.add_file("3.html", "three");
        store.add_file("first/4.html", "four");
        store.add_file("first/5.txt", "five");
        store.add_file("second/7.html", "seven");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(
            matched,
            vec!["1.html", "3.html", "first/4.html", "second/7.html"]
        );
    }

    #[test]
    fn directories_are_never_filtered() {
        // A directory whose name matches the pattern is not a match,
        // and a directory whose name cannot match is still entered.
        let mut store = MemoryStore::new();
        store.add_dir("fake.html");
        store.add_file("fake.html/real.html", "inner");
        store.add_file("misc/deep.html", "deep");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["fake.html/real.html", "misc/deep.html"]);
    }

    #[test]
    fn pattern_only_tests_final_segment() {
        let mut store = MemoryStore::new();
        store.add_file("foo/bar/kxxx.html", "x");

        let matched = walk(&store, "k*.html").unwrap();
        assert_eq!(matched, vec!["foo/bar/kxxx.html"]);
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        let mut store = MemoryStore::new();
        store.add_file("a.txt", "a");

        assert!(walk(&store, "*.html").unwrap().is_empty());
        assert!(walk(&MemoryStore::new(), "*.html").unwrap().is_empty());
    }

    #[test]
    fn bad_pattern_beats_empty_store() {
        let store = MemoryStore::new();
        let err = walk(&store, "[oops").unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn symlinked_directory_reported_under_link_name() {
        let mut store = MemoryStore::new();
        store.add_file("first/4.html", "four");
        store.add_symlink("second", "first");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["first/4.html", "second/4.html"]);
    }

    #[test]
    fn matching_symlink_recorded_without_dereference() {
        // The link's own name matches, so it is a match even though its
        // target is a directory we would otherwise enter.
        let mut store = MemoryStore::new();
        store.add_file("real/deep.html", "deep");
        store.add_symlink("alias.html", "real");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["alias.html", "real/deep.html"]);
    }

    #[test]
    fn symlink_to_file_not_matching_is_skipped() {
        let mut store = MemoryStore::new();
        store.add_file("real.html", "real");
        store.add_symlink("alias.txt", "real.html");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["real.html"]);
    }

    #[test]
    fn dangling_symlink_is_tolerated() {
        let mut store = MemoryStore::new();
        store.add_file("ok.html", "ok");
        store.add_symlink("broken", "nowhere");

        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(matched, vec!["ok.html"]);
    }

    #[test]
    fn depth_guard_stops_symlink_cycle() {
        let mut store = MemoryStore::new();
        store.add_file("a/page.html", "page");
        store.add_symlink("a/loop", "a");

        let err = walk_with(
            &store,
            "*.html",
            &WalkOptions {
                max_depth: Some(16),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { depth: 16, .. }));
    }

    #[test]
    fn depth_guard_leaves_shallow_trees_alone() {
        let mut store = MemoryStore::new();
        store.add_file("a/b/c.html", "c");

        let matched = walk_with(&store, "*.html", &WalkOptions { max_depth: Some(4) }).unwrap();
        assert_eq!(matched, vec!["a/b/c.html"]);
    }

    #[test]
    fn two_walks_are_identical() {
        let mut store = MemoryStore::new();
        store.add_file("charlie/c.html", "c");
        store.add_file("alpha/a.html", "a");
        store.add_file("bravo/b.html", "b");

        let first = walk(&store, "*.html").unwrap();
        let second = walk(&store, "*.html").unwrap();
        assert_eq!(first, vec!["alpha/a.html", "bravo/b.html", "charlie/c.html"]);
        assert_eq!(first, second);
    }
}
