//! Read-only file stores the walker and builder run against.
//!
//! A store is a name-addressed tree of files, directories, and symbolic
//! links. All operations take slash-separated paths relative to the store
//! root (`"."` is the root itself), regardless of host convention. Two
//! implementations ship with the crate:
//!
//! - [`DirStore`]: a host directory
//! - [`MemoryStore`]: an in-memory tree, for embedded template sets and tests

mod local;
mod memory;

pub use local::DirStore;
pub use memory::MemoryStore;

use std::io;

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by [`FileStore::list`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry. Symlinks are reported as [`EntryKind::Symlink`]
    /// without dereferencing.
    pub kind: EntryKind,
}

impl DirEntry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Create a symlink entry.
    pub fn symlink(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Symlink,
        }
    }

    /// Returns true if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns true if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Returns true if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Metadata for a path, as seen after following symlinks.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// True if the resolved target is a directory.
    pub is_dir: bool,
    /// True if the resolved target is a regular file.
    pub is_file: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Abstract read-only filesystem interface.
///
/// Implement this trait to adapt your own filesystem layer (an archive, a
/// remote tree, embedded assets) to the walker and builder. The store is
/// never mutated by this crate.
pub trait FileStore {
    /// List the entries of a directory, in lexical order by name.
    ///
    /// The ordering is a contract, not a courtesy: the walker's output
    /// order, and therefore which file anchors a fresh namespace, depends
    /// on it.
    fn list(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    /// Read the entire contents of a file, following symlinks.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Metadata for a path, following symlinks. Fails for dangling links.
    fn stat(&self, path: &str) -> io::Result<Metadata>;
}

impl<S: FileStore + ?Sized> FileStore for &S {
    fn list(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        (**self).list(path)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        (**self).stat(path)
    }
}
