//! Host-directory store.
//!
//! Wraps a directory on the real filesystem. All operations are relative
//! to `root`: if the store is rooted at `/srv/templates`, then
//! `read("mail/welcome.txt")` reads `/srv/templates/mail/welcome.txt`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{DirEntry, EntryKind, FileStore, Metadata};

/// A read-only store over a host directory.
///
/// Entry paths are joined onto the root without canonicalization, so a
/// symlinked subdirectory keeps its own name in every path derived from
/// it. Resolve symlinks on the root itself before construction (the
/// [`parse_dir`](crate::parse_dir) entry point does).
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a slash-separated store path onto the host filesystem.
    ///
    /// Rejects `..` components; a store exposes only what is under its
    /// root.
    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut full = self.root.clone();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("path escapes store root: {path}"),
                    ));
                }
                part => full.push(part),
            }
        }
        Ok(full)
    }
}

impl FileStore for DirStore {
    fn list(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let full = self.resolve(path)?;
        let mut entries = Vec::new();

        for entry in fs::read_dir(&full)? {
            let entry = entry?;
            // file_type() does not follow symlinks, so links classify as such
            let file_type = entry.file_type()?;
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full)
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        let full = self.resolve(path)?;
        // fs::metadata follows symlinks; dangling links fail here
        let meta = fs::metadata(&full)?;

        Ok(Metadata {
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
            size: meta.len(),
        })
    }
}
