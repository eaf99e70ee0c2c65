//! In-memory store.
//!
//! Used for embedded template sets and testing. Supports files,
//! directories, and symbolic links whose targets are store-relative paths.

use std::collections::BTreeMap;
use std::io;

use super::{DirEntry, FileStore, Metadata};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Directory,
}

/// An in-memory file tree.
///
/// Build it up with [`add_file`](Self::add_file),
/// [`add_dir`](Self::add_dir), and [`add_symlink`](Self::add_symlink),
/// then hand it to the walker. Listings come back in lexical order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Normalized path → node. The root is the empty path and always exists.
    nodes: BTreeMap<String, Node>,
    /// Symlink path → normalized target path.
    links: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        let path = Self::normalize(path);
        self.ensure_parents(&path);
        self.nodes.insert(path, Node::File(content.into()));
    }

    /// Add an empty directory, creating parents as needed.
    pub fn add_dir(&mut self, path: &str) {
        let path = Self::normalize(path);
        self.ensure_parents(&path);
        if !path.is_empty() {
            self.nodes.entry(path).or_insert(Node::Directory);
        }
    }

    /// Add a symbolic link at `link` pointing at the store-relative
    /// `target`. The target does not have to exist; such a link is
    /// dangling and fails `stat`.
    pub fn add_symlink(&mut self, link: &str, target: &str) {
        let link = Self::normalize(link);
        self.ensure_parents(&link);
        self.links.insert(link, Self::normalize(target));
    }

    /// Normalize a path: drop `.` and empty components, resolve `..`.
    fn normalize(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                part => parts.push(part),
            }
        }
        parts.join("/")
    }

    fn ensure_parents(&mut self, path: &str) {
        let mut current = String::new();
        let parts: Vec<&str> = path.split('/').collect();
        for part in &parts[..parts.len().saturating_sub(1)] {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            self.nodes
                .entry(current.clone())
                .or_insert(Node::Directory);
        }
    }

    /// Resolve symlinks in a path by checking each prefix component,
    /// the way a real filesystem resolves intermediate symlinks.
    fn resolve(&self, path: &str) -> String {
        let mut resolved = String::new();
        for part in Self::normalize(path).split('/') {
            if part.is_empty() {
                continue;
            }
            if !resolved.is_empty() {
                resolved.push('/');
            }
            resolved.push_str(part);
            if let Some(target) = self.links.get(&resolved) {
                resolved = target.clone();
            }
        }
        resolved
    }

    /// Split a normalized path into (parent, name).
    fn split(path: &str) -> (&str, &str) {
        match path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", path),
        }
    }
}

impl FileStore for MemoryStore {
    fn list(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let dir = self.resolve(path);

        if !dir.is_empty() {
            match self.nodes.get(&dir) {
                Some(Node::Directory) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotADirectory,
                        format!("not a directory: {path}"),
                    ));
                }
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("not found: {path}"),
                    ));
                }
            }
        }

        let mut entries = Vec::new();

        for (node_path, node) in &self.nodes {
            let (parent, name) = Self::split(node_path);
            if parent == dir && !name.is_empty() {
                entries.push(match node {
                    Node::File(_) => DirEntry::file(name),
                    Node::Directory => DirEntry::directory(name),
                });
            }
        }

        for link_path in self.links.keys() {
            let (parent, name) = Self::split(link_path);
            if parent == dir {
                entries.push(DirEntry::symlink(name));
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let resolved = self.resolve(path);
        match self.nodes.get(&resolved) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Directory) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {path}"),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {path}"),
            )),
        }
    }

    fn stat(&self, path: &str) -> io::Result<Metadata> {
        let resolved = self.resolve(path);
        if resolved.is_empty() {
            return Ok(Metadata {
                is_dir: true,
                is_file: false,
                size: 0,
            });
        }
        match self.nodes.get(&resolved) {
            Some(Node::File(data)) => Ok(Metadata {
                is_dir: false,
                is_file: true,
                size: data.len() as u64,
            }),
            Some(Node::Directory) => Ok(Metadata {
                is_dir: true,
                is_file: false,
                size: 0,
            }),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {path}"),
            )),
        }
    }
}
