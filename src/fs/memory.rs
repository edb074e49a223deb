//! In-memory project tree for tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::FileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory file system with the same failure modes as the disk adapter
///
/// The empty path and `/` always exist as directories.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file and all missing ancestor directories
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref();
        {
            let mut nodes = self.lock();
            if let Some(parent) = path.parent() {
                insert_dirs(&mut nodes, parent);
            }
            nodes.insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
        }
        self
    }

    /// All file paths currently stored, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Read a file as UTF-8, for assertions
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> io::Result<String> {
        let bytes = self.read(path.as_ref())?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        // A poisoned lock only means a test panicked mid-operation
        self.nodes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn is_implicit_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new("/")
}

fn insert_dirs(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) {
    for ancestor in path.ancestors() {
        if is_implicit_root(ancestor) {
            continue;
        }
        nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        is_implicit_root(path) || self.lock().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        is_implicit_root(path) || matches!(self.lock().get(path), Some(Node::Dir))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lock().get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut nodes = self.lock();
        if let Some(parent) = path.parent() {
            if !is_implicit_root(parent) && !matches!(nodes.get(parent), Some(Node::Dir)) {
                return Err(not_found(parent));
            }
        }
        if matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        for ancestor in path.ancestors() {
            if let Some(Node::File(_)) = nodes.get(ancestor) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("not a directory: {}", ancestor.display()),
                ));
            }
        }
        insert_dirs(&mut nodes, path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let nodes = self.lock();
        if !is_implicit_root(path) {
            match nodes.get(path) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("not a directory: {}", path.display()),
                    ))
                }
                None => return Err(not_found(path)),
            }
        }
        let mut children: Vec<PathBuf> = nodes
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        match nodes.get(path) {
            Some(Node::File(_)) => {
                nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", path.display()),
                ))
            }
            None => return Err(not_found(path)),
        }
        if nodes.keys().any(|candidate| candidate.parent() == Some(path)) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("directory not empty: {}", path.display()),
            ));
        }
        nodes.remove(path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        if !nodes.contains_key(from) {
            return Err(not_found(from));
        }
        if let Some(parent) = to.parent() {
            if !is_implicit_root(parent) && !matches!(nodes.get(parent), Some(Node::Dir)) {
                return Err(not_found(parent));
            }
        }
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|candidate| candidate.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let suffix = old.strip_prefix(from).map(Path::to_path_buf).unwrap_or_default();
                let new = if suffix.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(suffix)
                };
                nodes.insert(new, node);
            }
        }
        Ok(())
    }
}
