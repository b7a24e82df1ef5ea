//! Filesystem resolution for definition and asset files

use spar_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Existence/search resolver and text loader.
///
/// The roster and loader go through this contract for every file touch, so
/// tests can substitute an in-memory tree.
pub trait Filesystem: Send + Sync {
    /// Resolve a candidate path to a concrete existing file, or `None`.
    fn resolve(&self, path: &str) -> Option<PathBuf>;

    /// Read a resolved file as text.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// On-disk filesystem rooted at the engine's data directory.
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Filesystem for DiskFs {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        if path.is_empty() {
            return None;
        }
        let candidate = Path::new(path);
        let full = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };
        full.is_file().then_some(full)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

/// Resolve a file named by a definition.
///
/// Files referenced from a definition resolve relative to the definition's
/// own directory first, then against the resolver's search rules directly.
/// `base` may be the definition file itself or a default directory ending
/// in `/`.
pub fn resolve_with_base(fs: &dyn Filesystem, base: &str, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let dir = match base.rfind('/') {
        Some(i) => &base[..=i],
        None => "",
    };
    if !dir.is_empty() {
        if let Some(found) = fs.resolve(&format!("{dir}{name}")) {
            return Some(found);
        }
    }
    fs.resolve(name)
}
