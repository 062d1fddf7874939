//! Source discovery.
//!
//! Walks the project root recursively and yields one [`SourceUnit`] per
//! file ending with the source extension whose bare file name is not in the
//! ignore set. Hidden entries (name starting with `.`) are skipped, and
//! hidden directories are not descended into.
//!
//! Without sorting, units come out in directory-read order, which differs
//! between platforms and filesystems. [`Discovery::sorted`] orders entries
//! by file name for reproducible commands.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

/// Object file suffix.
pub const OBJECT_SUFFIX: &str = ".o";

/// A discovered source file and the object file it compiles to.
///
/// Both paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceUnit {
    /// Source file
    pub source: PathBuf,
    /// Object file next to the source
    pub object: PathBuf,
}

impl SourceUnit {
    /// Create a unit, deriving the object path from the source path.
    pub fn new(source: PathBuf, extension: &str) -> Self {
        let object = object_path(&source, extension);
        SourceUnit { source, object }
    }
}

/// Derive the object path: the extension is replaced with `.o`, in the
/// same directory as the source.
pub fn object_path(source: &Path, extension: &str) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(extension).unwrap_or(&name);
    source.with_file_name(format!("{}{}", stem, OBJECT_SUFFIX))
}

/// Configuration for one discovery walk.
#[derive(Debug, Clone)]
pub struct Discovery<'a> {
    root: PathBuf,
    extension: String,
    ignore: &'a BTreeSet<String>,
    sort: bool,
}

impl<'a> Discovery<'a> {
    /// Discover files ending with `extension` under `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
        ignore: &'a BTreeSet<String>,
    ) -> Self {
        Discovery {
            root: root.into(),
            extension: extension.into(),
            ignore,
            sort: false,
        }
    }

    /// Order entries of each directory by file name.
    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Start the walk.
    ///
    /// The returned iterator is lazy and one-shot. An unreadable root or
    /// entry is reported and skipped, so an unreadable root yields nothing.
    pub fn walk(self) -> impl Iterator<Item = SourceUnit> + 'a {
        let mut walker = WalkDir::new(&self.root).follow_links(false);
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        let Discovery {
            root,
            extension,
            ignore,
            ..
        } = self;

        walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .filter(|entry| !entry.file_type().is_dir())
            .filter_map(move |entry| {
                let name = entry.file_name().to_string_lossy();
                if !name.ends_with(extension.as_str()) {
                    return None;
                }
                if ignore.contains(&*name) {
                    tracing::debug!("Ignoring {}", name);
                    return None;
                }

                let source = entry
                    .path()
                    .strip_prefix(&root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                tracing::debug!("Adding {}", source.display());
                Some(SourceUnit::new(source, &extension))
            })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Discover all units under `root` into a vector.
pub fn discover(
    root: &Path,
    extension: &str,
    ignore: &BTreeSet<String>,
    sort: bool,
) -> Vec<SourceUnit> {
    Discovery::new(root, extension, ignore)
        .sorted(sort)
        .walk()
        .collect()
}
