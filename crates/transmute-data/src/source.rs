//! Descriptor sources: where a generator pass finds its documents.
//!
//! Resources are addressed by [`Identifier`]s of the form
//! `namespace:category/relative/path.json`. Both bundled sources enumerate in
//! identifier order so that a pass is deterministic.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use transmute_core::id::Identifier;

use crate::loader::DataLoadError;

/// Enumerates and opens raw descriptor documents.
pub trait DescriptorSource {
    /// All resources under `category` whose path (starting with the category
    /// itself) satisfies `filter`.
    fn find_resources(
        &self,
        category: &str,
        filter: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<Identifier>, DataLoadError>;

    /// Open a resource for reading. The stream is closed when dropped.
    fn open(&self, resource: &Identifier) -> Result<Box<dyn Read + '_>, DataLoadError>;
}

// ===========================================================================
// Directory source
// ===========================================================================

/// Reads documents from `<root>/<namespace>/<path>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively collect `/`-joined paths of files under `dir`, relative to
    /// the namespace directory.
    fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<(), DataLoadError> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            let relative = format!("{prefix}/{name}");
            if entry.file_type()?.is_dir() {
                Self::collect_files(&entry.path(), &relative, out)?;
            } else {
                out.push(relative);
            }
        }
        Ok(())
    }
}

impl DescriptorSource for DirectorySource {
    fn find_resources(
        &self,
        category: &str,
        filter: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<Identifier>, DataLoadError> {
        let mut found = Vec::new();
        if !self.root.is_dir() {
            return Ok(found);
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(namespace) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let category_dir = entry.path().join(category);
            if !category_dir.is_dir() {
                continue;
            }

            let mut paths = Vec::new();
            Self::collect_files(&category_dir, category, &mut paths)?;
            for path in paths.into_iter().filter(|p| filter(p.as_str())) {
                match Identifier::new(&namespace, &path) {
                    Ok(id) => found.push(id),
                    Err(e) => {
                        tracing::warn!(namespace = %namespace, path = %path, error = %e, "skipping invalid resource name");
                    }
                }
            }
        }

        found.sort();
        Ok(found)
    }

    fn open(&self, resource: &Identifier) -> Result<Box<dyn Read + '_>, DataLoadError> {
        let path = self.root.join(resource.namespace()).join(resource.path());
        match fs::File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DataLoadError::UnknownResource {
                resource: resource.clone(),
            }),
            Err(source) => Err(DataLoadError::Read {
                origin: resource.to_string(),
                source,
            }),
        }
    }
}

// ===========================================================================
// In-memory source
// ===========================================================================

/// Documents held in memory, keyed by resource id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: BTreeMap<Identifier, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, resource: Identifier, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(resource, bytes.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DescriptorSource for MemorySource {
    fn find_resources(
        &self,
        category: &str,
        filter: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<Identifier>, DataLoadError> {
        let prefix = format!("{category}/");
        Ok(self
            .documents
            .keys()
            .filter(|id| id.path().starts_with(&prefix) && filter(id.path()))
            .cloned()
            .collect())
    }

    fn open(&self, resource: &Identifier) -> Result<Box<dyn Read + '_>, DataLoadError> {
        self.documents
            .get(resource)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| DataLoadError::UnknownResource {
                resource: resource.clone(),
            })
    }
}
