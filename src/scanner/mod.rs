pub mod walk;

use crate::error::Error;
use crate::storage::models::FileRecord;
use std::path::PathBuf;

pub use walk::{discover_files, resolve};

/// Source of the files to deduplicate.
pub trait FileProvider {
    fn files(&self) -> Result<Vec<FileRecord>, Error>;
}

/// Provides every regular file under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    pub root: PathBuf,
    pub ignore_patterns: Vec<String>,
}

impl DirectoryWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }
}

impl FileProvider for DirectoryWalker {
    fn files(&self) -> Result<Vec<FileRecord>, Error> {
        discover_files(&self.root, &self.ignore_patterns)
    }
}

impl FileProvider for Vec<FileRecord> {
    fn files(&self) -> Result<Vec<FileRecord>, Error> {
        Ok(self.clone())
    }
}
