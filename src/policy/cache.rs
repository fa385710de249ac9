use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::{PolicyError, RuleConfig};
use crate::config::PropertyStore;

#[derive(Debug, Clone)]
enum CacheEntry {
    Resolved(Arc<RuleConfig>),
    /// File path pointing at its containing directory.
    RedirectTo(PathBuf),
}

/// Path-keyed memo of [`RuleConfig`]s for one linting run.
///
/// Directories are resolved directly; a file path is recorded once as a
/// redirect to its containing directory. Entries are only ever inserted,
/// never updated or evicted, so `.editorconfig` edits made during a run
/// are not observed.
pub struct ConfigCache {
    store: Box<dyn PropertyStore>,
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl ConfigCache {
    pub fn new(store: impl PropertyStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, path: &Path) -> Result<Arc<RuleConfig>, PolicyError> {
        match self.lookup(path) {
            Some(CacheEntry::Resolved(config)) => Ok(config),
            Some(CacheEntry::RedirectTo(dir)) => self.resolve(&dir),
            None => self.resolve_uncached(path),
        }
    }

    /// Number of cached paths, files and directories alike.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve_uncached(&self, path: &Path) -> Result<Arc<RuleConfig>, PolicyError> {
        if self.store.is_dir(path)? {
            debug!(dir = %path.display(), "loading editorconfig policy");
            let props = self.store.properties(path)?;
            let config = Arc::new(RuleConfig::from_properties(&props)?);
            match self.insert(path, CacheEntry::Resolved(config)) {
                CacheEntry::Resolved(config) => Ok(config),
                CacheEntry::RedirectTo(dir) => self.resolve(&dir),
            }
        } else {
            let dir = containing_dir(path);
            debug!(file = %path.display(), dir = %dir.display(), "redirecting to directory");
            self.insert(path, CacheEntry::RedirectTo(dir.clone()));
            self.resolve(&dir)
        }
    }

    fn lookup(&self, path: &Path) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    // Concurrent misses on the same path may both parse. The first insert
    // wins and every caller gets the stored entry back.
    fn insert(&self, path: &Path, entry: CacheEntry) -> CacheEntry {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.to_path_buf())
            .or_insert(entry)
            .clone()
    }
}

fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
