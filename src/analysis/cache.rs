//! Pluggable response cache for the analysis service.
//!
//! Keys are the exact input text; no normalization is applied, so
//! "Aspirin" and "aspirin" are separate entries.

use crate::error::Error;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key-value store for analysis responses.
///
/// `flush` makes inserted entries durable; backends without storage can
/// keep the default no-op.
pub trait AnalysisCache: Send {
    fn get(&self, text: &str) -> Option<String>;

    fn insert(&mut self, text: String, response: String);

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process cache, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisCache for MemoryCache {
    fn get(&self, text: &str) -> Option<String> {
        self.entries.get(text).cloned()
    }

    fn insert(&mut self, text: String, response: String) {
        self.entries.insert(text, response);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cache backed by a pretty-printed JSON object on disk.
///
/// The whole map is rewritten on `flush`, through a temporary file in the
/// same directory so a crash never leaves a truncated cache behind.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileCache {
    /// Opens the cache at `path`. A missing file starts empty; a corrupt one
    /// is reported as an error rather than silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let entries = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened analysis cache {} with {} entries", path.display(), entries.len());
        Ok(Self { path, entries, dirty: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalysisCache for JsonFileCache {
    fn get(&self, text: &str) -> Option<String> {
        self.entries.get(text).cloned()
    }

    fn insert(&mut self, text: String, response: String) {
        self.entries.insert(text, response);
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<(), Error> {
        if !self.dirty {
            return Ok(());
        }
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &self.entries)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        self.dirty = false;
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Drop for JsonFileCache {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Could not save analysis cache {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cache_exact_keys() {
        let mut cache = MemoryCache::new();
        cache.insert("Aspirin".into(), "An NSAID.".into());
        assert_eq!(cache.get("Aspirin").as_deref(), Some("An NSAID."));
        assert_eq!(cache.get("aspirin"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_json_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_cache.json");
        {
            let mut cache = JsonFileCache::open(&path).unwrap();
            assert!(cache.is_empty());
            cache.insert("metformin".into(), "A biguanide.".into());
            cache.flush().unwrap();
        }
        let cache = JsonFileCache::open(&path).unwrap();
        assert_eq!(cache.get("metformin").as_deref(), Some("A biguanide."));
    }

    #[test]
    fn test_json_cache_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_cache.json");
        {
            let mut cache = JsonFileCache::open(&path).unwrap();
            cache.insert("bid".into(), "Twice daily.".into());
        }
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"bid\": \"Twice daily.\""));
    }

    #[test]
    fn test_json_cache_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai_cache.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonFileCache::open(&path), Err(Error::Json(_))));
    }
}
