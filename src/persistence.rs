// File: src/persistence.rs
use crate::core::engine::Snapshot;
use crate::core::vocabulary::VocabularyStore;
use crate::error::Error;
use log::info;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Bumped whenever the on-disk layout changes.
const SNAPSHOT_FORMAT: u32 = 1;

/// The serializable form of a compiled vocabulary.
/// Derived structures are rebuilt on load, only the term list is stored.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableVocabulary {
    format: u32,
    terms: Vec<String>,
}

/// Writes the snapshot's vocabulary to `path` atomically: the data goes to a
/// temporary file in the same directory which then replaces the target.
pub fn save_to_disk(snapshot: &Snapshot, path: &Path) -> Result<(), Error> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableVocabulary {
        format: SNAPSHOT_FORMAT,
        terms: snapshot.vocabulary().iter().map(str::to_string).collect(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &state)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| Error::Io(e.error))?;

    info!("Saved {} terms to {}", state.terms.len(), path.display());
    Ok(())
}

/// Reads a vocabulary previously written by [`save_to_disk`].
pub fn load_from_disk(path: &Path) -> Result<VocabularyStore, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableVocabulary = bincode::deserialize_from(reader)?;
    if state.format != SNAPSHOT_FORMAT {
        return Err(Error::Snapshot(Box::new(bincode::ErrorKind::Custom(format!(
            "unsupported snapshot format {}",
            state.format
        )))));
    }
    Ok(VocabularyStore::from_lines(state.terms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::TextProcessor;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vocabulary.bin");

        let processor = TextProcessor::new();
        processor.load_lines(["Cardiac", "renal", "renal"]);
        save_to_disk(&processor.snapshot(), &path).unwrap();

        let store = load_from_disk(&path).unwrap();
        let terms: Vec<&str> = store.iter().collect();
        assert_eq!(terms, vec!["cardiac", "renal"]);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bin");
        std::fs::write(&path, b"not a snapshot").unwrap();
        assert!(load_from_disk(&path).is_err());
    }
}
