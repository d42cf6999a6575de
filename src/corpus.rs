//! Building a vocabulary word list from free text (transcriptions, drug labels).

use crate::error::Error;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Tokens shorter than this are not worth suggesting or correcting.
pub const MIN_TERM_LEN: usize = 3;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9-]+\b").expect("static regex"));

/// Collects unique lowercase terms from any number of text sources.
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    terms: BTreeSet<String>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every word of at least `MIN_TERM_LEN` characters found in `text`.
    /// Returns how many new terms were added.
    ///
    /// `text` is treated as plain prose. Every token counts, so structured
    /// sources such as CSV exports must have their text columns extracted
    /// first or header names and codes end up in the vocabulary.
    pub fn add_text(&mut self, text: &str) -> usize {
        let before = self.terms.len();
        for m in WORD_PATTERN.find_iter(text) {
            let word = m.as_str();
            if word.chars().count() >= MIN_TERM_LEN {
                self.terms.insert(word.to_lowercase());
            }
        }
        self.terms.len() - before
    }

    /// Adds the contents of a plain-text file (see [`CorpusBuilder::add_text`]).
    /// A missing or unreadable file is skipped with a warning, so one bad
    /// source does not sink the whole build.
    pub fn add_file(&mut self, path: &Path) -> usize {
        match fs::read_to_string(path) {
            Ok(text) => {
                let added = self.add_text(&text);
                info!("Extracted {} unique words from {}", added, path.display());
                added
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Writes the sorted word list, one term per line. An empty corpus leaves
    /// an existing file untouched and returns `Ok(false)`.
    pub fn write_to(&self, path: &Path) -> Result<bool, Error> {
        if self.terms.is_empty() {
            warn!("No data processed. {} was not updated.", path.display());
            return Ok(false);
        }
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        for term in &self.terms {
            writeln!(temp_file, "{}", term)?;
        }
        temp_file.persist(path).map_err(|e| Error::Io(e.error))?;
        info!("Total unique words from all sources: {}", self.terms.len());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_text_filters_and_normalizes() {
        let mut corpus = CorpusBuilder::new();
        let added = corpus.add_text("Pt on IV Heparin; heparin 5000-units. BP ok, non-tender.");
        let terms: Vec<&str> = corpus.terms().collect();
        assert_eq!(terms, vec!["5000-units", "heparin", "non-tender"]);
        assert_eq!(added, 3);
    }

    #[test]
    fn test_every_token_is_taken_from_raw_input() {
        let mut corpus = CorpusBuilder::new();
        corpus.add_text("description,specialty\n\"Chest pain\",Cardiology\n");
        let terms: Vec<_> = corpus.terms().collect();
        assert_eq!(
            terms,
            vec!["cardiology", "chest", "description", "pain", "specialty"]
        );
    }

    #[test]
    fn test_write_to_sorted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medical_vocabulary.txt");
        let mut corpus = CorpusBuilder::new();
        corpus.add_text("Tachycardia aspirin Metoprolol");
        assert!(corpus.write_to(&path).unwrap());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "aspirin\nmetoprolol\ntachycardia\n");
    }

    #[test]
    fn test_empty_corpus_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medical_vocabulary.txt");
        fs::write(&path, "keep\n").unwrap();
        assert!(!CorpusBuilder::new().write_to(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep\n");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let mut corpus = CorpusBuilder::new();
        assert_eq!(corpus.add_file(Path::new("/no/such/mtsamples.txt")), 0);
        assert!(corpus.is_empty());
    }
}
