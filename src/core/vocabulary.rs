// File: src/core/vocabulary.rs
use crate::core::types::Term;
use crate::error::Error;
use std::collections::BTreeSet;
use std::io::BufRead;

/// The set of known terms. Terms are lowercased on insert, so lookups do not
/// depend on the casing of either the word list or the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyStore {
    terms: BTreeSet<Term>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from raw lines. Lines are trimmed and blank ones skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = lines
            .into_iter()
            .filter_map(|line| {
                let trimmed = line.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
            })
            .collect();
        Self { terms }
    }

    /// Reads a one-term-per-line source. Any read error aborts the whole load.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_lines(lines))
    }

    /// Case-insensitive membership test.
    pub fn is_known(&self, word: &str) -> bool {
        self.terms.contains(word.trim().to_lowercase().as_str())
    }

    /// Membership test for a word the caller has already lowercased.
    pub fn contains_normalized(&self, word: &str) -> bool {
        self.terms.contains(word)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_trims_and_skips_blank() {
        let store = VocabularyStore::from_lines(["  cardiac\n", "", "   ", "aspirin"]);
        assert_eq!(store.len(), 2);
        assert!(store.is_known("cardiac"));
        assert!(store.is_known("aspirin"));
    }

    #[test]
    fn test_lowercases_on_insert_and_dedups() {
        let store = VocabularyStore::from_lines(["Aspirin", "ASPIRIN", "aspirin"]);
        assert_eq!(store.len(), 1);
        assert!(store.is_known("aSpIrIn"));
        assert!(store.contains_normalized("aspirin"));
        assert!(!store.contains_normalized("Aspirin"));
    }

    #[test]
    fn test_short_terms_are_kept() {
        let store = VocabularyStore::from_lines(["iv", "q"]);
        assert!(store.is_known("IV"));
        assert!(store.is_known("q"));
    }

    #[test]
    fn test_from_reader() {
        let data = "hypertension\n\ntachycardia\n";
        let store = VocabularyStore::from_reader(data.as_bytes()).unwrap();
        let terms: Vec<&str> = store.iter().collect();
        assert_eq!(terms, vec!["hypertension", "tachycardia"]);
    }
}
