// File: src/fuzzy/symspell.rs
use crate::core::types::Term;
use crate::fuzzy::distance::damerau_levenshtein_within;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Index of a term inside `SymSpell::terms`.
type TermId = u32;

/// Spelling correction based on the Symmetric Delete (SymSpell) algorithm.
///
/// Every vocabulary term is expanded into its delete variants up to the
/// configured edit distance. A query expands the same way; any shared variant
/// names a potential match, which is then verified with a bounded
/// Damerau-Levenshtein distance. Lookup cost depends on the query length,
/// not on the dictionary size. Terms carry no frequency: every match within
/// the bound is returned.
#[derive(Clone, Debug)]
pub struct SymSpell {
    /// Maps a delete variant (e.g., "cardac") to the terms it came from.
    deletes: HashMap<String, Vec<TermId>>,
    terms: Vec<Term>,
    /// Longest term in characters; longer queries cannot match.
    longest_term: usize,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            terms: Vec::new(),
            longest_term: 0,
            max_edit_distance,
        }
    }

    pub fn build<'a, I>(max_edit_distance: usize, terms: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut symspell = Self::new(max_edit_distance);
        for term in terms {
            symspell.add_word(term);
        }
        symspell
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Adds a word by mapping each of its delete variants back to it.
    /// Amortized O(k^d) in the word length k for distance d.
    fn add_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let word_id = self.terms.len() as TermId;
        self.terms.push(word.to_string());
        self.longest_term = self.longest_term.max(word.chars().count());
        for edit in self.generate_edits(word) {
            self.deletes.entry(edit).or_default().push(word_id);
        }
    }

    /// Returns every term within `max_edit_distance` of `input`, in
    /// lexicographic order. The input is expected to be lowercased already.
    pub fn lookup(&self, input: &str) -> BTreeSet<Term> {
        let mut candidates = BTreeSet::new();
        if input.is_empty() || self.terms.is_empty() {
            return candidates;
        }
        if input.chars().count() > self.longest_term + self.max_edit_distance {
            return candidates;
        }

        let mut seen: HashSet<TermId> = HashSet::new();
        for edit in self.generate_edits(input) {
            let Some(word_ids) = self.deletes.get(&edit) else {
                continue;
            };
            for &id in word_ids {
                if !seen.insert(id) {
                    continue;
                }
                let term = &self.terms[id as usize];
                if damerau_levenshtein_within(input, term, self.max_edit_distance).is_some() {
                    candidates.insert(term.clone());
                }
            }
        }
        candidates
    }

    /// Generates all unique variants reachable by deleting up to
    /// `max_edit_distance` characters, including the word itself.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string());

        let mut current_edits = vec![word.to_string()];
        for _ in 0..self.max_edit_distance {
            let mut next_edits = Vec::new();
            for edit in &current_edits {
                for (i, _) in edit.char_indices() {
                    let mut deleted_variant = edit.clone();
                    deleted_variant.remove(i);
                    if edits.insert(deleted_variant.clone()) {
                        next_edits.push(deleted_variant);
                    }
                }
            }
            current_edits = next_edits;
        }

        edits
    }
}
