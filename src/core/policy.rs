// File: src/core/policy.rs
use crate::core::types::{Correction, Term};
use std::collections::BTreeSet;

/// Trailing marks dropped from a word before it is checked.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ':', ';'];

/// What the correction policy needs to know about the vocabulary.
pub trait CorrectionSource {
    /// Membership for an already lowercased word.
    fn is_known(&self, word: &str) -> bool;

    /// Known terms within the edit-distance bound of an already lowercased word.
    fn candidates(&self, word: &str) -> BTreeSet<Term>;
}

/// Decides what to do with `word` after a word boundary.
///
/// A known word is `Clean`. An unknown word is only corrected when exactly
/// one term lies within reach; with zero or several candidates it is
/// `Flagged` and the candidates are handed back for a manual pick.
pub fn classify<S: CorrectionSource + ?Sized>(source: &S, word: &str) -> Correction {
    let word = word.trim().to_lowercase();
    if word.is_empty() || source.is_known(&word) {
        return Correction::Clean;
    }

    let mut candidates = source.candidates(&word);
    if candidates.len() == 1 {
        if let Some(term) = candidates.pop_first() {
            return Correction::UnambiguousCorrection { term };
        }
    }
    Correction::Flagged {
        candidates: candidates.into_iter().collect(),
    }
}

/// Extracts the word that was just finished in `text_before_caret`.
///
/// Takes the last whitespace-delimited token and strips one trailing
/// punctuation mark. Returns `None` when nothing is left.
pub fn word_at_boundary(text_before_caret: &str) -> Option<&str> {
    let token = text_before_caret.split_whitespace().next_back()?;
    let word = match token.strip_suffix(TRAILING_PUNCTUATION) {
        Some(stripped) => stripped,
        None => token,
    };
    (!word.is_empty()).then_some(word)
}
