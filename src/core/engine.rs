use crate::core::policy::{self, CorrectionSource};
use crate::core::trie::PrefixIndex;
use crate::core::types::{
    Correction, LoadReport, SpellCheck, Term, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_SUGGESTION_LIMIT,
};
use crate::core::vocabulary::VocabularyStore;
use crate::error::Error;
use crate::fuzzy::symspell::SymSpell;
use log::{info, warn};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// One published vocabulary together with everything derived from it.
///
/// A snapshot is never mutated after construction, so the store, the prefix
/// index and the correction engine always describe the same term set.
#[derive(Debug)]
pub struct Snapshot {
    version: u64,
    vocabulary: VocabularyStore,
    index: PrefixIndex,
    symspell: SymSpell,
}

impl Snapshot {
    fn build(vocabulary: VocabularyStore, max_edit_distance: usize, version: u64) -> Self {
        let index = PrefixIndex::build(vocabulary.iter());
        let symspell = SymSpell::build(max_edit_distance, vocabulary.iter());
        Self { version, vocabulary, index, symspell }
    }

    /// Incremented on every successful load; 0 is the empty startup snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Case-insensitive membership.
    pub fn is_known(&self, word: &str) -> bool {
        self.vocabulary.is_known(word)
    }

    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Term> {
        self.index.suggest(&prefix.to_lowercase(), limit)
    }

    pub fn candidates(&self, word: &str) -> BTreeSet<Term> {
        self.symspell.lookup(&word.trim().to_lowercase())
    }

    pub fn classify(&self, word: &str) -> Correction {
        policy::classify(self, word)
    }
}

impl CorrectionSource for Snapshot {
    fn is_known(&self, word: &str) -> bool {
        self.vocabulary.contains_normalized(word)
    }

    fn candidates(&self, word: &str) -> BTreeSet<Term> {
        self.symspell.lookup(word)
    }
}

/// The local text-processing engine: suggestions, known-word checks and
/// auto-correction decisions over a swappable vocabulary.
///
/// Queries work on the snapshot that was current when they started. A reload
/// builds a complete new snapshot before publishing it with one pointer swap,
/// so concurrent readers see either the old pair or the new one.
pub struct TextProcessor {
    current: RwLock<Arc<Snapshot>>,
    max_edit_distance: usize,
    suggestion_limit: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn with_options(max_edit_distance: usize, suggestion_limit: usize) -> Self {
        let empty = Snapshot::build(VocabularyStore::new(), max_edit_distance, 0);
        Self {
            current: RwLock::new(Arc::new(empty)),
            max_edit_distance,
            suggestion_limit,
        }
    }

    /// The snapshot queries currently run against. Holding on to it keeps a
    /// consistent view across several calls even if a reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    /// Replaces the vocabulary with the given lines.
    pub fn load_lines<I, S>(&self, lines: I) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.publish(VocabularyStore::from_lines(lines))
    }

    /// Replaces the vocabulary with the contents of a one-term-per-line file.
    /// On failure the previous vocabulary stays in place.
    pub fn load_file(&self, path: &Path) -> LoadReport {
        info!("Loading medical vocabulary from {}", path.display());
        match read_vocabulary(path) {
            Ok(vocabulary) => self.publish(vocabulary),
            Err(e) => {
                warn!("Error loading vocabulary from {}: {}", path.display(), e);
                LoadReport::failed()
            }
        }
    }

    /// Publishes an already built store, e.g. one restored from a compiled snapshot.
    pub fn load_store(&self, vocabulary: VocabularyStore) -> LoadReport {
        self.publish(vocabulary)
    }

    fn publish(&self, vocabulary: VocabularyStore) -> LoadReport {
        let count = vocabulary.len();
        // Build outside the lock; only the swap itself is exclusive.
        let mut snapshot = Snapshot::build(vocabulary, self.max_edit_distance, 0);

        let mut current = self.current.write();
        snapshot.version = current.version + 1;
        *current = Arc::new(snapshot);
        drop(current);

        info!("Vocabulary loaded with {} medical terms.", count);
        LoadReport { ok: true, count }
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.snapshot().is_known(word)
    }

    /// Up to the configured number of completions for `prefix`.
    pub fn suggest(&self, prefix: &str) -> Vec<Term> {
        self.suggest_with_limit(prefix, self.suggestion_limit)
    }

    pub fn suggest_with_limit(&self, prefix: &str, limit: usize) -> Vec<Term> {
        self.snapshot().suggest(prefix, limit)
    }

    pub fn candidates(&self, word: &str) -> BTreeSet<Term> {
        self.snapshot().candidates(word)
    }

    pub fn classify(&self, word: &str) -> Correction {
        self.snapshot().classify(word)
    }

    /// Suggestions, membership and auto-correction for one word, all taken
    /// from the same snapshot.
    pub fn check(&self, word: &str) -> SpellCheck {
        let snapshot = self.snapshot();
        let autocorrection = snapshot
            .classify(word)
            .autocorrection()
            .map(str::to_string);
        SpellCheck {
            word: word.to_string(),
            suggestions: snapshot.suggest(word.trim(), self.suggestion_limit),
            is_known: snapshot.is_known(word),
            autocorrection,
        }
    }
}

fn read_vocabulary(path: &Path) -> Result<VocabularyStore, Error> {
    let file = File::open(path)?;
    VocabularyStore::from_reader(BufReader::new(file))
}
