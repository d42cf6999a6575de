// Corpus extraction -> word list -> compiled snapshot -> engine.
use drcorrect_core::corpus::CorpusBuilder;
use drcorrect_core::{persistence, word_at_boundary, Correction, TextProcessor};
use std::fs;

#[test]
fn corpus_to_compiled_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("mtsamples.txt");
    let drugs = dir.path().join("drugs.txt");
    fs::write(&notes, "Patient with Hypertension and tachycardia. BP 150/90.").unwrap();
    fs::write(&drugs, "Metoprolol Tartrate, metoprolol succinate").unwrap();

    let mut corpus = CorpusBuilder::new();
    corpus.add_file(&notes);
    corpus.add_file(&drugs);
    corpus.add_file(&dir.path().join("missing.csv"));
    let vocab_path = dir.path().join("medical_vocabulary.txt");
    assert!(corpus.write_to(&vocab_path).unwrap());

    let processor = TextProcessor::new();
    let report = processor.load_file(&vocab_path);
    assert!(report.ok);
    assert_eq!(report.count, corpus.len());
    assert!(processor.is_known("metoprolol"));
    assert!(!processor.is_known("bp"));

    let compiled = dir.path().join("vocabulary.bin");
    persistence::save_to_disk(&processor.snapshot(), &compiled).unwrap();

    let restored = TextProcessor::new();
    let report = restored.load_store(persistence::load_from_disk(&compiled).unwrap());
    assert_eq!(report.count, corpus.len());
    assert_eq!(restored.suggest("ta"), processor.suggest("ta"));
    assert_eq!(restored.suggest("ta"), vec!["tachycardia", "tartrate"]);
}

#[test]
fn boundary_word_feeds_the_policy() {
    let processor = TextProcessor::new();
    processor.load_lines(["tachycardia", "hypertension"]);

    let typed = "pt presents with tachycardai, ";
    let word = word_at_boundary(typed).unwrap();
    assert_eq!(word, "tachycardai");
    assert_eq!(
        processor.classify(word),
        Correction::UnambiguousCorrection { term: "tachycardia".to_string() }
    );

    let report = processor.check("Hypertension");
    assert!(report.is_known);
    assert_eq!(report.suggestions, vec!["hypertension"]);
    assert_eq!(report.autocorrection, None);
}
