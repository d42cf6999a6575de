pub mod engine;
pub mod policy;
pub mod trie;
pub mod types;
pub mod vocabulary;
