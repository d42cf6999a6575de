// src/lib.rs

pub mod analysis;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod persistence;

pub use crate::core::engine::{Snapshot, TextProcessor};
pub use crate::core::policy::word_at_boundary;
pub use crate::core::types::{Correction, LoadReport, SpellCheck, Term};
pub use crate::core::vocabulary::VocabularyStore;
pub use crate::error::Error;
