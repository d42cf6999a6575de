// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A single lowercase vocabulary word.
pub type Term = String;

/// Number of suggestions returned when the caller does not ask for a limit.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Maximum edit distance searched by the correction engine.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Decision taken for one word once a word boundary has been typed.
///
/// Only `UnambiguousCorrection` may be applied without asking the user.
/// A `Flagged` word keeps every candidate so a UI can offer a manual pick list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Correction {
    Clean,
    UnambiguousCorrection { term: Term },
    Flagged { candidates: Vec<Term> },
}

impl Correction {
    /// The replacement a caller may apply silently, if any.
    pub fn autocorrection(&self) -> Option<&str> {
        match self {
            Correction::UnambiguousCorrection { term } => Some(term),
            _ => None,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Correction::Flagged { .. })
    }
}

/// Result of a vocabulary load. `ok == false` always comes with `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub ok: bool,
    pub count: usize,
}

impl LoadReport {
    pub fn failed() -> Self {
        Self { ok: false, count: 0 }
    }
}

/// Everything a front end needs after a keystroke or a boundary event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCheck {
    pub word: String,
    pub suggestions: Vec<Term>,
    pub is_known: bool,
    pub autocorrection: Option<Term>,
}
