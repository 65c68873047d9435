//! Ordered rule evaluation.
//!
//! # Responsibilities
//! - Own the compiled rule list for the process lifetime
//! - Find the first rule matching a subject
//! - Return the expanded Record or an explicit NotFound
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan over rules; rule sets are configuration-sized
//! - Rule order is priority: a later, tighter match never wins

use thiserror::Error;

use crate::resolve::record::Record;
use crate::resolve::rule::Rule;

/// Why a subject could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No rule matched the subject.
    #[error("module not found")]
    NotFound,
}

/// Resolves `host/path` subjects to repositories using an ordered rule list.
#[derive(Debug, Clone)]
pub struct Resolver {
    rules: Vec<Rule>,
}

impl Resolver {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Resolve `subject` using the first rule whose pattern matches it.
    pub fn resolve(&self, subject: &str) -> Result<Record, ResolveError> {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(subject))
            .ok_or(ResolveError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for Resolver {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}
