use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct CacheMaps {
    correctness: HashMap<String, bool>,
    suggestions: HashMap<String, Vec<String>>,
}

/// Correctness and suggestion results keyed by sanitized term.
///
/// Both maps sit behind one lock, so [`LookupCache::clear`] empties them
/// together. Once a term is cached its value stays until the next clear.
#[derive(Debug, Default)]
pub struct LookupCache {
    maps: RwLock<CacheMaps>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correctness(&self, term: &str) -> Option<bool> {
        self.maps.read().correctness.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.maps.read().correctness.contains_key(term)
    }

    /// Record a term's correctness. An existing entry wins.
    pub fn set_correctness(&self, term: impl Into<String>, correct: bool) {
        self.maps
            .write()
            .correctness
            .entry(term.into())
            .or_insert(correct);
    }

    /// Record several results under a single lock.
    pub fn extend_correctness<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let mut maps = self.maps.write();
        for (term, correct) in entries {
            maps.correctness.entry(term).or_insert(correct);
        }
    }

    pub fn suggestions(&self, term: &str) -> Option<Vec<String>> {
        self.maps.read().suggestions.get(term).cloned()
    }

    /// Record a term's suggestions. An existing entry wins.
    pub fn set_suggestions(&self, term: impl Into<String>, suggestions: Vec<String>) {
        self.maps
            .write()
            .suggestions
            .entry(term.into())
            .or_insert(suggestions);
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        let mut maps = self.maps.write();
        debug!(
            "Clearing lookup cache ({} terms, {} suggestion lists)",
            maps.correctness.len(),
            maps.suggestions.len()
        );
        maps.correctness.clear();
        maps.suggestions.clear();
    }

    /// Number of terms with a known correctness. Suggestion lists are not
    /// counted; use [`LookupCache::is_empty`] to check both maps.
    pub fn term_count(&self) -> usize {
        self.maps.read().correctness.len()
    }

    pub fn is_empty(&self) -> bool {
        let maps = self.maps.read();
        maps.correctness.is_empty() && maps.suggestions.is_empty()
    }
}
