use crate::dict::{DictionaryBoundary, DictionaryError};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Treats every word as correct except the configured misspellings, and
/// records every request it receives.
#[derive(Default)]
pub struct FakeDictionary {
    misspelled: Mutex<HashSet<String>>,
    suggestions: HashMap<String, Vec<String>>,
    failing: AtomicBool,
    check_requests: Mutex<Vec<Vec<String>>>,
    suggest_requests: Mutex<Vec<Vec<String>>>,
    added: Mutex<Vec<String>>,
}

impl FakeDictionary {
    pub fn new(misspelled: &[&str]) -> Self {
        Self {
            misspelled: Mutex::new(misspelled.iter().map(|w| w.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn with_suggestions(mut self, word: &str, suggestions: &[&str]) -> Self {
        self.suggestions.insert(
            word.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn check_requests(&self) -> Vec<Vec<String>> {
        self.check_requests.lock().clone()
    }

    pub fn check_calls(&self) -> usize {
        self.check_requests.lock().len()
    }

    pub fn suggest_calls(&self) -> usize {
        self.suggest_requests.lock().len()
    }

    pub fn added_words(&self) -> Vec<String> {
        self.added.lock().clone()
    }

    fn fail_if_needed(&self) -> Result<(), DictionaryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DictionaryError::unavailable("fake dictionary is offline"))
        } else {
            Ok(())
        }
    }
}

impl DictionaryBoundary for FakeDictionary {
    async fn check(&self, terms: &[String]) -> Result<Vec<bool>, DictionaryError> {
        self.check_requests.lock().push(terms.to_vec());
        self.fail_if_needed()?;
        let misspelled = self.misspelled.lock();
        Ok(terms.iter().map(|t| !misspelled.contains(t)).collect())
    }

    async fn suggest(&self, terms: &[String]) -> Result<Vec<Vec<String>>, DictionaryError> {
        self.suggest_requests.lock().push(terms.to_vec());
        self.fail_if_needed()?;
        Ok(terms
            .iter()
            .map(|t| self.suggestions.get(t).cloned().unwrap_or_default())
            .collect())
    }

    async fn add_word(&self, terms: &[String]) -> Result<(), DictionaryError> {
        self.fail_if_needed()?;
        let mut misspelled = self.misspelled.lock();
        for term in terms {
            misspelled.remove(term);
        }
        self.added.lock().extend(terms.iter().cloned());
        Ok(())
    }
}
