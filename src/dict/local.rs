use crate::config::Config;
use crate::dict::{suggestions, DictionaryBoundary, DictionaryError};
use anyhow::{Context, Result};
use fst::automaton::Levenshtein;
use fst::{IntoStreamer, Set, SetBuilder, Streamer};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Minimal word list used when no compiled dictionary is installed.
const BOOTSTRAP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at", "back",
    "be", "because", "been", "before", "but", "by", "can", "check", "code", "come", "could",
    "day", "do", "document", "does", "each", "even", "file", "first", "for", "from", "get",
    "give", "go", "good", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "know", "like", "line", "link", "list", "look", "make",
    "markdown", "more", "most", "my", "new", "no", "not", "now", "of", "on", "one", "only",
    "or", "other", "our", "out", "over", "people", "received", "say", "see", "she", "so",
    "some", "spelling", "take", "text", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "think", "this", "time", "to", "two", "up", "us", "use", "want",
    "was", "way", "we", "well", "were", "what", "when", "which", "who", "will", "with", "word",
    "words", "work", "would", "year", "you", "your",
];

/// A compiled, immutable word list.
pub struct WordSet {
    set: Set<Vec<u8>>,
}

impl WordSet {
    /// Load the compiled word list for a language, falling back to the
    /// bootstrap list when none is installed.
    pub fn load(language: &str) -> Result<Self> {
        match Self::dictionary_path(language) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => {
                debug!("No compiled dictionary for {}, using bootstrap list", language);
                Self::from_words(BOOTSTRAP_WORDS.iter().map(|w| w.to_string()))
            }
        }
    }

    /// Load a compiled word list from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;
        Ok(Self { set })
    }

    /// Build an in-memory word list.
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut words: Vec<String> = words.into_iter().collect();
        words.sort();
        words.dedup();
        let set = Set::from_iter(words).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    /// Compile a word list to disk.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<usize> {
        let mut sorted_words = words.to_vec();
        sorted_words.sort();
        sorted_words.dedup();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).context("Failed to create dictionary directory")?;
        }
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let mut builder =
            SetBuilder::new(BufWriter::new(file)).context("Failed to create FST builder")?;
        for word in &sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }
        builder.finish().context("Failed to finalize dictionary")?;

        Ok(sorted_words.len())
    }

    pub fn dictionary_path(language: &str) -> Option<PathBuf> {
        Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// All words within `distance` edits of `word`.
    pub fn within_distance(&self, word: &str, distance: u32) -> Vec<String> {
        let automaton = match Levenshtein::new(word, distance) {
            Ok(automaton) => automaton,
            Err(e) => {
                debug!("Skipping distance {} search for '{}': {}", distance, word, e);
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        let mut stream = self.set.search(automaton).into_stream();
        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }
        results
    }
}

/// A dictionary backed by a compiled word list and a personal word file.
pub struct LocalDictionary {
    words: WordSet,
    personal: RwLock<HashSet<String>>,
    personal_path: Option<PathBuf>,
    max_suggestions: usize,
}

impl LocalDictionary {
    pub fn new(words: WordSet, max_suggestions: usize) -> Self {
        Self {
            words,
            personal: RwLock::new(HashSet::new()),
            personal_path: None,
            max_suggestions,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let words = WordSet::load(&config.language)?;
        if words.is_empty() {
            warn!("Dictionary for {} has no words, everything will be flagged", config.language);
        } else {
            debug!("Loaded {} words for {}", words.len(), config.language);
        }
        let dictionary = Self::new(words, config.max_suggestions);
        match &config.personal_dictionary {
            Some(path) => dictionary.with_personal_dictionary(path),
            None => Ok(dictionary),
        }
    }

    /// Load personal words from `path` and append new ones to it.
    pub fn with_personal_dictionary(mut self, path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;
            let mut personal = self.personal.write();
            for line in content.lines() {
                let word = line.trim();
                if !word.is_empty() && !word.starts_with('#') {
                    personal.insert(word.to_lowercase());
                }
            }
        }
        self.personal_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.words.contains(&lower) || self.personal.read().contains(&lower)
    }

    pub fn suggestions_for(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        suggestions::generate(&lower, &self.words, self.max_suggestions)
            .into_iter()
            .map(|s| suggestions::match_case(word, &s))
            .collect()
    }

    fn persist(&self, words: &[String]) -> Result<(), DictionaryError> {
        let Some(path) = &self.personal_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        for word in words {
            writeln!(file, "{}", word)?;
        }
        Ok(())
    }
}

impl DictionaryBoundary for LocalDictionary {
    async fn check(&self, terms: &[String]) -> Result<Vec<bool>, DictionaryError> {
        Ok(terms.iter().map(|term| self.contains(term)).collect())
    }

    async fn suggest(&self, terms: &[String]) -> Result<Vec<Vec<String>>, DictionaryError> {
        Ok(terms.iter().map(|term| self.suggestions_for(term)).collect())
    }

    async fn add_word(&self, terms: &[String]) -> Result<(), DictionaryError> {
        let added: Vec<String> = {
            let mut personal = self.personal.write();
            terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty() && personal.insert(t.clone()))
                .collect()
        };

        if let Err(e) = self.persist(&added) {
            warn!("Failed to save personal dictionary: {}", e);
            return Err(e);
        }
        debug!("Added {} word(s) to the personal dictionary", added.len());
        Ok(())
    }
}
