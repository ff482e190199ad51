pub mod local;
pub mod suggestions;

use std::future::Future;
use thiserror::Error;

pub use local::LocalDictionary;

/// Errors a dictionary backend can report. Any error is treated as "no
/// answer" by the engine.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The backend could not be reached or did not answer.
    #[error("Dictionary unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something the engine cannot use.
    #[error("Malformed dictionary response: {0}")]
    Malformed(String),

    /// I/O error while persisting dictionary changes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictionaryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Notifications a dictionary sends to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryEvent {
    /// Cached lookups are no longer valid (dictionary reloaded, custom
    /// word added elsewhere).
    Invalidate,
}

/// Request/response channel to a spelling dictionary.
///
/// Every method takes a list of terms and answers with one result per term,
/// in the same order.
pub trait DictionaryBoundary: Send + Sync {
    /// Whether each term is spelled correctly.
    fn check(
        &self,
        terms: &[String],
    ) -> impl Future<Output = Result<Vec<bool>, DictionaryError>> + Send;

    /// Ranked replacement candidates for each term.
    fn suggest(
        &self,
        terms: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<String>>, DictionaryError>> + Send;

    /// Register terms as permanently correct.
    fn add_word(&self, terms: &[String]) -> impl Future<Output = Result<(), DictionaryError>> + Send;
}
