use crate::checker::cache::LookupCache;
use crate::checker::sanitize::sanitize;
use crate::dict::{DictionaryBoundary, DictionaryError};
use std::slice;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a batch resolution did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every term was already cached; no request was made.
    Cached,
    /// One request resolved this many terms.
    Resolved(usize),
    /// The dictionary gave no usable answer; nothing was cached.
    Failed,
}

/// A dictionary must answer exactly one result per term.
fn expect_len<T>(results: Vec<T>, expected: usize) -> Result<Vec<T>, DictionaryError> {
    if results.len() == expected {
        Ok(results)
    } else {
        Err(DictionaryError::Malformed(format!(
            "{} result(s) for {} term(s)",
            results.len(),
            expected
        )))
    }
}

/// Resolve the correctness of many terms with a single dictionary request.
pub async fn resolve_batch<D, I>(cache: &LookupCache, dictionary: &D, terms: I) -> BatchOutcome
where
    D: DictionaryBoundary,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let pending: Vec<String> = terms
        .into_iter()
        .map(|term| sanitize(term.as_ref()))
        .filter(|term| !cache.contains(term))
        .collect();

    if pending.is_empty() {
        return BatchOutcome::Cached;
    }

    let answer = dictionary
        .check(&pending)
        .await
        .and_then(|results| expect_len(results, pending.len()));

    match answer {
        Ok(results) => {
            let count = pending.len();
            cache.extend_correctness(pending.into_iter().zip(results));
            debug!("Resolved {} term(s) in one request", count);
            BatchOutcome::Resolved(count)
        }
        Err(e) => {
            warn!("Batch spellcheck failed, treating words as correct: {}", e);
            BatchOutcome::Failed
        }
    }
}

/// Whether `word` is spelled correctly.
///
/// Autocorrect replacement values are always correct.
pub async fn is_correct<D, S>(
    cache: &LookupCache,
    dictionary: &D,
    word: &str,
    autocorrect_values: &[S],
) -> bool
where
    D: DictionaryBoundary,
    S: AsRef<str>,
{
    let term = sanitize(word);

    if autocorrect_values.iter().any(|value| value.as_ref() == term) {
        return true;
    }

    if let Some(correct) = cache.correctness(&term) {
        return correct;
    }

    let answer = dictionary
        .check(slice::from_ref(&term))
        .await
        .and_then(|results| expect_len(results, 1));

    match answer {
        Ok(results) => {
            let correct = results[0];
            cache.set_correctness(term, correct);
            correct
        }
        Err(e) => {
            warn!("Spellcheck for '{}' failed, treating as correct: {}", term, e);
            true
        }
    }
}

/// Ranked replacement candidates for `word`, fetched on first use.
pub async fn suggestions_for<D>(cache: &LookupCache, dictionary: &D, word: &str) -> Vec<String>
where
    D: DictionaryBoundary,
{
    let term = sanitize(word);

    if let Some(cached) = cache.suggestions(&term) {
        return cached;
    }

    let answer = dictionary
        .suggest(slice::from_ref(&term))
        .await
        .and_then(|lists| expect_len(lists, 1));

    match answer {
        Ok(mut lists) => {
            let suggestions = lists.swap_remove(0);
            cache.set_suggestions(term, suggestions.clone());
            suggestions
        }
        Err(e) => {
            warn!("Fetching suggestions for '{}' failed: {}", term, e);
            Vec::new()
        }
    }
}

/// A dictionary paired with the cache in front of it.
pub struct Resolver<D> {
    cache: Arc<LookupCache>,
    dictionary: Arc<D>,
}

impl<D> Clone for Resolver<D> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            dictionary: Arc::clone(&self.dictionary),
        }
    }
}

impl<D: DictionaryBoundary> Resolver<D> {
    pub fn new(cache: Arc<LookupCache>, dictionary: Arc<D>) -> Self {
        Self { cache, dictionary }
    }

    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }

    pub async fn resolve_batch<I>(&self, terms: I) -> BatchOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        resolve_batch(&self.cache, self.dictionary.as_ref(), terms).await
    }

    pub async fn is_correct<S: AsRef<str>>(&self, word: &str, autocorrect_values: &[S]) -> bool {
        is_correct(&self.cache, self.dictionary.as_ref(), word, autocorrect_values).await
    }

    pub async fn suggestions_for(&self, word: &str) -> Vec<String> {
        suggestions_for(&self.cache, self.dictionary.as_ref(), word).await
    }

    /// Register `word` as correct and drop every cached result.
    pub async fn add_word(&self, word: &str) -> Result<(), DictionaryError> {
        self.dictionary.add_word(&[sanitize(word)]).await?;
        self.cache.clear();
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeDictionary;

    const NO_AUTOCORRECT: &[&str] = &[];

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_batch_skips_cached_terms() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"]);
        cache.set_correctness("is", true);

        let outcome = resolve_batch(&cache, &dict, ["This", "is", "recieved"]).await;

        assert_eq!(outcome, BatchOutcome::Resolved(2));
        assert_eq!(dict.check_requests(), vec![words(&["This", "recieved"])]);
        assert_eq!(cache.correctness("This"), Some(true));
        assert_eq!(cache.correctness("recieved"), Some(false));
    }

    #[tokio::test]
    async fn test_batch_fully_cached_makes_no_request() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&[]);
        cache.set_correctness("word", true);

        let outcome = resolve_batch(&cache, &dict, ["word", "word"]).await;

        assert_eq!(outcome, BatchOutcome::Cached);
        assert_eq!(dict.check_calls(), 0);

        let outcome = resolve_batch(&cache, &dict, Vec::<String>::new()).await;
        assert_eq!(outcome, BatchOutcome::Cached);
        assert_eq!(dict.check_calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_sanitizes_and_keeps_duplicates() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&[]);

        resolve_batch(&cache, &dict, ["don’t", "teh", "teh"]).await;

        assert_eq!(dict.check_requests(), vec![words(&["don't", "teh", "teh"])]);
        assert!(cache.contains("don't"));
        assert!(!cache.contains("don’t"));
    }

    #[tokio::test]
    async fn test_batch_failure_writes_nothing() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"]);
        dict.set_failing(true);

        let outcome = resolve_batch(&cache, &dict, ["recieved", "word"]).await;

        assert_eq!(outcome, BatchOutcome::Failed);
        assert!(cache.is_empty());
    }

    struct ShortDictionary;

    impl DictionaryBoundary for ShortDictionary {
        async fn check(&self, _terms: &[String]) -> Result<Vec<bool>, DictionaryError> {
            Ok(vec![true])
        }

        async fn suggest(&self, _terms: &[String]) -> Result<Vec<Vec<String>>, DictionaryError> {
            Ok(Vec::new())
        }

        async fn add_word(&self, _terms: &[String]) -> Result<(), DictionaryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_batch_length_mismatch_writes_nothing() {
        let cache = LookupCache::new();

        let outcome = resolve_batch(&cache, &ShortDictionary, ["one", "two"]).await;

        assert_eq!(outcome, BatchOutcome::Failed);
        assert!(cache.is_empty());
        assert!(suggestions_for(&cache, &ShortDictionary, "one").await.is_empty());
    }

    #[test]
    fn test_wrong_result_count_is_malformed() {
        assert!(matches!(
            expect_len(vec![true], 2),
            Err(DictionaryError::Malformed(_))
        ));
        assert!(matches!(
            expect_len(Vec::<Vec<String>>::new(), 1),
            Err(DictionaryError::Malformed(_))
        ));
        assert_eq!(expect_len(vec![false, true], 2).unwrap(), vec![false, true]);
    }

    #[tokio::test]
    async fn test_is_correct_hits_cache_after_batch() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"]);

        resolve_batch(&cache, &dict, ["recieved"]).await;
        assert_eq!(dict.check_calls(), 1);

        assert!(!is_correct(&cache, &dict, "recieved", NO_AUTOCORRECT).await);
        assert_eq!(dict.check_calls(), 1);
    }

    #[tokio::test]
    async fn test_is_correct_single_request_is_cached() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["teh"]);

        assert!(!is_correct(&cache, &dict, "teh", NO_AUTOCORRECT).await);
        assert!(!is_correct(&cache, &dict, "teh", NO_AUTOCORRECT).await);

        assert_eq!(dict.check_requests(), vec![words(&["teh"])]);
    }

    #[tokio::test]
    async fn test_is_correct_fails_open() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"]);
        dict.set_failing(true);

        assert!(is_correct(&cache, &dict, "recieved", NO_AUTOCORRECT).await);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_autocorrect_values_short_circuit() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["dont"]);
        cache.set_correctness("dont", false);
        dict.set_failing(true);

        assert!(is_correct(&cache, &dict, "dont", &["dont"]).await);
        assert!(is_correct(&cache, &dict, "don’t", &["don't".to_string()]).await);
        assert_eq!(dict.check_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalidation_requeries() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&[]);

        resolve_batch(&cache, &dict, ["word"]).await;
        cache.set_suggestions("wrod", vec!["word".to_string()]);
        cache.clear();

        assert!(is_correct(&cache, &dict, "word", NO_AUTOCORRECT).await);
        assert_eq!(dict.check_calls(), 2);
        suggestions_for(&cache, &dict, "wrod").await;
        assert_eq!(dict.suggest_calls(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_are_cached_in_order() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"])
            .with_suggestions("recieved", &["received", "relieved", "deceived"]);

        let first = suggestions_for(&cache, &dict, "recieved").await;
        let second = suggestions_for(&cache, &dict, "recieved").await;

        assert_eq!(first, words(&["received", "relieved", "deceived"]));
        assert_eq!(first, second);
        assert_eq!(dict.suggest_calls(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_failure_is_empty_and_uncached() {
        let cache = LookupCache::new();
        let dict = FakeDictionary::new(&["recieved"]).with_suggestions("recieved", &["received"]);
        dict.set_failing(true);

        assert!(suggestions_for(&cache, &dict, "recieved").await.is_empty());
        assert_eq!(cache.suggestions("recieved"), None);

        dict.set_failing(false);
        assert_eq!(
            suggestions_for(&cache, &dict, "recieved").await,
            words(&["received"])
        );
    }

    #[tokio::test]
    async fn test_resolver_add_word_invalidates() {
        let dict = Arc::new(FakeDictionary::new(&["markspell"]));
        let resolver = Resolver::new(Arc::new(LookupCache::new()), Arc::clone(&dict));

        assert!(!resolver.is_correct("markspell", NO_AUTOCORRECT).await);
        resolver.add_word("markspell").await.unwrap();

        assert!(resolver.cache().is_empty());
        assert!(resolver.is_correct("markspell", NO_AUTOCORRECT).await);
        assert_eq!(dict.added_words(), words(&["markspell"]));
        assert_eq!(dict.check_calls(), 2);
    }
}
