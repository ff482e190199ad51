pub mod cache;
pub mod diagnostic;
pub mod remediation;
pub mod resolver;
pub mod sanitize;
pub mod tokenizer;

use crate::dict::{DictionaryBoundary, DictionaryEvent};
use crate::parser::Document;
use cache::LookupCache;
use diagnostic::{build_diagnostic, Diagnostic};
use resolver::{BatchOutcome, Resolver};
use std::sync::Arc;
use tokenizer::extract_tokens;
use tokio::sync::mpsc;
use tracing::debug;

/// Runs lint passes over documents against one dictionary and one cache.
pub struct SpellChecker<D> {
    resolver: Resolver<D>,
}

impl<D> Clone for SpellChecker<D> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<D: DictionaryBoundary> SpellChecker<D> {
    pub fn new(dictionary: D) -> Self {
        Self::with_cache(Arc::new(dictionary), Arc::new(LookupCache::new()))
    }

    pub fn with_cache(dictionary: Arc<D>, cache: Arc<LookupCache>) -> Self {
        Self {
            resolver: Resolver::new(cache, dictionary),
        }
    }

    pub fn resolver(&self) -> &Resolver<D> {
        &self.resolver
    }

    /// Check a document and return a diagnostic per misspelled word, in
    /// document order.
    ///
    /// All words are resolved with one batched dictionary request before
    /// the per-word checks, which then hit the cache.
    pub async fn lint<S: AsRef<str>>(
        &self,
        document: &Document,
        autocorrect_values: &[S],
    ) -> Vec<Diagnostic> {
        let tokens = extract_tokens(&document.root, &document.text);

        let outcome = self
            .resolver
            .resolve_batch(tokens.iter().map(|t| t.word.as_str()))
            .await;
        if outcome == BatchOutcome::Failed {
            debug!("Batch lookup failed, checking words one by one");
        }

        let mut diagnostics = Vec::new();
        for token in &tokens {
            if !self.resolver.is_correct(&token.word, autocorrect_values).await {
                diagnostics.push(build_diagnostic(token));
            }
        }

        debug!(
            "Lint pass: {} word(s), {} misspelled, {} term(s) cached",
            tokens.len(),
            diagnostics.len(),
            self.resolver.cache().term_count()
        );
        diagnostics
    }

    /// Forget every cached lookup.
    pub fn invalidate(&self) {
        self.resolver.invalidate();
    }

    pub fn handle_event(&self, event: DictionaryEvent) {
        match event {
            DictionaryEvent::Invalidate => self.invalidate(),
        }
    }

    /// Apply dictionary events until the sending side closes.
    pub async fn listen_for_invalidation(&self, mut events: mpsc::Receiver<DictionaryEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        debug!("Dictionary event channel closed");
    }
}
