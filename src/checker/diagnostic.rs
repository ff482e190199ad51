use crate::checker::tokenizer::Token;
use serde::Serialize;

/// Source tag carried by every spellcheck diagnostic.
pub const SOURCE: &str = "spellcheck";

/// Message attached to every misspelled word.
pub const MESSAGE: &str = "Spelling mistake";

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

/// Work the host performs when the user asks to fix a diagnostic.
///
/// The engine only describes the action. Hosts carry it out with
/// `DeferredAction::run` from the `remediation` module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DeferredAction {
    /// Offer suggestions for `word`, or adding it to the dictionary.
    OfferRemediation { word: String, from: usize, to: usize },
}

/// A misspelled word, positioned by byte offsets into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub from: usize,
    pub to: usize,
    pub message: String,
    pub severity: Severity,
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DeferredAction>,
}

impl Diagnostic {
    /// The misspelled word, as recorded by the attached action.
    pub fn word(&self) -> Option<&str> {
        match &self.action {
            Some(DeferredAction::OfferRemediation { word, .. }) => Some(word),
            None => None,
        }
    }
}

/// Build the diagnostic for a token already known to be misspelled.
pub fn build_diagnostic(token: &Token) -> Diagnostic {
    let from = token.from();
    let to = token.to();

    Diagnostic {
        from,
        to,
        message: MESSAGE.to_string(),
        severity: Severity::Error,
        source: SOURCE,
        action: Some(DeferredAction::OfferRemediation {
            word: token.word.clone(),
            from,
            to,
        }),
    }
}
