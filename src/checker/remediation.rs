use crate::checker::diagnostic::DeferredAction;
use crate::checker::resolver::Resolver;
use crate::dict::{DictionaryBoundary, DictionaryError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntryKind {
    Replace(String),
    NoSuggestions,
    AddToDictionary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: usize,
    pub label: String,
    pub kind: MenuEntryKind,
    pub enabled: bool,
}

/// The choices offered for one misspelled word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationMenu {
    pub word: String,
    pub entries: Vec<MenuEntry>,
}

impl RemediationMenu {
    /// One entry per suggestion (or a disabled placeholder when there are
    /// none), followed by "Add to dictionary".
    pub fn new(word: impl Into<String>, suggestions: Vec<String>) -> Self {
        let mut kinds: Vec<MenuEntryKind> = if suggestions.is_empty() {
            vec![MenuEntryKind::NoSuggestions]
        } else {
            suggestions.into_iter().map(MenuEntryKind::Replace).collect()
        };
        kinds.push(MenuEntryKind::AddToDictionary);

        let entries = kinds
            .into_iter()
            .enumerate()
            .map(|(id, kind)| {
                let (label, enabled) = match &kind {
                    MenuEntryKind::Replace(text) => (text.clone(), true),
                    MenuEntryKind::NoSuggestions => ("No suggestions".to_string(), false),
                    MenuEntryKind::AddToDictionary => ("Add to dictionary".to_string(), true),
                };
                MenuEntry {
                    id,
                    label,
                    kind,
                    enabled,
                }
            })
            .collect();

        Self {
            word: word.into(),
            entries,
        }
    }

    pub fn entry(&self, id: usize) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Shows a menu anchored at a document offset and returns the chosen
/// entry id, or `None` if the user dismissed it.
pub trait ChoicePresenter {
    fn choose(&mut self, anchor: usize, menu: &RemediationMenu) -> Option<usize>;
}

/// Replaces a byte span of the document.
pub trait TextEditor {
    fn replace_span(&mut self, from: usize, to: usize, text: &str);
}

impl TextEditor for String {
    fn replace_span(&mut self, from: usize, to: usize, text: &str) {
        self.replace_range(from..to, text);
    }
}

/// What running a deferred action did. Exactly one happens per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    NoOp,
    AddedWord(String),
    Replaced { from: usize, to: usize, text: String },
}

impl DeferredAction {
    pub async fn run<D, P, E>(
        &self,
        resolver: &Resolver<D>,
        presenter: &mut P,
        editor: &mut E,
    ) -> Result<RemediationOutcome, DictionaryError>
    where
        D: DictionaryBoundary,
        P: ChoicePresenter + ?Sized,
        E: TextEditor + ?Sized,
    {
        let DeferredAction::OfferRemediation { word, from, to } = self;

        let suggestions = resolver.suggestions_for(word).await;
        let menu = RemediationMenu::new(word.clone(), suggestions);

        let Some(entry) = presenter
            .choose(*from, &menu)
            .and_then(|id| menu.entry(id))
            .filter(|entry| entry.enabled)
        else {
            return Ok(RemediationOutcome::NoOp);
        };

        match &entry.kind {
            MenuEntryKind::Replace(text) => {
                debug!("Replacing '{}' with '{}'", word, text);
                editor.replace_span(*from, *to, text);
                Ok(RemediationOutcome::Replaced {
                    from: *from,
                    to: *to,
                    text: text.clone(),
                })
            }
            MenuEntryKind::AddToDictionary => {
                resolver.add_word(word).await?;
                Ok(RemediationOutcome::AddedWord(word.clone()))
            }
            MenuEntryKind::NoSuggestions => Ok(RemediationOutcome::NoOp),
        }
    }
}
