use crate::checker::diagnostic::Diagnostic;
use crate::checker::remediation::{
    ChoicePresenter, MenuEntryKind, RemediationMenu, RemediationOutcome,
};
use crate::dict::DictionaryBoundary;
use crate::parser::{is_markdown, Document};
use crate::{CheckResult, Config, SpellChecker, SpellError};
use anyhow::{Context, Result};
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand the given paths into the markdown files to check. Files named
/// explicitly are always kept; directories contribute their markdown files.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkBuilder::new(path).build() {
                match entry {
                    Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                        if is_markdown(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable entry: {}", e),
                }
            }
        } else if path.exists() {
            files.push(path.clone());
        } else {
            warn!("File not found: {}", path.display());
        }
    }

    files
}

/// 1-based line and column of a byte offset.
pub fn locate(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = text.get(..offset).unwrap_or("");
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// The full line containing the byte range `from..to`.
pub fn line_context(text: &str, from: usize, to: usize) -> String {
    let start = text.get(..from).and_then(|s| s.rfind('\n')).map_or(0, |i| i + 1);
    let end = text
        .get(to..)
        .and_then(|s| s.find('\n'))
        .map_or(text.len(), |i| to + i);
    text.get(start..end).unwrap_or("").trim().to_string()
}

fn to_error(text: &str, diagnostic: &Diagnostic, suggestions: Vec<String>) -> SpellError {
    let (line, column) = locate(text, diagnostic.from);
    SpellError {
        word: text
            .get(diagnostic.from..diagnostic.to)
            .unwrap_or_default()
            .to_string(),
        line,
        column,
        from: diagnostic.from,
        to: diagnostic.to,
        context: line_context(text, diagnostic.from, diagnostic.to),
        suggestions,
    }
}

async fn lint_file<D: DictionaryBoundary>(
    checker: &SpellChecker<D>,
    file_path: &Path,
    config: &Config,
) -> Result<(String, Vec<Diagnostic>)> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

    let document = Document::parse_markdown(content);
    let diagnostics = checker.lint(&document, &config.autocorrect_values()).await;
    debug!("{}: {} misspelling(s)", file_path.display(), diagnostics.len());

    Ok((document.text, diagnostics))
}

/// Check one file. With `suggest`, suggestions are fetched for every
/// misspelled word.
pub async fn check_file<D: DictionaryBoundary>(
    checker: &SpellChecker<D>,
    file_path: &Path,
    config: &Config,
    suggest: bool,
) -> Result<CheckResult> {
    let (text, diagnostics) = lint_file(checker, file_path, config).await?;

    let mut errors = Vec::with_capacity(diagnostics.len());
    for diagnostic in &diagnostics {
        let suggestions = match (suggest, diagnostic.word()) {
            (true, Some(word)) => checker.resolver().suggestions_for(word).await,
            _ => Vec::new(),
        };
        errors.push(to_error(&text, diagnostic, suggestions));
    }

    Ok(CheckResult {
        error_count: errors.len(),
        fixed_count: 0,
        errors,
    })
}

/// Run every diagnostic's remediation through the presenter built from the
/// file's text, last to first so earlier offsets stay valid, then write the
/// file back if it changed.
pub async fn fix_file<D, P, F>(
    checker: &SpellChecker<D>,
    file_path: &Path,
    config: &Config,
    make_presenter: F,
) -> Result<CheckResult>
where
    D: DictionaryBoundary,
    P: ChoicePresenter,
    F: FnOnce(&str) -> P,
{
    let (original, diagnostics) = lint_file(checker, file_path, config).await?;
    let mut presenter = make_presenter(&original);
    let mut content = original.clone();
    let mut fixed_count = 0;

    for diagnostic in diagnostics.iter().rev() {
        let Some(action) = &diagnostic.action else {
            continue;
        };
        match action
            .run(checker.resolver(), &mut presenter, &mut content)
            .await
        {
            Ok(RemediationOutcome::Replaced { .. }) => fixed_count += 1,
            Ok(RemediationOutcome::AddedWord(word)) => debug!("Added '{}' to dictionary", word),
            Ok(RemediationOutcome::NoOp) => {}
            Err(e) => warn!("Could not apply fix: {}", e),
        }
    }

    if content != original {
        fs::write(file_path, &content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
    }

    Ok(CheckResult {
        error_count: 0,
        fixed_count,
        errors: Vec::new(),
    })
}

/// Picks the top suggestion whenever there is one.
pub struct TopSuggestion;

impl ChoicePresenter for TopSuggestion {
    fn choose(&mut self, _anchor: usize, menu: &RemediationMenu) -> Option<usize> {
        menu.entries
            .iter()
            .find(|e| matches!(e.kind, MenuEntryKind::Replace(_)))
            .map(|e| e.id)
    }
}

/// Asks the user on the terminal.
pub struct TerminalPresenter {
    file_name: String,
    text: String,
    colored: bool,
}

impl TerminalPresenter {
    /// `text` is the file content the menus are anchored in.
    pub fn new(file_path: &Path, text: &str, colored: bool) -> Self {
        Self {
            file_name: file_path.display().to_string(),
            text: text.to_string(),
            colored,
        }
    }
}

impl ChoicePresenter for TerminalPresenter {
    fn choose(&mut self, anchor: usize, menu: &RemediationMenu) -> Option<usize> {
        let (line, column) = locate(&self.text, anchor);
        let context = line_context(&self.text, anchor, anchor + menu.word.len());

        if self.colored {
            eprintln!(
                "\n{} {}:{}:{}",
                "Misspelling found:".yellow().bold(),
                self.file_name,
                line.to_string().blue(),
                column.to_string().blue()
            );
            eprintln!("  {}", context.replace(&menu.word, &menu.word.red().bold().to_string()));
        } else {
            eprintln!("\nMisspelling found: {}:{}:{}", self.file_name, line, column);
            eprintln!("  {}", context);
        }

        let labels: Vec<&str> = menu.entries.iter().map(|e| e.label.as_str()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Fix '{}' (Esc to skip)", menu.word))
            .items(&labels)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(index)) => menu.entries.get(index).map(|e| e.id),
            Ok(None) => None,
            Err(e) => {
                warn!("Prompt failed: {}", e);
                None
            }
        }
    }
}
