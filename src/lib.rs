pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod parser;

#[cfg(test)]
mod test_utils;

pub use checker::diagnostic::Diagnostic;
pub use checker::SpellChecker;
pub use config::Config;
pub use dict::{DictionaryBoundary, DictionaryError, DictionaryEvent};
pub use parser::Document;

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub fixed_count: usize,
    pub errors: Vec<SpellError>,
}

#[derive(Debug, Clone)]
pub struct SpellError {
    pub word: String,
    pub line: usize,
    pub column: usize,
    pub from: usize,
    pub to: usize,
    pub context: String,
    pub suggestions: Vec<String>,
}
