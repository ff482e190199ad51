use crate::{CheckResult, SpellError};
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub from: usize,
    pub to: usize,
    pub word: String,
    pub suggestions: Vec<String>,
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub files_checked: usize,
    pub total_errors: usize,
    pub errors: Vec<JsonError>,
}

impl JsonOutput {
    pub fn from_results(results: &[(PathBuf, CheckResult)]) -> Self {
        let errors = results
            .iter()
            .flat_map(|(path, result)| {
                result.errors.iter().map(move |e| JsonError {
                    file: path.display().to_string(),
                    line: e.line,
                    column: e.column,
                    from: e.from,
                    to: e.to,
                    word: e.word.clone(),
                    suggestions: e.suggestions.clone(),
                    context: e.context.clone(),
                })
            })
            .collect();

        Self {
            files_checked: results.len(),
            total_errors: results.iter().map(|(_, r)| r.error_count).sum(),
            errors,
        }
    }
}

pub fn print_json_report(results: &[(PathBuf, CheckResult)]) -> Result<()> {
    let output = JsonOutput::from_results(results);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_text_errors(file_path: &Path, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for error in &result.errors {
        print_error(error, colored_output);
    }
}

fn print_error(error: &SpellError, colored_output: bool) {
    let line_info = format!("{}:{}", error.line, error.column);

    if colored_output {
        println!(
            "  {} {} {}",
            line_info.blue().bold(),
            error.word.red().bold(),
            highlight(&error.context, &error.word).dimmed()
        );

        if !error.suggestions.is_empty() {
            let suggestions = error
                .suggestions
                .iter()
                .map(|s| s.green().to_string())
                .collect::<Vec<_>>()
                .join(&", ".dimmed().to_string());
            println!("    {} {}", "→".dimmed(), suggestions);
        }
    } else {
        println!("  {} {} {}", line_info, error.word, error.context);

        if !error.suggestions.is_empty() {
            println!("    → {}", error.suggestions.join(", "));
        }
    }
}

fn highlight(context: &str, word: &str) -> String {
    context.replace(word, &word.red().bold().to_string())
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn check_summary(total_errors: usize, files_checked: usize, colored: bool) -> String {
    if total_errors == 0 {
        let message = "✓ No spelling errors found!";
        return if colored {
            message.green().bold().to_string()
        } else {
            message.to_string()
        };
    }

    let files = plural(files_checked, "file", "files");
    let errors = plural(total_errors, "error", "errors");
    if colored {
        format!(
            "{} {} {} found in {} {}",
            "✗".red().bold(),
            total_errors.to_string().red().bold(),
            errors,
            files_checked,
            files
        )
    } else {
        format!("✗ {} {} found in {} {}", total_errors, errors, files_checked, files)
    }
}

pub fn fix_summary(total_fixed: usize, files_checked: usize, colored: bool) -> String {
    if total_fixed == 0 {
        let message = "No corrections applied";
        return if colored {
            message.green().bold().to_string()
        } else {
            message.to_string()
        };
    }

    let files = plural(files_checked, "file", "files");
    let fixes = plural(total_fixed, "correction", "corrections");
    if colored {
        format!(
            "{} {} {} applied to {} {}",
            "✓".green().bold(),
            total_fixed.to_string().green().bold(),
            fixes,
            files_checked,
            files
        )
    } else {
        format!("✓ {} {} applied to {} {}", total_fixed, fixes, files_checked, files)
    }
}
