use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use markspell::checker::SpellChecker;
use markspell::cli::host::{self, TerminalPresenter, TopSuggestion};
use markspell::cli::output::{self, OutputFormat};
use markspell::dict::local::{LocalDictionary, WordSet};
use markspell::{Config, DictionaryBoundary};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "markspell")]
#[command(version, about = "Spellcheck markdown documents", long_about = None)]
struct Cli {
    /// Markdown files or directories to check
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Fix misspellings in place (auto-apply top suggestion)
    #[arg(short, long)]
    fix: bool,

    /// Choose each correction from a menu
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Show suggestions next to each misspelling
    #[arg(short, long)]
    suggest: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Personal dictionary file
    #[arg(long, env = "MARKSPELL_PERSONAL_DICT")]
    personal_dict: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Add words to the personal dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Compile a word list (one word per line) into a dictionary
    Build {
        wordlist: PathBuf,
        /// Language code the dictionary is installed under
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show where dictionaries are read from
    Path,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "markspell", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.language.clone(), cli.personal_dict.clone())?;
    debug!("Using language {}", config.language);

    if let Some(command) = cli.command {
        return handle_command(command, &config).await;
    }

    if cli.paths.is_empty() {
        bail!("No files specified. Use --help for usage information.");
    }
    if cli.interactive && !console::user_attended() {
        bail!("Interactive mode needs a terminal");
    }

    let files = host::collect_files(&cli.paths);
    let checker = SpellChecker::new(LocalDictionary::from_config(&config)?);

    let mut results = Vec::with_capacity(files.len());
    for file_path in &files {
        let result = if cli.interactive {
            host::fix_file(&checker, file_path, &config, |text| {
                TerminalPresenter::new(file_path, text, colored)
            })
            .await?
        } else if cli.fix {
            host::fix_file(&checker, file_path, &config, |_| TopSuggestion).await?
        } else {
            host::check_file(&checker, file_path, &config, cli.suggest).await?
        };

        if cli.format == OutputFormat::Text {
            output::print_text_errors(file_path, &result, colored);
        }
        results.push((file_path.clone(), result));
    }

    let total_errors: usize = results.iter().map(|(_, r)| r.error_count).sum();
    let total_fixed: usize = results.iter().map(|(_, r)| r.fixed_count).sum();

    match cli.format {
        OutputFormat::Json => output::print_json_report(&results)?,
        OutputFormat::Text if cli.fix => {
            println!("\n{}", output::fix_summary(total_fixed, files.len(), colored))
        }
        OutputFormat::Text => {
            println!("\n{}", output::check_summary(total_errors, files.len(), colored))
        }
    }

    if total_errors > 0 && !cli.no_fail && !cli.fix {
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::Add { words } => {
                let dictionary = LocalDictionary::from_config(config)?;
                dictionary.add_word(&words).await?;
                info!("Added {} word(s)", words.len());
                println!("Added {} word(s) to the personal dictionary", words.len());
            }
            DictCommands::Build { wordlist, language } => {
                let language = language.unwrap_or_else(|| config.language.clone());
                let contents = fs::read_to_string(&wordlist)
                    .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;
                let words: Vec<String> = contents
                    .lines()
                    .map(|line| line.trim().to_lowercase())
                    .filter(|word| !word.is_empty() && !word.starts_with('#'))
                    .collect();

                let output_path = WordSet::dictionary_path(&language)
                    .context("Could not determine the data directory")?;
                let count = WordSet::build_from_words(&words, &output_path)?;
                println!(
                    "Built {} dictionary with {} words at {}",
                    language,
                    count,
                    output_path.display()
                );
            }
            DictCommands::Path => {
                match WordSet::dictionary_path(&config.language) {
                    Some(path) => println!("dictionary: {}", path.display()),
                    None => println!("dictionary: (built-in)"),
                }
                if let Some(path) = &config.personal_dictionary {
                    println!("personal: {}", path.display());
                }
            }
        },
    }
    Ok(())
}
