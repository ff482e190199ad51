use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".markspell.toml";

/// An autocorrect rule: typing `key` produces `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub personal_dictionary: Option<PathBuf>,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    #[serde(default)]
    pub autocorrect: Vec<Replacement>,
}

fn default_language() -> String {
    "en_US".to_string()
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            personal_dictionary: None,
            max_suggestions: default_max_suggestions(),
            autocorrect: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(language: Option<String>, personal_dict: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(language) = language {
            config.language = language;
        }
        if let Some(dict) = personal_dict {
            config.personal_dictionary = Some(dict);
        }

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        if let Some(path) = &config.personal_dictionary {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create personal dictionary directory")?;
            }
            if !path.exists() {
                fs::write(path, "").context("Failed to create personal dictionary file")?;
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Values that differ from the defaults override
        if other.language != default_language() {
            self.language = other.language;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if other.max_suggestions != default_max_suggestions() {
            self.max_suggestions = other.max_suggestions;
        }
        if !other.autocorrect.is_empty() {
            self.autocorrect = other.autocorrect;
        }
        self
    }

    /// Replacement targets of the autocorrect rules. These are always
    /// treated as correctly spelled.
    pub fn autocorrect_values(&self) -> Vec<String> {
        self.autocorrect.iter().map(|r| r.value.clone()).collect()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "markspell").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "markspell").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "markspell").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
