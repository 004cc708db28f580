use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source SQL dialect identifier
    pub source_dialect: String,

    /// Target SQL dialect identifier
    pub target_dialect: String,

    /// Path to the macro map YAML file. When set, input files are
    /// pre-processed by replacing macros with their mapped values and the
    /// substitution is reverted on translated output. When absent, files
    /// are submitted untouched.
    #[serde(default)]
    pub macros_path: Option<String>,

    /// Translation engine config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation engine selector
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationEngineKind {
    // @engine: Hosted translation service over HTTP
    #[default]
    Remote,
    // @engine: In-process mock, for tests and dry runs
    Mock,
}

impl TranslationEngineKind {
    // @returns: Capitalized engine name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Remote => "Remote",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase engine identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Remote => "remote".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TranslationEngineKind
impl std::fmt::Display for TranslationEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationEngineKind
impl std::str::FromStr for TranslationEngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid engine type: {}", s)),
        }
    }
}

/// Translation engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Which engine client to use
    #[serde(default)]
    pub engine: TranslationEngineKind,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Maximum number of files translated concurrently
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            engine: TranslationEngineKind::default(),
            endpoint: default_endpoint(),
            api_key: String::new(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_source_dialect() -> String {
    "teradata".to_string()
}

fn default_target_dialect() -> String {
    "bigquery".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_dialect.trim().is_empty() {
            return Err(anyhow!("Source dialect must not be empty"));
        }
        if self.target_dialect.trim().is_empty() {
            return Err(anyhow!("Target dialect must not be empty"));
        }
        if self.source_dialect.eq_ignore_ascii_case(&self.target_dialect) {
            return Err(anyhow!(
                "Source and target dialect are both '{}'; nothing to translate",
                self.source_dialect
            ));
        }

        // The mock engine needs neither endpoint nor key
        if self.translation.engine == TranslationEngineKind::Remote {
            if self.translation.endpoint.trim().is_empty() {
                return Err(anyhow!("Translation endpoint is required for the remote engine"));
            }
            if self.translation.api_key.is_empty() {
                return Err(anyhow!("Translation API key is required for the remote engine"));
            }
        }

        if self.translation.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_dialect: default_source_dialect(),
            target_dialect: default_target_dialect(),
            macros_path: None,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
