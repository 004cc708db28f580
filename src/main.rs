// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TranslationEngineKind};
use app_controller::{Controller, PREPROCESS_STAGING_DIR};

mod app_config;
mod app_controller;
mod engines;
mod errors;
mod file_utils;
mod macros;

/// CLI Wrapper for TranslationEngineKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationEngine {
    Remote,
    Mock,
}

impl From<CliTranslationEngine> for TranslationEngineKind {
    fn from(cli_engine: CliTranslationEngine) -> Self {
        match cli_engine {
            CliTranslationEngine::Remote => TranslationEngineKind::Remote,
            CliTranslationEngine::Mock => TranslationEngineKind::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a batch of SQL files between dialects (default command)
    #[command(alias = "migrate")]
    Translate(TranslateArgs),

    /// Run only the macro preprocessing pass, without translating
    Preprocess(PreprocessArgs),

    /// Generate shell completions for sqlporter
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input directory holding the SQL batch
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Output directory for translated files (default: <input>/translated)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation engine to use
    #[arg(short, long, value_enum)]
    engine: Option<CliTranslationEngine>,

    /// Source SQL dialect (e.g. 'teradata', 'oracle')
    #[arg(short, long)]
    source_dialect: Option<String>,

    /// Target SQL dialect (e.g. 'bigquery')
    #[arg(short, long)]
    target_dialect: Option<String>,

    /// Path to the macro map yaml file. If specified, the program will
    /// pre-process all the input query files by replacing the macros with
    /// corresponding string values according to the macro map definition,
    /// and revert the substitutions for all the output query files in a
    /// post-processing step
    #[arg(short, long)]
    macros: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct PreprocessArgs {
    /// Input directory holding the SQL batch
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Staging directory for preprocessed files (default: <input>/.tmp_processed)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to the macro map yaml file
    #[arg(short, long)]
    macros: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// sqlporter - SQL dialect migration client
///
/// Batch-translates SQL files between dialects through a remote translation
/// engine, substituting configured macros before submission and restoring
/// them in the translated output.
#[derive(Parser, Debug)]
#[command(name = "sqlporter")]
#[command(version = "0.4.0")]
#[command(about = "SQL dialect migration client with macro-aware pre/post-processing")]
#[command(long_about = "sqlporter batch-translates SQL files between dialects through a remote
translation engine. Literal tokens declared in a macro map are replaced with
concrete values before submission and restored in the translated output.

EXAMPLES:
    sqlporter queries/                          # Translate using default config
    sqlporter -f queries/                       # Force overwrite existing files
    sqlporter -m macros.yaml queries/           # Use a specific macro map
    sqlporter -s teradata -t bigquery queries/  # Set dialects explicitly
    sqlporter preprocess -m macros.yaml queries/ # Macro pass only, no translation
    sqlporter completions bash > sqlporter.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

MACRO MAP:
    A yaml document mapping file glob patterns to macro definitions:

    macros:
      '*.sql':
        '${MACRO_1}': 'my_table'
      '2.sql':
        'templated_column': 'replacing_column'

    Every pattern matching a file contributes its macros; on key conflicts
    the later-declared pattern wins. Files with .zip, .csv or .json
    extensions are never macro processed.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input directory holding the SQL batch
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Output directory for translated files (default: <input>/translated)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation engine to use
    #[arg(short, long, value_enum)]
    engine: Option<CliTranslationEngine>,

    /// Source SQL dialect (e.g. 'teradata', 'oracle')
    #[arg(short, long)]
    source_dialect: Option<String>,

    /// Target SQL dialect (e.g. 'bigquery')
    #[arg(short, long)]
    target_dialect: Option<String>,

    /// Path to the macro map yaml file
    #[arg(short, long)]
    macros: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "sqlporter", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        Some(Commands::Preprocess(args)) => run_preprocess(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_dir = cli
                .input_dir
                .ok_or_else(|| anyhow!("INPUT_DIR is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_dir,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                engine: cli.engine,
                source_dialect: cli.source_dialect,
                target_dialect: cli.target_dialect,
                macros: cli.macros,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

/// Load the config file (creating a default one if absent) and apply CLI overrides
fn load_config(
    config_path: &str,
    log_level: &Option<CliLogLevel>,
    macros: &Option<String>,
) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config: Config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(macros_path) = macros {
        config.macros_path = Some(macros_path.clone());
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level, &options.macros)?;

    // Override config with CLI options if provided
    if let Some(engine) = &options.engine {
        config.translation.engine = engine.clone().into();
    }
    if let Some(source_dialect) = &options.source_dialect {
        config.source_dialect = source_dialect.clone();
    }
    if let Some(target_dialect) = &options.target_dialect {
        config.target_dialect = target_dialect.clone();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let output_dir = options
        .output_dir
        .unwrap_or_else(|| options.input_dir.join("translated"));

    let controller = Controller::with_config(config)?;
    controller
        .run(options.input_dir, output_dir, options.force_overwrite)
        .await?;
    Ok(())
}

async fn run_preprocess(options: PreprocessArgs) -> Result<()> {
    let config = load_config(&options.config_path, &options.log_level, &options.macros)?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let staging_dir = options
        .output_dir
        .unwrap_or_else(|| options.input_dir.join(PREPROCESS_STAGING_DIR));
    println!("Placing processed sql files in {}", staging_dir.display());

    let controller = Controller::with_config(config)?;
    controller
        .preprocess_only(options.input_dir, staging_dir)
        .await?;
    Ok(())
}

/// Map a config log level onto the log crate's filter
fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
