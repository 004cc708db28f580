use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::engines::{self, TranslationEngine, TranslationRequest};
use crate::file_utils::FileManager;
use crate::macros::{
    FileReport, MacroProcessor, SubstitutionEngine, SubstitutionReport,
};

// @module: Application controller for the migration batch

/// Default staging directory for the preprocess-only mode
pub const PREPROCESS_STAGING_DIR: &str = ".tmp_processed";

/// File name of the JSON substitution report written next to the output tree
const REPORT_FILE_NAME: &str = "substitution_report.json";

/// File name of the append-only batch log
const BATCH_LOG_FILE_NAME: &str = "sqlporter.log";

/// Main application controller for SQL batch migration
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Macro processor built once from the macro map
    processor: MacroProcessor,

    // @field: Translation engine client
    engine: Arc<dyn TranslationEngine>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        // Fail fast on a broken macro map, before any file is touched
        let processor = match &config.macros_path {
            Some(path) => MacroProcessor::from_file(path)?,
            None => MacroProcessor::empty(),
        };
        let engine: Arc<dyn TranslationEngine> = Arc::from(engines::from_config(&config.translation)?);
        Ok(Self {
            config,
            processor,
            engine,
        })
    }

    /// Create a controller from explicit parts, bypassing config wiring.
    /// Used by tests to inject a mock engine or an in-memory macro map.
    pub fn with_parts(
        config: Config,
        processor: MacroProcessor,
        engine: Arc<dyn TranslationEngine>,
    ) -> Self {
        Self {
            config,
            processor,
            engine,
        }
    }

    /// The macro processor backing this controller
    pub fn processor(&self) -> &MacroProcessor {
        &self.processor
    }

    /// Run the full migration batch: forward macro pass, translation,
    /// reverse macro pass, for every file under `input_dir`
    pub async fn run(
        &self,
        input_dir: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<SubstitutionReport> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        FileManager::ensure_dir(&output_dir)?;

        // The output tree may live under the input tree (the CLI default);
        // never feed previous output back through the pipeline.
        let files: Vec<PathBuf> = FileManager::find_input_files(&input_dir)?
            .into_iter()
            .filter(|file| !file.starts_with(&output_dir))
            .collect();
        if files.is_empty() {
            warn!("No input files found under {:?}", input_dir);
            return Ok(SubstitutionReport::new());
        }
        info!(
            "Translating {} file(s) from {} to {}",
            files.len(),
            self.config.source_dialect,
            self.config.target_dialect
        );

        // Surface an unreachable engine early; the batch itself still
        // reports per-file errors if the service degrades mid-run.
        if let Err(e) = self.engine.test_connection().await {
            warn!("Engine connection test failed: {}", e);
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);
        progress_bar.set_message("Translating");

        // Limit in-flight engine requests
        let semaphore = Arc::new(Semaphore::new(self.config.translation.concurrent_requests));

        let results: Vec<Result<Option<FileReport>>> = stream::iter(files.iter())
            .map(|file| {
                let semaphore = semaphore.clone();
                let progress_bar = progress_bar.clone();
                let input_dir = input_dir.clone();
                let output_dir = output_dir.clone();
                let file = file.clone();

                async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|e| anyhow!("Semaphore closed: {}", e))?;
                    let result = self
                        .process_file(&file, &input_dir, &output_dir, force_overwrite)
                        .await;
                    progress_bar.inc(1);
                    result
                }
            })
            .buffer_unordered(self.config.translation.concurrent_requests)
            .collect()
            .await;

        progress_bar.finish_and_clear();

        let mut report = SubstitutionReport::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(Some(file_report)) => report.add_file(file_report),
                Ok(None) => {} // skipped (already translated, no force flag)
                Err(e) => failures.push(e),
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                log::error!("{:#}", failure);
            }
            return Err(anyhow!(
                "{} of {} file(s) failed to translate",
                failures.len(),
                files.len()
            ));
        }

        report.log_summary();
        self.write_report(&report, &output_dir)?;

        info!(
            "Batch completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        Ok(report)
    }

    /// Run only the forward macro pass, writing processed files into a
    /// staging directory. No translation engine involved; useful for
    /// debugging a macro map.
    pub async fn preprocess_only(
        &self,
        input_dir: PathBuf,
        staging_dir: PathBuf,
    ) -> Result<SubstitutionReport> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        FileManager::ensure_dir(&staging_dir)?;

        let files: Vec<PathBuf> = FileManager::find_input_files(&input_dir)?
            .into_iter()
            .filter(|file| !file.starts_with(&staging_dir))
            .collect();
        if files.is_empty() {
            warn!("No input files found under {:?}", input_dir);
            return Ok(SubstitutionReport::new());
        }

        let mut report = SubstitutionReport::new();
        for file in &files {
            let relative = FileManager::relative_to(&input_dir, file)?;
            let staged = staging_dir.join(&relative);
            let name = relative.to_string_lossy().to_string();

            if FileManager::is_macro_excluded(file) {
                debug!("{}: excluded extension, copying as-is", name);
                FileManager::copy_file(file, &staged)?;
                report.add_file(FileReport::new(name));
                continue;
            }

            let text = FileManager::read_to_string(file)?;
            let macros = self.processor.resolve(&name);
            let forward = SubstitutionEngine::expand(&text, &macros);

            let mut file_report = FileReport::new(&name);
            file_report.record_forward(&macros, &forward);
            FileManager::write_to_file(&staged, &forward.text)?;
            report.add_file(file_report);
        }

        report.log_summary();
        Ok(report)
    }

    /// Process one file end to end: forward pass, translate, reverse pass,
    /// write. Returns `None` when the file was skipped.
    async fn process_file(
        &self,
        file: &Path,
        input_dir: &Path,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<Option<FileReport>> {
        let relative = FileManager::relative_to(input_dir, file)?;
        let output_path = output_dir.join(&relative);
        let name = relative.to_string_lossy().to_string();

        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {}, translation already exists (use -f to force overwrite)",
                name
            );
            return Ok(None);
        }

        // Excluded extensions carry through the batch untouched
        if FileManager::is_macro_excluded(file) {
            debug!("{}: excluded extension, copying as-is", name);
            FileManager::copy_file(file, &output_path)?;
            return Ok(Some(FileReport::new(name)));
        }

        let text = FileManager::read_to_string(file)?;
        let mut file_report = FileReport::new(&name);

        // Forward pass: macro keys become concrete values
        let macros = self.processor.resolve(&name);
        let forward = SubstitutionEngine::expand(&text, &macros);
        file_report.record_forward(&macros, &forward);
        debug!(
            "{}: {} forward replacement(s) from {} macro(s)",
            name,
            forward.total(),
            macros.len()
        );

        // Hand the preprocessed text to the engine
        let response = self
            .engine
            .translate(TranslationRequest {
                file_name: name.clone(),
                text: forward.text,
                source_dialect: self.config.source_dialect.clone(),
                target_dialect: self.config.target_dialect.clone(),
            })
            .await
            .with_context(|| format!("Translation failed for {}", name))?;

        // Reverse pass: values become macro keys again
        let (reverse, collisions) = self.processor.unexpand(&name, &response.text);
        file_report.record_collisions(&collisions);
        file_report.record_reverse(&reverse);

        FileManager::write_to_file(&output_path, &reverse.text)?;
        Ok(Some(file_report))
    }

    /// Write the JSON report and append a one-line batch summary log
    fn write_report(&self, report: &SubstitutionReport, output_dir: &Path) -> Result<()> {
        let report_path = output_dir.join(REPORT_FILE_NAME);
        FileManager::write_to_file(&report_path, &report.to_json()?)?;
        debug!("Substitution report written to {:?}", report_path);

        FileManager::append_to_log_file(
            output_dir.join(BATCH_LOG_FILE_NAME),
            &format!(
                "{} file(s), {} forward / {} reverse replacement(s), {} collision(s)",
                report.files.len(),
                report.total_forward(),
                report.total_reverse(),
                report.collision_count()
            ),
        )
    }

    /// Format a duration as a human-readable string
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:01}s", seconds, duration.subsec_millis() / 100)
        }
    }
}
