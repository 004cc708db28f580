/*!
 * Common test utilities for the sqlporter test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use sqlporter::app_config::{Config, TranslationEngineKind};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The macro map used across the suite: a wildcard set layered with a
/// file-specific set
pub fn sample_macro_yaml() -> &'static str {
    r#"
macros:
  '*.sql':
    '${MACRO_1}': 'my_table'
    '%MACRO_2%': 'macro_replacement_2'
  '2.sql':
    'templated_column': 'replacing_column'
"#
}

/// A config wired to the mock engine, suitable for pipeline tests
pub fn mock_engine_config() -> Config {
    let mut config = Config::default();
    config.translation.engine = TranslationEngineKind::Mock;
    config
}
