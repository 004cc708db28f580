/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use sqlporter::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    // Create a temporary test file
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "query.sql", "SELECT 1")?;

    // Test that file_exists works correctly
    assert!(FileManager::file_exists(test_file.to_str().unwrap()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.sql"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    // Create a temporary directory for testing
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("test_subdir");

    // Ensure the subdirectory exists (should create it)
    FileManager::ensure_dir(test_subdir.to_str().unwrap())?;

    // Verify the directory was created
    assert!(test_subdir.exists());
    assert!(test_subdir.is_dir());

    Ok(())
}

/// Test that macro exclusion flags zip, csv and json regardless of case
#[test]
fn test_is_macro_excluded_withExcludedExtensions_shouldReturnTrue() {
    assert!(FileManager::is_macro_excluded("archive.zip"));
    assert!(FileManager::is_macro_excluded("rows.csv"));
    assert!(FileManager::is_macro_excluded("mapping.JSON"));
}

/// Test that macro exclusion leaves query files alone
#[test]
fn test_is_macro_excluded_withSqlFile_shouldReturnFalse() {
    assert!(!FileManager::is_macro_excluded("1.sql"));
    assert!(!FileManager::is_macro_excluded("script.bteq"));
    assert!(!FileManager::is_macro_excluded("no_extension"));
}

/// Test that input discovery walks subdirectories and keeps a stable order
#[test]
fn test_find_input_files_withNestedTree_shouldReturnSortedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let base = temp_dir.path().to_path_buf();
    common::create_test_file(&base, "b.sql", "SELECT 2")?;
    common::create_test_file(&base, "a.sql", "SELECT 1")?;
    common::create_test_file(&base, "nested/c.sql", "SELECT 3")?;

    let files = FileManager::find_input_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|p| FileManager::relative_to(temp_dir.path(), p).unwrap())
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.sql", "b.sql", "nested/c.sql"]);

    Ok(())
}

/// Test that hidden staging directories are not treated as batch input
#[test]
fn test_find_input_files_withHiddenDir_shouldSkipIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let base = temp_dir.path().to_path_buf();
    common::create_test_file(&base, "a.sql", "SELECT 1")?;
    common::create_test_file(&base, ".tmp_processed/a.sql", "SELECT 1")?;

    let files = FileManager::find_input_files(temp_dir.path())?;
    assert_eq!(files.len(), 1);

    Ok(())
}

/// Test that relative_to strips the base prefix
#[test]
fn test_relative_to_withNestedFile_shouldStripBase() -> Result<()> {
    let relative = FileManager::relative_to("/data/input", "/data/input/sub/q.sql")?;
    assert_eq!(relative, Path::new("sub/q.sql"));
    Ok(())
}

/// Test that relative_to rejects files outside the base
#[test]
fn test_relative_to_withFileOutsideBase_shouldFail() {
    assert!(FileManager::relative_to("/data/input", "/elsewhere/q.sql").is_err());
}

/// Test that read_to_string returns file content correctly
#[test]
fn test_read_to_string_withValidFile_shouldReturnContent() -> Result<()> {
    // Create a temporary test file
    let temp_dir = common::create_temp_dir()?;
    let content = "SELECT * FROM t";
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "q.sql", content)?;

    // Test read_to_string
    let read_content = FileManager::read_to_string(test_file.to_str().unwrap())?;
    assert_eq!(read_content, content);

    Ok(())
}

/// Test that write_to_file creates parent directories as needed
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = temp_dir.path().join("out/sub/q.sql");
    let content = "SELECT 1";

    FileManager::write_to_file(test_file.to_str().unwrap(), content)?;

    assert!(test_file.exists());
    let read_content = fs::read_to_string(&test_file)?;
    assert_eq!(read_content, content);

    Ok(())
}

/// Test that copy_file copies file correctly
#[test]
fn test_copy_file_withValidInput_shouldCopyFileCorrectly() -> Result<()> {
    // Create a temporary directory and test file
    let temp_dir = common::create_temp_dir()?;
    let content = "id,name\n1,a";
    let source_file = common::create_test_file(&temp_dir.path().to_path_buf(), "rows.csv", content)?;
    let dest_file = temp_dir.path().join("out/rows.csv");

    // Test copy_file
    FileManager::copy_file(source_file.to_str().unwrap(), dest_file.to_str().unwrap())?;

    // Verify destination file was created with correct content
    assert!(dest_file.exists());
    let dest_content = fs::read_to_string(&dest_file)?;
    assert_eq!(dest_content, content);

    Ok(())
}

/// Test that append_to_log_file appends timestamped lines
#[test]
fn test_append_to_log_file_withTwoWrites_shouldKeepBothLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("batch.log");

    FileManager::append_to_log_file(&log_path, "first")?;
    FileManager::append_to_log_file(&log_path, "second")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("first"));
    assert!(lines[1].ends_with("second"));

    Ok(())
}
