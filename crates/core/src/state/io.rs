//! # IO Utilities
//!
//! File system operations for the `.mosaic` runtime directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Get the runtime directory path (.mosaic)
///
/// This is the storage location for all run artifacts.
pub fn get_runtime_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("MOSAIC_RUNTIME_PATH") {
        return PathBuf::from(path);
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".mosaic")
}

/// Write a file under the given root, creating parent directories
pub async fn write_file(
    root: &Path,
    relative_path: impl AsRef<Path>,
    content: &str,
) -> Result<PathBuf> {
    let path = root.join(relative_path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {parent:?}"))?;
    }

    fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write file: {path:?}"))?;

    Ok(path)
}

/// List files in a subdirectory of the given root
pub async fn list_files(root: &Path, subdir: &str) -> Result<Vec<String>> {
    let dir = root.join(subdir);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = fs::read_dir(&dir)
        .await
        .with_context(|| format!("Failed to read directory: {dir:?}"))?;

    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if let Ok(file_type) = entry.file_type().await {
            if file_type.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    files.push(name);
                }
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runtime_path() {
        if std::env::var("MOSAIC_RUNTIME_PATH").is_err() {
            assert!(get_runtime_path().ends_with(".mosaic"));
        }
    }

    #[tokio::test]
    async fn test_write_and_list() {
        let root = std::env::temp_dir().join("mosaic_io_test");
        let _ = fs::remove_dir_all(&root).await;

        write_file(&root, "runs/a.json", "{}").await.unwrap();
        write_file(&root, "runs/b.json", "{}").await.unwrap();

        let mut files = list_files(&root, "runs").await.unwrap();
        files.sort();
        assert_eq!(files, vec!["a.json".to_string(), "b.json".to_string()]);

        assert!(list_files(&root, "missing").await.unwrap().is_empty());

        let _ = fs::remove_dir_all(&root).await;
    }
}
