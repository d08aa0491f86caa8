//! # Run Store
//!
//! Persists each completed workflow result as a timestamp-named JSON
//! file under the runtime directory. Files are pretty-printed and carry
//! no schema version.

use super::io;
use crate::workflow::WorkflowResult;
use anyhow::{Context, Result};
use std::path::PathBuf;

const RUNS_SUBDIR: &str = "runs";

/// JSON file store for workflow results
pub struct RunStore {
    root: PathBuf,
}

impl Default for RunStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStore {
    /// Store rooted at the default runtime directory
    pub fn new() -> Self {
        Self {
            root: io::get_runtime_path(),
        }
    }

    /// Store rooted at a specific directory (useful for testing)
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Serialize one run to `runs/<scenario>_<timestamp>.json` and
    /// return the written path.
    pub async fn save(&self, result: &WorkflowResult) -> Result<PathBuf> {
        let file_name = format!(
            "{}_{}.json",
            result.scenario.as_str(),
            result.started_at.format("%Y%m%d_%H%M%S"),
        );

        let content =
            serde_json::to_string_pretty(result).context("Failed to serialize run result")?;

        let path = io::write_file(&self.root, PathBuf::from(RUNS_SUBDIR).join(&file_name), &content)
            .await?;

        tracing::info!(path = %path.display(), "run result saved");
        Ok(path)
    }

    /// List saved run file names, newest last
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut files = io::list_files(&self.root, RUNS_SUBDIR).await?;
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MosaicConfig;
    use crate::gate::{DemoHandler, Gate};
    use crate::scenario::ScenarioId;
    use crate::workflow::MosaicCoordinator;
    use std::time::Duration;

    #[tokio::test]
    async fn test_save_and_reload_round_trip() {
        let dir = std::env::temp_dir().join("mosaic_run_store_test");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let gate = Gate::new(Box::new(DemoHandler), Duration::from_secs(5));
        let mut coordinator = MosaicCoordinator::new(MosaicConfig::default(), gate);
        let result = coordinator.run_project(ScenarioId::ProductLaunch).await;

        let store = RunStore::at(&dir);
        let path = store.save(&result).await.unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("product_launch_"));

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let reloaded: WorkflowResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded.scenario, ScenarioId::ProductLaunch);
        assert_eq!(reloaded.team_results.len(), result.team_results.len());
        assert_eq!(reloaded.success, result.success);

        let listing = store.list().await.unwrap();
        assert_eq!(listing.len(), 1);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
