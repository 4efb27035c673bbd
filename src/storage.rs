//! Startup inputs: the seed plan and the catalog file
//!
//! Both are read once. Nothing is written back; the plan lives only for the
//! session that loaded it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::plan::{Task, default_tasks, parse_task_list};

/// Source of the initial task list
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Read the seed plan in the JSON ingestion shape
    ///
    /// A missing file yields the built-in default plan.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.file_path.exists() {
            tracing::info!(
                path = %self.file_path.display(),
                "plan file not found, using default plan"
            );
            return Ok(default_tasks());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let tasks = parse_task_list(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(tasks)
    }
}

/// Load the module/phase catalog, or the built-in GAqP catalog when no path is given
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::gaqp());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_toml_str(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    Ok(catalog)
}
