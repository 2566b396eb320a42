use recital_core::{CoreError, CoreResult};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

/// Handle to one flat file owned by a single resource.
///
/// Each call opens, reads or writes, and closes the file. Writes replace the
/// whole file in a single `write`; nothing is locked, so concurrent writers
/// race and the last one wins.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> CoreResult<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.storage_error("read", e))
    }

    pub async fn replace(&self, contents: &str) -> CoreResult<()> {
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| self.storage_error("write", e))
    }

    pub async fn read_json<T: DeserializeOwned>(&self) -> CoreResult<T> {
        let raw = self.read().await?;
        serde_json::from_str(&raw).map_err(|e| self.storage_error("parse", e))
    }

    /// Pretty-printed with two-space indentation, as hand-edited files are.
    pub async fn replace_json<T: Serialize + ?Sized>(&self, value: &T) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(|e| self.storage_error("serialize", e))?;
        self.replace(&json).await
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> CoreError {
        CoreError::Storage(format!("{} {}: {}", action, self.path.display(), err))
    }
}
