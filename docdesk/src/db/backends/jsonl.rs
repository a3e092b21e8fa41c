use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::db::traits::DocumentStore;
use crate::error::{DocdeskError, Result};
use crate::models::DocumentRecord;

/// One JSON document record per line, appended on insert.
///
/// A missing file reads as an empty store. Writes within one process are
/// serialized; concurrent writers in separate processes are not coordinated.
pub struct JsonlDocumentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<DocumentRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| {
                    DocdeskError::Storage(format!(
                        "Corrupt record at {}:{}: {e}",
                        self.path.display(),
                        idx + 1
                    ))
                })
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for JsonlDocumentStore {
    async fn insert(&self, record: &DocumentRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if self.read_all().await?.iter().any(|r| r.id == record.id) {
            return Err(DocdeskError::Storage(format!(
                "Document {} already exists",
                record.id
            )));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        Ok(self.read_all().await?.into_iter().find(|r| r.id == id))
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        self.read_all().await
    }
}
