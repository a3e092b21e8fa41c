use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::traits::DocumentStore;
use crate::error::{DocdeskError, Result};
use crate::models::DocumentRecord;

#[derive(Default)]
pub struct MemoryDocumentStore {
    records: RwLock<Vec<DocumentRecord>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, record: &DocumentRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(DocdeskError::Storage(format!(
                "Document {} already exists",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.records.read().await.clone())
    }
}
