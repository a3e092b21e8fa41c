use async_trait::async_trait;

use crate::error::Result;
use crate::models::DocumentRecord;

/// Persistence for uploaded document records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, record: &DocumentRecord) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<DocumentRecord>>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<DocumentRecord>>;

    /// Records whose title, description or department contains `query`
    /// (case-insensitive), in insertion order, at most `limit` of them.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<DocumentRecord>> {
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .filter(|record| record.matches(query))
            .take(limit)
            .collect())
    }
}
