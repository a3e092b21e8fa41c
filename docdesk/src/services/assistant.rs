use std::sync::Arc;

use tracing::error;

use crate::db::DocumentStore;
use crate::error::{DocdeskError, Result};
use crate::models::DocumentRecord;

pub const GREETING: &str =
    "Hello! I'm here to help you find documents and information. What are you looking for?";

pub const HELP: &str = "I can help you with:\n\
• Finding documents by keywords\n\
• Searching by department\n\
• Locating specific document types\n\
• Getting document summaries\n\n\
Just describe what you're looking for!";

pub const NO_DEPARTMENT_MATCH: &str = "I couldn't find any documents matching your query. Try searching with different keywords or check with your department manager.";

pub const NO_MATCH: &str = "I understand you're looking for information, but I couldn't find specific documents matching your query. Could you try being more specific about the department, document type, or keywords?";

pub const APOLOGY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

const DEPARTMENT_KEYWORDS: [&str; 7] = [
    "department",
    "engineering",
    "operations",
    "hr",
    "compliance",
    "procurement",
    "safety",
];

const DEPARTMENT_LISTING: usize = 5;
const GENERAL_LISTING: usize = 3;

/// Rule-based chat assistant over the document store.
///
/// Rules are checked in order on the lower-cased message and use plain
/// substring matching, so "hi" also fires inside longer words.
pub struct Assistant {
    store: Arc<dyn DocumentStore>,
    search_limit: usize,
}

impl Assistant {
    pub fn new(store: Arc<dyn DocumentStore>, search_limit: usize) -> Self {
        Self {
            store,
            search_limit,
        }
    }

    pub async fn respond(&self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(DocdeskError::Validation("Message is empty".to_string()));
        }
        let lower = message.to_lowercase();

        if lower.contains("hello") || lower.contains("hi") {
            return Ok(GREETING.to_string());
        }

        if lower.contains("help") {
            return Ok(HELP.to_string());
        }

        if DEPARTMENT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            let documents = self.search(message).await;
            if documents.is_empty() {
                return Ok(NO_DEPARTMENT_MATCH.to_string());
            }
            return Ok(department_listing(&documents));
        }

        let documents = self.search(message).await;
        if documents.is_empty() {
            return Ok(NO_MATCH.to_string());
        }
        Ok(general_listing(&documents))
    }

    /// Like [`Assistant::respond`], but any error becomes an apology.
    pub async fn reply(&self, message: &str) -> String {
        match self.respond(message).await {
            Ok(response) => response,
            Err(e) => {
                error!("Assistant failed to answer: {}", e);
                APOLOGY.to_string()
            }
        }
    }

    /// A failed search is logged and answered as if nothing matched.
    async fn search(&self, message: &str) -> Vec<DocumentRecord> {
        match self.store.search(message, self.search_limit).await {
            Ok(documents) => documents,
            Err(e) => {
                error!("Error searching documents: {}", e);
                Vec::new()
            }
        }
    }
}

fn department_listing(documents: &[DocumentRecord]) -> String {
    let mut response = format!(
        "I found {} document(s) related to your query:\n\n",
        documents.len()
    );
    for (idx, doc) in documents.iter().take(DEPARTMENT_LISTING).enumerate() {
        response.push_str(&format!(
            "{}. **{}**\n   Department: {}\n   Status: {}\n\n",
            idx + 1,
            doc.title,
            doc.department,
            doc.status
        ));
    }
    response
}

fn general_listing(documents: &[DocumentRecord]) -> String {
    let mut response = format!(
        "I found {} document(s) that might be relevant:\n\n",
        documents.len()
    );
    for (idx, doc) in documents.iter().take(GENERAL_LISTING).enumerate() {
        response.push_str(&format!(
            "{}. **{}**\n   Department: {}\n   Priority: Level {}\n\n",
            idx + 1,
            doc.title,
            doc.department,
            doc.priority
        ));
    }
    response
}
