//! Query answering over a pluggable retriever.
//!
//! # Responsibilities
//! - Run the retrieval step for a query
//! - Compose a response string from the retrieved passages
//!
//! # Design Decisions
//! - The retriever is a boxed trait object so the store can be swapped
//!   without touching the engine or the HTTP surface
//! - The composed response is always non-empty: a fixed fallback covers
//!   the no-match case

use crate::retrieval::store::{RetrievalError, Retriever};

/// Response returned when retrieval finds nothing relevant.
const NO_MATCH_RESPONSE: &str = "No relevant documents found for this query.";

/// Answers queries by retrieving passages and composing a response.
pub struct QueryEngine {
    retriever: Box<dyn Retriever>,
    top_k: usize,
}

impl QueryEngine {
    /// Create an engine over the given retriever.
    pub fn new(retriever: Box<dyn Retriever>, top_k: usize) -> Self {
        Self { retriever, top_k }
    }

    /// Answer `query` from the retrieved passages.
    ///
    /// The returned string is never empty.
    pub async fn answer(&self, query: &str) -> Result<String, RetrievalError> {
        let retrieved = self.retriever.retrieve(query, self.top_k).await?;

        if retrieved.is_empty() {
            tracing::debug!(query = %query, "No documents matched");
            return Ok(NO_MATCH_RESPONSE.to_string());
        }

        tracing::debug!(
            query = %query,
            matches = retrieved.len(),
            best_score = retrieved[0].score as f64,
            "Composing response from retrieved passages"
        );

        let response = retrieved
            .iter()
            .map(|scored| scored.document.text.trim())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(response)
    }
}
