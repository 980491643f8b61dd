//! Document store and lexical retrieval.
//!
//! # Responsibilities
//! - Hold the document corpus
//! - Score documents against a query
//! - Return the top-k matches
//!
//! # Design Decisions
//! - Scoring is deterministic: fraction of distinct query terms present
//!   in the document, ties broken by insertion order
//! - Tokenization lowercases and splits on non-alphanumeric characters
//! - Zero-score documents are never returned

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A document in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: String,
    /// Document text.
    pub text: String,
    /// Associated metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A document with its relevance score for a query.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Retrieval failure.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("failed to read corpus: {0}")]
    CorpusIo(#[from] std::io::Error),

    #[error("failed to parse corpus: {0}")]
    CorpusParse(#[from] toml::de::Error),
}

/// Trait for pluggable retrieval over a document store.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `top_k` documents relevant to `query`, best first.
    async fn retrieve(&self, query: &str, top_k: usize)
        -> Result<Vec<ScoredDocument>, RetrievalError>;
}

/// TOML corpus file shape: a list of `[[documents]]` tables.
#[derive(Debug, Deserialize)]
struct Corpus {
    #[serde(default)]
    documents: Vec<Document>,
}

/// In-memory document store with lexical term-overlap scoring.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load a store from a TOML corpus file.
    pub fn from_toml_file(path: &Path) -> Result<Self, RetrievalError> {
        let content = std::fs::read_to_string(path)?;
        let corpus: Corpus = toml::from_str(&content)?;

        Ok(Self::with_documents(corpus.documents))
    }

    /// Number of documents in the store.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn score(query_terms: &HashSet<String>, text: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }

        let doc_terms: HashSet<String> = tokenize(text).collect();
        let matched = query_terms.iter().filter(|t| doc_terms.contains(*t)).count();

        matched as f32 / query_terms.len() as f32
    }
}

#[async_trait::async_trait]
impl Retriever for MemoryStore {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, RetrievalError> {
        let query_terms: HashSet<String> = tokenize(query).collect();

        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument {
                score: Self::score(&query_terms, &doc.text),
                document: doc.clone(),
            })
            .filter(|s| s.score > 0.0)
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
