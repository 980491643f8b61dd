//! Retrieval subsystem.
//!
//! # Data Flow
//! ```text
//! Query string
//!     → engine.rs (QueryEngine::answer)
//!     → store.rs (Retriever::retrieve, top-k scored documents)
//!     → compose response from passages
//! ```
//!
//! # Design Decisions
//! - The `Retriever` trait is the pluggability seam; the in-memory
//!   lexical store is the default implementation
//! - No embedding or model calls: retrieval is deterministic

pub mod engine;
pub mod store;

pub use engine::QueryEngine;
pub use store::{Document, MemoryStore, RetrievalError, Retriever, ScoredDocument};
