//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Route matched → upstream name identified
//!     → target.rs (resolve name to address)
//!     → client.rs (forward request, enforce deadlines)
//!     → Return relayed response or typed error
//! ```
//!
//! # Design Decisions
//! - One target per route; no load balancing or failover
//! - Registry is immutable after startup
//! - Failure classification happens at the client, not the handler

pub mod client;
pub mod target;

pub use client::ProxyClient;
pub use target::{Upstream, UpstreamManager};
