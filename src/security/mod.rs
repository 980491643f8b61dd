//! Security subsystem.
//!
//! # Design Decisions
//! - Rate limiting is the gateway's only admission control
//! - Per-key state is the single shared mutable resource in the request path

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimiter};
