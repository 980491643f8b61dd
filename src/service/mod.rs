//! User service subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → server.rs (route to handler)
//!     → /              fixed health payload
//!     → /user/info     fixed user payload
//!     → /genai/query   validate → QueryEngine::answer → JSON response
//! ```

pub mod server;

pub use server::{ServiceServer, ServiceState};
