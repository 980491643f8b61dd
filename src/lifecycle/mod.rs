//! Lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! OS signal (Ctrl+C / SIGTERM)
//!     → signals.rs (await)
//!     → shutdown.rs (broadcast to subscribers)
//!     → servers drain in-flight requests and exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
