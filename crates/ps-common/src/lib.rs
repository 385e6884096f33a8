//! Principal Service common runtime pieces.
//!
//! - `logging` - tracing subscriber setup shared by every binary
//! - `shutdown` - graceful shutdown signal for servers

pub mod logging;
pub mod shutdown;

pub use shutdown::shutdown_signal;
