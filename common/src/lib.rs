//! Shared models and environment access for the latency surveyor.
//!
//! * [`config`]: runtime settings handed from the binary to the scanners.
//! * [`network`]: target list loading and local address discovery.
//! * [`log`]: status macros layered over `tracing`.

pub mod config;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing;
