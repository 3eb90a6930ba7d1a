//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a
//! human-readable or JSON `fmt` layer. Output goes to stderr so that
//! stdout stays free for forecast tables and JSON reports.

mod logging;

pub use logging::{TelemetryError, init_logging, resolve_filter};
