//! Logging setup
//!
//! The engine logs through the `log` facade. Binaries call [`init`] once;
//! `RUST_LOG` overrides the default filter.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with an `info` default filter
pub fn init() {
    init_with_default("info");
}

/// Initialize the logging system with a custom default filter
///
/// Calling it again after a logger is installed is harmless, which keeps
/// test binaries that share a process from panicking.
pub fn init_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
