//! Foundation module - Core utilities and types
//!
//! - Math types and helpers
//! - Logging setup
//! - Game-time timer scheduling

pub mod logging;
pub mod math;
pub mod time;
