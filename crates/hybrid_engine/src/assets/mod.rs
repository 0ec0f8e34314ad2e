//! Sprite animation assets
//!
//! The engine never decodes images. An [`AnimationLibrary`] only knows how
//! many frames each sprite sheet holds; entities keep an [`Animation`] plus
//! their own elapsed time and ask it for a frame index when drawn.

pub mod animation;

pub use animation::{Animation, AnimationLibrary, PlayMode};

use std::path::PathBuf;

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// The asset file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The asset file is malformed
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: ron::error::SpannedError,
    },

    /// No sheet with this name
    #[error("Unknown sprite sheet '{0}'")]
    MissingSheet(String),

    /// The sheet exists but has no frames
    #[error("Sprite sheet '{0}' has no frames")]
    EmptySheet(String),
}
