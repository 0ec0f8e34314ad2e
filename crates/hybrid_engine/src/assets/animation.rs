//! Frame-based animations

use super::AssetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// What happens after the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Hold the last frame
    #[default]
    Once,
    /// Start over from the first frame
    Loop,
}

/// A named sequence of equally long frames
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    sheet: String,
    frame_duration: f32,
    frame_count: usize,
    mode: PlayMode,
}

impl Animation {
    /// Create an animation over `frame_count` frames of `sheet`
    pub fn new(sheet: impl Into<String>, frame_duration: f32, frame_count: usize, mode: PlayMode) -> Self {
        Self {
            sheet: sheet.into(),
            frame_duration,
            frame_count: frame_count.max(1),
            mode,
        }
    }

    /// Sprite sheet name
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Seconds per frame
    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Seconds for one pass over every frame
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> f32 {
        self.frame_duration * self.frame_count as f32
    }

    /// Frame to show after `state_time` seconds
    pub fn key_frame(&self, state_time: f32) -> usize {
        let frame = self.frame_number(state_time);
        match self.mode {
            PlayMode::Once => frame.min(self.frame_count - 1),
            PlayMode::Loop => frame % self.frame_count,
        }
    }

    /// Whether a single pass has completed after `state_time` seconds
    pub fn is_finished(&self, state_time: f32) -> bool {
        self.frame_number(state_time) >= self.frame_count
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn frame_number(&self, state_time: f32) -> usize {
        if self.frame_duration <= 0.0 {
            return self.frame_count;
        }
        (state_time / self.frame_duration).floor().max(0.0) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SheetInfo {
    frames: usize,
}

/// Frame counts of every known sprite sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationLibrary {
    sheets: BTreeMap<String, SheetInfo>,
}

impl AnimationLibrary {
    /// Load a library from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library: Self = ron::from_str(&contents).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded {} sprite sheets from {}", library.sheets.len(), path.display());
        Ok(library)
    }

    /// Library with no sheets
    pub fn empty() -> Self {
        Self {
            sheets: BTreeMap::new(),
        }
    }

    /// Register or replace a sheet (builder pattern)
    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, frames: usize) -> Self {
        self.sheets.insert(name.into(), SheetInfo { frames });
        self
    }

    /// Whether a sheet is known
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Frame count of a sheet
    pub fn frames(&self, name: &str) -> Result<usize, AssetError> {
        match self.sheets.get(name) {
            Some(info) if info.frames > 0 => Ok(info.frames),
            Some(_) => Err(AssetError::EmptySheet(name.to_string())),
            None => Err(AssetError::MissingSheet(name.to_string())),
        }
    }

    /// Build an animation over every frame of a sheet
    pub fn animation(&self, name: &str, frame_duration: f32, mode: PlayMode) -> Result<Animation, AssetError> {
        Ok(Animation::new(name, frame_duration, self.frames(name)?, mode))
    }
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self::empty()
            .with_sheet("player", 4)
            .with_sheet("player-bullet", 1)
            .with_sheet("player-bullet-expire", 4)
            .with_sheet("enemy", 4)
            .with_sheet("enemy-bomb", 4)
            .with_sheet("explosion", 8)
            .with_sheet("bullet-hit", 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_looping_wraps_around() {
        let anim = Animation::new("player", 0.04, 4, PlayMode::Loop);
        assert_eq!(anim.key_frame(0.0), 0);
        assert_eq!(anim.key_frame(0.05), 1);
        assert_eq!(anim.key_frame(0.17), 0);
        assert!(!anim.is_finished(0.1));
    }

    #[test]
    fn test_once_holds_last_frame_and_finishes() {
        let anim = Animation::new("explosion", 0.09, 8, PlayMode::Once);
        assert_relative_eq!(anim.duration(), 0.72, epsilon = 1e-6);
        assert_eq!(anim.key_frame(10.0), 7);
        assert!(!anim.is_finished(0.7));
        assert!(anim.is_finished(0.73));
    }

    #[test]
    fn test_library_lookup_errors() {
        let library = AnimationLibrary::empty().with_sheet("blank", 0);
        assert!(matches!(library.frames("nope"), Err(AssetError::MissingSheet(_))));
        assert!(matches!(library.frames("blank"), Err(AssetError::EmptySheet(_))));
        assert_eq!(AnimationLibrary::default().frames("explosion").unwrap(), 8);
    }

    #[test]
    fn test_library_parses_ron() {
        let library: AnimationLibrary =
            ron::from_str(r#"(sheets: {"alien": (frames: 4), "bomb": (frames: 2)})"#).unwrap();
        let bomb = library.animation("bomb", 0.1, PlayMode::Loop).unwrap();
        assert_eq!(bomb.frame_count(), 2);
        assert_eq!(bomb.sheet(), "bomb");
    }
}
