//! Game asset definitions
//!
//! Resolves every animation the game uses against the sprite sheet library
//! once at startup, so a missing sheet stops the game before the first frame.

use crate::config::GameConfig;
use hybrid_engine::assets::{Animation, AnimationLibrary, AssetError, PlayMode};
use std::path::Path;

/// Bullet sprites stay on one frame; any positive duration works
const STATIC_FRAME_DURATION: f32 = 1.0;

/// All animations used by the shooter
#[derive(Debug, Clone)]
pub struct SpriteSet {
    /// Player ship
    pub player: Animation,
    /// Player bullet
    pub bullet: Animation,
    /// Bullet fizzling out
    pub bullet_expire: Animation,
    /// Bullet striking an enemy
    pub bullet_hit: Animation,
    /// Enemy or player destroyed
    pub explosion: Animation,
    /// Alien ship
    pub alien: Animation,
    /// Alien bomb
    pub bomb: Animation,
}

impl SpriteSet {
    /// Look up every sheet the game needs
    pub fn resolve(library: &AnimationLibrary, config: &GameConfig) -> Result<Self, AssetError> {
        let sprites = Self {
            player: library.animation("player", config.player.frame_duration, PlayMode::Loop)?,
            bullet: library.animation("player-bullet", STATIC_FRAME_DURATION, PlayMode::Loop)?,
            bullet_expire: library.animation(
                "player-bullet-expire",
                config.bullets.expire_frame_duration,
                PlayMode::Once,
            )?,
            bullet_hit: library.animation("bullet-hit", config.bullets.hit_frame_duration, PlayMode::Once)?,
            explosion: library.animation(
                "explosion",
                config.effects.explosion_frame_duration,
                PlayMode::Once,
            )?,
            alien: library.animation("enemy", config.enemies.frame_duration, PlayMode::Loop)?,
            bomb: library.animation("enemy-bomb", config.enemies.frame_duration, PlayMode::Loop)?,
        };
        log::debug!("Resolved shooter sprite set");
        Ok(sprites)
    }
}

/// Load the sprite sheet index, or the built-in sheets when there is none
///
/// A file that exists but cannot be read or parsed is logged once and
/// returned as an error.
pub fn load_library(path: impl AsRef<Path>) -> Result<AnimationLibrary, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        log::warn!("No sprite sheet index at {}, using built-in sheets", path.display());
        return Ok(AnimationLibrary::default());
    }
    AnimationLibrary::load(path).map_err(|e| {
        log::error!("Failed to load {}: {}", path.display(), e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_library_has_every_sheet() {
        let sprites = SpriteSet::resolve(&AnimationLibrary::default(), &GameConfig::default()).unwrap();
        assert_eq!(sprites.explosion.sheet(), "explosion");
        assert_eq!(sprites.bomb.sheet(), "enemy-bomb");
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("shooter_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_absent_index_falls_back_to_built_in_sheets() {
        let library = load_library(temp_path("absent.ron")).unwrap();
        assert_eq!(library, AnimationLibrary::default());
    }

    #[test]
    fn test_malformed_index_is_reported() {
        let path = temp_path("malformed.ron");
        std::fs::write(&path, "(sheets: {\"player\": (frames: ").unwrap();

        let result = load_library(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let library = AnimationLibrary::empty().with_sheet("player", 4);
        assert!(matches!(
            SpriteSet::resolve(&library, &GameConfig::default()),
            Err(AssetError::MissingSheet(name)) if name == "player-bullet"
        ));
    }
}
