//! Game configuration
//!
//! Every tunable of the shooter lives here. Missing sections and fields fall
//! back to the defaults below, which reproduce the classic 480x480 arena.

use hybrid_engine::config::{Config, ConfigError};
use hybrid_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield settings
    pub arena: ArenaConfig,

    /// Player ship settings
    pub player: PlayerConfig,

    /// Player bullet settings
    pub bullets: BulletConfig,

    /// Alien and bomb settings
    pub enemies: EnemyConfig,

    /// Visual effect settings
    pub effects: EffectConfig,

    /// Loop settings for the headless runner
    pub simulation: SimulationConfig,
}

/// Playfield configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Playfield width
    pub width: f32,

    /// Playfield height
    pub height: f32,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Ship size
    pub size: Vec2,

    /// Height of the ship's bottom edge at spawn
    pub spawn_y: f32,

    /// Movement speed on each axis
    pub speed: f32,

    /// Seconds between shots while fire is held
    pub fire_interval: f32,

    /// Bullets leave this far left of the ship's center
    pub muzzle_offset: f32,

    /// Seconds per animation frame
    pub frame_duration: f32,
}

/// Bullet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Bullet size
    pub size: Vec2,

    /// Upward speed
    pub speed: f32,

    /// Seconds before a bullet fizzles out
    pub lifespan: f32,

    /// Instances created up front
    pub pool_size: usize,

    /// Frame duration of the hit spark
    pub hit_frame_duration: f32,

    /// Frame duration of the fizzle effect
    pub expire_frame_duration: f32,
}

/// Enemy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Alien ship size
    pub alien_size: Vec2,

    /// Hits an alien takes
    pub alien_hits: i32,

    /// Downward alien speed
    pub alien_speed: f32,

    /// Seconds before the first alien
    pub spawn_delay: f32,

    /// Seconds between aliens
    pub spawn_interval: f32,

    /// Seconds between bomb volleys
    pub bomb_interval: f32,

    /// Volley angles in degrees, counter-clockwise from straight down
    pub bomb_angles: Vec<f32>,

    /// Bomb size
    pub bomb_size: Vec2,

    /// Hits a bomb takes
    pub bomb_hits: i32,

    /// Bomb speed
    pub bomb_speed: f32,

    /// Upward shove on a non-lethal hit
    pub knockback: f32,

    /// Seconds an enemy is frozen after a non-lethal hit
    pub hit_stun: f32,

    /// Seconds per animation frame
    pub frame_duration: f32,
}

/// Effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Frame duration of explosions
    pub explosion_frame_duration: f32,

    /// Instances created up front
    pub pool_size: usize,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed time step in seconds
    pub timestep: f32,

    /// Seconds the headless runner plays
    pub duration: f32,

    /// Random seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 480.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(16.0, 32.0),
            spawn_y: 16.0,
            speed: 150.0,
            fire_interval: 0.1,
            muzzle_offset: 8.0,
            frame_duration: 0.04,
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(16.0, 24.0),
            speed: 400.0,
            lifespan: 0.8,
            pool_size: 16,
            hit_frame_duration: 0.04,
            expire_frame_duration: 0.01,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            alien_size: Vec2::new(48.0, 48.0),
            alien_hits: 10,
            alien_speed: 50.0,
            spawn_delay: 0.0,
            spawn_interval: 3.0,
            bomb_interval: 2.75,
            bomb_angles: vec![-30.0, 0.0, 30.0],
            bomb_size: Vec2::new(24.0, 24.0),
            bomb_hits: 3,
            bomb_speed: 85.0,
            knockback: 5.0,
            hit_stun: 0.25,
            frame_duration: 0.1,
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            explosion_frame_duration: 0.09,
            pool_size: 8,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            duration: 10.0,
            seed: None,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("player.fire_interval", self.player.fire_interval)?;
        positive("bullets.lifespan", self.bullets.lifespan)?;
        positive("enemies.spawn_interval", self.enemies.spawn_interval)?;
        positive("enemies.bomb_interval", self.enemies.bomb_interval)?;
        positive("simulation.timestep", self.simulation.timestep)?;
        if self.enemies.alien_hits < 1 || self.enemies.bomb_hits < 1 {
            return Err(ConfigError::Invalid {
                field: "enemies.*_hits",
                reason: "enemies need at least one hit".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let mut config = GameConfig::default();
        config.simulation.timestep = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "simulation.timestep", .. })
        ));
    }
}
