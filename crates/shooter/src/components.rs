//! Game-specific components

use hybrid_engine::prelude::*;

/// Player ship component
#[derive(Debug, Clone, Default)]
pub struct Player {
    /// Seconds until the next shot is allowed
    pub bullet_countdown: f32,
}

impl Component for Player {}

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Descending ship that drops bomb volleys
    Alien,
    /// Projectile dropped by an alien
    Bomb,
}

/// Enemy component
#[derive(Debug, Clone)]
pub struct Enemy {
    /// What kind of enemy this is
    pub kind: EnemyKind,

    /// Hits left before it explodes
    pub hits: i32,

    /// Bomb volley timer, cancelled when the enemy goes away
    pub bomb_timer: Option<TimerId>,
}

impl Enemy {
    /// Create an enemy with no bomb timer
    pub fn new(kind: EnemyKind, hits: i32) -> Self {
        Self {
            kind,
            hits,
            bomb_timer: None,
        }
    }
}

impl Component for Enemy {}

/// Pooled player bullet
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Current activation, set when obtained from the pool
    pub handle: Option<PoolHandle>,

    /// Seconds before the bullet fizzles
    pub lifespan: f32,
}

impl Component for Bullet {}

/// Pooled one-shot animation
#[derive(Debug, Clone, Default)]
pub struct Effect {
    /// Current activation, set when obtained from the pool
    pub handle: Option<PoolHandle>,
}

impl Component for Effect {}

/// Animated sprite
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Frames to cycle through
    pub animation: Animation,

    /// Seconds since the animation started
    pub state_time: f32,
}

impl Sprite {
    /// Start an animation from its first frame
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            state_time: 0.0,
        }
    }

    /// Advance the animation clock
    pub fn advance(&mut self, delta_time: f32) {
        self.state_time += delta_time;
    }

    /// Frame to draw now
    pub fn frame(&self) -> usize {
        self.animation.key_frame(self.state_time)
    }

    /// Whether a one-shot animation has played out
    pub fn is_finished(&self) -> bool {
        self.animation.is_finished(self.state_time)
    }
}

impl Component for Sprite {}
