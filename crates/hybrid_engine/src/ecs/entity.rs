//! Entity implementation
//!
//! An entity is an opaque generational handle into the [`World`](super::World).
//! Despawning bumps the slot generation, so a handle kept past its entity's
//! lifetime never aliases a newer entity that reuses the slot.

slotmap::new_key_type! {
    /// Entity identifier
    pub struct Entity;
}

impl Entity {
    /// Get the raw slot id, useful for log output
    pub fn id(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}
