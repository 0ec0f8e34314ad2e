//! Lifecycle markers
//!
//! An entity parked in an object pool carries [`Inactive`]. Every built-in
//! system excludes it, so a pooled entity is invisible to update, physics and
//! draw until it is obtained again.

use crate::ecs::Component;

/// Entity is parked and must not be processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inactive;

impl Component for Inactive {}
