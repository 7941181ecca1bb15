//! Animation playback messages.
//!
//! The [`sheet_animation`](crate::systems::animation::sheet_animation) system
//! writes an [`AnimationMissing`] message whenever an entity points at an
//! animation name that is not registered. The sprite keeps its previous frame
//! for that tick.
//!
//! # Example
//!
//! ```ignore
//! fn register_late(mut reader: MessageReader<AnimationMissing>) {
//!     for msg in reader.read() {
//!         log::info!("{:?} wants \"{}\"", msg.entity, msg.key);
//!     }
//! }
//! ```

use bevy_ecs::prelude::*;

/// An entity asked for an animation that is not in the registry.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct AnimationMissing {
    /// Entity whose sprite was left unchanged.
    pub entity: Entity,
    /// Name it asked for.
    pub key: String,
}
