//! Animation systems.
//!
//! - [`sheet_animation`] draws the current frame of every animated sprite and
//!   steps the shared cursor of its registry entry.
//!
//! # Animation Flow
//!
//! 1. Animation data is registered in [`AnimationRegistry`]
//! 2. Entities have a [`SheetAnimation`] component pointing to a key
//! 3. Each run of `sheet_animation` is one tick: the registry writes the frame
//!    rectangle into the entity's [`Sprite`] and moves the cursor on
//! 4. Unknown keys produce an [`AnimationMissing`] message and leave the sprite as is
//!
//! # Related
//!
//! - [`crate::components::sheetanimation::SheetAnimation`] – per-entity animation link
//! - [`crate::resources::animationregistry::AnimationRegistry`] – animation entries and cursors

use bevy_ecs::prelude::*;

use crate::components::sheetanimation::SheetAnimation;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationMissing;
use crate::resources::animationregistry::{AnimationError, AnimationRegistry};

/// Advance sheet animations by one tick and update sprite frames.
///
/// Contract
/// - Skips entities whose [`SheetAnimation`] is paused.
/// - Mutates [`AnimationRegistry`] cursors and [`Sprite`] texture/source rect.
/// - Writes [`AnimationMissing`] for keys that are not registered.
pub fn sheet_animation(
    mut query: Query<(Entity, &SheetAnimation, &mut Sprite)>,
    mut registry: ResMut<AnimationRegistry>,
    mut missing: MessageWriter<AnimationMissing>,
) {
    for (entity, anim, mut sprite) in query.iter_mut() {
        if anim.paused {
            continue;
        }
        match registry.advance(&anim.key, &mut *sprite) {
            Ok(_) => {}
            Err(AnimationError::NotFound(key)) => {
                missing.write(AnimationMissing { entity, key });
            }
            Err(err) => log::error!("Animation for {:?} failed: {}", entity, err),
        }
    }
}
