//! Sheetcycler library.
//!
//! Sprite-sheet animation bookkeeping for bevy_ecs games: a registry of named
//! animations with frame-grid cursors, the sprite component it draws onto,
//! and the systems that step it once per tick.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
