use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Links an entity's [`Sprite`](crate::components::sprite::Sprite) to a named
/// entry in the [`AnimationRegistry`](crate::resources::animationregistry::AnimationRegistry).
///
/// Entities sharing a key share that entry's cursor.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct SheetAnimation {
    pub key: String,
    #[serde(default)]
    pub paused: bool,
}

impl SheetAnimation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            paused: false,
        }
    }

    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }
}
