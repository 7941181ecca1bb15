//! Sprite component and the drawable seam used by animation playback.
//!
//! A [`Sprite`] does not own pixel data. It names a texture through a
//! [`TextureHandle`] (a key into whatever asset store the game uses) and
//! selects the visible part of that texture with a [`FrameRect`].
//!
//! Anything that can display a frame of a sprite sheet implements
//! [`Drawable`], so the animation registry can update engine sprites and
//! foreign types alike.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Non-owning reference to a texture, identified by its asset key.
///
/// Cloning is cheap: only the shared key is copied, never the pixel storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(Arc<str>);

impl TextureHandle {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Asset key this handle points to.
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextureHandle {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TextureHandle {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integer rectangle in texture pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FrameRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for FrameRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Something that shows a sub-rectangle of a texture.
pub trait Drawable {
    fn set_texture(&mut self, texture: &TextureHandle);
    fn set_texture_rect(&mut self, rect: FrameRect);
}

/// Sprite is identified by a texture handle and the source rectangle picked
/// out of that texture. Flip flags are carried for the renderer and are not
/// touched by animation playback.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub texture: Option<TextureHandle>,
    pub source: FrameRect,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(texture: impl Into<TextureHandle>, source: FrameRect) -> Self {
        Self {
            texture: Some(texture.into()),
            source,
            ..Default::default()
        }
    }
}

impl Drawable for Sprite {
    fn set_texture(&mut self, texture: &TextureHandle) {
        // Same key means same texture; skip the refcount bump.
        if self.texture.as_ref() != Some(texture) {
            self.texture = Some(texture.clone());
        }
    }

    fn set_texture_rect(&mut self, rect: FrameRect) {
        self.source = rect;
    }
}
