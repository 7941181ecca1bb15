//! ECS components for entities.
//!
//! Submodules overview:
//! - [`sheetanimation`] – links an entity to a named sprite-sheet animation
//! - [`sprite`] – 2D sprite component, texture handles and the [`sprite::Drawable`] seam

pub mod sheetanimation;
pub mod sprite;
