//! ECS systems.
//!
//! - [`animation`] – steps sheet animations and updates sprite frames
//! - [`animatorconfig`] – pushes configuration changes into the registry
pub mod animation;
pub mod animatorconfig;
