//! Messages emitted by systems.
//!
//! - [`animation`] – missing-animation notifications
pub mod animation;
