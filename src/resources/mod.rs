//! ECS resources made available to systems.
//!
//! Overview
//! - `animationdefs` – JSON definition files for registry entries
//! - `animationregistry` – named animations, their frame grids and cursors
//! - `animatorconfig` – playback settings loaded from an INI file
pub mod animationdefs;
pub mod animationregistry;
pub mod animatorconfig;
