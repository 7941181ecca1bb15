//! Animator configuration change detection system.
//!
//! Monitors [`AnimatorConfig`] for changes and applies the playback settings
//! to the [`AnimationRegistry`].

use crate::resources::animationregistry::AnimationRegistry;
use crate::resources::animatorconfig::AnimatorConfig;
use bevy_ecs::prelude::*;
use log::info;

/// System that applies animator configuration changes.
///
/// # Resource Dependencies
/// - `AnimatorConfig` (optional) - the configuration to monitor
/// - `AnimationRegistry` (mutable) - receives wrap policy and warning mode
pub fn apply_animator_config(
    maybe_config: Option<Res<AnimatorConfig>>,
    mut registry: ResMut<AnimationRegistry>,
) {
    let Some(config) = maybe_config else {
        return;
    };

    if config.is_changed() || config.is_added() {
        if registry.policy() != config.wrap_policy {
            info!(
                "Animation wrap policy: {} -> {}",
                registry.policy().as_str(),
                config.wrap_policy.as_str()
            );
            registry.set_policy(config.wrap_policy);
        }
        registry.set_warn_once(config.warn_once);
    }
}
