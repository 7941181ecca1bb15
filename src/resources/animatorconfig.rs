//! Animator configuration resource.
//!
//! Manages playback settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! wrap_policy = bounded
//! warn_once = true
//!
//! [demo]
//! ticks = 8
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::animationregistry::WrapPolicy;

/// Default safe values for startup
const DEFAULT_WARN_ONCE: bool = true;
const DEFAULT_TICKS: u32 = 8;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Animator configuration resource.
///
/// The [`apply_animator_config`] system copies the playback settings into the
/// [`AnimationRegistry`](crate::resources::animationregistry::AnimationRegistry)
/// whenever this resource is inserted or changed.
///
/// [`apply_animator_config`]: crate::systems::animatorconfig::apply_animator_config
#[derive(Resource, Debug, Clone)]
pub struct AnimatorConfig {
    /// Cursor wrap behavior for every registered animation.
    pub wrap_policy: WrapPolicy,
    /// Warn about a missing animation only the first time it is requested.
    pub warn_once: bool,
    /// Ticks run by the demo binary.
    pub ticks: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatorConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            wrap_policy: WrapPolicy::default(),
            warn_once: DEFAULT_WARN_ONCE,
            ticks: DEFAULT_TICKS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)
    }

    /// Load configuration from INI text. Same rules as [`Self::load_from_file`].
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        // [animation] section
        if let Some(policy) = config.get("animation", "wrap_policy") {
            self.wrap_policy = policy.parse()?;
        }
        if let Some(warn_once) = config.getbool("animation", "warn_once").ok().flatten() {
            self.warn_once = warn_once;
        }

        // [demo] section
        if let Some(ticks) = config.getuint("demo", "ticks").ok().flatten() {
            self.ticks = u32::try_from(ticks)
                .map_err(|_| format!("demo.ticks {} does not fit in 32 bits", ticks))?;
        }

        info!(
            "Loaded config: wrap_policy={}, warn_once={}, ticks={}",
            self.wrap_policy.as_str(),
            self.warn_once,
            self.ticks
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [animation] section
        config.set(
            "animation",
            "wrap_policy",
            Some(self.wrap_policy.as_str().to_string()),
        );
        config.set("animation", "warn_once", Some(self.warn_once.to_string()));

        // [demo] section
        config.set("demo", "ticks", Some(self.ticks.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
