//! Animation definition files.
//!
//! Definitions are JSON objects mapping an animation name to the parameters
//! of [`AnimationRegistry::register`]. Vectors are `[x, y]` arrays and
//! textures are referenced by asset key only:
//!
//! ```json
//! {
//!   "walk": { "texture": "hero", "sheet_size": [2, 3], "sprite_size": [16, 16] },
//!   "idle": { "texture": "hero", "sheet_size": [1, 4], "sprite_size": [16, 16], "frequency": 2 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::resources::animationregistry::{AnimationDef, AnimationError, AnimationRegistry};

/// Named definitions, sorted by name.
pub type AnimationDefs = BTreeMap<String, AnimationDef>;

#[derive(Debug, Error)]
pub enum DefsError {
    #[error("failed to read animation definitions from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse animation definitions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] AnimationError),
}

pub fn parse_animation_defs(text: &str) -> Result<AnimationDefs, DefsError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_animation_defs(path: impl AsRef<Path>) -> Result<AnimationDefs, DefsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DefsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let defs = parse_animation_defs(&text)?;
    info!("Loaded {} animation definitions from {:?}", defs.len(), path);
    Ok(defs)
}

/// Register every definition. Stops at the first invalid one; entries
/// registered before it stay in the registry.
pub fn register_all(
    registry: &mut AnimationRegistry,
    defs: AnimationDefs,
) -> Result<(), DefsError> {
    for (name, def) in defs {
        registry.register(name, def)?;
    }
    Ok(())
}
