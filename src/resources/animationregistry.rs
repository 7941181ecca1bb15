//! Sprite-sheet animation registry.
//!
//! The [`AnimationRegistry`] keeps one [`AnimationEntry`] per animation name:
//! the texture, the frame grid of the sheet, the size of one frame and a frame
//! cursor. Calling [`AnimationRegistry::advance`] writes the frame under the
//! cursor onto a [`Drawable`] and then steps the cursor for the next call.
//!
//! # Frame order
//!
//! Frames are walked down a column first, then across to the next column:
//!
//! ```text
//! sheet (2, 3)     call order
//! +----+----+      0  3
//! |    |    |      1  4
//! |    |    |      2  5
//! +----+----+
//! ```
//!
//! # Playback speed
//!
//! An entry with `frequency` 0 or 1 steps on every call. With `frequency` `n`
//! the same frame is drawn for `n` calls before the cursor moves.
//!
//! # Wrap policies
//!
//! [`WrapPolicy::Bounded`] stops at `end_cursor` (clamped to the sheet) and
//! restarts from `start_cursor`. [`WrapPolicy::Legacy`] keeps the historical
//! stepping of this manager, which lets the row index reach `sheet_size.y`
//! once per column (an off-sheet frame) and always restarts at column 0.
//!
//! The registry is a plain value. Several registries can live side by side
//! (one per scene or level), and callers sharing one across threads must
//! serialize access themselves.

use bevy_ecs::prelude::Resource;
use glam::IVec2;
use log::{debug, error, trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::sprite::{Drawable, FrameRect, TextureHandle};

/// Errors reported by [`AnimationRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// No entry is registered under this name.
    #[error("no animation entry found for \"{0}\"")]
    NotFound(String),
    /// A size vector has a zero or negative axis.
    #[error("animation \"{name}\" has invalid {field} {value}: both axes must be positive")]
    InvalidGeometry {
        name: String,
        field: &'static str,
        value: IVec2,
    },
    /// A start cursor outside the playable `[0, bounds)` region.
    #[error("animation \"{name}\" has {field} {value} outside the playable region {bounds}")]
    CursorOutOfBounds {
        name: String,
        field: &'static str,
        value: IVec2,
        bounds: IVec2,
    },
}

/// How the cursor wraps at the edges of the frame grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapPolicy {
    /// Rows `0..rows`, columns `0..cols` where the bounds are `end_cursor`
    /// clamped to `sheet_size`. A finished cycle restarts at `start_cursor`.
    #[default]
    Bounded,
    /// Historical stepping: the row guard is `cursor.y < sheet_size.y`, so the
    /// row index reaches `sheet_size.y` once per column. `end_cursor` and
    /// `start_cursor` are ignored and columns restart at 0.
    Legacy,
}

impl WrapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapPolicy::Bounded => "bounded",
            WrapPolicy::Legacy => "legacy",
        }
    }
}

impl std::str::FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" => Ok(WrapPolicy::Bounded),
            "legacy" => Ok(WrapPolicy::Legacy),
            other => Err(format!(
                "unknown wrap policy \"{other}\" (expected \"bounded\" or \"legacy\")"
            )),
        }
    }
}

/// Parameters for [`AnimationRegistry::register`].
///
/// `cursor`, `frequency` and `start_cursor` are optional in serialized form
/// and default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDef {
    pub texture: TextureHandle,
    /// Frame grid dimensions as `(columns, rows)`.
    pub sheet_size: IVec2,
    /// Pixel size of a single frame.
    pub sprite_size: IVec2,
    #[serde(default)]
    pub cursor: IVec2,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub start_cursor: IVec2,
}

impl AnimationDef {
    pub fn new(texture: impl Into<TextureHandle>, sheet_size: IVec2, sprite_size: IVec2) -> Self {
        Self {
            texture: texture.into(),
            sheet_size,
            sprite_size,
            cursor: IVec2::ZERO,
            frequency: 0,
            start_cursor: IVec2::ZERO,
        }
    }

    pub fn with_cursor(mut self, cursor: IVec2) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_start_cursor(mut self, start_cursor: IVec2) -> Self {
        self.start_cursor = start_cursor;
        self
    }
}

/// Full state of one registered animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEntry {
    pub texture: TextureHandle,
    /// Frame grid dimensions as `(columns, rows)`. Always positive.
    pub sheet_size: IVec2,
    /// Pixel size of a single frame. Always positive.
    pub sprite_size: IVec2,
    /// Frame drawn by the next [`AnimationRegistry::advance`].
    pub cursor: IVec2,
    /// Where [`AnimationRegistry::reset_cursor`] and a finished bounded cycle go.
    pub start_cursor: IVec2,
    /// Exclusive `(columns, rows)` bound of the playable region.
    pub end_cursor: IVec2,
    /// Calls per cursor step; 0 and 1 both mean every call.
    pub frequency: u32,
    /// Calls counted toward the next step.
    pub update_count: u32,
}

impl AnimationEntry {
    fn from_def(def: AnimationDef) -> Self {
        Self {
            texture: def.texture,
            sheet_size: def.sheet_size,
            sprite_size: def.sprite_size,
            cursor: def.cursor,
            start_cursor: def.start_cursor,
            end_cursor: def.sheet_size,
            frequency: def.frequency,
            update_count: 0,
        }
    }

    /// Source rectangle of the frame under the cursor.
    pub fn frame_rect(&self) -> FrameRect {
        FrameRect::new(
            self.cursor.x.saturating_mul(self.sprite_size.x),
            self.cursor.y.saturating_mul(self.sprite_size.y),
            self.sprite_size.x,
            self.sprite_size.y,
        )
    }

    /// Exclusive `(columns, rows)` bound of the playable region.
    pub fn bounds(&self) -> IVec2 {
        self.end_cursor.min(self.sheet_size)
    }

    fn in_bounds(&self, cursor: IVec2) -> bool {
        cursor.cmpge(IVec2::ZERO).all() && cursor.cmplt(self.bounds()).all()
    }

    /// Where a cycle restarts: `start_cursor`, or the origin when a later
    /// sheet or end change left the start outside the playable region.
    fn restart_cursor(&self) -> IVec2 {
        if self.in_bounds(self.start_cursor) {
            self.start_cursor
        } else {
            IVec2::ZERO
        }
    }

    /// Counts one call and reports whether the cursor is due to move.
    fn throttle_elapsed(&mut self) -> bool {
        self.update_count = self.update_count.saturating_add(1);
        if self.update_count >= self.frequency.max(1) {
            self.update_count = 0;
            true
        } else {
            false
        }
    }

    fn step(&mut self, policy: WrapPolicy) {
        match policy {
            WrapPolicy::Bounded => {
                let bounds = self.bounds();
                if self.cursor.y.saturating_add(1) < bounds.y {
                    self.cursor.y += 1;
                } else {
                    self.cursor.y = 0;
                    self.cursor.x = self.cursor.x.saturating_add(1);
                    if self.cursor.x >= bounds.x {
                        self.cursor = self.restart_cursor();
                    }
                }
                if !self.in_bounds(self.cursor) {
                    self.cursor = self.restart_cursor();
                }
            }
            WrapPolicy::Legacy => {
                if self.cursor.y < self.sheet_size.y {
                    self.cursor.y += 1;
                } else {
                    self.cursor.y = 0;
                    self.cursor.x = self.cursor.x.saturating_add(1);
                    if self.cursor.x >= self.sheet_size.x {
                        self.cursor.x = 0;
                    }
                }
            }
        }
    }
}

fn validate_size(name: &str, field: &'static str, value: IVec2) -> Result<(), AnimationError> {
    if value.x > 0 && value.y > 0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidGeometry {
            name: name.to_owned(),
            field,
            value,
        })
    }
}

fn validate_start(entry: &AnimationEntry, name: &str, start: IVec2) -> Result<(), AnimationError> {
    if entry.in_bounds(start) {
        Ok(())
    } else {
        Err(AnimationError::CursorOutOfBounds {
            name: name.to_owned(),
            field: "start_cursor",
            value: start,
            bounds: entry.bounds(),
        })
    }
}

/// Registry of sprite-sheet animations keyed by name.
#[derive(Resource, Debug)]
pub struct AnimationRegistry {
    entries: FxHashMap<String, AnimationEntry>,
    policy: WrapPolicy,
    warn_once: bool,
    /// Names already warned about as missing. Grows with the distinct
    /// unknown names callers ask for; see [`Self::clear_missing_warnings`].
    warned: FxHashSet<String>,
}

impl Default for AnimationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            policy: WrapPolicy::default(),
            warn_once: true,
            warned: FxHashSet::default(),
        }
    }

    pub fn with_policy(mut self, policy: WrapPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: WrapPolicy) {
        self.policy = policy;
    }

    /// When set (the default), a missing animation is warned about once per
    /// name; later misses are logged at trace level.
    pub fn set_warn_once(&mut self, warn_once: bool) {
        self.warn_once = warn_once;
    }

    /// Forget which missing names were already warned about.
    pub fn clear_missing_warnings(&mut self) {
        self.warned.clear();
    }

    /// Insert or overwrite the entry for `name`.
    ///
    /// `end_cursor` is set to the sheet size and the throttle tally starts at 0.
    /// `start_cursor` must lie on the sheet.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        def: AnimationDef,
    ) -> Result<(), AnimationError> {
        let name = name.into();
        validate_size(&name, "sheet_size", def.sheet_size)?;
        validate_size(&name, "sprite_size", def.sprite_size)?;
        let entry = AnimationEntry::from_def(def);
        validate_start(&entry, &name, entry.start_cursor)?;

        debug!(
            "Registering animation \"{}\": texture={}, sheet={}, sprite={}",
            name, entry.texture, entry.sheet_size, entry.sprite_size
        );
        self.warned.remove(&name);
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Remove the entry for `name`. Removing an unknown name does nothing.
    pub fn unregister(&mut self, name: &str) -> Option<AnimationEntry> {
        let removed = self.entries.remove(name);
        self.warned.remove(name);
        if removed.is_some() {
            debug!("Unregistered animation \"{}\"", name);
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&AnimationEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entry lookup for setters. Touching an unregistered name is a caller
    /// bug: debug builds panic, release builds log and return `NotFound`.
    fn entry_for_setter(
        &mut self,
        name: &str,
        setter: &str,
    ) -> Result<&mut AnimationEntry, AnimationError> {
        debug_assert!(
            self.entries.contains_key(name),
            "{setter} called for unregistered animation \"{name}\""
        );
        match self.entries.get_mut(name) {
            Some(entry) => Ok(entry),
            None => {
                error!("{} called for unregistered animation \"{}\"", setter, name);
                Err(AnimationError::NotFound(name.to_owned()))
            }
        }
    }

    pub fn set_frequency(&mut self, name: &str, frequency: u32) -> Result<(), AnimationError> {
        self.entry_for_setter(name, "set_frequency")?.frequency = frequency;
        Ok(())
    }

    pub fn set_sprite_size(&mut self, name: &str, size: IVec2) -> Result<(), AnimationError> {
        let entry = self.entry_for_setter(name, "set_sprite_size")?;
        validate_size(name, "sprite_size", size)?;
        entry.sprite_size = size;
        Ok(())
    }

    /// Changes the frame grid. `end_cursor` is left as is; bounded playback
    /// clamps it to the new sheet.
    pub fn set_sheet_size(&mut self, name: &str, size: IVec2) -> Result<(), AnimationError> {
        let entry = self.entry_for_setter(name, "set_sheet_size")?;
        validate_size(name, "sheet_size", size)?;
        entry.sheet_size = size;
        Ok(())
    }

    pub fn set_texture(
        &mut self,
        name: &str,
        texture: impl Into<TextureHandle>,
    ) -> Result<(), AnimationError> {
        self.entry_for_setter(name, "set_texture")?.texture = texture.into();
        Ok(())
    }

    pub fn set_cursor(&mut self, name: &str, cursor: IVec2) -> Result<(), AnimationError> {
        self.entry_for_setter(name, "set_cursor")?.cursor = cursor;
        Ok(())
    }

    /// The start must lie inside the current playable region.
    pub fn set_start_cursor(&mut self, name: &str, cursor: IVec2) -> Result<(), AnimationError> {
        let entry = self.entry_for_setter(name, "set_start_cursor")?;
        validate_start(entry, name, cursor)?;
        entry.start_cursor = cursor;
        Ok(())
    }

    /// Both axes must be positive. A bound past the sheet is clamped to it.
    pub fn set_end_cursor(&mut self, name: &str, cursor: IVec2) -> Result<(), AnimationError> {
        let entry = self.entry_for_setter(name, "set_end_cursor")?;
        validate_size(name, "end_cursor", cursor)?;
        entry.end_cursor = cursor;
        Ok(())
    }

    /// Move the cursor back to `start_cursor` and restart the throttle tally.
    pub fn reset_cursor(&mut self, name: &str) -> Result<(), AnimationError> {
        let Some(entry) = self.entries.get_mut(name) else {
            return Err(self.report_missing(name));
        };
        entry.cursor = entry.restart_cursor();
        entry.update_count = 0;
        Ok(())
    }

    /// Draw the current frame of `name` onto `drawable`, then step the cursor.
    ///
    /// Returns the rectangle that was applied. On `NotFound` the drawable is
    /// left untouched.
    pub fn advance<D: Drawable + ?Sized>(
        &mut self,
        name: &str,
        drawable: &mut D,
    ) -> Result<FrameRect, AnimationError> {
        let policy = self.policy;
        let Some(entry) = self.entries.get_mut(name) else {
            return Err(self.report_missing(name));
        };

        let rect = entry.frame_rect();
        if entry.throttle_elapsed() {
            entry.step(policy);
        }

        drawable.set_texture(&entry.texture);
        drawable.set_texture_rect(rect);
        trace!("Animation \"{}\" drew {} next={}", name, rect, entry.cursor);
        Ok(rect)
    }

    /// [`advance`](Self::advance) every `(name, drawable)` pair.
    ///
    /// Pairs are visited in the iterator's order, which for hash maps is
    /// unspecified. Entries are independent, so the end state per name does
    /// not depend on it unless the same name appears twice. Returns the
    /// failures; an empty vector means every pair was drawn.
    pub fn advance_many<'a, K, D>(
        &mut self,
        batch: impl IntoIterator<Item = (K, &'a mut D)>,
    ) -> Vec<AnimationError>
    where
        K: AsRef<str>,
        D: Drawable + ?Sized + 'a,
    {
        batch
            .into_iter()
            .filter_map(|(name, drawable)| self.advance(name.as_ref(), drawable).err())
            .collect()
    }

    fn report_missing(&mut self, name: &str) -> AnimationError {
        if !self.warn_once || self.warned.insert(name.to_owned()) {
            warn!("No animation entry found for \"{}\"", name);
        } else {
            trace!("No animation entry found for \"{}\" (repeat)", name);
        }
        AnimationError::NotFound(name.to_owned())
    }
}
