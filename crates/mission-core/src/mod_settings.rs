//! Engine tuning: game speed and offscreen rendering priority.

use mission_markup::{Element, Fragment};
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::error::{ComponentKind, RenderError, ValidationError};

/// Largest `<MsPerTick>` the mission schema's `int` type can hold.
pub const MAX_MS_PER_TICK: i64 = i32::MAX as i64;

/// The optional `<ModSettings>` element.
///
/// Each field produces its own child element when set. When neither is set
/// the whole element is left out of the mission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModSettings {
    /// Milliseconds between game ticks (`<MsPerTick>`); must be within `1..=MAX_MS_PER_TICK`
    pub ms_per_tick: Option<i64>,
    /// Keep rendering when the Minecraft window is offscreen
    pub prioritise_offscreen_rendering: Option<bool>,
}

impl ModSettings {
    /// Creates settings with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the game speed.
    pub fn with_ms_per_tick(mut self, ms_per_tick: i64) -> Self {
        self.ms_per_tick = Some(ms_per_tick);
        self
    }

    /// Sets offscreen rendering priority.
    pub fn with_offscreen_rendering(mut self, prioritise: bool) -> Self {
        self.prioritise_offscreen_rendering = Some(prioritise);
        self
    }

    /// True when neither field is set.
    pub fn is_empty(&self) -> bool {
        self.ms_per_tick.is_none() && self.prioritise_offscreen_rendering.is_none()
    }

    /// Checks the tick rate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.ms_per_tick {
            Some(ms) if !(1..=MAX_MS_PER_TICK).contains(&ms) => Err(ValidationError::InvalidTickRate(ms)),
            _ => Ok(()),
        }
    }
}

impl Container for ModSettings {
    fn kind(&self) -> ComponentKind {
        ComponentKind::ModSettings
    }

    fn render(&self) -> Result<Fragment, RenderError> {
        self.validate()?;
        if self.is_empty() {
            return Ok(Fragment::empty());
        }

        let element = Element::new("ModSettings")
            .child_opt(self.ms_per_tick.map(|ms| Element::with_text("MsPerTick", ms)))
            .child_opt(
                self.prioritise_offscreen_rendering
                    .map(|p| Element::with_text("PrioritiseOffscreenRendering", p)),
            );
        Ok(element.into())
    }
}
