//! Server initial conditions: time of day, weather, mob spawning.

use mission_markup::{Element, Fragment};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::container::Container;
use crate::error::{ComponentKind, RenderError, ValidationError};

/// Length of a Minecraft day in ticks.
pub const TICKS_PER_DAY: i64 = 24000;

/// Weather at mission start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Normal,
    Clear,
    Rain,
    Thunder,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Normal => write!(f, "normal"),
            Weather::Clear => write!(f, "clear"),
            Weather::Rain => write!(f, "rain"),
            Weather::Thunder => write!(f, "thunder"),
        }
    }
}

/// The optional `<ServerInitialConditions>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConditions {
    /// Time of day in ticks, `0..=24000` (0 is dawn, 6000 noon)
    pub start_time: Option<i64>,
    pub allow_passage_of_time: Option<bool>,
    pub weather: Option<Weather>,
    pub allow_spawning: Option<bool>,
}

impl InitialConditions {
    /// Creates conditions with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting time of day.
    pub fn with_start_time(mut self, ticks: i64) -> Self {
        self.start_time = Some(ticks);
        self
    }

    /// Freezes or unfreezes the clock.
    pub fn with_passage_of_time(mut self, allow: bool) -> Self {
        self.allow_passage_of_time = Some(allow);
        self
    }

    /// Sets the weather.
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Enables or disables mob spawning.
    pub fn with_spawning(mut self, allow: bool) -> Self {
        self.allow_spawning = Some(allow);
        self
    }

    /// True when nothing is set.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.allow_passage_of_time.is_none()
            && self.weather.is_none()
            && self.allow_spawning.is_none()
    }

    /// Checks the start time range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.start_time {
            Some(t) if !(0..=TICKS_PER_DAY).contains(&t) => Err(ValidationError::InvalidStartTime(t)),
            _ => Ok(()),
        }
    }
}

impl Container for InitialConditions {
    fn kind(&self) -> ComponentKind {
        ComponentKind::InitialConditions
    }

    fn render(&self) -> Result<Fragment, RenderError> {
        self.validate()?;
        if self.is_empty() {
            return Ok(Fragment::empty());
        }

        let time = (self.start_time.is_some() || self.allow_passage_of_time.is_some()).then(|| {
            Element::new("Time")
                .child_opt(self.start_time.map(|t| Element::with_text("StartTime", t)))
                .child_opt(
                    self.allow_passage_of_time
                        .map(|a| Element::with_text("AllowPassageOfTime", a)),
                )
        });

        let element = Element::new("ServerInitialConditions")
            .child_opt(time)
            .child_opt(self.weather.map(|w| Element::with_text("Weather", w)))
            .child_opt(self.allow_spawning.map(|a| Element::with_text("AllowSpawning", a)));
        Ok(element.into())
    }
}
