//! Agent Descriptors
//!
//! What each agent in a mission is and what it perceives. Every variant
//! renders one `<AgentSection>`.
//!
//! # Example
//!
//! ```
//! use mission_core::{Container, ObserverAgent, ObservedRegion};
//!
//! let observer = ObserverAgent::new("Watcher")
//!     .with_region(ObservedRegion::from_bounds("floor", [0, 0, 0, 10, 10, 10]));
//! let xml = observer.render().unwrap().to_string();
//! assert!(xml.contains(r#"<Grid name="floor"><min x="0" y="0" z="0"/><max x="10" y="10" z="10"/></Grid>"#));
//! ```

use mission_markup::{Element, Fragment};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::container::Container;
use crate::coords::{BlockPos, Placement};
use crate::error::{ComponentKind, RenderError, ValidationError};

/// Default name given to observers.
pub const DEFAULT_OBSERVER_NAME: &str = "Observer";

/// Minecraft game mode the agent plays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// Writes the schema spelling (`Survival`, `Creative`, ...).
impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Survival => write!(f, "Survival"),
            GameMode::Creative => write!(f, "Creative"),
            GameMode::Adventure => write!(f, "Adventure"),
            GameMode::Spectator => write!(f, "Spectator"),
        }
    }
}

/// A named box of blocks reported to the agent every observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservedRegion {
    /// Key the observation is reported under
    pub name: String,
    /// Lower corner, relative to the agent
    pub min: BlockPos,
    /// Upper corner, relative to the agent
    pub max: BlockPos,
}

impl ObservedRegion {
    /// Creates a region from its two corners.
    pub fn new(name: impl Into<String>, min: impl Into<BlockPos>, max: impl Into<BlockPos>) -> Self {
        Self {
            name: name.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Creates a region from `[x1, y1, z1, x2, y2, z2]`.
    pub fn from_bounds(name: impl Into<String>, bounds: [i32; 6]) -> Self {
        let [x1, y1, z1, x2, y2, z2] = bounds;
        Self::new(name, [x1, y1, z1], [x2, y2, z2])
    }

    fn validate(&self, agent: &str) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyRegionName {
                agent: agent.to_string(),
            });
        }
        if !self.min.le_all(&self.max) {
            return Err(ValidationError::InvertedRegion {
                region: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn to_element(&self) -> Element {
        Element::new("Grid")
            .attr("name", &self.name)
            .child(self.min.to_element("min"))
            .child(self.max.to_element("max"))
    }
}

/// An agent that watches regions of the world around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverAgent {
    pub name: String,
    pub mode: GameMode,
    /// Start position; the platform picks one when unset
    pub placement: Option<Placement>,
    /// Rendered in insertion order; at least one is required
    pub regions: Vec<ObservedRegion>,
}

impl Default for ObserverAgent {
    fn default() -> Self {
        Self {
            name: DEFAULT_OBSERVER_NAME.to_string(),
            mode: GameMode::default(),
            placement: None,
            regions: Vec::new(),
        }
    }
}

impl ObserverAgent {
    /// Creates an observer with no regions yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the game mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the start position.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Appends an observed region.
    pub fn with_region(mut self, region: ObservedRegion) -> Self {
        self.regions.push(region);
        self
    }

    /// Checks name, start placement, and regions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyAgentName);
        }
        if self.placement.is_some_and(|p| !p.is_finite()) {
            return Err(ValidationError::NonFinitePlacement {
                agent: self.name.clone(),
            });
        }
        if self.regions.is_empty() {
            return Err(ValidationError::NoObservedRegions {
                agent: self.name.clone(),
            });
        }
        self.regions
            .iter()
            .try_for_each(|region| region.validate(&self.name))
    }
}

impl Container for ObserverAgent {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Agent
    }

    fn render(&self) -> Result<Fragment, RenderError> {
        self.validate()?;

        let grids: Fragment = self.regions.iter().map(ObservedRegion::to_element).collect();
        let section = Element::new("AgentSection")
            .attr("mode", self.mode)
            .child(Element::with_text("Name", &self.name))
            .child(
                Element::new("AgentStart")
                    .child_opt(self.placement.as_ref().map(Placement::to_element)),
            )
            .child(
                Element::new("AgentHandlers")
                    .child(Element::new("ObservationFromGrid").fragment(grids)),
            );
        Ok(section.into())
    }
}

/// Every kind of agent a mission can hold.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AgentDescriptor {
    Observer(ObserverAgent),
}

impl AgentDescriptor {
    /// The agent's name.
    pub fn name(&self) -> &str {
        match self {
            AgentDescriptor::Observer(observer) => &observer.name,
        }
    }
}

impl From<ObserverAgent> for AgentDescriptor {
    fn from(observer: ObserverAgent) -> Self {
        AgentDescriptor::Observer(observer)
    }
}

impl Container for AgentDescriptor {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Agent
    }

    fn render(&self) -> Result<Fragment, RenderError> {
        match self {
            AgentDescriptor::Observer(observer) => observer.render(),
        }
    }
}
