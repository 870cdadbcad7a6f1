//! Error Types
//!
//! Validation and render failures. All of them are recoverable: the caller
//! fixes the configuration and renders again.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::coords::BlockPos;

/// The mission parts that can be missing or fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    ModSettings,
    ServerHandlers,
    InitialConditions,
    Agent,
    WorldGenerator,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::ModSettings => write!(f, "ModSettings"),
            ComponentKind::ServerHandlers => write!(f, "ServerHandlers"),
            ComponentKind::InitialConditions => write!(f, "ServerInitialConditions"),
            ComponentKind::Agent => write!(f, "AgentSection"),
            ComponentKind::WorldGenerator => write!(f, "world generator"),
        }
    }
}

/// A field failed its type or range check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid tick rate: MsPerTick must be within 1..=2147483647, got {0}")]
    InvalidTickRate(i64),
    #[error("invalid time limit: timeLimitMs must be at least 1, got {0}")]
    InvalidTimeLimit(i64),
    #[error("invalid start time: StartTime must be within 0..=24000, got {0}")]
    InvalidStartTime(i64),
    #[error("agent name must not be empty")]
    EmptyAgentName,
    #[error("observer '{agent}' has no observed regions")]
    NoObservedRegions { agent: String },
    #[error("observer '{agent}' has a region with an empty name")]
    EmptyRegionName { agent: String },
    #[error("observer '{agent}' has a start placement with a non-finite coordinate")]
    NonFinitePlacement { agent: String },
    #[error("region '{region}' has min {min} beyond max {max}")]
    InvertedRegion {
        region: String,
        min: BlockPos,
        max: BlockPos,
    },
    #[error("decorator block type must not be empty")]
    EmptyBlockType,
}

/// Failure from a single component's `render`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("missing required component: {0}")]
    MissingComponent(ComponentKind),
}

/// Failure from rendering a whole mission. Nothing is produced when this
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("{component} failed validation: {source}")]
    Validation {
        component: ComponentKind,
        #[source]
        source: ValidationError,
    },
    #[error("missing required component: {0}")]
    MissingComponent(ComponentKind),
}

impl MissionError {
    /// Attributes a component's render error to that component.
    pub fn from_render(component: ComponentKind, err: RenderError) -> Self {
        match err {
            RenderError::Validation(source) => MissionError::Validation { component, source },
            RenderError::MissingComponent(kind) => MissionError::MissingComponent(kind),
        }
    }

    /// The validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            MissionError::Validation { source, .. } => Some(source),
            MissionError::MissingComponent(_) => None,
        }
    }
}
