//! Composable Malmo missions.
//!
//! Missions are assembled from typed components, validated, and rendered to
//! the XML document a Malmo client accepts. Each component knows how to
//! render its own section; the [`Mission`] checks that the required ones are
//! present and stitches them into one document.
//!
//! # Flow
//!
//! ```text
//! components / mission.toml ──▶ Mission ──render()──▶ <Mission> XML ──▶ SessionLauncher
//! ```
//!
//! # Modules
//!
//! - [`container`]: The shared render capability
//! - [`mod_settings`], [`server`], [`initial`], [`agent`]: Mission components
//! - [`mission`]: Composition, first-wins adoption, render cache
//! - [`config`]: TOML mission files
//! - [`launcher`]: Handing markup to a Malmo client

pub mod agent;
pub mod config;
pub mod container;
pub mod coords;
pub mod error;
#[cfg(feature = "test-fixtures")]
pub mod fixtures;
pub mod initial;
pub mod launcher;
pub mod mission;
pub mod mod_settings;
pub mod server;

pub use container::Container;

// Re-export component types
pub use agent::{AgentDescriptor, GameMode, ObservedRegion, ObserverAgent, DEFAULT_OBSERVER_NAME};
pub use coords::{BlockPos, Placement};
pub use initial::{InitialConditions, Weather, TICKS_PER_DAY};
pub use mod_settings::{ModSettings, MAX_MS_PER_TICK};
pub use server::{
    AgentFinishes, Decorator, ServerHandlerSet, TimeLimit, WorldGenerator, DEFAULT_FLAT_GENERATOR,
};

// Re-export mission types
pub use mission::{
    Mission, MissionComponent, MissionState, MissionWarning, DEFAULT_SUMMARY, MALMO_NAMESPACE,
    SCHEMA_LOCATION, XSI_NAMESPACE,
};

// Re-export error types
pub use error::{ComponentKind, MissionError, RenderError, ValidationError};

// Re-export config types
pub use config::{default_mission_toml, ConfigError, MissionConfig, TomlSerializeError, COMPONENT_KINDS};

// Re-export launcher types
pub use launcher::{launch, Endpoint, LaunchError, SessionLauncher, DEFAULT_MALMO_PORT};

pub use mission_markup::{Document, Fragment, WriteOptions};
