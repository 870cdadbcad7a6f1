//! Configuration loading for missions.
//!
//! A mission file is TOML: top-level metadata, an optional `[output]` table,
//! and an ordered `[[component]]` array whose entries are tagged by `kind`.
//!
//! ```toml
//! summary = "Test Mission"
//!
//! [[component]]
//! kind = "mod_settings"
//! ms_per_tick = 50
//!
//! [[component]]
//! kind = "server"
//! world_generator = { type = "flat_world" }
//! ```

use mission_markup::WriteOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::agent::ObserverAgent;
use crate::initial::InitialConditions;
use crate::mission::{Mission, MissionComponent, DEFAULT_SUMMARY};
use crate::mod_settings::ModSettings;
use crate::server::ServerHandlerSet;

/// `kind` values understood in `[[component]]` entries.
pub const COMPONENT_KINDS: &[&str] = &["mod_settings", "server", "initial_conditions", "observer"];

/// A mission as written in a configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionConfig {
    /// `<Summary>` text
    #[serde(default = "default_summary")]
    pub summary: String,
    /// `<Description>` text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How the rendered document is formatted
    #[serde(default)]
    pub output: WriteOptions,
    /// Components in file order, still untyped
    #[serde(default, rename = "component")]
    pub components: Vec<toml::Table>,
}

fn default_summary() -> String {
    DEFAULT_SUMMARY.to_string()
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            summary: default_summary(),
            description: None,
            output: WriteOptions::default(),
            components: Vec::new(),
        }
    }
}

impl MissionConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }

    /// Builds the mission, typing each component by its `kind`.
    ///
    /// Unknown kinds become [`MissionWarning::UnknownArgument`] warnings on
    /// the mission; malformed entries of a known kind are errors.
    ///
    /// [`MissionWarning::UnknownArgument`]: crate::mission::MissionWarning::UnknownArgument
    pub fn into_mission(self) -> Result<Mission, ConfigError> {
        let mut mission = Mission::default()
            .with_summary(self.summary)
            .with_write_options(self.output);
        if let Some(description) = self.description {
            mission = mission.with_description(description);
        }

        for (index, mut table) in self.components.into_iter().enumerate() {
            let kind = match table.remove("kind") {
                Some(toml::Value::String(kind)) => kind,
                _ => return Err(ConfigError::MissingKind { index }),
            };
            let value = toml::Value::Table(table);
            let component = match kind.as_str() {
                "mod_settings" => MissionComponent::ModSettings(parse::<ModSettings>(index, &kind, value)?),
                "server" => MissionComponent::Server(parse::<ServerHandlerSet>(index, &kind, value)?),
                "initial_conditions" => {
                    MissionComponent::InitialConditions(parse::<InitialConditions>(index, &kind, value)?)
                }
                "observer" => parse::<ObserverAgent>(index, &kind, value)?.into(),
                _ => {
                    mission.record_unknown(kind);
                    continue;
                }
            };
            mission.adopt(component);
        }

        tracing::debug!(
            summary = mission.summary(),
            agents = mission.agents().len(),
            warnings = mission.warnings().len(),
            "loaded mission configuration"
        );
        Ok(mission)
    }
}

fn parse<T: DeserializeOwned>(index: usize, kind: &str, value: toml::Value) -> Result<T, ConfigError> {
    value
        .try_into()
        .map_err(|source| ConfigError::InvalidComponent {
            index,
            kind: kind.to_string(),
            source,
        })
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A `[[component]]` entry without a string `kind`
    #[error("component #{index} has no `kind`; expected one of {}", COMPONENT_KINDS.join(", "))]
    MissingKind { index: usize },
    /// A `[[component]]` entry whose fields do not match its `kind`
    #[error("component #{index} ({kind}) is invalid: {source}")]
    InvalidComponent {
        index: usize,
        kind: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Error that can occur during TOML serialization.
#[derive(Debug, Error)]
#[error("TOML serialize error: {0}")]
pub struct TomlSerializeError(#[source] pub toml::ser::Error);

/// A starter mission file with every component kind.
pub fn default_mission_toml() -> String {
    r#"# Mission Configuration

summary = "Malmo Mission"
# description = "What the agents are meant to do"

[output]
indent = 4
compact = false

# Game speed and rendering priority. Both fields are optional; with neither
# set the <ModSettings> element is left out.
[[component]]
kind = "mod_settings"
ms_per_tick = 50
prioritise_offscreen_rendering = false

[[component]]
kind = "initial_conditions"
start_time = 6000
allow_passage_of_time = false
weather = "clear"
allow_spawning = false

# World generation and quit conditions. A world generator is required.
[[component]]
kind = "server"
world_generator = { type = "flat_world", generator_string = "3;7,2*3,2;1;village", force_reset = true }
time_limit = { time_limit_ms = 60000, description = "out of time" }
quit_when_any_agent_finishes = { description = "an agent finished" }

[[component.decorators]]
type = "draw_cuboid"
from = [-5, 4, -5]
to = [5, 4, 5]
block = "stone"

[[component]]
kind = "observer"
name = "Observer"
mode = "spectator"
placement = { x = 0.5, y = 5.0, z = 0.5, yaw = 90.0 }

[[component.regions]]
name = "floor"
min = [-1, -1, -1]
max = [1, -1, 1]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ComponentKind, MissionError, ValidationError};
    use crate::mission::MissionWarning;
    use crate::server::WorldGenerator;

    #[test]
    fn test_default_config() {
        let config = MissionConfig::default();

        assert_eq!(config.summary, "Malmo Mission");
        assert!(config.description.is_none());
        assert!(config.components.is_empty());
        assert_eq!(config.output, WriteOptions::default());
    }

    #[test]
    fn test_parse_metadata_only() {
        let config = MissionConfig::from_str(r#"description = "caves""#).unwrap();

        assert_eq!(config.summary, "Malmo Mission");
        assert_eq!(config.description.as_deref(), Some("caves"));
    }

    #[test]
    fn test_default_mission_toml_parses() {
        let toml = default_mission_toml();
        let config = MissionConfig::from_str(&toml).unwrap();
        assert_eq!(config.components.len(), 4);

        let mut mission = config.into_mission().unwrap();
        assert!(mission.warnings().is_empty());
        assert_eq!(mission.mod_settings().and_then(|m| m.ms_per_tick), Some(50));
        assert_eq!(mission.agents().len(), 1);

        let server = mission.server().unwrap();
        assert_eq!(server.decorators.len(), 1);
        assert!(matches!(
            server.world_generator,
            Some(WorldGenerator::FlatWorld { force_reset: true, .. })
        ));

        let xml = mission.render().unwrap();
        assert!(xml.contains("<MsPerTick>50</MsPerTick>"));
        assert!(xml.contains(r#"<Grid name="floor">"#));
    }

    #[test]
    fn test_output_section() {
        let config = MissionConfig::from_str("[output]\ncompact = true\n").unwrap();
        assert!(config.output.compact);
        assert_eq!(config.output.indent, 4);
    }

    #[test]
    fn test_duplicate_component_warns() {
        let toml = r#"
            [[component]]
            kind = "mod_settings"
            ms_per_tick = 20

            [[component]]
            kind = "mod_settings"
            ms_per_tick = 40
        "#;

        let mission = MissionConfig::from_str(toml).unwrap().into_mission().unwrap();

        assert_eq!(mission.mod_settings().and_then(|m| m.ms_per_tick), Some(20));
        assert_eq!(
            mission.warnings(),
            &[MissionWarning::DuplicateComponent(ComponentKind::ModSettings)]
        );
    }

    #[test]
    fn test_unknown_kind_warns() {
        let toml = r#"
            [[component]]
            kind = "actor"
            name = "Steve"
        "#;

        let mission = MissionConfig::from_str(toml).unwrap().into_mission().unwrap();

        assert!(mission.agents().is_empty());
        assert_eq!(
            mission.warnings(),
            &[MissionWarning::UnknownArgument {
                kind: "actor".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_kind_is_error() {
        let toml = r#"
            [[component]]
            ms_per_tick = 20
        "#;

        let err = MissionConfig::from_str(toml).unwrap().into_mission().unwrap_err();
        assert!(matches!(err, ConfigError::MissingKind { index: 0 }));
    }

    #[test]
    fn test_invalid_component_is_error() {
        let toml = r#"
            [[component]]
            kind = "mod_settings"

            [[component]]
            kind = "server"
            world_generator = { type = "cave_world" }
        "#;

        let err = MissionConfig::from_str(toml).unwrap().into_mission().unwrap_err();
        match err {
            ConfigError::InvalidComponent { index, kind, .. } => {
                assert_eq!(index, 1);
                assert_eq!(kind, "server");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_misspelled_field_is_error() {
        let toml = r#"
            [[component]]
            kind = "mod_settings"
            ms_per_tik = 20
        "#;

        let err = MissionConfig::from_str(toml).unwrap().into_mission().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidComponent { index: 0, .. }));
    }

    #[test]
    fn test_non_finite_placement_fails_render() {
        let toml = r#"
            [[component]]
            kind = "mod_settings"

            [[component]]
            kind = "server"
            world_generator = { type = "flat_world" }

            [[component]]
            kind = "observer"
            placement = { x = nan, y = inf, z = -inf }
            regions = [{ name = "r", min = [0, 0, 0], max = [1, 1, 1] }]
        "#;

        let mut mission = MissionConfig::from_str(toml).unwrap().into_mission().unwrap();

        assert_eq!(
            mission.render(),
            Err(MissionError::Validation {
                component: ComponentKind::Agent,
                source: ValidationError::NonFinitePlacement {
                    agent: "Observer".to_string()
                },
            })
        );
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = MissionConfig::from_str("summary = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn test_config_to_toml() {
        let config = MissionConfig::from_str(&default_mission_toml()).unwrap();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("summary = \"Malmo Mission\""));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[[component]]"));

        let reparsed = MissionConfig::from_str(&toml).unwrap();
        assert_eq!(reparsed.components, config.components);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mission.toml");
        std::fs::write(&path, default_mission_toml()).unwrap();

        let config = MissionConfig::from_file(&path).unwrap();
        assert_eq!(config.components.len(), 4);

        let missing = MissionConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
