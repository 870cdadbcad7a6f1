//! Mission Composition
//!
//! A [`Mission`] collects components, checks that the required ones are
//! present, and renders the complete `<Mission>` document.
//!
//! # Example
//!
//! ```
//! use mission_core::{Mission, ModSettings, ObserverAgent, ObservedRegion, ServerHandlerSet, TimeLimit};
//!
//! let mut mission = Mission::new([
//!     ModSettings::new().with_ms_per_tick(50).into(),
//!     ServerHandlerSet::flat_world().with_time_limit(TimeLimit::new(60000)).into(),
//!     ObserverAgent::new("Watcher")
//!         .with_region(ObservedRegion::from_bounds("floor", [0, 0, 0, 10, 10, 10]))
//!         .into(),
//! ])
//! .with_summary("Test Mission");
//!
//! let xml = mission.render().unwrap();
//! assert!(xml.contains("<Summary>Test Mission</Summary>"));
//! assert!(xml.contains(r#"timeLimitMs="60000""#));
//! ```

use mission_markup::{Document, Element, Fragment, WriteOptions};
use std::fmt;
use std::path::Path;

use crate::agent::{AgentDescriptor, ObserverAgent};
use crate::config::{ConfigError, MissionConfig};
use crate::container::Container;
use crate::error::{ComponentKind, MissionError};
use crate::initial::InitialConditions;
use crate::mod_settings::ModSettings;
use crate::server::ServerHandlerSet;

/// Summary used when none is given.
pub const DEFAULT_SUMMARY: &str = "Malmo Mission";

/// Default namespace of mission documents.
pub const MALMO_NAMESPACE: &str = "http://ProjectMalmo.microsoft.com";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Value of `xsi:schemaLocation` on the root element.
pub const SCHEMA_LOCATION: &str = "http://ProjectMalmo.microsoft.com Mission.xsd";

/// Anything a mission can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionComponent {
    ModSettings(ModSettings),
    Server(ServerHandlerSet),
    InitialConditions(InitialConditions),
    Agent(AgentDescriptor),
}

impl MissionComponent {
    /// The slot this component fills.
    pub fn kind(&self) -> ComponentKind {
        match self {
            MissionComponent::ModSettings(_) => ComponentKind::ModSettings,
            MissionComponent::Server(_) => ComponentKind::ServerHandlers,
            MissionComponent::InitialConditions(_) => ComponentKind::InitialConditions,
            MissionComponent::Agent(_) => ComponentKind::Agent,
        }
    }
}

impl From<ModSettings> for MissionComponent {
    fn from(settings: ModSettings) -> Self {
        MissionComponent::ModSettings(settings)
    }
}

impl From<ServerHandlerSet> for MissionComponent {
    fn from(server: ServerHandlerSet) -> Self {
        MissionComponent::Server(server)
    }
}

impl From<InitialConditions> for MissionComponent {
    fn from(conditions: InitialConditions) -> Self {
        MissionComponent::InitialConditions(conditions)
    }
}

impl From<AgentDescriptor> for MissionComponent {
    fn from(agent: AgentDescriptor) -> Self {
        MissionComponent::Agent(agent)
    }
}

impl From<ObserverAgent> for MissionComponent {
    fn from(observer: ObserverAgent) -> Self {
        MissionComponent::Agent(observer.into())
    }
}

/// Non-fatal problems noticed while building a mission. The offending
/// argument is discarded and construction carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionWarning {
    /// A singleton slot was already filled; the later component was ignored
    DuplicateComponent(ComponentKind),
    /// A configuration entry of a kind this crate does not know
    UnknownArgument { kind: String },
}

impl fmt::Display for MissionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionWarning::DuplicateComponent(kind) => {
                write!(f, "{} instance already provided, ignoring new instance", kind)
            }
            MissionWarning::UnknownArgument { kind } => {
                write!(f, "unknown argument type '{}', ignoring", kind)
            }
        }
    }
}

/// Where a mission is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    /// Accepting configuration; nothing rendered yet
    Building,
    /// Rendered; `render` returns the cached document
    Rendered,
}

/// One mission: its components, its metadata, and the cached document.
///
/// Singleton components (mod settings, server handlers, initial conditions)
/// are first-wins. Agents accumulate in order. A `Mission` is not meant to be
/// built from several threads at once: slot adoption is a plain
/// check-then-set.
#[derive(Debug, Clone)]
pub struct Mission {
    summary: String,
    description: Option<String>,
    mod_settings: Option<ModSettings>,
    server: Option<ServerHandlerSet>,
    initial_conditions: Option<InitialConditions>,
    agents: Vec<AgentDescriptor>,
    warnings: Vec<MissionWarning>,
    write_options: WriteOptions,
    rendered: Option<String>,
}

impl Default for Mission {
    fn default() -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            description: None,
            mod_settings: None,
            server: None,
            initial_conditions: None,
            agents: Vec::new(),
            warnings: Vec::new(),
            write_options: WriteOptions::default(),
            rendered: None,
        }
    }
}

impl Mission {
    /// Builds a mission from components, in order.
    pub fn new<I>(components: I) -> Self
    where
        I: IntoIterator<Item = MissionComponent>,
    {
        let mut mission = Self::default();
        for component in components {
            mission.adopt(component);
        }
        mission
    }

    /// Builds a mission from a TOML file.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        MissionConfig::from_file(path)?.into_mission()
    }

    /// Adds one more component under the same first-wins rules.
    pub fn with_component(mut self, component: impl Into<MissionComponent>) -> Self {
        self.adopt(component.into());
        self
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self.rendered = None;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self.rendered = None;
        self
    }

    /// Sets the formatting `render` uses.
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self.rendered = None;
        self
    }

    pub(crate) fn adopt(&mut self, component: MissionComponent) {
        self.rendered = None;
        let kind = component.kind();
        let adopted = match component {
            MissionComponent::ModSettings(settings) => fill_slot(&mut self.mod_settings, settings),
            MissionComponent::Server(server) => fill_slot(&mut self.server, server),
            MissionComponent::InitialConditions(conditions) => {
                fill_slot(&mut self.initial_conditions, conditions)
            }
            MissionComponent::Agent(agent) => {
                tracing::debug!(agent = agent.name(), "adding agent");
                self.agents.push(agent);
                true
            }
        };
        if !adopted {
            self.warn(MissionWarning::DuplicateComponent(kind));
        }
    }

    pub(crate) fn record_unknown(&mut self, kind: impl Into<String>) {
        self.warn(MissionWarning::UnknownArgument { kind: kind.into() });
    }

    fn warn(&mut self, warning: MissionWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// The `<Summary>` text.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The `<Description>` text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn mod_settings(&self) -> Option<&ModSettings> {
        self.mod_settings.as_ref()
    }

    pub fn server(&self) -> Option<&ServerHandlerSet> {
        self.server.as_ref()
    }

    pub fn initial_conditions(&self) -> Option<&InitialConditions> {
        self.initial_conditions.as_ref()
    }

    /// Agents in insertion order.
    pub fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    /// Warnings recorded while building, oldest first.
    pub fn warnings(&self) -> &[MissionWarning] {
        &self.warnings
    }

    /// Formatting used by `render`.
    pub fn write_options(&self) -> &WriteOptions {
        &self.write_options
    }

    pub fn state(&self) -> MissionState {
        if self.rendered.is_some() {
            MissionState::Rendered
        } else {
            MissionState::Building
        }
    }

    /// Validates every component and assembles the document tree.
    ///
    /// Fails before producing anything if mod settings or server handlers
    /// are missing, or if any component fails validation.
    pub fn to_document(&self) -> Result<Document, MissionError> {
        let mod_settings = self
            .mod_settings
            .as_ref()
            .ok_or(MissionError::MissingComponent(ComponentKind::ModSettings))?;
        let server = self
            .server
            .as_ref()
            .ok_or(MissionError::MissingComponent(ComponentKind::ServerHandlers))?;

        let mod_settings = render_component(mod_settings)?;
        let server_section = self.server_section(server)?;
        let agents: Fragment = self
            .agents
            .iter()
            .map(render_component)
            .collect::<Result<_, _>>()?;

        let about = Element::new("About")
            .child(Element::with_text("Summary", &self.summary))
            .child_opt(
                self.description
                    .as_ref()
                    .map(|d| Element::with_text("Description", d)),
            );

        let root = Element::new("Mission")
            .attr("xmlns", MALMO_NAMESPACE)
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xsi:schemaLocation", SCHEMA_LOCATION)
            .child(about)
            .fragment(mod_settings)
            .child(server_section)
            .fragment(agents);
        Ok(Document::new(root))
    }

    fn server_section(&self, server: &ServerHandlerSet) -> Result<Element, MissionError> {
        let initial = match &self.initial_conditions {
            Some(conditions) => render_component(conditions)?,
            None => Fragment::empty(),
        };
        let handlers = render_component(server)?;
        Ok(Element::new("ServerSection").fragment(initial).fragment(handlers))
    }

    /// Renders the mission, caching the result.
    ///
    /// Once rendered, later calls return the same string without
    /// re-validating until the mission is changed through a builder method.
    pub fn render(&mut self) -> Result<&str, MissionError> {
        let xml = match self.rendered.take() {
            Some(xml) => xml,
            None => {
                let xml = self.to_document()?.write(&self.write_options);
                tracing::debug!(
                    agents = self.agents.len(),
                    bytes = xml.len(),
                    "rendered mission"
                );
                xml
            }
        };
        Ok(self.rendered.insert(xml).as_str())
    }

    /// Renders with explicit formatting, bypassing the cache.
    pub fn render_with(&self, options: &WriteOptions) -> Result<String, MissionError> {
        Ok(self.to_document()?.write(options))
    }
}

fn fill_slot<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

fn render_component<C: Container>(component: &C) -> Result<Fragment, MissionError> {
    component
        .render()
        .map_err(|e| MissionError::from_render(component.kind(), e))
}
