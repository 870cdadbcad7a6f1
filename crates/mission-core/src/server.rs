//! Server Handlers
//!
//! World generation, world decoration, and the conditions that end a
//! mission. Renders the `<ServerHandlers>` element; the enclosing
//! `<ServerSection>` is assembled by the mission because it also carries the
//! initial conditions.

use mission_markup::{Element, Fragment};
use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::coords::BlockPos;
use crate::error::{ComponentKind, RenderError, ValidationError};

/// Minecraft's classic superflat preset.
pub const DEFAULT_FLAT_GENERATOR: &str = "3;7,2*3,2;1;village";

fn default_flat_generator() -> String {
    DEFAULT_FLAT_GENERATOR.to_string()
}

/// How the world is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", deny_unknown_fields)]
pub enum WorldGenerator {
    /// Superflat world from a layer preset string
    FlatWorld {
        #[serde(default = "default_flat_generator")]
        generator_string: String,
        #[serde(default)]
        force_reset: bool,
    },
    /// Standard terrain, optionally seeded
    DefaultWorld {
        #[serde(default)]
        seed: Option<String>,
        #[serde(default)]
        force_reset: bool,
    },
}

impl WorldGenerator {
    /// A flat world with the default preset.
    pub fn flat() -> Self {
        WorldGenerator::FlatWorld {
            generator_string: default_flat_generator(),
            force_reset: false,
        }
    }

    /// A flat world with a custom preset.
    pub fn flat_with(generator_string: impl Into<String>) -> Self {
        WorldGenerator::FlatWorld {
            generator_string: generator_string.into(),
            force_reset: false,
        }
    }

    /// Standard terrain with a random seed.
    pub fn default_world() -> Self {
        WorldGenerator::DefaultWorld {
            seed: None,
            force_reset: false,
        }
    }

    /// Forces the world to be regenerated even if one is already loaded.
    pub fn with_force_reset(mut self, reset: bool) -> Self {
        match &mut self {
            WorldGenerator::FlatWorld { force_reset, .. }
            | WorldGenerator::DefaultWorld { force_reset, .. } => *force_reset = reset,
        }
        self
    }

    fn to_element(&self) -> Element {
        match self {
            WorldGenerator::FlatWorld {
                generator_string,
                force_reset,
            } => Element::new("FlatWorldGenerator")
                .attr("generatorString", generator_string)
                .attr("forceReset", force_reset),
            WorldGenerator::DefaultWorld { seed, force_reset } => {
                Element::new("DefaultWorldGenerator")
                    .attr_opt("seed", seed.as_ref())
                    .attr("forceReset", force_reset)
            }
        }
    }
}

/// A block placement drawn into the world before the mission starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", deny_unknown_fields)]
pub enum Decorator {
    /// One block
    DrawBlock { at: BlockPos, block: String },
    /// A filled box between two corners, inclusive
    DrawCuboid {
        from: BlockPos,
        to: BlockPos,
        block: String,
    },
}

impl Decorator {
    /// Creates a single-block decorator.
    pub fn block(at: impl Into<BlockPos>, block: impl Into<String>) -> Self {
        Decorator::DrawBlock {
            at: at.into(),
            block: block.into(),
        }
    }

    /// Creates a cuboid decorator.
    pub fn cuboid(from: impl Into<BlockPos>, to: impl Into<BlockPos>, block: impl Into<String>) -> Self {
        Decorator::DrawCuboid {
            from: from.into(),
            to: to.into(),
            block: block.into(),
        }
    }

    fn block_type(&self) -> &str {
        match self {
            Decorator::DrawBlock { block, .. } | Decorator::DrawCuboid { block, .. } => block,
        }
    }

    fn to_element(&self) -> Element {
        match self {
            Decorator::DrawBlock { at, block } => at.to_element("DrawBlock").attr("type", block),
            Decorator::DrawCuboid { from, to, block } => Element::new("DrawCuboid")
                .attr("x1", from.x)
                .attr("y1", from.y)
                .attr("z1", from.z)
                .attr("x2", to.x)
                .attr("y2", to.y)
                .attr("z2", to.z)
                .attr("type", block),
        }
    }
}

/// End the mission after a fixed amount of game time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeLimit {
    /// Milliseconds of game time; must be at least 1
    pub time_limit_ms: i64,
    /// Shown to agents when the mission ends this way
    #[serde(default)]
    pub description: Option<String>,
}

impl TimeLimit {
    /// Creates a time limit with no description.
    pub fn new(time_limit_ms: i64) -> Self {
        Self {
            time_limit_ms,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// End the mission as soon as any agent finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentFinishes {
    /// Shown to agents when the mission ends this way
    pub description: Option<String>,
}

impl AgentFinishes {
    /// Creates the condition with no description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// World generation, decoration, and termination for one mission.
///
/// Each quit condition is an `Option`, so a mission carries at most one of
/// each kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerHandlerSet {
    /// Required at render time
    pub world_generator: Option<WorldGenerator>,
    /// Drawn in order
    pub decorators: Vec<Decorator>,
    pub time_limit: Option<TimeLimit>,
    pub quit_when_any_agent_finishes: Option<AgentFinishes>,
}

impl ServerHandlerSet {
    /// Creates an empty handler set. A world generator must be added before
    /// rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler set for a default flat world.
    pub fn flat_world() -> Self {
        Self::new().with_world_generator(WorldGenerator::flat())
    }

    /// Sets the world generator.
    pub fn with_world_generator(mut self, generator: WorldGenerator) -> Self {
        self.world_generator = Some(generator);
        self
    }

    /// Appends a decorator.
    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Sets the time limit, replacing any earlier one.
    pub fn with_time_limit(mut self, time_limit: TimeLimit) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets the any-agent-finishes condition, replacing any earlier one.
    pub fn with_quit_when_any_agent_finishes(mut self, condition: AgentFinishes) -> Self {
        self.quit_when_any_agent_finishes = Some(condition);
        self
    }

    /// Checks field ranges. A missing world generator is reported by
    /// `render`, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(limit) = &self.time_limit {
            if limit.time_limit_ms < 1 {
                return Err(ValidationError::InvalidTimeLimit(limit.time_limit_ms));
            }
        }
        if self.decorators.iter().any(|d| d.block_type().trim().is_empty()) {
            return Err(ValidationError::EmptyBlockType);
        }
        Ok(())
    }
}

impl Container for ServerHandlerSet {
    fn kind(&self) -> ComponentKind {
        ComponentKind::ServerHandlers
    }

    fn render(&self) -> Result<Fragment, RenderError> {
        let generator = self
            .world_generator
            .as_ref()
            .ok_or(RenderError::MissingComponent(ComponentKind::WorldGenerator))?;
        self.validate()?;

        let decorator = (!self.decorators.is_empty()).then(|| {
            Element::new("DrawingDecorator")
                .fragment(self.decorators.iter().map(Decorator::to_element).collect())
        });

        let time_up = self.time_limit.as_ref().map(|limit| {
            Element::new("ServerQuitFromTimeUp")
                .attr("timeLimitMs", limit.time_limit_ms)
                .attr_opt("description", limit.description.as_ref())
        });

        let agent_finishes = self.quit_when_any_agent_finishes.as_ref().map(|quit| {
            Element::new("ServerQuitWhenAnyAgentFinishes")
                .attr_opt("description", quit.description.as_ref())
        });

        let handlers = Element::new("ServerHandlers")
            .child(generator.to_element())
            .child_opt(decorator)
            .child_opt(time_up)
            .child_opt(agent_finishes);
        Ok(handlers.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_world_generator() {
        assert_eq!(
            ServerHandlerSet::new().render(),
            Err(RenderError::MissingComponent(ComponentKind::WorldGenerator))
        );
    }

    #[test]
    fn test_flat_world_only() {
        let fragment = ServerHandlerSet::flat_world().render().unwrap();
        assert_eq!(
            fragment.to_string(),
            r#"<ServerHandlers><FlatWorldGenerator generatorString="3;7,2*3,2;1;village" forceReset="false"/></ServerHandlers>"#
        );
    }

    #[test]
    fn test_default_world_with_seed() {
        let generator = WorldGenerator::DefaultWorld {
            seed: Some("1234".to_string()),
            force_reset: false,
        }
        .with_force_reset(true);
        let fragment = ServerHandlerSet::new()
            .with_world_generator(generator)
            .render()
            .unwrap();
        assert_eq!(
            fragment.to_string(),
            r#"<ServerHandlers><DefaultWorldGenerator seed="1234" forceReset="true"/></ServerHandlers>"#
        );
    }

    #[test]
    fn test_default_world_without_seed() {
        let fragment = ServerHandlerSet::new()
            .with_world_generator(WorldGenerator::default_world())
            .render()
            .unwrap();
        assert_eq!(
            fragment.to_string(),
            r#"<ServerHandlers><DefaultWorldGenerator forceReset="false"/></ServerHandlers>"#
        );
    }

    #[test]
    fn test_flat_world_custom_preset() {
        let generator = WorldGenerator::flat_with("3;7,59*1,3*3,2;1").with_force_reset(true);
        let fragment = ServerHandlerSet::new()
            .with_world_generator(generator)
            .render()
            .unwrap();
        assert_eq!(
            fragment.to_string(),
            r#"<ServerHandlers><FlatWorldGenerator generatorString="3;7,59*1,3*3,2;1" forceReset="true"/></ServerHandlers>"#
        );
    }

    #[test]
    fn test_time_limit_without_description() {
        let fragment = ServerHandlerSet::flat_world()
            .with_time_limit(TimeLimit::new(60000))
            .render()
            .unwrap();
        let handlers = &fragment.elements()[0];
        let quit = handlers.find_child("ServerQuitFromTimeUp").unwrap();
        assert_eq!(quit.attribute("timeLimitMs"), Some("60000"));
        assert_eq!(quit.attribute("description"), None);
    }

    #[test]
    fn test_quit_conditions_with_descriptions() {
        let fragment = ServerHandlerSet::flat_world()
            .with_time_limit(TimeLimit::new(1000).with_description("out of time"))
            .with_quit_when_any_agent_finishes(AgentFinishes::new().with_description("done"))
            .render()
            .unwrap();
        let xml = fragment.to_string();
        assert!(xml.contains(r#"<ServerQuitFromTimeUp timeLimitMs="1000" description="out of time"/>"#));
        assert!(xml.contains(r#"<ServerQuitWhenAnyAgentFinishes description="done"/>"#));
    }

    #[test]
    fn test_agent_finishes_without_description() {
        let fragment = ServerHandlerSet::flat_world()
            .with_quit_when_any_agent_finishes(AgentFinishes::new())
            .render()
            .unwrap();
        assert!(fragment.to_string().contains("<ServerQuitWhenAnyAgentFinishes/>"));
    }

    #[test]
    fn test_handler_order() {
        let fragment = ServerHandlerSet::flat_world()
            .with_quit_when_any_agent_finishes(AgentFinishes::new())
            .with_time_limit(TimeLimit::new(5))
            .with_decorator(Decorator::block([0, 1, 0], "stone"))
            .render()
            .unwrap();
        let names: Vec<_> = fragment.elements()[0]
            .child_elements()
            .map(|e| e.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "FlatWorldGenerator",
                "DrawingDecorator",
                "ServerQuitFromTimeUp",
                "ServerQuitWhenAnyAgentFinishes",
            ]
        );
    }

    #[test]
    fn test_decorators_render_in_order() {
        let fragment = ServerHandlerSet::flat_world()
            .with_decorator(Decorator::cuboid([-2, 4, -2], [2, 4, 2], "glass"))
            .with_decorator(Decorator::block([0, 5, 0], "diamond_block"))
            .render()
            .unwrap();
        let xml = fragment.to_string();
        assert!(xml.contains(
            r#"<DrawingDecorator><DrawCuboid x1="-2" y1="4" z1="-2" x2="2" y2="4" z2="2" type="glass"/><DrawBlock x="0" y="5" z="0" type="diamond_block"/></DrawingDecorator>"#
        ));
    }

    #[test]
    fn test_invalid_time_limit() {
        assert_eq!(
            ServerHandlerSet::flat_world()
                .with_time_limit(TimeLimit::new(0))
                .render(),
            Err(RenderError::Validation(ValidationError::InvalidTimeLimit(0)))
        );
    }

    #[test]
    fn test_empty_block_type() {
        assert_eq!(
            ServerHandlerSet::flat_world()
                .with_decorator(Decorator::block([0, 0, 0], " "))
                .validate(),
            Err(ValidationError::EmptyBlockType)
        );
    }

    #[test]
    fn test_description_is_escaped() {
        let fragment = ServerHandlerSet::flat_world()
            .with_time_limit(TimeLimit::new(10).with_description("<fast> & \"furious\""))
            .render()
            .unwrap();
        assert!(fragment
            .to_string()
            .contains(r#"description="&lt;fast&gt; &amp; &quot;furious&quot;""#));
    }

    #[test]
    fn test_world_generator_serialization() {
        let json = serde_json::to_string(&WorldGenerator::flat()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"flat_world","generator_string":"3;7,2*3,2;1;village","force_reset":false}"#
        );
        let parsed: WorldGenerator = serde_json::from_str(r#"{"type":"flat_world"}"#).unwrap();
        assert_eq!(parsed, WorldGenerator::flat());
    }
}
