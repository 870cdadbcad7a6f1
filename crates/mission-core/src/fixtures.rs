//! Sample missions for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // mission-core = { path = "../mission-core", features = ["test-fixtures"] }
//!
//! use mission_core::fixtures;
//!
//! let mut mission = fixtures::round_trip_mission();
//! let xml = mission.render().unwrap();
//! ```

use crate::{Mission, MissionConfig, ModSettings, ObservedRegion, ObserverAgent, ServerHandlerSet, TimeLimit};

/// The sample mission file, as text.
pub const SAMPLE_MISSION_TOML: &str = include_str!("../tests/fixtures/sample_mission.toml");

/// Returns the mission described by [`SAMPLE_MISSION_TOML`].
///
/// Same content as [`round_trip_mission`], loaded through configuration.
pub fn sample_mission() -> Mission {
    MissionConfig::from_str(SAMPLE_MISSION_TOML)
        .and_then(MissionConfig::into_mission)
        .unwrap_or_else(|e| panic!("Failed to load sample mission: {}", e))
}

/// Builds the reference mission in code:
/// - ModSettings with 50 ms per tick
/// - A flat world ending after 60000 ms
/// - One observer watching `[0,0,0]..[10,10,10]`
/// - Summary "Test Mission"
pub fn round_trip_mission() -> Mission {
    Mission::new([
        ModSettings::new().with_ms_per_tick(50).into(),
        ServerHandlerSet::flat_world()
            .with_time_limit(TimeLimit::new(60000))
            .into(),
        ObserverAgent::new("Watcher")
            .with_region(ObservedRegion::from_bounds("cube", [0, 0, 0, 10, 10, 10]))
            .into(),
    ])
    .with_summary("Test Mission")
}

/// An observer named `name` with one small region.
pub fn sample_observer(name: &str) -> ObserverAgent {
    ObserverAgent::new(name).with_region(ObservedRegion::from_bounds(
        format!("{}_grid", name.to_lowercase()),
        [-1, -1, -1, 1, 1, 1],
    ))
}
