//! Handing rendered missions to a Malmo client.
//!
//! Only the seam lives here. A concrete launcher (socket, subprocess, test
//! double) implements [`SessionLauncher`].

use std::fmt;
use thiserror::Error;

use crate::error::MissionError;
use crate::mission::Mission;

/// Port a Malmo client listens on by default.
pub const DEFAULT_MALMO_PORT: u16 = 10000;

/// Address of a Malmo client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_MALMO_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Something that can start a session from mission markup.
pub trait SessionLauncher {
    /// Handle to the started session
    type Session;
    /// Failure reported by the launcher itself
    type Error: std::error::Error + 'static;

    /// Starts a session on `endpoint` running `markup`.
    fn accept(&mut self, markup: &str, endpoint: &Endpoint) -> Result<Self::Session, Self::Error>;
}

/// Failure from [`launch`].
#[derive(Debug, Error)]
pub enum LaunchError<E: std::error::Error + 'static> {
    /// The mission could not be rendered; the launcher was never called
    #[error("mission could not be rendered: {0}")]
    Render(#[from] MissionError),
    /// The launcher rejected the mission
    #[error("launcher failed: {0}")]
    Launcher(#[source] E),
}

/// Renders `mission` and passes the markup to `launcher`.
pub fn launch<L: SessionLauncher>(
    mission: &mut Mission,
    launcher: &mut L,
    endpoint: &Endpoint,
) -> Result<L::Session, LaunchError<L::Error>> {
    let markup = mission.render()?;
    tracing::info!(%endpoint, bytes = markup.len(), "launching mission");
    launcher.accept(markup, endpoint).map_err(LaunchError::Launcher)
}
