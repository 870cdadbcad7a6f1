//! The capability shared by every mission component.

use mission_markup::Fragment;

use crate::error::{ComponentKind, RenderError};

/// Anything that renders itself into mission markup.
///
/// Rendering validates first and never mutates the component, so calling it
/// repeatedly yields identical fragments. Optional components with nothing set
/// return an empty fragment.
pub trait Container {
    /// Which part of the mission this is, for error attribution.
    fn kind(&self) -> ComponentKind;

    /// Validates and renders this component.
    fn render(&self) -> Result<Fragment, RenderError>;
}
