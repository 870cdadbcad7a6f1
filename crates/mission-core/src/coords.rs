//! World Coordinates
//!
//! Integer block positions and floating-point agent placements.

use mission_markup::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer block position.
///
/// Serializes as a `[x, y, z]` array so configuration files stay short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// True when every axis of `self` is less than or equal to `other`.
    pub fn le_all(&self, other: &BlockPos) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// Writes this position as `x`/`y`/`z` attributes on a new element.
    pub fn to_element(&self, name: &'static str) -> Element {
        Element::new(name)
            .attr("x", self.x)
            .attr("y", self.y)
            .attr("z", self.z)
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<BlockPos> for [i32; 3] {
    fn from(pos: BlockPos) -> Self {
        [pos.x, pos.y, pos.z]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Where an agent starts, with facing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Placement {
    /// Creates a placement facing yaw 0, pitch 0.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Sets the facing.
    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// True when every coordinate and angle is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.z].iter().all(|v| v.is_finite())
            && self.yaw.is_finite()
            && self.pitch.is_finite()
    }

    /// The `<Placement>` element.
    pub fn to_element(&self) -> Element {
        Element::new("Placement")
            .attr("x", self.x)
            .attr("y", self.y)
            .attr("z", self.z)
            .attr("yaw", self.yaw)
            .attr("pitch", self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_from_array() {
        let pos: BlockPos = [1, -2, 3].into();
        assert_eq!(pos, BlockPos::new(1, -2, 3));
        assert_eq!(pos.to_string(), "(1, -2, 3)");
    }

    #[test]
    fn test_block_pos_serializes_as_array() {
        let pos = BlockPos::new(4, 5, 6);
        assert_eq!(serde_json::to_string(&pos).unwrap(), "[4,5,6]");
        let parsed: BlockPos = serde_json::from_str("[7,8,9]").unwrap();
        assert_eq!(parsed, BlockPos::new(7, 8, 9));
    }

    #[test]
    fn test_le_all() {
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(10, 10, 10);
        assert!(a.le_all(&b));
        assert!(a.le_all(&a));
        assert!(!b.le_all(&a));
        assert!(!BlockPos::new(0, 11, 0).le_all(&b));
    }

    #[test]
    fn test_block_pos_element() {
        assert_eq!(
            BlockPos::new(0, 4, -1).to_element("min").to_string(),
            r#"<min x="0" y="4" z="-1"/>"#
        );
    }

    #[test]
    fn test_placement_is_finite() {
        assert!(Placement::new(0.5, 4.0, -0.5).facing(180.0, -90.0).is_finite());
        assert!(!Placement::new(f64::NAN, 4.0, 0.5).is_finite());
        assert!(!Placement::new(0.5, f64::INFINITY, 0.5).is_finite());
        assert!(!Placement::new(0.5, 4.0, 0.5).facing(f32::NEG_INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_placement_element() {
        let placement = Placement::new(0.5, 4.0, 0.5).facing(90.0, 30.0);
        assert_eq!(
            placement.to_element().to_string(),
            r#"<Placement x="0.5" y="4" z="0.5" yaw="90" pitch="30"/>"#
        );
    }
}
