use serde::{Deserialize, Serialize};

/// A vertical edge of a door leaf, seen from the exterior face.
///
/// Used both for the hinge side of a leaf and for the edge a lock, handle or
/// bolt is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// X coordinate of this edge on a leaf of the given width.
    pub fn x_on(self, width: f64) -> f64 {
        match self {
            Edge::Left => 0.0,
            Edge::Right => width,
        }
    }

    /// X coordinate at `inset` millimetres in from this edge.
    pub fn x_inset(self, width: f64, inset: f64) -> f64 {
        match self {
            Edge::Left => inset,
            Edge::Right => width - inset,
        }
    }

    /// +1 for the left edge, -1 for the right edge. Rotations that face
    /// toward or away from an edge are mirrored with this sign.
    pub fn sign(self) -> f64 {
        match self {
            Edge::Left => 1.0,
            Edge::Right => -1.0,
        }
    }

    /// Unit X direction pointing from this edge into the leaf.
    pub fn inward(self) -> f64 {
        self.sign()
    }
}

/// Which way the leaf swings relative to the exterior face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningDirection {
    Inward,
    Outward,
}

/// Dimensions and handing of a single door leaf. Lengths are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorLeafConfig {
    pub height: f64,
    pub width: f64,
    pub leaf_thickness: f64,
    pub hinge_side: Edge,
    pub opening_direction: OpeningDirection,
}

impl DoorLeafConfig {
    pub fn new(height: f64, width: f64, leaf_thickness: f64, hinge_side: Edge) -> Self {
        Self {
            height,
            width,
            leaf_thickness,
            hinge_side,
            opening_direction: OpeningDirection::Inward,
        }
    }

    pub fn with_opening_direction(mut self, direction: OpeningDirection) -> Self {
        self.opening_direction = direction;
        self
    }

    /// The edge opposite the hinges, where locks, handles and bolts mount.
    pub fn opening_edge(&self) -> Edge {
        self.hinge_side.opposite()
    }

    /// The same leaf hung from the other edge.
    pub fn mirrored(&self) -> Self {
        Self {
            hinge_side: self.hinge_side.opposite(),
            ..*self
        }
    }
}
