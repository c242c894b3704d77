//! Node element - a point in the global 2D frame

use serde::{Deserialize, Serialize};

/// A node in the planar frame model.
///
/// Restraints, springs and prescribed displacements live directly on the node
/// (rather than in a separate support type) because every one of them is
/// expressed in the node's own support-local axes and is meaningless without
/// the node's geometry — see `supportAngle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate in the global frame
    pub x: f64,
    /// Y coordinate in the global frame
    pub y: f64,

    /// Translation-X restrained
    pub rx: bool,
    /// Translation-Y restrained
    pub ry: bool,
    /// Rotation-Z restrained
    pub rz: bool,
    /// Rotation of the support-local frame relative to global (radians)
    pub support_angle: f64,

    /// Elastic spring stiffness along support-local X
    pub kx: f64,
    /// Elastic spring stiffness along support-local Y
    pub ky: f64,
    /// Elastic rotational spring stiffness about Z
    pub kz: f64,

    /// Prescribed displacement along support-local X (only meaningful if `rx`)
    pub dx: f64,
    /// Prescribed displacement along support-local Y (only meaningful if `ry`)
    pub dy: f64,
    /// Prescribed rotation about Z (only meaningful if `rz`)
    pub drz: f64,

    /// Nodal hinge: releases rotational continuity for every incident member but one
    pub hinge: bool,

    /// Internal ID (dense, stable for a solve) assigned when the node is added to a model
    #[serde(skip)]
    pub(crate) id: Option<usize>,
}

impl Node {
    /// Create a free (unrestrained) node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rx: false,
            ry: false,
            rz: false,
            support_angle: 0.0,
            kx: 0.0,
            ky: 0.0,
            kz: 0.0,
            dx: 0.0,
            dy: 0.0,
            drz: 0.0,
            hinge: false,
            id: None,
        }
    }

    /// Fully fixed support (all three DOFs restrained)
    pub fn fixed(x: f64, y: f64) -> Self {
        Self {
            rx: true,
            ry: true,
            rz: true,
            ..Self::new(x, y)
        }
    }

    /// Pinned support (translations restrained, rotation free)
    pub fn pinned(x: f64, y: f64) -> Self {
        Self {
            rx: true,
            ry: true,
            ..Self::new(x, y)
        }
    }

    /// Roller restrained in global Y only
    pub fn roller_y(x: f64, y: f64) -> Self {
        Self {
            ry: true,
            ..Self::new(x, y)
        }
    }

    /// Roller restrained in global X only
    pub fn roller_x(x: f64, y: f64) -> Self {
        Self {
            rx: true,
            ..Self::new(x, y)
        }
    }

    /// Rotate the support-local frame by `angle` radians (oblique support)
    pub fn with_support_angle(mut self, angle: f64) -> Self {
        self.support_angle = angle;
        self
    }

    /// Attach elastic springs (support-local axes)
    pub fn with_springs(mut self, kx: f64, ky: f64, kz: f64) -> Self {
        self.kx = kx;
        self.ky = ky;
        self.kz = kz;
        self
    }

    /// Attach prescribed displacements for the fixed DOFs
    pub fn with_prescribed_displacement(mut self, dx: f64, dy: f64, drz: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self.drz = drz;
        self
    }

    /// Mark as a nodal hinge
    pub fn with_hinge(mut self) -> Self {
        self.hinge = true;
        self
    }

    /// Coordinates as a 2-element array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Euclidean distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether any DOF at this node is restrained
    pub fn is_supported(&self) -> bool {
        self.rx || self.ry || self.rz
    }

    /// Whether exactly one of the two translational restraints is set —
    /// the condition under which an oblique-support rotation applies (see `crate::rotation`)
    pub fn is_oblique(&self) -> bool {
        self.rx != self.ry && self.support_angle != 0.0
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_between_nodes() {
        let n1 = Node::new(0.0, 0.0);
        let n2 = Node::new(3.0, 4.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn oblique_detection_requires_single_restraint_and_nonzero_angle() {
        let n = Node::roller_y(10.0, 0.0).with_support_angle(std::f64::consts::FRAC_PI_4);
        assert!(n.is_oblique());
        let n2 = Node::pinned(0.0, 0.0).with_support_angle(std::f64::consts::FRAC_PI_4);
        assert!(!n2.is_oblique());
    }
}
