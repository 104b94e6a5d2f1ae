//! Vector math for the wireframe projector

use std::ops::{Add, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Rotate a point around X, then Y, then Z
pub fn rotate_xyz(v: Vec3, rx: f32, ry: f32, rz: f32) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = v;

    // X axis (y/z plane)
    let (sin_x, cos_x) = rx.sin_cos();
    (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

    // Y axis (x/z plane)
    let (sin_y, cos_y) = ry.sin_cos();
    (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

    // Z axis (x/y plane)
    let (sin_z, cos_z) = rz.sin_cos();
    (x, y) = (x * cos_z - y * sin_z, x * sin_z + y * cos_z);

    Vec3 { x, y, z }
}

/// Screen-space vertex after perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub x: f32,
    pub y: f32,
    /// Rotated z, kept for depth sorting
    pub depth: f32,
}

/// Project a point with a fixed-distance perspective divide:
/// `screen = center + axis * scale * (distance / (distance + z))`
///
/// Returns None when the point sits on or behind the eye plane.
pub fn project(v: Vec3, center_x: f32, center_y: f32, scale: f32, distance: f32) -> Option<ProjectedVertex> {
    let denom = distance + v.z;
    if denom <= f32::EPSILON || !v.is_finite() {
        return None;
    }

    let factor = distance / denom;
    Some(ProjectedVertex {
        x: center_x + v.x * scale * factor,
        y: center_y + v.y * scale * factor,
        depth: v.z,
    })
}
