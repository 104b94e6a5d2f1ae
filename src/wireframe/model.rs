//! Fixed point-and-edge models for the wireframe projector

use crate::rasterizer::Vec3;

/// Feature group an edge belongs to (selects its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeGroup {
    Outline,
    EyeSocket,
    Teeth,
}

/// A line between two vertices (indices into the vertex list)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub group: EdgeGroup,
}

impl Edge {
    pub const fn new(a: usize, b: usize, group: EdgeGroup) -> Self {
        Self { a, b, group }
    }
}

/// Immutable wireframe: vertices, edges, and the vertices marked as sockets
#[derive(Debug, Clone)]
pub struct WireModel {
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    sockets: Vec<usize>,
}

impl WireModel {
    pub fn new(vertices: Vec<Vec3>, edges: Vec<Edge>, sockets: Vec<usize>) -> Self {
        Self { vertices, edges, sockets }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices that get a filled socket marker
    pub fn sockets(&self) -> &[usize] {
        &self.sockets
    }

    /// Simplified skull, 25 vertices, roughly 40 units tall
    pub fn skull() -> Self {
        let vertices = vec![
            // Crown
            Vec3::new(0.0, -20.0, 0.0),
            Vec3::new(-10.0, -15.0, 5.0),
            Vec3::new(10.0, -15.0, 5.0),
            Vec3::new(-10.0, -15.0, -5.0),
            Vec3::new(10.0, -15.0, -5.0),
            // Temples
            Vec3::new(-15.0, -5.0, 8.0),
            Vec3::new(15.0, -5.0, 8.0),
            Vec3::new(-15.0, -5.0, -8.0),
            Vec3::new(15.0, -5.0, -8.0),
            // Eye sockets (outer left, inner left, inner right, outer right)
            Vec3::new(-8.0, -2.0, 12.0),
            Vec3::new(-4.0, -2.0, 12.0),
            Vec3::new(4.0, -2.0, 12.0),
            Vec3::new(8.0, -2.0, 12.0),
            // Nose
            Vec3::new(0.0, 2.0, 15.0),
            Vec3::new(-2.0, 0.0, 12.0),
            Vec3::new(2.0, 0.0, 12.0),
            // Jaw
            Vec3::new(-12.0, 8.0, 8.0),
            Vec3::new(12.0, 8.0, 8.0),
            Vec3::new(-8.0, 12.0, 10.0),
            Vec3::new(8.0, 12.0, 10.0),
            Vec3::new(0.0, 10.0, 12.0),
            // Teeth
            Vec3::new(-6.0, 12.0, 12.0),
            Vec3::new(-2.0, 12.0, 12.0),
            Vec3::new(2.0, 12.0, 12.0),
            Vec3::new(6.0, 12.0, 12.0),
        ];

        use EdgeGroup::*;
        let pairs: &[(usize, usize, EdgeGroup)] = &[
            // Crown and temples
            (0, 1, Outline), (0, 2, Outline), (0, 3, Outline), (0, 4, Outline),
            (1, 2, Outline), (3, 4, Outline), (1, 3, Outline), (2, 4, Outline),
            (1, 5, Outline), (2, 6, Outline), (3, 7, Outline), (4, 8, Outline),
            (5, 6, Outline), (7, 8, Outline), (5, 7, Outline), (6, 8, Outline),
            // Eyes
            (9, 10, EyeSocket), (11, 12, EyeSocket),
            (5, 9, Outline), (10, 14, Outline), (11, 15, Outline), (6, 12, Outline),
            // Nose
            (13, 14, Outline), (13, 15, Outline), (14, 15, Outline),
            // Jaw
            (5, 16, Outline), (6, 17, Outline),
            (16, 17, Outline), (16, 18, Outline), (17, 19, Outline),
            (18, 19, Outline), (18, 20, Outline), (19, 20, Outline),
            // Teeth
            (20, 21, Teeth), (21, 22, Teeth), (22, 23, Teeth), (23, 24, Teeth), (24, 20, Teeth),
            (18, 21, Outline), (19, 24, Outline),
        ];
        let edges = pairs.iter().map(|&(a, b, group)| Edge::new(a, b, group)).collect();

        Self::new(vertices, edges, vec![9, 12])
    }
}
