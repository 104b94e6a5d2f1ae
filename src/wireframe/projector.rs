//! Rotating wireframe projector
//!
//! Each tick rotates the model about X, Y then Z. Rendering projects with a
//! fixed-distance perspective divide and draws edges back-to-front
//! (painter's algorithm) with depth-based dimming.

use std::f32::consts::TAU;

use crate::rasterizer::{self, project, rotate_xyz, Canvas, Color, ProjectedVertex, Vec3};
use super::model::{Edge, EdgeGroup, WireModel};

/// Rotation angles in radians, each kept in [0, 2π)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    fn advance(&mut self, speed: Vec3) {
        self.x = wrap_angle(self.x + speed.x);
        self.y = wrap_angle(self.y + speed.y);
        self.z = wrap_angle(self.z + speed.z);
    }
}

/// Wrap into [0, 2π); rem_euclid can round up to exactly 2π for tiny negatives
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Projection and styling constants for the projector
#[derive(Debug, Clone)]
pub struct ProjectorSettings {
    /// Radians per tick around each axis
    pub rotation_speed: Vec3,
    /// Object units to pixels at z = 0
    pub scale: f32,
    /// Eye distance for the perspective divide
    pub distance: f32,
    pub base_color: Color,
    pub eye_color: Color,
    pub teeth_color: Color,
    pub line_thickness: i32,
    /// Depth at which edges reach minimum brightness
    pub depth_falloff: f32,
    /// Brightness floor for far edges
    pub min_brightness: f32,
    pub socket_color: Color,
    pub socket_radius: i32,
    pub caption: String,
    pub caption_color: Color,
    pub caption_glow: Color,
    /// Caption top, measured from the render center
    pub caption_offset_y: i32,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            rotation_speed: Vec3::new(0.0, 0.03, 0.0),
            scale: 3.0,
            distance: 50.0,
            base_color: Color::new(0, 255, 0),
            eye_color: Color::new(255, 50, 50),
            teeth_color: Color::new(255, 255, 50),
            line_thickness: 2,
            depth_falloff: 30.0,
            min_brightness: 0.3,
            socket_color: Color::new(100, 0, 0),
            socket_radius: 3,
            caption: "RETR0 SKULL".to_string(),
            caption_color: Color::new(0, 150, 0),
            caption_glow: Color::new(0, 50, 0),
            caption_offset_y: 60,
        }
    }
}

/// An edge ready to draw, with its projected endpoints
#[derive(Debug, Clone, Copy)]
pub struct DepthEdge {
    pub edge: Edge,
    /// Mean depth of the two endpoints
    pub depth: f32,
    pub from: ProjectedVertex,
    pub to: ProjectedVertex,
}

pub struct Projector {
    model: WireModel,
    settings: ProjectorSettings,
    rotation: RotationState,
    /// Rotated vertices; empty until the first tick
    transformed: Vec<Vec3>,
}

impl Projector {
    pub fn new(model: WireModel, settings: ProjectorSettings) -> Self {
        Self {
            model,
            settings,
            rotation: RotationState::default(),
            transformed: Vec::new(),
        }
    }

    /// Skull model with default settings
    pub fn skull() -> Self {
        Self::new(WireModel::skull(), ProjectorSettings::default())
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn transformed(&self) -> &[Vec3] {
        &self.transformed
    }

    pub fn set_rotation_speed(&mut self, x: f32, y: f32, z: f32) {
        self.settings.rotation_speed = Vec3::new(x, y, z);
    }

    /// Advance rotation one step and re-transform every vertex.
    /// Call once per frame.
    pub fn tick(&mut self) {
        self.rotation.advance(self.settings.rotation_speed);
        let RotationState { x, y, z } = self.rotation;
        self.transformed.clear();
        self.transformed
            .extend(self.model.vertices().iter().map(|&v| rotate_xyz(v, x, y, z)));
    }

    fn project_all(&self, center_x: f32, center_y: f32) -> Vec<Option<ProjectedVertex>> {
        self.transformed
            .iter()
            .map(|&v| project(v, center_x, center_y, self.settings.scale, self.settings.distance))
            .collect()
    }

    /// Drawable edges sorted back-to-front by mean endpoint depth
    pub fn depth_sorted_edges(&self, center_x: i32, center_y: i32) -> Vec<DepthEdge> {
        let projected = self.project_all(center_x as f32, center_y as f32);
        let lookup = |i: usize| projected.get(i).copied().flatten();

        let mut edges: Vec<DepthEdge> = self
            .model
            .edges()
            .iter()
            .filter_map(|&edge| {
                let from = lookup(edge.a)?;
                let to = lookup(edge.b)?;
                Some(DepthEdge {
                    edge,
                    depth: (from.depth + to.depth) / 2.0,
                    from,
                    to,
                })
            })
            .collect();

        edges.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        edges
    }

    fn edge_color(&self, group: EdgeGroup, depth: f32) -> Color {
        let base = match group {
            EdgeGroup::EyeSocket => self.settings.eye_color,
            EdgeGroup::Teeth => self.settings.teeth_color,
            EdgeGroup::Outline => self.settings.base_color,
        };
        let falloff = self.settings.depth_falloff.max(f32::EPSILON);
        let factor = (1.0 - depth.abs() / falloff).max(self.settings.min_brightness);
        base.shade(factor)
    }

    /// Draw the model centered at (center_x, center_y). No-op before the first tick.
    pub fn render(&self, canvas: &mut Canvas, center_x: i32, center_y: i32) {
        if self.transformed.is_empty() {
            return;
        }

        for de in self.depth_sorted_edges(center_x, center_y) {
            if !within_guard_band(&de.from, canvas) || !within_guard_band(&de.to, canvas) {
                continue;
            }
            let (x0, y0) = (de.from.x as i32, de.from.y as i32);
            let (x1, y1) = (de.to.x as i32, de.to.y as i32);
            // Endpoints within a pixel of each other collapse to nothing
            if (x1 - x0).abs() <= 1 && (y1 - y0).abs() <= 1 {
                continue;
            }
            let color = self.edge_color(de.edge.group, de.depth);
            canvas.draw_thick_line(x0, y0, x1, y1, self.settings.line_thickness, color);
        }

        self.draw_sockets(canvas, center_x, center_y);
        self.draw_caption(canvas, center_x, center_y);
    }

    fn draw_sockets(&self, canvas: &mut Canvas, center_x: i32, center_y: i32) {
        for &idx in self.model.sockets() {
            let Some(&v) = self.transformed.get(idx) else {
                continue;
            };
            let projected = project(v, center_x as f32, center_y as f32, self.settings.scale, self.settings.distance);
            if let Some(p) = projected.filter(|p| within_guard_band(p, canvas)) {
                canvas.draw_circle(p.x as i32, p.y as i32, self.settings.socket_radius, self.settings.socket_color);
            }
        }
    }

    fn draw_caption(&self, canvas: &mut Canvas, center_x: i32, center_y: i32) {
        let caption = &self.settings.caption;
        if caption.is_empty() {
            return;
        }
        let x = center_x - rasterizer::text_width(caption, 1) / 2;
        let y = center_y + self.settings.caption_offset_y;
        rasterizer::draw_text(canvas, caption, x + 1, y + 1, 1, self.settings.caption_glow);
        rasterizer::draw_text(canvas, caption, x, y, 1, self.settings.caption_color);
    }
}

/// Projected points further than this many canvas sizes off-screen are dropped
const GUARD_BAND: f32 = 4.0;

/// True when `p` lies close enough to the canvas to draw and to cast to i32
fn within_guard_band(p: &ProjectedVertex, canvas: &Canvas) -> bool {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let band = GUARD_BAND * w.max(h);
    (-band..=w + band).contains(&p.x) && (-band..=h + band).contains(&p.y)
}
