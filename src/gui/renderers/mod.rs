use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, PointRenderer, Renderer};
use nalgebra::Point3;

use std::f32::consts::TAU;

const RING_SEGMENTS: usize = 64;
const STAR_SIZE: f32 = 1.0;

pub struct CompoundRenderer {
    line_renderer: LineRenderer,
    point_renderer: PointRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        let mut point_renderer = PointRenderer::new();
        point_renderer.set_point_size(STAR_SIZE);

        CompoundRenderer {
            line_renderer: LineRenderer::new(),
            point_renderer,
        }
    }

    /// Draws a circle of the given radius around the origin, in the plane of
    /// the orbits.
    pub fn draw_ring(&mut self, radius: f32, color: Point3<f32>) {
        draw_path(
            &mut self.line_renderer,
            ring_points(radius, RING_SEGMENTS),
            &color,
        );
    }

    pub fn draw_stars(&mut self, stars: &[Point3<f32>], color: Point3<f32>) {
        for star in stars {
            self.point_renderer.draw_point(*star, color);
        }
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.point_renderer.render(pass, camera);
        self.line_renderer.render(pass, camera);
    }
}

/// Evenly spaced points around a circle in the y = 0 plane. The first point
/// is repeated at the end so the path closes.
fn ring_points(radius: f32, num_segments: usize) -> impl Iterator<Item = Point3<f32>> {
    assert!(
        num_segments >= 3,
        "A ring needs at least three segments, num_segments was {}",
        num_segments
    );
    (0..=num_segments)
        .map(move |i| (i as f32) / (num_segments as f32) * TAU)
        .map(move |theta| Point3::new(radius * theta.cos(), 0.0, radius * theta.sin()))
}

fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}
