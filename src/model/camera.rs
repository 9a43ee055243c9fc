use nalgebra::{Isometry3, Perspective3, Point3, Unit, Vector3};

use std::f32::consts::PI;

use crate::math::geometry::{clamp_norm, Ray, Spherical};

pub const DEFAULT_EYE: [f32; 3] = [0.0, 50.0, 100.0];
pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 200.0;
/// Radians of rotation per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.01;
/// Keeps the polar angle this far from either pole.
pub const POLAR_LIMIT: f32 = 0.1;
/// Zooming in never brings the eye closer than this to what it looks at.
pub const MIN_TARGET_DISTANCE: f32 = 5.0;
/// World units of travel per pixel of wheel delta.
pub const WHEEL_SPEED: f32 = 0.1;
/// World units of travel per pixel of pinch delta.
pub const PINCH_SPEED: f32 = 0.05;
/// Focusing parks the camera this many orbit radii off the body, per axis.
pub const FOCUS_OFFSET: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraPose {
    fn default() -> Self {
        CameraPose {
            eye: Point3::from(DEFAULT_EYE),
            target: Point3::origin(),
        }
    }
}

// An orbit camera in the spirit of ArcBall, with +y up. Dragging swings the
// eye around the origin, zooming slides it along the view direction, and the
// eye always stays within [MIN_DISTANCE, MAX_DISTANCE] of the origin.
//
// Unlike ArcBall, the look-at target can be moved independently of the
// rotation center, which is what focusing on a body does.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    // -- position --
    pose: CameraPose,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        OrbitCamera {
            pose: CameraPose::default(),
            width: 800,
            height: 600,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 2000.0,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn distance(&self) -> f32 {
        self.pose.eye.coords.norm()
    }

    pub fn polar_angle(&self) -> f32 {
        Spherical::from_cartesian(&self.pose.eye.coords).phi
    }

    pub fn view_direction(&self) -> Unit<Vector3<f32>> {
        Unit::try_new(self.pose.target - self.pose.eye, 1.0e-6)
            .unwrap_or_else(|| Unit::new_unchecked(-Vector3::z()))
    }

    /// Swings the eye around the origin by a drag of (dx, dy) pixels, then
    /// looks at `target`.
    pub fn rotate(&mut self, dx: f32, dy: f32, target: Point3<f32>) {
        let mut spherical = Spherical::from_cartesian(&self.pose.eye.coords);
        spherical.theta = (spherical.theta - dx * ROTATE_SPEED) % (2.0 * PI);
        spherical.phi += dy * ROTATE_SPEED;
        spherical.clamp_phi(POLAR_LIMIT);

        self.pose.eye = Point3::from(spherical.to_cartesian());
        self.pose.target = target;
    }

    /// Slides the eye along the view direction; positive is forward.
    pub fn dolly(&mut self, amount: f32) {
        let direction = self.view_direction();

        // Going forward, stop short of the target and at the closest approach
        // to the origin. Passing either would flip the view around.
        let amount = if amount > 0.0 {
            let to_target = (self.pose.target - self.pose.eye).norm();
            let mut limit = (to_target - MIN_TARGET_DISTANCE).max(0.0);
            let closest_approach = -self.pose.eye.coords.dot(&*direction);
            if closest_approach >= 0.0 {
                limit = limit.min(closest_approach);
            }
            amount.min(limit)
        } else {
            amount
        };

        self.pose.eye += direction.into_inner() * amount;
        self.enforce_distance_band(&direction);
    }

    /// Parks the camera next to `position`, looking at it.
    pub fn focus_on(&mut self, position: Point3<f32>, orbit_radius: f32) {
        let d = orbit_radius * FOCUS_OFFSET;
        self.pose.eye = position + Vector3::new(d, d, d);
        self.pose.target = position;
        let direction = self.view_direction();
        self.enforce_distance_band(&direction);
    }

    pub fn reset(&mut self) {
        self.pose = CameraPose::default();
    }

    fn enforce_distance_band(&mut self, direction: &Unit<Vector3<f32>>) {
        // If we land exactly on the origin, back off the way we came
        let fallback = Unit::new_unchecked(-direction.into_inner());
        self.pose.eye = Point3::from(clamp_norm(
            self.pose.eye.coords,
            MIN_DISTANCE,
            MAX_DISTANCE,
            &fallback,
        ));
    }

    pub fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fovy, self.znear, self.zfar)
    }

    pub fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.pose.eye, &self.pose.target, &Vector3::y())
    }

    /// Casts a ray from the eye through the given window coordinate (in
    /// pixels, origin at the top left).
    pub fn ray_through(&self, x: f32, y: f32) -> Ray {
        let ndc_x = 2.0 * x / self.width as f32 - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.height as f32;

        let half_height = (self.fovy / 2.0).tan();
        let camera_space = Vector3::new(
            ndc_x * half_height * self.aspect(),
            ndc_y * half_height,
            -1.0,
        );
        let world = self.view_transform().inverse_transform_vector(&camera_space);

        Ray::new(self.pose.eye, world)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
