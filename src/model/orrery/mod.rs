use nalgebra::Point3;
use rand::Rng;

use std::f64::consts::TAU;

use crate::math::geometry::Ray;

use super::speed::SpeedOverrides;

mod body;
pub mod registry;

pub use body::{Body, BodyID, BodyInfo, Sun, SunInfo};

/// Converts (speed * seconds) into radians.
pub const TIME_SCALE: f64 = 0.1;
/// Self-rotation applied to every body per animated tick.
pub const BODY_SPIN_STEP: f32 = 0.02;
pub const SUN_SPIN_STEP: f32 = 0.005;

/// Something that can be hit by a picking ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickable {
    Sun,
    Body(BodyID),
}

#[derive(Debug, Clone)]
pub struct Orrery {
    sun: Sun,
    // Indexed by BodyID
    bodies: Vec<Body>,
}

impl Orrery {
    /// Places every body at a random point along its orbit.
    pub fn new<R: Rng>(infos: Vec<BodyInfo>, rng: &mut R) -> Self {
        let angles: Vec<f64> = infos.iter().map(|_| rng.gen_range(0.0..TAU)).collect();
        Self::with_angles(infos, &angles)
    }

    pub fn with_angles(infos: Vec<BodyInfo>, angles: &[f64]) -> Self {
        assert_eq!(
            infos.len(),
            angles.len(),
            "Need exactly one starting angle per body"
        );

        let bodies = infos
            .into_iter()
            .zip(angles.iter())
            .enumerate()
            .map(|(i, (info, &angle))| Body {
                id: BodyID(i),
                info,
                angle,
                spin: 0.0,
            })
            .collect();

        Orrery {
            sun: Sun {
                info: registry::sun_info(),
                spin: 0.0,
            },
            bodies,
        }
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn try_get_body(&self, id: BodyID) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn find_body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.info.name == name)
    }

    pub fn name_of(&self, target: Pickable) -> &str {
        match target {
            Pickable::Sun => &self.sun.info.name,
            Pickable::Body(id) => &self.get_body(id).info.name,
        }
    }

    /// Advances every body along its orbit by `dt` seconds, using the
    /// overridden speed where there is one.
    pub fn advance(&mut self, dt: f64, speeds: &SpeedOverrides) {
        for body in self.bodies.iter_mut() {
            let speed = speeds.speed_for(body);
            body.angle += speed * dt * TIME_SCALE;
            body.spin += BODY_SPIN_STEP;
        }
        self.sun.spin += SUN_SPIN_STEP;
    }

    /// Finds the nearest body (and optionally the sun) hit by the ray.
    pub fn pick(&self, ray: &Ray, include_sun: bool) -> Option<Pickable> {
        let mut best: Option<(f32, Pickable)> = None;
        let mut consider = |hit: Option<f32>, target: Pickable| {
            if let Some(t) = hit {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, target));
                }
            }
        };

        if include_sun {
            consider(
                ray.intersect_sphere(&Point3::origin(), self.sun.info.radius),
                Pickable::Sun,
            );
        }

        for body in self.bodies.iter() {
            let center: Point3<f32> = nalgebra::convert(body.position());
            consider(
                ray.intersect_sphere(&center, body.info.size),
                Pickable::Body(body.id),
            );
        }

        best.map(|(_, target)| target)
    }
}
