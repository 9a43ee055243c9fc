use nalgebra::{Point3, Unit, Vector3};

use std::f32::consts::PI;

/// Spherical coordinates with +y as the pole.
///
/// `phi` is the polar angle measured down from +y, and `theta` is the
/// azimuthal angle around y, measured from +z towards +x. This matches the
/// usual convention for y-up orbit cameras.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Spherical { radius, phi, theta }
    }

    pub fn from_cartesian(v: &Vector3<f32>) -> Self {
        let radius = v.norm();
        if radius == 0.0 {
            return Spherical::new(0.0, 0.0, 0.0);
        }

        Spherical {
            radius,
            phi: nalgebra::clamp(v.y / radius, -1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    pub fn to_cartesian(&self) -> Vector3<f32> {
        let sin_phi = self.phi.sin();
        Vector3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    /// Keeps phi away from the poles, where the azimuth is degenerate.
    pub fn clamp_phi(&mut self, limit: f32) {
        self.phi = nalgebra::clamp(self.phi, limit, PI - limit);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    #[cfg(test)]
    fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * t
    }

    /// Returns the distance along the ray to the first point where it enters
    /// the sphere, or `None` if it misses. If the origin is inside the sphere,
    /// the exit point is returned instead.
    pub fn intersect_sphere(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&*self.direction);
        let c = oc.norm_squared() - radius * radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let near = -b - sqrt_disc;
        let far = -b + sqrt_disc;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Rescales `v` so that its length lies within `[min, max]`. A (nearly) zero
/// vector has no trustworthy direction to scale along, so it is pushed out
/// along `fallback` instead.
pub fn clamp_norm(
    v: Vector3<f32>,
    min: f32,
    max: f32,
    fallback: &Unit<Vector3<f32>>,
) -> Vector3<f32> {
    let norm = v.norm();
    if norm <= min * 1.0e-4 {
        fallback.into_inner() * min
    } else if norm < min {
        v * (min / norm)
    } else if norm > max {
        v * (max / norm)
    } else {
        v
    }
}
