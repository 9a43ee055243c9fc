use nalgebra::Point3;
use rand::Rng;

pub const STAR_COUNT: usize = 10_000;
/// Stars fill the cube [-STAR_EXTENT, STAR_EXTENT]^3.
pub const STAR_EXTENT: f32 = 1000.0;

#[derive(Debug, Clone)]
pub struct Starfield {
    points: Vec<Point3<f32>>,
}

impl Starfield {
    pub fn generate<R: Rng>(count: usize, half_extent: f32, rng: &mut R) -> Self {
        let mut coord = || rng.gen_range(-half_extent..half_extent);
        let points = (0..count)
            .map(|_| Point3::new(coord(), coord(), coord()))
            .collect();
        Starfield { points }
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }
}
