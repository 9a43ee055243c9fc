use nalgebra::Point3;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub orbit_radius: f64,
    pub size: f32,
    pub color: Point3<f32>,
    // Angular speed multiplier, before the global time scale
    pub speed: f64,
    pub glyph: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunInfo {
    pub name: String,
    pub radius: f32,
    pub color: Point3<f32>,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    // Not wrapped; only ever fed through cos/sin
    pub angle: f64,
    // Rotation about the body's own vertical axis
    pub spin: f32,
}

#[derive(Debug, Clone)]
pub struct Sun {
    pub info: SunInfo,
    pub spin: f32,
}

impl Body {
    pub fn position(&self) -> Point3<f64> {
        let r = self.info.orbit_radius;
        Point3::new(r * self.angle.cos(), 0.0, r * self.angle.sin())
    }

    pub fn label(&self) -> String {
        if self.info.glyph.is_empty() {
            self.info.name.clone()
        } else {
            format!("{} {}", self.info.glyph, self.info.name)
        }
    }
}
