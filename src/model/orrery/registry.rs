use nalgebra::Point3;

use super::{BodyInfo, SunInfo};

struct BodyRecord {
    name: &'static str,
    orbit_radius: f64,
    size: f32,
    color: u32,
    speed: f64,
    glyph: &'static str,
}

const PLANETS: [BodyRecord; 8] = [
    BodyRecord {
        name: "Mercury",
        orbit_radius: 15.0,
        size: 0.4,
        color: 0x8C7853,
        speed: 4.7,
        glyph: "☿",
    },
    BodyRecord {
        name: "Venus",
        orbit_radius: 20.0,
        size: 0.9,
        color: 0xFFC649,
        speed: 3.5,
        glyph: "♀",
    },
    BodyRecord {
        name: "Earth",
        orbit_radius: 25.0,
        size: 1.0,
        color: 0x6B93D6,
        speed: 3.0,
        glyph: "🌍",
    },
    BodyRecord {
        name: "Mars",
        orbit_radius: 30.0,
        size: 0.5,
        color: 0xCD5C5C,
        speed: 2.4,
        glyph: "♂",
    },
    BodyRecord {
        name: "Jupiter",
        orbit_radius: 40.0,
        size: 3.0,
        color: 0xD8CA9D,
        speed: 1.3,
        glyph: "♃",
    },
    BodyRecord {
        name: "Saturn",
        orbit_radius: 50.0,
        size: 2.5,
        color: 0xFAD5A5,
        speed: 1.0,
        glyph: "♄",
    },
    BodyRecord {
        name: "Uranus",
        orbit_radius: 60.0,
        size: 1.8,
        color: 0x4FD0E3,
        speed: 0.7,
        glyph: "⛢",
    },
    BodyRecord {
        name: "Neptune",
        orbit_radius: 70.0,
        size: 1.7,
        color: 0x4B70DD,
        speed: 0.5,
        glyph: "♆",
    },
];

const SUN_RADIUS: f32 = 3.0;
const SUN_COLOR: u32 = 0xFFD700;

/// The eight planets, innermost first.
pub fn default_bodies() -> Vec<BodyInfo> {
    PLANETS
        .iter()
        .map(|p| BodyInfo {
            name: p.name.to_owned(),
            orbit_radius: p.orbit_radius,
            size: p.size,
            color: color_from_hex(p.color),
            speed: p.speed,
            glyph: p.glyph.to_owned(),
        })
        .collect()
}

pub fn sun_info() -> SunInfo {
    SunInfo {
        name: String::from("Sun"),
        radius: SUN_RADIUS,
        color: color_from_hex(SUN_COLOR),
    }
}

/// Converts a 0xRRGGBB literal into normalized RGB.
pub fn color_from_hex(hex: u32) -> Point3<f32> {
    let r = (hex >> 16) & 0xFF;
    let g = (hex >> 8) & 0xFF;
    let b = hex & 0xFF;

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
