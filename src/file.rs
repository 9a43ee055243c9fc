use nalgebra::Point3;
use thiserror::Error;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::model::orrery::BodyInfo;
use crate::model::speed::MAX_SPEED;

#[derive(Debug, Error)]
pub enum BodyTableError {
    #[error("could not read body table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: `{value}` is not a valid number for `{field}`")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: `{value}` is not a six-digit hex color")]
    BadColor { line: usize, value: String },

    #[error("line {line}: `{field}` must be positive, got {value}")]
    NotPositive {
        line: usize,
        field: &'static str,
        value: f64,
    },

    #[error("line {line}: speed must be in (0, {max}], got {value}")]
    SpeedOutOfRange { line: usize, value: f64, max: f64 },

    #[error("line {line}: body `{name}` appears more than once")]
    DuplicateName { line: usize, name: String },

    #[error("body table has no bodies")]
    Empty,
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<BodyInfo>, BodyTableError> {
    let text = fs::read_to_string(path)?;
    parse_bodies(&text)
}

/// Parses a body table. The first line is a header; blank lines and lines
/// starting with `#` are skipped. Columns are:
///
/// `name orbit_radius size color speed [glyph]`
pub fn parse_bodies(text: &str) -> Result<Vec<BodyInfo>, BodyTableError> {
    let mut bodies = vec![];
    let mut seen = HashSet::new();

    // Read lines, skipping header
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_ascii_whitespace();
        let mut next_field = |field: &'static str| {
            fields.next().ok_or(BodyTableError::MissingField {
                line: line_no,
                field,
            })
        };

        let name = next_field("name")?;
        let orbit_radius = parse_positive(next_field("orbit_radius")?, "orbit_radius", line_no)?;
        let size = parse_positive(next_field("size")?, "size", line_no)?;
        let color = parse_color(next_field("color")?, line_no)?;
        let speed = parse_number(next_field("speed")?, "speed", line_no)?;
        let glyph = next_field("glyph").unwrap_or("");

        if !(speed > 0.0 && speed <= MAX_SPEED) {
            return Err(BodyTableError::SpeedOutOfRange {
                line: line_no,
                value: speed,
                max: MAX_SPEED,
            });
        }

        if !seen.insert(name.to_owned()) {
            return Err(BodyTableError::DuplicateName {
                line: line_no,
                name: name.to_owned(),
            });
        }

        bodies.push(BodyInfo {
            name: name.to_owned(),
            orbit_radius,
            size: size as f32,
            color,
            speed,
            glyph: glyph.to_owned(),
        });
    }

    if bodies.is_empty() {
        return Err(BodyTableError::Empty);
    }
    Ok(bodies)
}

fn parse_number(s: &str, field: &'static str, line: usize) -> Result<f64, BodyTableError> {
    match s.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(BodyTableError::BadNumber {
            line,
            field,
            value: s.to_owned(),
        }),
    }
}

fn parse_positive(s: &str, field: &'static str, line: usize) -> Result<f64, BodyTableError> {
    let value = parse_number(s, field, line)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(BodyTableError::NotPositive { line, field, value })
    }
}

fn parse_color(s: &str, line: usize) -> Result<Point3<f32>, BodyTableError> {
    let bad_color = || BodyTableError::BadColor {
        line,
        value: s.to_owned(),
    };

    if s.len() != 6 || !s.is_ascii() {
        return Err(bad_color());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|_| bad_color())
    };

    Ok(Point3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::orrery::registry::default_bodies;

    const BUILTIN_TABLE: &str = include_str!("../bodies.txt");

    #[test]
    fn test_builtin_table_matches_registry() {
        let parsed = parse_bodies(BUILTIN_TABLE).unwrap();
        let builtin = default_bodies();
        assert_eq!(parsed.len(), builtin.len());
        for (a, b) in parsed.iter().zip(builtin.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.orbit_radius, b.orbit_radius);
            assert_eq!(a.size, b.size);
            assert_eq!(a.speed, b.speed);
            assert_eq!(a.glyph, b.glyph);
            approx::assert_relative_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_optional_glyph_and_comments() {
        let table = "name radius size color speed glyph
# a comment

Vulcan 8 0.3 ff8800 6.5
";
        let bodies = parse_bodies(table).unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].name, "Vulcan");
        assert_eq!(bodies[0].glyph, "");
        assert_eq!(bodies[0].color, Point3::new(1.0, 136.0 / 255.0, 0.0));
    }

    #[test]
    fn test_errors() {
        let header = "name radius size color speed glyph\n";

        let err = parse_bodies(&format!("{}Vulcan 8 0.3", header)).unwrap_err();
        assert!(matches!(
            err,
            BodyTableError::MissingField {
                line: 2,
                field: "color"
            }
        ));

        let err = parse_bodies(&format!("{}Vulcan eight 0.3 ff8800 1", header)).unwrap_err();
        assert!(matches!(
            err,
            BodyTableError::BadNumber {
                line: 2,
                field: "orbit_radius",
                ..
            }
        ));

        let err = parse_bodies(&format!("{}Vulcan 8 0.3 orange 1", header)).unwrap_err();
        assert!(matches!(err, BodyTableError::BadColor { line: 2, .. }));

        let err = parse_bodies(&format!("{}Vulcan 8 -1 ff8800 1", header)).unwrap_err();
        assert!(matches!(
            err,
            BodyTableError::NotPositive { field: "size", .. }
        ));

        let err = parse_bodies(&format!("{}Vulcan 8 1 ff8800 11", header)).unwrap_err();
        assert!(matches!(err, BodyTableError::SpeedOutOfRange { .. }));

        let err = parse_bodies(&format!(
            "{}Vulcan 8 1 ff8800 1\nVulcan 9 1 ff8800 1",
            header
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            BodyTableError::DuplicateName { line: 3, .. }
        ));

        assert!(matches!(parse_bodies(header), Err(BodyTableError::Empty)));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_bodies("header\nVulcan 8 1 ff8800 11").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: speed must be in (0, 10], got 11"
        );
    }
}
