use std::collections::HashMap;

use super::orrery::{Body, BodyID, Orrery};

pub const MIN_SPEED: f64 = 0.0;
pub const MAX_SPEED: f64 = 10.0;
/// Controls move in increments of 1 / STEPS_PER_UNIT.
const STEPS_PER_UNIT: f64 = 10.0;

/// User-chosen speeds, keyed by body. Bodies without an entry move at their
/// base speed.
#[derive(Debug, Clone, Default)]
pub struct SpeedOverrides {
    values: HashMap<BodyID, f64>,
}

impl SpeedOverrides {
    pub fn get(&self, id: BodyID) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn insert(&mut self, id: BodyID, speed: f64) {
        self.values.insert(id, speed);
    }

    pub fn remove(&mut self, id: BodyID) -> Option<f64> {
        self.values.remove(&id)
    }

    // A zero override is a real override: it parks the body.
    pub fn speed_for(&self, body: &Body) -> f64 {
        self.get(body.id).unwrap_or(body.info.speed)
    }
}

/// Clamps a requested speed into range and rounds it to the control's step.
pub fn snap_speed(speed: f64) -> f64 {
    let clamped = nalgebra::clamp(speed, MIN_SPEED, MAX_SPEED);
    (clamped * STEPS_PER_UNIT).round() / STEPS_PER_UNIT
}

pub fn format_readout(speed: f64) -> String {
    format!("{:.1}x", speed)
}

/// One bounded speed control per body, plus which of them the keyboard is
/// currently driving.
#[derive(Debug, Clone)]
pub struct SpeedPanel {
    overrides: SpeedOverrides,
    selected: BodyID,
    num_bodies: usize,
}

impl SpeedPanel {
    pub fn new(orrery: &Orrery) -> Self {
        SpeedPanel {
            overrides: SpeedOverrides::default(),
            selected: BodyID(0),
            num_bodies: orrery.num_bodies(),
        }
    }

    pub fn overrides(&self) -> &SpeedOverrides {
        &self.overrides
    }

    /// The value the control currently shows.
    pub fn value(&self, body: &Body) -> f64 {
        self.overrides.speed_for(body)
    }

    pub fn readout(&self, body: &Body) -> String {
        format_readout(self.value(body))
    }

    pub fn set(&mut self, body: &Body, speed: f64) -> f64 {
        let speed = snap_speed(speed);
        self.overrides.insert(body.id, speed);
        speed
    }

    pub fn nudge(&mut self, body: &Body, steps: i32) -> f64 {
        let current = self.value(body);
        self.set(body, current + steps as f64 / STEPS_PER_UNIT)
    }

    /// Drops the override, so the body goes back to its base speed.
    pub fn restore(&mut self, body: &Body) -> f64 {
        self.overrides.remove(body.id);
        body.info.speed
    }

    pub fn selected(&self) -> BodyID {
        self.selected
    }

    pub fn select(&mut self, id: BodyID) -> bool {
        if id.0 < self.num_bodies {
            self.selected = id;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        if self.num_bodies > 0 {
            self.selected = BodyID((self.selected.0 + 1) % self.num_bodies);
        }
    }

    pub fn select_prev(&mut self) {
        if self.num_bodies > 0 {
            self.selected = BodyID((self.selected.0 + self.num_bodies - 1) % self.num_bodies);
        }
    }
}
