use nalgebra::Point3;

use std::time::Instant;

pub mod camera;
pub mod clock;
pub mod input;
pub mod orrery;
pub mod speed;
pub mod starfield;

use self::camera::{OrbitCamera, PINCH_SPEED, WHEEL_SPEED};
use self::clock::Clock;
use self::input::{InputEvent, PointerTracker, TouchGesture, TouchTracker};
use self::orrery::registry::color_from_hex;
use self::orrery::{BodyID, Orrery, Pickable};
use self::speed::SpeedPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn background(self) -> Point3<f32> {
        match self {
            Theme::Dark => color_from_hex(0x000011),
            Theme::Light => color_from_hex(0x87CEEB),
        }
    }

    pub fn text_color(self) -> Point3<f32> {
        match self {
            Theme::Dark => Point3::new(1.0, 1.0, 1.0),
            Theme::Light => Point3::new(0.05, 0.05, 0.15),
        }
    }

    /// What the theme button offers to switch to.
    pub fn button_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub animating: bool,
    pub focused: Option<BodyID>,
    pub theme: Theme,
}

impl Default for RunState {
    fn default() -> Self {
        RunState {
            animating: true,
            focused: None,
            theme: Theme::Dark,
        }
    }
}

impl RunState {
    pub fn status_text(&self) -> &'static str {
        if self.animating {
            "System Running"
        } else {
            "System Paused"
        }
    }

    pub fn pause_button_label(&self) -> &'static str {
        if self.animating {
            "Pause"
        } else {
            "Resume"
        }
    }
}

/// Where the pointer is hovering over something named.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub target: Pickable,
    pub x: f32,
    pub y: f32,
}

/// All of the application's mutable state. Input events come in through
/// `handle_input`, time comes in through `tick`, and the GUI reads the rest.
pub struct AppState {
    orrery: Orrery,
    speeds: SpeedPanel,
    camera: OrbitCamera,
    run: RunState,
    clock: Clock,
    pointer: PointerTracker,
    touch: TouchTracker,
    hover: Option<Hover>,
}

impl AppState {
    pub fn new(orrery: Orrery) -> Self {
        AppState {
            speeds: SpeedPanel::new(&orrery),
            orrery,
            camera: OrbitCamera::new(),
            run: RunState::default(),
            clock: Clock::new(),
            pointer: PointerTracker::new(),
            touch: TouchTracker::new(),
            hover: None,
        }
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn speeds(&self) -> &SpeedPanel {
        &self.speeds
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn hover(&self) -> Option<Hover> {
        self.hover
    }

    pub fn focused_label(&self) -> String {
        match self.run.focused {
            Some(id) => format!("Focused: {}", self.orrery.get_body(id).info.name),
            None => String::new(),
        }
    }

    /// Advances the simulation to `now`. Does nothing while paused.
    pub fn tick(&mut self, now: Instant) {
        if !self.run.animating {
            return;
        }

        let dt = self.clock.delta(now);
        self.orrery.advance(dt, self.speeds.overrides());
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerPressed { x, y } => self.pointer.press(x, y),
            InputEvent::PointerMoved { x, y } => {
                if let Some((dx, dy)) = self.pointer.move_to(x, y) {
                    self.orbit(dx, dy);
                }
                self.update_hover(x, y);
            }
            InputEvent::PointerReleased { x, y } => {
                if let Some(pt) = self.pointer.release(x, y) {
                    self.click(pt.x, pt.y);
                }
            }
            InputEvent::PointerLeft => self.hover = None,
            InputEvent::Wheel { delta_y } => self.camera.dolly(delta_y * WHEEL_SPEED),
            InputEvent::TouchStarted { id, x, y } => self.touch.start(id, x, y),
            InputEvent::TouchMoved { id, x, y } => match self.touch.moved(id, x, y) {
                Some(TouchGesture::Orbit { dx, dy }) => self.orbit(dx, dy),
                Some(TouchGesture::Pinch(delta)) => self.camera.dolly(delta * PINCH_SPEED),
                Some(TouchGesture::Tap { .. }) | None => {}
            },
            InputEvent::TouchEnded { id } => {
                if let Some(TouchGesture::Tap { x, y }) = self.touch.ended(id) {
                    self.click(x, y);
                }
            }
            InputEvent::Resized { width, height } => self.camera.set_viewport(width, height),
            InputEvent::TogglePause => self.toggle_pause(),
            InputEvent::ResetCamera => self.reset_camera(),
            InputEvent::ToggleTheme => {
                self.run.theme = self.run.theme.toggled();
                tracing::info!(theme = ?self.run.theme, "switched theme");
            }
            InputEvent::SelectBody(id) => {
                if !self.speeds.select(id) {
                    tracing::debug!(?id, "no such body to select");
                }
            }
            InputEvent::SelectNextBody => self.speeds.select_next(),
            InputEvent::SelectPrevBody => self.speeds.select_prev(),
            InputEvent::NudgeSpeed(steps) => {
                let id = self.speeds.selected();
                if let Some(body) = self.orrery.try_get_body(id) {
                    let speed = self.speeds.nudge(body, steps);
                    tracing::debug!(body = %body.info.name, speed, "changed speed");
                }
            }
            InputEvent::SetSpeed { body, value } => {
                if let Some(body) = self.orrery.try_get_body(body) {
                    let speed = self.speeds.set(body, value);
                    tracing::debug!(body = %body.info.name, speed, "changed speed");
                }
            }
            InputEvent::RestoreSpeed => {
                let id = self.speeds.selected();
                if let Some(body) = self.orrery.try_get_body(id) {
                    let speed = self.speeds.restore(body);
                    tracing::debug!(body = %body.info.name, speed, "restored base speed");
                }
            }
            InputEvent::FocusSelected => self.focus(self.speeds.selected()),
        }
    }

    fn orbit(&mut self, dx: f32, dy: f32) {
        let target: Point3<f32> = match self.run.focused {
            Some(id) => nalgebra::convert(self.orrery.get_body(id).position()),
            None => Point3::origin(),
        };
        self.camera.rotate(dx, dy, target);
    }

    fn update_hover(&mut self, x: f32, y: f32) {
        let ray = self.camera.ray_through(x, y);
        self.hover = self
            .orrery
            .pick(&ray, true)
            .map(|target| Hover { target, x, y });
    }

    fn click(&mut self, x: f32, y: f32) {
        let ray = self.camera.ray_through(x, y);
        if let Some(Pickable::Body(id)) = self.orrery.pick(&ray, false) {
            self.focus(id);
        }
    }

    fn focus(&mut self, id: BodyID) {
        let body = match self.orrery.try_get_body(id) {
            Some(body) => body,
            None => return,
        };

        let position: Point3<f32> = nalgebra::convert(body.position());
        self.camera
            .focus_on(position, body.info.orbit_radius as f32);
        self.run.focused = Some(id);
        tracing::info!(body = %body.label(), "focused");
    }

    fn reset_camera(&mut self) {
        self.camera.reset();
        self.run.focused = None;
        tracing::info!("reset camera");
    }

    fn toggle_pause(&mut self) {
        self.run.animating = !self.run.animating;
        if self.run.animating {
            self.clock.start();
        } else {
            self.clock.stop();
        }
        tracing::info!("{}", self.run.status_text());
    }
}
