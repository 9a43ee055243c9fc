use std::time::Instant;

use kiss3d::event::{Action, Key, MouseButton, TouchAction, WindowEvent};

use crate::model::input::InputEvent;
use crate::model::orrery::BodyID;

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_RESET_CAMERA: Key = Key::R;
const KEY_TOGGLE_THEME: Key = Key::T;
const KEY_PREV_BODY: Key = Key::Q;
const KEY_NEXT_BODY: Key = Key::E;
const KEY_FOCUS_SELECTED: Key = Key::F;
const KEY_SPEED_UP: Key = Key::Up;
const KEY_SLOW_DOWN: Key = Key::Down;
const KEY_SPEED_UP_FAST: Key = Key::PageUp;
const KEY_SLOW_DOWN_FAST: Key = Key::PageDown;
const KEY_RESTORE_SPEED: Key = Key::Back;

const BODY_KEYS: [Key; 9] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

/// Control steps per press of the fast speed keys.
const FAST_STEPS: i32 = 10;
/// One notch of the wheel is worth this many pixels of scroll delta.
const WHEEL_LINE_PIXELS: f32 = 100.0;

pub const KEY_LEGEND: &str = "drag: rotate   wheel: zoom   click: focus
1-9 / Q E: select   Up Down PgUp PgDn: speed   Backspace: base speed
F: focus selected   Space: pause   R: reset camera   T: theme";

/// Turns raw window events into application input.
///
/// kiss3d reports button presses without a position, so the controller
/// remembers where the cursor last was.
pub struct Controller {
    cursor: (f32, f32),
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.instant = Instant::now();
            self.counter = 0;
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            cursor: (0.0, 0.0),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        let input = match *event {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = (x as f32, y as f32);
                InputEvent::PointerMoved {
                    x: self.cursor.0,
                    y: self.cursor.1,
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                InputEvent::PointerPressed {
                    x: self.cursor.0,
                    y: self.cursor.1,
                }
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                InputEvent::PointerReleased {
                    x: self.cursor.0,
                    y: self.cursor.1,
                }
            }
            WindowEvent::CursorEnter(false) => InputEvent::PointerLeft,
            // scroll up == zoom out
            WindowEvent::Scroll(_, off, _) => InputEvent::Wheel {
                delta_y: -(off as f32) * WHEEL_LINE_PIXELS,
            },
            WindowEvent::Touch(id, x, y, action, _) => {
                let (x, y) = (x as f32, y as f32);
                match action {
                    TouchAction::Start => InputEvent::TouchStarted { id, x, y },
                    TouchAction::Move => InputEvent::TouchMoved { id, x, y },
                    TouchAction::End | TouchAction::Cancel => InputEvent::TouchEnded { id },
                }
            }
            // Cursor positions are in framebuffer pixels, so only trust this size
            WindowEvent::FramebufferSize(width, height) => InputEvent::Resized { width, height },
            WindowEvent::Key(key, Action::Press, _) => return Self::translate_key(key),
            _ => return None,
        };
        Some(input)
    }

    fn translate_key(key: Key) -> Option<InputEvent> {
        let input = match key {
            KEY_TOGGLE_PAUSE => InputEvent::TogglePause,
            KEY_RESET_CAMERA => InputEvent::ResetCamera,
            KEY_TOGGLE_THEME => InputEvent::ToggleTheme,
            KEY_PREV_BODY => InputEvent::SelectPrevBody,
            KEY_NEXT_BODY => InputEvent::SelectNextBody,
            KEY_FOCUS_SELECTED => InputEvent::FocusSelected,
            KEY_SPEED_UP => InputEvent::NudgeSpeed(1),
            KEY_SLOW_DOWN => InputEvent::NudgeSpeed(-1),
            KEY_SPEED_UP_FAST => InputEvent::NudgeSpeed(FAST_STEPS),
            KEY_SLOW_DOWN_FAST => InputEvent::NudgeSpeed(-FAST_STEPS),
            KEY_RESTORE_SPEED => InputEvent::RestoreSpeed,
            other => {
                let idx = BODY_KEYS.iter().position(|k| *k == other)?;
                InputEvent::SelectBody(BodyID(idx))
            }
        };
        Some(input)
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kiss3d::event::Modifiers;

    #[test]
    fn test_mouse_events_carry_cursor() {
        let mut controller = Controller::new();
        let none = Modifiers::empty();

        assert_eq!(
            controller.translate(&WindowEvent::CursorPos(12.0, 34.0, none)),
            Some(InputEvent::PointerMoved { x: 12.0, y: 34.0 })
        );
        assert_eq!(
            controller.translate(&WindowEvent::MouseButton(
                MouseButton::Button1,
                Action::Press,
                none
            )),
            Some(InputEvent::PointerPressed { x: 12.0, y: 34.0 })
        );
        assert_eq!(
            controller.translate(&WindowEvent::Scroll(0.0, 1.0, none)),
            Some(InputEvent::Wheel { delta_y: -100.0 })
        );
        assert_eq!(
            controller.translate(&WindowEvent::MouseButton(
                MouseButton::Button2,
                Action::Press,
                none
            )),
            None
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            Controller::translate_key(Key::Space),
            Some(InputEvent::TogglePause)
        );
        assert_eq!(
            Controller::translate_key(Key::Key3),
            Some(InputEvent::SelectBody(BodyID(2)))
        );
        assert_eq!(
            Controller::translate_key(Key::PageDown),
            Some(InputEvent::NudgeSpeed(-10))
        );
        assert_eq!(Controller::translate_key(Key::Z), None);
    }

    #[test]
    fn test_resize_uses_framebuffer_size() {
        let mut controller = Controller::new();
        assert_eq!(
            controller.translate(&WindowEvent::FramebufferSize(2560, 1600)),
            Some(InputEvent::Resized {
                width: 2560,
                height: 1600
            })
        );
        // Logical size on a HiDPI screen would not match cursor pixels
        assert_eq!(controller.translate(&WindowEvent::Size(1280, 800)), None);
    }
}
