use nalgebra::Point2;

use std::collections::BTreeMap;

use super::orrery::BodyID;

/// A release (or touch lift) within this many pixels of where the press began
/// counts as a click.
pub const CLICK_SLOP: f32 = 4.0;

/// Everything the user can do to the application, in window pixel coordinates
/// (origin at the top left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32 },
    PointerLeft,
    /// Positive is a scroll towards the user, which moves the camera forward.
    Wheel { delta_y: f32 },
    TouchStarted { id: u64, x: f32, y: f32 },
    TouchMoved { id: u64, x: f32, y: f32 },
    TouchEnded { id: u64 },
    Resized { width: u32, height: u32 },
    TogglePause,
    ResetCamera,
    ToggleTheme,
    SelectBody(BodyID),
    SelectNextBody,
    SelectPrevBody,
    /// Moves the selected body's speed by this many control steps.
    NudgeSpeed(i32),
    /// Sets a body's speed directly. No key produces this; it is for callers
    /// driving `AppState` themselves, such as scripted demos and tests.
    SetSpeed { body: BodyID, value: f64 },
    RestoreSpeed,
    FocusSelected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    Idle,
    Dragging {
        pressed_at: Point2<f32>,
        last: Point2<f32>,
    },
}

/// What a touch contributes to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchGesture {
    Orbit { dx: f32, dy: f32 },
    /// Change in distance between two fingers; positive when they close in.
    Pinch(f32),
    Tap { x: f32, y: f32 },
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        PointerTracker {
            state: PointerState::Idle,
        }
    }

    #[cfg(test)]
    fn state(&self) -> PointerState {
        self.state
    }

    pub fn press(&mut self, x: f32, y: f32) {
        let pt = Point2::new(x, y);
        self.state = PointerState::Dragging {
            pressed_at: pt,
            last: pt,
        };
    }

    /// Returns the drag delta since the last sample, if a drag is underway.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        match &mut self.state {
            PointerState::Idle => None,
            PointerState::Dragging { last, .. } => {
                let pt = Point2::new(x, y);
                let delta = pt - *last;
                *last = pt;
                Some((delta.x, delta.y))
            }
        }
    }

    /// Ends the drag. Returns the click point if the pointer barely moved.
    pub fn release(&mut self, x: f32, y: f32) -> Option<Point2<f32>> {
        let state = std::mem::replace(&mut self.state, PointerState::Idle);
        match state {
            PointerState::Idle => None,
            PointerState::Dragging { pressed_at, .. } => {
                let pt = Point2::new(x, y);
                if (pt - pressed_at).norm() < CLICK_SLOP {
                    Some(pt)
                } else {
                    None
                }
            }
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

// Mirrors the pointer: one finger drags, two fingers pinch. Any finger
// lifting ends the current gesture; the next one has to start from scratch.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    active: BTreeMap<u64, Point2<f32>>,
    previous_touch: Option<Point2<f32>>,
    previous_pinch: Option<f32>,
    // Where a potential tap began
    tap: Option<(u64, Point2<f32>)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn num_active(&self) -> usize {
        self.active.len()
    }

    pub fn start(&mut self, id: u64, x: f32, y: f32) {
        let pt = Point2::new(x, y);
        self.active.insert(id, pt);

        match self.active.len() {
            1 => {
                self.previous_touch = Some(pt);
                self.tap = Some((id, pt));
            }
            2 => {
                self.previous_pinch = self.pinch_distance();
                self.tap = None;
            }
            _ => self.tap = None,
        }
    }

    pub fn moved(&mut self, id: u64, x: f32, y: f32) -> Option<TouchGesture> {
        let pt = Point2::new(x, y);
        match self.active.get_mut(&id) {
            Some(p) => *p = pt,
            None => return None,
        }

        match self.active.len() {
            1 => {
                if let Some((_, start)) = self.tap {
                    if (pt - start).norm() >= CLICK_SLOP {
                        self.tap = None;
                    }
                }

                let prev = self.previous_touch?;
                self.previous_touch = Some(pt);
                let delta = pt - prev;
                Some(TouchGesture::Orbit {
                    dx: delta.x,
                    dy: delta.y,
                })
            }
            2 => {
                let distance = self.pinch_distance()?;
                let prev = self.previous_pinch.replace(distance)?;
                Some(TouchGesture::Pinch(prev - distance))
            }
            _ => None,
        }
    }

    pub fn ended(&mut self, id: u64) -> Option<TouchGesture> {
        let last = self.active.remove(&id);
        self.previous_touch = None;
        self.previous_pinch = None;

        let (tap_id, start) = self.tap.take()?;
        let last = last?;
        if tap_id == id && (last - start).norm() < CLICK_SLOP {
            Some(TouchGesture::Tap {
                x: last.x,
                y: last.y,
            })
        } else {
            None
        }
    }

    fn pinch_distance(&self) -> Option<f32> {
        let mut touches = self.active.values();
        let a = touches.next()?;
        let b = touches.next()?;
        Some((a - b).norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_pointer_drag() {
        let mut pointer = PointerTracker::new();
        assert_eq!(pointer.move_to(5.0, 5.0), None);

        pointer.press(10.0, 10.0);
        assert_eq!(pointer.move_to(15.0, 8.0), Some((5.0, -2.0)));
        assert_eq!(pointer.move_to(20.0, 8.0), Some((5.0, 0.0)));

        // Moved too far to be a click
        assert_eq!(pointer.release(20.0, 8.0), None);
        assert_eq!(pointer.state(), PointerState::Idle);
        assert_eq!(pointer.move_to(30.0, 30.0), None);
    }

    #[test]
    fn test_pointer_click() {
        let mut pointer = PointerTracker::new();
        pointer.press(100.0, 100.0);
        pointer.move_to(101.0, 101.0);
        assert_eq!(
            pointer.release(101.0, 101.0),
            Some(Point2::new(101.0, 101.0))
        );

        // Releasing without a press does nothing
        assert_eq!(pointer.release(101.0, 101.0), None);
    }

    #[test]
    fn test_single_finger_orbit() {
        let mut touch = TouchTracker::new();
        touch.start(1, 0.0, 0.0);
        assert_eq!(
            touch.moved(1, 10.0, 5.0),
            Some(TouchGesture::Orbit { dx: 10.0, dy: 5.0 })
        );
        assert_eq!(touch.ended(1), None);

        // Unknown fingers are ignored
        assert_eq!(touch.moved(9, 1.0, 1.0), None);
    }

    #[test]
    fn test_pinch() {
        let mut touch = TouchTracker::new();
        touch.start(1, 0.0, 0.0);
        touch.start(2, 100.0, 0.0);
        assert_eq!(touch.num_active(), 2);

        match touch.moved(2, 80.0, 0.0) {
            Some(TouchGesture::Pinch(delta)) => assert_relative_eq!(delta, 20.0),
            other => panic!("Expected a pinch, got {:?}", other),
        }
        match touch.moved(1, -30.0, 0.0) {
            Some(TouchGesture::Pinch(delta)) => assert_relative_eq!(delta, -30.0),
            other => panic!("Expected a pinch, got {:?}", other),
        }

        // Lifting one finger ends the gesture, and the remaining finger does
        // not start orbiting on its own.
        assert_eq!(touch.ended(2), None);
        assert_eq!(touch.moved(1, -20.0, 0.0), None);
    }

    #[test]
    fn test_tap() {
        let mut touch = TouchTracker::new();
        touch.start(4, 50.0, 60.0);
        touch.moved(4, 51.0, 61.0);
        assert_eq!(
            touch.ended(4),
            Some(TouchGesture::Tap { x: 51.0, y: 61.0 })
        );

        // Wandering off cancels the tap
        touch.start(5, 50.0, 60.0);
        touch.moved(5, 80.0, 60.0);
        touch.moved(5, 50.0, 60.0);
        assert_eq!(touch.ended(5), None);
    }
}
