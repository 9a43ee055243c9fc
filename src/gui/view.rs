use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};

use super::camera::MirrorCamera;
use super::controller::KEY_LEGEND;
use super::renderers::CompoundRenderer;
use crate::model::orrery::registry::color_from_hex;
use crate::model::orrery::{Orrery, Pickable};
use crate::model::starfield::Starfield;
use crate::model::{AppState, Hover};

const RING_COLOR: u32 = 0x444444;
const STAR_COLOR: u32 = 0xFFFFFF;
const TEXT_SIZE: f32 = 40.0;
const LINE_HEIGHT: f32 = 40.0;
// Tooltip sits up and to the right of the cursor
const TOOLTIP_OFFSET: (f32, f32) = (10.0, -30.0);

pub struct View {
    sun_sphere: SceneNode,
    // Indexed by BodyID
    body_spheres: Vec<SceneNode>,
    stars: Vec<Point3<f32>>,
    camera: MirrorCamera,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(state: &AppState, starfield: Starfield, window: &mut Window) -> Self {
        let orrery = state.orrery();

        let sun = &orrery.sun().info;
        let mut sun_sphere = window.add_sphere(sun.radius);
        sun_sphere.set_color(sun.color.x, sun.color.y, sun.color.z);

        let body_spheres = orrery
            .bodies()
            .map(|body| {
                let mut sphere = window.add_sphere(body.info.size);
                let color = &body.info.color;
                sphere.set_color(color.x, color.y, color.z);
                sphere
            })
            .collect();

        let mut view = View {
            sun_sphere,
            body_spheres,
            stars: starfield.points().to_vec(),
            camera: MirrorCamera::new(state.camera().clone()),
            renderer: CompoundRenderer::new(),
        };
        view.update_scene_objects(orrery);
        view
    }

    fn update_scene_objects(&mut self, orrery: &Orrery) {
        fn spin_about_y(spin: f32) -> UnitQuaternion<f32> {
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), spin)
        }

        self.sun_sphere
            .set_local_rotation(spin_about_y(orrery.sun().spin));

        for (sphere, body) in self.body_spheres.iter_mut().zip(orrery.bodies()) {
            let position: Point3<f32> = nalgebra::convert(body.position());
            sphere.set_local_translation(Translation3::from(position));
            sphere.set_local_rotation(spin_about_y(body.spin));
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, state: &AppState, fps: f64) {
        let run = state.run_state();
        let background = run.theme.background();
        window.set_background_color(background.x, background.y, background.z);

        self.camera.sync(state.camera());
        self.update_scene_objects(state.orrery());

        let ring_color = color_from_hex(RING_COLOR);
        for body in state.orrery().bodies() {
            self.renderer
                .draw_ring(body.info.orbit_radius as f32, ring_color);
        }
        self.renderer.draw_stars(&self.stars, color_from_hex(STAR_COLOR));

        // Draw text
        let font = Font::default();
        let text_color = run.theme.text_color();
        // no idea why i have to multiply by 2.0, but there it is
        let width = window.width() as f32 * 2.0;
        let height = window.height() as f32 * 2.0;

        window.draw_text(
            &speed_panel_text(state),
            &Point2::origin(),
            TEXT_SIZE,
            &font,
            &text_color,
        );
        window.draw_text(
            &status_text(state, fps),
            &Point2::new(width - 700.0, 0.0),
            TEXT_SIZE,
            &font,
            &text_color,
        );
        window.draw_text(
            KEY_LEGEND,
            &Point2::new(0.0, height - 3.0 * LINE_HEIGHT - 20.0),
            TEXT_SIZE,
            &font,
            &text_color,
        );

        if let Some(Hover { target, x, y }) = state.hover() {
            let label = match target {
                Pickable::Body(id) => state.orrery().get_body(id).label(),
                Pickable::Sun => state.orrery().name_of(target).to_owned(),
            };
            window.draw_text(
                &label,
                &Point2::new(
                    (x + TOOLTIP_OFFSET.0) * 2.0,
                    (y + TOOLTIP_OFFSET.1) * 2.0,
                ),
                TEXT_SIZE,
                &font,
                &text_color,
            );
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

fn speed_panel_text(state: &AppState) -> String {
    let speeds = state.speeds();
    let mut text = String::from("Orbit speeds\n");
    for body in state.orrery().bodies() {
        let marker = if body.id == speeds.selected() { '>' } else { ' ' };
        text.push_str(&format!(
            "{} {} {}\n",
            marker,
            body.label(),
            speeds.readout(body)
        ));
    }
    text
}

fn status_text(state: &AppState, fps: f64) -> String {
    let run = state.run_state();
    format!(
        "{}
[Space] {}   [T] {}
{}
FPS: {:.0}",
        run.status_text(),
        run.pause_button_label(),
        run.theme.button_label(),
        state.focused_label(),
        fps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::input::InputEvent;
    use crate::model::orrery::registry::default_bodies;
    use crate::model::orrery::BodyID;

    fn state() -> AppState {
        AppState::new(Orrery::with_angles(default_bodies(), &[0.0; 8]))
    }

    #[test]
    fn test_speed_panel_text() {
        let mut state = state();
        state.handle_input(InputEvent::SelectBody(BodyID(2)));
        state.handle_input(InputEvent::NudgeSpeed(-5));

        let text = speed_panel_text(&state);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "  ☿ Mercury 4.7x");
        assert_eq!(lines[3], "> 🌍 Earth 2.5x");
    }

    #[test]
    fn test_status_text() {
        let mut state = state();
        state.handle_input(InputEvent::TogglePause);
        state.handle_input(InputEvent::SelectBody(BodyID(5)));
        state.handle_input(InputEvent::FocusSelected);

        let text = status_text(&state, 59.6);
        assert_eq!(
            text,
            "System Paused\n[Space] Resume   [T] Light Mode\nFocused: Saturn\nFPS: 60"
        );
    }
}
