use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use std::time::Instant;

use self::controller::Controller;
use self::view::View;
use crate::model::input::InputEvent;
use crate::model::starfield::Starfield;
use crate::model::AppState;

mod camera;
mod controller;
mod renderers;
mod view;

pub struct Simulation {
    state: AppState,
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(mut state: AppState, starfield: Starfield, window: &mut Window) -> Self {
        // No Size event arrives for the initial window, so seed it here
        state.handle_input(InputEvent::Resized {
            width: window.width(),
            height: window.height(),
        });

        Self {
            view: View::new(&state, starfield, window),
            state,
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            if let Some(input) = self.controller.translate(&event.value) {
                self.state.handle_input(input);
            }
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.state.tick(Instant::now());
        self.view
            .prerender_scene(window, &self.state, self.controller.fps());
        self.controller.increment_frame_counter();
    }
}
