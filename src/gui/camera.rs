use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Point3};

use crate::model::camera::OrbitCamera;

// kiss3d asks the camera for matrices, but all of the movement logic lives in
// the model's OrbitCamera. This just mirrors the latest copy of it each frame.
// Input is routed through the controller instead of handle_event, so that
// mouse and touch go through the same code path.
pub struct MirrorCamera {
    camera: OrbitCamera,
}

impl MirrorCamera {
    pub fn new(camera: OrbitCamera) -> Self {
        MirrorCamera { camera }
    }

    pub fn sync(&mut self, camera: &OrbitCamera) {
        self.camera = camera.clone();
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.camera.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for MirrorCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        // Keep the aspect ratio right even before the model hears about it
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.camera.set_viewport(w, h);
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.camera.pose().eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.camera.view_transform()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        let projection = self.camera.projection();
        (projection.znear(), projection.zfar())
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
