//! Camera
//!
//! A small Euler-angle camera with two composition modes: `LookAt`
//! (orbit-style, translation applied after rotation) and `FirstPerson`
//! (rotation applied after translation). The projection uses the 0..1
//! depth range expected by wgpu.

use glam::{Mat4, Vec3};

/// How the view matrix is composed from rotation and translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    /// Orbit-style: `view = translation * rotation`.
    LookAt,
    /// Fly-style: `view = rotation * translation`.
    FirstPerson,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub kind: CameraKind,
    /// Camera translation in view space.
    pub position: Vec3,
    /// Euler rotation in degrees (pitch, yaw, roll).
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Mirror the Y axis: negates the projection's Y axis, the pitch
    /// rotation, and the Y translation (for flipped target conventions).
    pub flip_y: bool,

    view: Mat4,
    proj: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraKind::LookAt)
    }
}

impl Camera {
    #[must_use]
    pub fn new(kind: CameraKind) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov: 60.0,
            znear: 0.1,
            zfar: 256.0,
            flip_y: false,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        }
    }

    /// Sets the projection and recomputes the projection matrix.
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, znear: f32, zfar: f32) {
        self.fov = fov;
        self.znear = znear;
        self.zfar = zfar;
        self.proj = Mat4::perspective_rh(fov.to_radians(), aspect, znear, zfar);
        if self.flip_y {
            self.proj.y_axis.y *= -1.0;
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Sets the Euler rotation in degrees.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.update_view_matrix();
    }

    /// Adds to the Euler rotation, in degrees.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.update_view_matrix();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.update_view_matrix();
    }

    pub fn update_view_matrix(&mut self) {
        let pitch = if self.flip_y {
            -self.rotation.x
        } else {
            self.rotation.x
        };
        let rotation = Mat4::from_rotation_x(pitch.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians());

        let mut position = self.position;
        if self.flip_y {
            position.y = -position.y;
        }
        let translation = Mat4::from_translation(position);

        self.view = match self.kind {
            CameraKind::LookAt => translation * rotation,
            CameraKind::FirstPerson => rotation * translation,
        };
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.proj
    }

    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn identity_rotation_view_is_translation() {
        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_position(Vec3::new(0.0, 0.0, -5.0));
        let moved = camera.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((moved.z - -5.0).abs() < 1e-6);
    }

    #[test]
    fn flip_y_negates_projection_y() {
        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_perspective(60.0, 16.0 / 9.0, 0.1, 100.0);
        let y = camera.projection().y_axis.y;

        camera.flip_y = true;
        camera.set_perspective(60.0, 16.0 / 9.0, 0.1, 100.0);
        assert!((camera.projection().y_axis.y + y).abs() < 1e-6);
    }

    #[test]
    fn flip_y_mirrors_pitch_and_translation() {
        let mut camera = Camera::new(CameraKind::LookAt);
        camera.set_rotation(Vec3::new(30.0, 0.0, 0.0));
        camera.set_position(Vec3::new(0.0, 2.0, -5.0));
        let normal = camera.view();

        camera.flip_y = true;
        camera.update_view_matrix();
        let flipped = camera.view();

        // Y translation negated, Z untouched
        assert!((flipped.w_axis.y + normal.w_axis.y).abs() < 1e-6);
        assert!((flipped.w_axis.z - normal.w_axis.z).abs() < 1e-6);
        // Pitch negated: the rotation's sine terms swap sign
        assert!((flipped.y_axis.z + normal.y_axis.z).abs() < 1e-6);
        assert!((flipped.y_axis.y - normal.y_axis.y).abs() < 1e-6);
    }

    #[test]
    fn composition_order_differs_by_kind() {
        let mut orbit = Camera::new(CameraKind::LookAt);
        orbit.position = Vec3::new(0.0, 0.0, -3.0);
        orbit.rotation = Vec3::new(0.0, 90.0, 0.0);
        orbit.update_view_matrix();

        let mut fly = Camera::new(CameraKind::FirstPerson);
        fly.position = orbit.position;
        fly.rotation = orbit.rotation;
        fly.update_view_matrix();

        assert!(orbit.view() != fly.view());
    }
}
