//! Scene camera and card picking.
//!
//! The web front-end uses this to build the view-projection matrix and to
//! decide whether the pointer is over the card.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, CARD_HEIGHT, CARD_WIDTH};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed camera with a perspective projection.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point given as a viewport fraction
    /// (`uv` in [0, 1], origin top-left).
    pub fn screen_ray(&self, uv: Vec2) -> Ray {
        let ndc_x = uv.x * 2.0 - 1.0;
        let ndc_y = 1.0 - uv.y * 2.0;
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }
}

/// Distance along `ray` at which it crosses the card quad transformed by
/// `model`, if it does. The quad spans `CARD_WIDTH` x `CARD_HEIGHT` in the
/// local XY plane.
pub fn card_hit(ray: Ray, model: Mat4) -> Option<f32> {
    let det = model.determinant();
    if det.abs() < 1e-8 {
        return None;
    }
    let inv = model.inverse();
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.dir);
    if d.z.abs() < 1e-6 {
        return None;
    }
    let t_local = -o.z / d.z;
    if t_local < 0.0 {
        return None;
    }
    let p = o + d * t_local;
    let inside = p.x.abs() <= CARD_WIDTH * 0.5 && p.y.abs() <= CARD_HEIGHT * 0.5;
    if !inside {
        return None;
    }
    let world = model.transform_point3(p);
    Some((world - ray.origin).length())
}
