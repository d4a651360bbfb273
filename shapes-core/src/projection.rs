/// Camera and projection utilities
use crate::config::SceneConfig;
use crate::matrix::{self, Mat4};

/// Fixed camera: a perspective frustum looking down -Z from `distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Z translation applied before any user transform
    pub distance: f32,
}

impl Camera {
    pub fn new(fov: f32, near: f32, far: f32, distance: f32) -> Self {
        Self {
            fov,
            near,
            far,
            distance,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(
            config.fov_degrees.to_radians(),
            config.near,
            config.far,
            config.camera_distance,
        )
    }

    /// Projection for the current viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        matrix::perspective(self.fov, aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Width over height, falling back to 1.0 for a collapsed viewport
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}
