/// Scene configuration, overridable from the host page
use serde::Deserialize;

/// Camera, projection and animation constants
///
/// Every field is optional when deserialising; missing keys keep their
/// defaults. Keys are camelCase to match the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    /// Clock increment per rendered frame while animating
    pub clock_step: f32,
    pub clear_color: [f32; 4],
    pub start_animated: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            camera_distance: -8.0,
            clock_step: 0.01,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            start_animated: true,
        }
    }
}
