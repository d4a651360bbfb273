/// User-controlled global transform and per-object model-view composition
use nalgebra::Vector3;
use std::str::FromStr;

use crate::error::UnknownControl;
use crate::matrix::{self, Mat4};

/// One of the six numeric controls exposed by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlParam {
    RotationX,
    RotationY,
    RotationZ,
    Scale,
    TranslateX,
    TranslateY,
}

impl ControlParam {
    pub const ALL: [ControlParam; 6] = [
        ControlParam::RotationX,
        ControlParam::RotationY,
        ControlParam::RotationZ,
        ControlParam::Scale,
        ControlParam::TranslateX,
        ControlParam::TranslateY,
    ];

    /// Parameter name as used by the UI layer
    pub fn name(self) -> &'static str {
        match self {
            ControlParam::RotationX => "rotationX",
            ControlParam::RotationY => "rotationY",
            ControlParam::RotationZ => "rotationZ",
            ControlParam::Scale => "scale",
            ControlParam::TranslateX => "translateX",
            ControlParam::TranslateY => "translateY",
        }
    }
}

impl FromStr for ControlParam {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|param| param.name() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Global transform driven by the UI controls
///
/// Rotations are stored in degrees, as the sliders report them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserControlState {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl UserControlState {
    pub fn new() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn set(&mut self, param: ControlParam, value: f32) {
        let slot = match param {
            ControlParam::RotationX => &mut self.rotation_x,
            ControlParam::RotationY => &mut self.rotation_y,
            ControlParam::RotationZ => &mut self.rotation_z,
            ControlParam::Scale => &mut self.scale,
            ControlParam::TranslateX => &mut self.translate_x,
            ControlParam::TranslateY => &mut self.translate_y,
        };
        *slot = value;
    }

    pub fn get(&self, param: ControlParam) -> f32 {
        match param {
            ControlParam::RotationX => self.rotation_x,
            ControlParam::RotationY => self.rotation_y,
            ControlParam::RotationZ => self.rotation_z,
            ControlParam::Scale => self.scale,
            ControlParam::TranslateX => self.translate_x,
            ControlParam::TranslateY => self.translate_y,
        }
    }

    /// Restore every control to its default value
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for UserControlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-local placement (rotation in radians, uniform scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl LocalTransform {
    pub fn new(offset: Vector3<f32>, rotation: Vector3<f32>, scale: f32) -> Self {
        Self {
            offset,
            rotation,
            scale,
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vector3::new(x, y, z), Vector3::zeros(), 1.0)
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::at(0.0, 0.0, 0.0)
    }
}

/// Transform builder for the camera and per-object matrices
pub struct Transform;

impl Transform {
    /// Camera placement plus the user's global rotation and scale
    pub fn global_matrix(global: &UserControlState, camera_distance: f32) -> Mat4 {
        let mut m = matrix::identity();
        matrix::translate_mut(
            &mut m,
            &Vector3::new(global.translate_x, global.translate_y, camera_distance),
        );
        matrix::rotate_x_mut(&mut m, global.rotation_x.to_radians());
        matrix::rotate_y_mut(&mut m, global.rotation_y.to_radians());
        matrix::rotate_z_mut(&mut m, global.rotation_z.to_radians());
        matrix::scale_mut(&mut m, &Vector3::repeat(global.scale));
        m
    }

    /// Append an object's local transform to an accumulated matrix
    pub fn apply_local(m: &mut Mat4, local: &LocalTransform) {
        matrix::translate_mut(m, &local.offset);
        matrix::rotate_x_mut(m, local.rotation.x);
        matrix::rotate_y_mut(m, local.rotation.y);
        matrix::rotate_z_mut(m, local.rotation.z);
        matrix::scale_mut(m, &Vector3::repeat(local.scale));
    }

    /// Model-view matrix for one object in the current frame
    ///
    /// Order matters: global translate, rotate X/Y/Z, scale, then the local
    /// translate, rotate X/Y/Z, scale, each post-multiplied.
    pub fn compute_model_view(
        global: &UserControlState,
        local: &LocalTransform,
        camera_distance: f32,
    ) -> Mat4 {
        let mut m = Self::global_matrix(global, camera_distance);
        Self::apply_local(&mut m, local);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_control_defaults() {
        let state = UserControlState::default();
        assert_eq!(state.rotation_x, 0.0);
        assert_eq!(state.rotation_y, 0.0);
        assert_eq!(state.rotation_z, 0.0);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.translate_x, 0.0);
        assert_eq!(state.translate_y, 0.0);
    }

    #[test]
    fn test_set_and_reset() {
        let mut state = UserControlState::new();
        for (i, param) in ControlParam::ALL.into_iter().enumerate() {
            state.set(param, i as f32 + 0.5);
        }
        assert_eq!(state.get(ControlParam::RotationZ), 2.5);
        assert_eq!(state.translate_y, 5.5);

        state.reset();
        assert_eq!(state, UserControlState::new());
    }

    #[test]
    fn test_parse_control_names() {
        for param in ControlParam::ALL {
            assert_eq!(param.name().parse::<ControlParam>(), Ok(param));
        }
        assert_eq!(
            "zoom".parse::<ControlParam>(),
            Err(UnknownControl("zoom".to_string()))
        );
    }

    #[test]
    fn test_default_global_is_camera_translation() {
        let m = Transform::global_matrix(&UserControlState::new(), -8.0);
        let expected = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -8.0));
        assert!((m - expected).norm() < 1e-6);
    }

    #[test]
    fn test_global_rotation_uses_degrees() {
        let mut state = UserControlState::new();
        state.rotation_y = 90.0;
        let m = Transform::global_matrix(&state, 0.0);
        // +X in object space ends up along -Z
        let x = m.column(0);
        assert!(x[0].abs() < 1e-6);
        assert!((x[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_model_view_order() {
        let mut state = UserControlState::new();
        state.rotation_x = 30.0;
        state.rotation_z = -45.0;
        state.scale = 1.5;
        state.translate_x = 0.75;
        state.translate_y = -1.25;
        let local = LocalTransform::at(2.0, 1.0, 0.5)
            .with_rotation(0.2, 0.4, 0.6)
            .with_scale(0.8);

        let rotation = |x: f32, y: f32, z: f32| {
            Matrix4::from_axis_angle(&Vector3::x_axis(), x)
                * Matrix4::from_axis_angle(&Vector3::y_axis(), y)
                * Matrix4::from_axis_angle(&Vector3::z_axis(), z)
        };
        let expected = Matrix4::new_translation(&Vector3::new(0.75, -1.25, -8.0))
            * rotation(30f32.to_radians(), 0.0, (-45f32).to_radians())
            * Matrix4::new_scaling(1.5)
            * Matrix4::new_translation(&Vector3::new(2.0, 1.0, 0.5))
            * rotation(0.2, 0.4, 0.6)
            * Matrix4::new_scaling(0.8);

        let m = Transform::compute_model_view(&state, &local, -8.0);
        assert!((m - expected).norm() < 1e-5);
    }
}
