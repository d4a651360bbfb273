/// Shapes Core Library - Matrix math, transforms, geometry and scene driving
///
/// This library holds the target-independent core of the shapes viewer:
/// column-major 4x4 matrix operations, model-view composition, the fixed
/// primitive meshes, and the per-frame scene driver behind a render backend
/// trait.

pub mod config;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use config::SceneConfig;
pub use error::{GeometryError, UnknownControl};
pub use geometry::{Mesh, ShapeKind};
pub use matrix::Mat4;
pub use projection::{aspect_ratio, Camera};
pub use scene::{AnimationClock, Frame, InputEvent, RenderBackend, Scene, SceneState};
pub use transform::{ControlParam, LocalTransform, Transform, UserControlState};
