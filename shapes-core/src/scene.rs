/// Per-frame scene driver: animation state, input events and draw submission
use log::{debug, info};

use crate::config::SceneConfig;
use crate::geometry::{Mesh, ShapeKind};
use crate::matrix::Mat4;
use crate::projection::Camera;
use crate::transform::{ControlParam, LocalTransform, Transform, UserControlState};

const ORBIT_RADIUS: f32 = 2.5;
const LOWER_ROW_Y: f32 = -1.5;

/// Elapsed animation phase, advanced once per rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    phase: f32,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn advance(&mut self, step: f32) {
        self.phase += step;
    }
}

/// A discrete update coming from the UI input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SetControl(ControlParam, f32),
    ToggleAnimation,
    /// Restore control defaults and re-enable animation
    Reset,
}

/// Everything that changes between frames
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub controls: UserControlState,
    pub clock: AnimationClock,
    animating: bool,
}

impl SceneState {
    pub fn new(animating: bool) -> Self {
        Self {
            controls: UserControlState::new(),
            clock: AnimationClock::new(),
            animating,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Text for the animation toggle button
    pub fn animation_label(&self) -> &'static str {
        if self.animating {
            "Pause Animation"
        } else {
            "Resume Animation"
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::SetControl(param, value) => {
                debug!("control {} = {}", param.name(), value);
                self.controls.set(param, value);
            }
            InputEvent::ToggleAnimation => {
                self.animating = !self.animating;
                debug!("animation {}", if self.animating { "resumed" } else { "paused" });
            }
            InputEvent::Reset => {
                debug!("controls reset");
                self.controls.reset();
                self.animating = true;
            }
        }
    }

    /// Advance the clock if animation is enabled
    pub fn tick(&mut self, step: f32) {
        if self.animating {
            self.clock.advance(step);
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Local placement of each object as a function of the animation phase
pub fn animate(kind: ShapeKind, phase: f32) -> LocalTransform {
    match kind {
        ShapeKind::Cube => {
            LocalTransform::at(-2.0, 1.0, 0.0).with_rotation(phase, phase * 0.7, 0.0)
        }
        ShapeKind::Pyramid => LocalTransform::at(2.0, 1.0, 0.0).with_scale(0.8),
        ShapeKind::Octahedron => {
            let (sin, cos) = phase.sin_cos();
            LocalTransform::at(ORBIT_RADIUS * cos, LOWER_ROW_Y, ORBIT_RADIUS * sin)
                .with_rotation(0.0, phase * 2.0, 0.0)
                .with_scale(0.7)
        }
        ShapeKind::Star => LocalTransform::at(0.0, LOWER_ROW_Y, 0.0)
            .with_rotation(0.0, 0.0, phase * 0.5)
            .with_scale(1.0 + 0.2 * (phase * 3.0).sin()),
    }
}

/// Consumer of draw calls; the WebGL shell implements this
pub trait RenderBackend {
    /// Clear color and depth buffers
    fn clear(&mut self);

    /// Issue one indexed triangle draw for a previously uploaded shape
    fn draw(&mut self, kind: ShapeKind, projection: &Mat4, model_view: &Mat4);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub kind: ShapeKind,
    pub model_view: Mat4,
}

/// The matrices for one frame, computed before any backend call
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub projection: Mat4,
    pub draws: Vec<DrawCall>,
}

/// A shape together with its static mesh
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: ShapeKind,
    pub mesh: Mesh,
}

/// Owns the meshes and per-frame state; drawn once per host frame callback
pub struct Scene {
    camera: Camera,
    clock_step: f32,
    objects: Vec<SceneObject>,
    state: SceneState,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let objects: Vec<SceneObject> = ShapeKind::ALL
            .into_iter()
            .map(|kind| SceneObject {
                kind,
                mesh: kind.build(),
            })
            .collect();

        for object in &objects {
            info!(
                "built {}: {} vertices, {} triangles",
                object.kind.name(),
                object.mesh.vertex_count(),
                object.mesh.triangle_count()
            );
        }

        Self {
            camera: Camera::from_config(config),
            clock_step: config.clock_step,
            objects,
            state: SceneState::new(config.start_animated),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn handle(&mut self, event: InputEvent) {
        self.state.apply(event);
    }

    /// Projection and model-view matrices for the current state
    pub fn frame(&self, aspect: f32) -> Frame {
        let phase = self.state.clock.phase();
        let draws = self
            .objects
            .iter()
            .map(|object| DrawCall {
                kind: object.kind,
                model_view: Transform::compute_model_view(
                    &self.state.controls,
                    &animate(object.kind, phase),
                    self.camera.distance,
                ),
            })
            .collect();

        Frame {
            projection: self.camera.projection_matrix(aspect),
            draws,
        }
    }

    /// Clear, advance the clock, and draw every object once
    pub fn render_frame<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, aspect: f32) {
        backend.clear();
        self.state.tick(self.clock_step);

        let frame = self.frame(aspect);
        for call in &frame.draws {
            backend.draw(call.kind, &frame.projection, &call.model_view);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
