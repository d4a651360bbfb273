/// Shapes Web - WASM entry point rendering the scene into a WebGL2 canvas
///
/// The page calls `WebRenderer.start(canvasId, options)`, wires its sliders
/// to `setControl` and its buttons to `toggleAnimation` / `reset`. Frames are
/// driven by `requestAnimationFrame`; the core scene never schedules itself.

pub mod error;
pub mod gl;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use log::{error, info, warn};
use shapes_core::{aspect_ratio, ControlParam, InputEvent, Scene, SceneConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

pub use error::WebError;
pub use gl::GlBackend;

/// Scene, backend and canvas shared by the frame loop and the JS API
struct App {
    canvas: HtmlCanvasElement,
    backend: GlBackend,
    scene: Scene,
}

impl App {
    fn new(canvas_id: &str, config: &SceneConfig) -> Result<Self, WebError> {
        let canvas = find_canvas(canvas_id)?;
        let context = canvas
            .get_context("webgl2")
            .map_err(WebError::from_js)?
            .ok_or(WebError::ContextUnavailable)?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| WebError::ContextUnavailable)?;

        let scene = Scene::new(config);
        let mut backend = GlBackend::new(context, config.clear_color)?;
        for object in scene.objects() {
            backend.upload(object.kind, &object.mesh)?;
        }

        Ok(Self {
            canvas,
            backend,
            scene,
        })
    }

    /// Match the drawing buffer to the displayed size, then draw
    fn render_frame(&mut self) {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        let resized = self.canvas.width() != width || self.canvas.height() != height;
        if width > 0 && height > 0 && resized {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }

        let (width, height) = (self.canvas.width(), self.canvas.height());
        self.backend.resize(width, height);
        self.scene
            .render_frame(&mut self.backend, aspect_ratio(width, height));
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Bring up WebGL2 on the canvas, upload the meshes and start the loop
    ///
    /// Startup failures are shown to the user with a blocking alert and
    /// returned to the caller.
    pub fn start(canvas_id: &str, options: JsValue) -> Result<WebRenderer, JsValue> {
        init_logging_once();

        let result = parse_options(options).and_then(|config| {
            let app = Rc::new(RefCell::new(App::new(canvas_id, &config)?));
            spawn_render_loop(Rc::clone(&app))?;
            Ok(app)
        });

        match result {
            Ok(app) => {
                info!("rendering into #{canvas_id}");
                Ok(WebRenderer { app })
            }
            Err(err) => {
                error!("startup failed: {err}");
                alert(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Render a single frame outside the animation loop
    pub fn render(&self) {
        self.app.borrow_mut().render_frame();
    }

    /// Update one of the six numeric controls by its UI name
    #[wasm_bindgen(js_name = setControl)]
    pub fn set_control(&self, name: &str, value: f32) -> Result<(), JsValue> {
        let param = name.parse::<ControlParam>().map_err(|err| {
            warn!("{err}");
            WebError::from(err)
        })?;
        self.dispatch(InputEvent::SetControl(param, value));
        Ok(())
    }

    /// Flip animation on or off; returns the new button label
    #[wasm_bindgen(js_name = toggleAnimation)]
    pub fn toggle_animation(&self) -> String {
        self.dispatch(InputEvent::ToggleAnimation);
        self.animation_label()
    }

    /// Restore control defaults; returns the new button label
    pub fn reset(&self) -> String {
        self.dispatch(InputEvent::Reset);
        self.animation_label()
    }

    #[wasm_bindgen(js_name = animationLabel)]
    pub fn animation_label(&self) -> String {
        self.app.borrow().scene.state().animation_label().to_string()
    }

    #[wasm_bindgen(js_name = controlValue)]
    pub fn control_value(&self, name: &str) -> Result<f32, JsValue> {
        let param = name.parse::<ControlParam>().map_err(WebError::from)?;
        Ok(self.app.borrow().scene.state().controls.get(param))
    }
}

impl WebRenderer {
    fn dispatch(&self, event: InputEvent) {
        self.app.borrow_mut().scene.handle(event);
    }
}

fn parse_options(options: JsValue) -> Result<SceneConfig, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(SceneConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|err| WebError::Options(err.to_string()))
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, WebError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or(WebError::WindowUnavailable)?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| WebError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| WebError::CanvasNotFound(canvas_id.to_string()))
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, WebError> {
    web_sys::window()
        .ok_or(WebError::WindowUnavailable)?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(WebError::from_js)
}

/// Re-arm `requestAnimationFrame` after every frame for as long as the page lives
fn spawn_render_loop(app: Rc<RefCell<App>>) -> Result<(), WebError> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        app.borrow_mut().render_frame();
        if let Some(closure) = next.borrow().as_ref() {
            if let Err(err) = request_animation_frame(closure) {
                error!("render loop stopped: {err}");
            }
        }
    }));

    let first = callback.borrow();
    let scheduled = match first.as_ref() {
        Some(closure) => request_animation_frame(closure).map(|_| ()),
        None => Ok(()),
    };
    scheduled
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn init_logging_once() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());
    });
}
