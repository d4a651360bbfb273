/// Errors raised while bringing up the browser renderer
use shapes_core::{GeometryError, ShapeKind, UnknownControl};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("browser window is unavailable")]
    WindowUnavailable,

    #[error("no <canvas> element with id `{0}`")]
    CanvasNotFound(String),

    #[error("WebGL2 is not supported by this browser")]
    ContextUnavailable,

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("shader program linking failed: {0}")]
    ProgramLink(String),

    #[error("unable to create {0}")]
    Resource(&'static str),

    #[error("{kind:?} mesh is invalid: {source}")]
    InvalidMesh {
        kind: ShapeKind,
        source: GeometryError,
    },

    #[error("invalid scene options: {0}")]
    Options(String),

    #[error(transparent)]
    UnknownControl(#[from] UnknownControl),

    #[error("javascript error: {0}")]
    Js(String),
}

impl WebError {
    pub fn from_js(value: JsValue) -> Self {
        WebError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_diagnostics() {
        let err = WebError::ShaderCompile("ERROR: 0:3: 'vColor' : undeclared identifier".into());
        assert!(err.to_string().contains("undeclared identifier"));

        let err = WebError::InvalidMesh {
            kind: ShapeKind::Star,
            source: GeometryError::PartialTriangle(4),
        };
        assert_eq!(
            err.to_string(),
            "Star mesh is invalid: index count 4 is not a multiple of three"
        );
    }

    #[test]
    fn test_unknown_control_is_transparent() {
        let err = WebError::from(UnknownControl("zoom".into()));
        assert_eq!(err.to_string(), "unknown control parameter `zoom`");
    }
}
