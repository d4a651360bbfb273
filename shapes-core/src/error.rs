/// Error types shared by the core library
use thiserror::Error;

/// Structural problems detected by [`crate::Mesh::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("mesh has {positions} positions but {colors} colors")]
    ColorCountMismatch { positions: usize, colors: usize },

    #[error("index count {0} is not a multiple of three")]
    PartialTriangle(usize),

    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u16,
        vertex_count: usize,
    },
}

/// A parameter name coming from the UI that does not match any control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown control parameter `{0}`")]
pub struct UnknownControl(pub String);
