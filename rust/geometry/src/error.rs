use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Invalid ray: {0}")]
    InvalidRay(String),

    #[error("Singular transform: {0}")]
    SingularTransform(String),
}
