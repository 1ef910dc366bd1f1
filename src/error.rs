use glutin::{ContextError, CreationError};
use shaders::BuildError;
use thiserror::Error;

use crate::graphics::version::GlVersion;

/// Everything that can stop the program from reaching its event loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to initialize OpenGL: {0}")]
    DriverInitFailed(String),

    #[error("OpenGL {required} not supported (driver provides {available})")]
    FeatureLevelUnsupported { required: GlVersion, available: GlVersion },

    #[error("could not create an OpenGL context")]
    ContextCreation(#[from] CreationError),

    #[error("could not make the OpenGL context current")]
    ContextCurrent(#[source] ContextError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("shader program has no vertex attribute \"{0}\"")]
    MissingAttribute(&'static str),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            _ => 1,
        }
    }
}
