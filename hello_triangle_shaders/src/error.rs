use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stage::StageKind;

/// Why a shader program could not be built.
///
/// The driver's info log is kept in `diagnostic` but left out of the `Display` text; it has
/// already been written to the log by the time the error is returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no shader stages were requested")]
    NoStages,

    #[error("shader source \"{name}\" not found at {}", .path.display())]
    ResourceNotFound { name: String, path: PathBuf },

    #[error("could not read shader source \"{name}\"")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to compile {stage} \"{name}\"")]
    StageCompileFailed {
        stage: StageKind,
        name: String,
        diagnostic: String,
    },

    #[error("failed to link shader program")]
    ProgramLinkFailed { diagnostic: String },

    #[error("the driver could not create a {stage} object")]
    ShaderCreationFailed { stage: StageKind },

    #[error("the driver could not create a program object")]
    ProgramCreationFailed,
}

/// The step of a build that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Loading,
    Compiling,
    Linking,
}

impl BuildError {
    pub fn phase(&self) -> BuildPhase {
        match self {
            BuildError::NoStages | BuildError::ResourceNotFound { .. } | BuildError::Io { .. } => {
                BuildPhase::Loading
            }
            BuildError::ShaderCreationFailed { .. } | BuildError::StageCompileFailed { .. } => {
                BuildPhase::Compiling
            }
            BuildError::ProgramCreationFailed | BuildError::ProgramLinkFailed { .. } => {
                BuildPhase::Linking
            }
        }
    }

    /// The driver info log, for compile and link failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            BuildError::StageCompileFailed { diagnostic, .. }
            | BuildError::ProgramLinkFailed { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }
}
