use std::fmt;
use std::str::FromStr;

use gl::types::GLenum;

/// One programmable stage of the pipeline.
///
/// Variants are declared in pipeline order, so sorting stages (or keying a `BTreeMap` by them)
/// yields the order in which the driver will run them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageKind {
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl StageKind {
    pub const ALL: [StageKind; 6] = [
        StageKind::Vertex,
        StageKind::TessellationControl,
        StageKind::TessellationEvaluation,
        StageKind::Geometry,
        StageKind::Fragment,
        StageKind::Compute,
    ];

    /// The value passed to `glCreateShader` for this stage.
    pub fn gl_enum(self) -> GLenum {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::TessellationControl => gl::TESS_CONTROL_SHADER,
            StageKind::TessellationEvaluation => gl::TESS_EVALUATION_SHADER,
            StageKind::Geometry => gl::GEOMETRY_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
            StageKind::Compute => gl::COMPUTE_SHADER,
        }
    }

    /// The conventional file extension for sources of this stage (`default.vert`,
    /// `default.tesc`, ...).
    pub fn extension(self) -> &'static str {
        match self {
            StageKind::Vertex => "vert",
            StageKind::TessellationControl => "tesc",
            StageKind::TessellationEvaluation => "tese",
            StageKind::Geometry => "geom",
            StageKind::Fragment => "frag",
            StageKind::Compute => "comp",
        }
    }

    pub fn is_tessellation(self) -> bool {
        match self {
            StageKind::TessellationControl | StageKind::TessellationEvaluation => true,
            _ => false,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageKind::Vertex => "vertex shader",
            StageKind::TessellationControl => "tessellation control shader",
            StageKind::TessellationEvaluation => "tessellation evaluation shader",
            StageKind::Geometry => "geometry shader",
            StageKind::Fragment => "fragment shader",
            StageKind::Compute => "compute shader",
        })
    }
}

impl FromStr for StageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.extension().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown shader stage \"{}\"", s))
    }
}

/// Source text for one stage, tagged with the stage it is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStageSource {
    kind: StageKind,
    text: String,
}

impl ShaderStageSource {
    pub fn new(kind: StageKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn kind(&self) -> StageKind { self.kind }

    pub fn text(&self) -> &str { &self.text }
}
