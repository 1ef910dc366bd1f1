use gl::types::GLuint;
use log::{debug, error, trace};

use crate::driver::ShaderDriver;
use crate::error::BuildError;
use crate::stage::{ShaderStageSource, StageKind};

/// A shader object that compiled successfully. Deleted when dropped.
pub struct CompiledStage<'d, D: ShaderDriver> {
    driver: &'d D,
    id: GLuint,
    kind: StageKind,
}

impl<'d, D: ShaderDriver> CompiledStage<'d, D> {
    /// Compiles `source`, naming it `name` in any diagnostic.
    ///
    /// On failure the driver's info log is written to the error log once and returned inside the
    /// error, and the shader object is deleted.
    pub fn compile(driver: &'d D, source: &ShaderStageSource, name: &str) -> Result<Self, BuildError> {
        let kind = source.kind();
        let id = driver.create_shader(kind);
        if id == 0 {
            return Err(BuildError::ShaderCreationFailed { stage: kind });
        }

        // From here on the object is owned, so early returns delete it.
        let stage = Self { driver, id, kind };

        if !driver.compile_shader(id, source.text()) {
            let mut diagnostic = driver.shader_info_log(id);
            if diagnostic.is_empty() {
                diagnostic = format!("{} \"{}\" failed to compile (driver gave no info log)", kind, name);
            }
            error!("failed to compile {} \"{}\":\n{}", kind, name, diagnostic);

            return Err(BuildError::StageCompileFailed {
                stage: kind,
                name: name.to_string(),
                diagnostic,
            });
        }

        trace!("compiled {} \"{}\" as shader {}", kind, name, id);
        Ok(stage)
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn kind(&self) -> StageKind { self.kind }
}

impl<'d, D: ShaderDriver> Drop for CompiledStage<'d, D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// The name given to sources passed to [`ShaderProgram::from_sources`].
pub const INLINE_SOURCE: &str = "<inline>";

/// A linked program, ready to draw with. Deleted when dropped or [released](Self::release).
pub struct ShaderProgram<D: ShaderDriver> {
    driver: D,
    id: GLuint,
    stages: Vec<StageKind>,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    /// Compiles and links in-memory sources, one per stage.
    ///
    /// Sources are compiled in the order given and the first failure ends the build. Diagnostics
    /// name these sources [`INLINE_SOURCE`].
    pub fn from_sources(driver: D, sources: &[ShaderStageSource]) -> Result<Self, BuildError> {
        if sources.is_empty() {
            return Err(BuildError::NoStages);
        }

        let compiled = sources
            .iter()
            .map(|source| CompiledStage::compile(&driver, source, INLINE_SOURCE))
            .collect::<Result<Vec<_>, _>>()?;

        Self::link(&driver, &compiled)
    }

    /// Attaches `stages` to a fresh program object and links it.
    ///
    /// The stages are detached again whether or not linking succeeds, so once they are dropped
    /// the driver is free to release them.
    pub fn link(driver: &D, stages: &[CompiledStage<'_, D>]) -> Result<Self, BuildError> {
        if stages.is_empty() {
            return Err(BuildError::NoStages);
        }

        let id = driver.create_program();
        if id == 0 {
            return Err(BuildError::ProgramCreationFailed);
        }

        let program = Self {
            driver: driver.clone(),
            id,
            stages: stages.iter().map(CompiledStage::kind).collect(),
        };

        for stage in stages {
            driver.attach_shader(id, stage.id());
        }

        debug!("linking program {} from {} stages", id, stages.len());
        let linked = driver.link_program(id);

        let result = if linked {
            Ok(())
        } else {
            let mut diagnostic = driver.program_info_log(id);
            if diagnostic.is_empty() {
                diagnostic = format!("program {} failed to link (driver gave no info log)", id);
            }
            error!("failed to link shader program:\n{}", diagnostic);
            Err(BuildError::ProgramLinkFailed { diagnostic })
        };

        for stage in stages {
            driver.detach_shader(id, stage.id());
        }

        // On failure `program` is dropped here and the object deleted.
        result.map(|_| program)
    }

    pub fn id(&self) -> GLuint { self.id }

    /// The stages linked into this program, in pipeline order.
    pub fn stages(&self) -> &[StageKind] { &self.stages }

    /// Whether draws with this program must submit patches.
    pub fn is_tessellated(&self) -> bool {
        self.stages.iter().any(|kind| kind.is_tessellation())
    }

    /// Binds the program for subsequent draw calls.
    pub fn use_program(&self) {
        self.driver.use_program(self.id);
    }

    pub fn unuse(&self) {
        self.driver.use_program(0);
    }

    pub fn attrib_location(&self, name: &str) -> Option<GLuint> {
        self.driver.attrib_location(self.id, name)
    }

    /// Deletes the program now rather than whenever it goes out of scope.
    pub fn release(self) {}
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        trace!("deleting program {}", self.id);
        self.driver.delete_program(self.id);
    }
}
