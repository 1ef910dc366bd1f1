use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::driver::ShaderDriver;
use crate::error::BuildError;
use crate::loader::SourceLoader;
use crate::program::{CompiledStage, ShaderProgram};
use crate::stage::{ShaderStageSource, StageKind};

/// Builds a [`ShaderProgram`] from named source files.
///
/// ```ignore
/// let loader = SourceLoader::new("shaders");
/// let program = ProgramBuilder::new(GlDriver, &loader)
///     .stage(StageKind::Vertex, "default.vert")
///     .stage(StageKind::Fragment, "default.frag")
///     .build()?;
/// ```
///
/// Stages are loaded and compiled one at a time in pipeline order. The first stage that can't be
/// read or doesn't compile ends the build; nothing after it is touched and no program object is
/// created.
pub struct ProgramBuilder<'l, D: ShaderDriver> {
    driver: D,
    loader: &'l SourceLoader,
    stages: BTreeMap<StageKind, String>,
}

impl<'l, D: ShaderDriver> ProgramBuilder<'l, D> {
    pub fn new(driver: D, loader: &'l SourceLoader) -> Self {
        Self {
            driver,
            loader,
            stages: BTreeMap::new(),
        }
    }

    /// Requests `kind`, read from `name`. Requesting the same kind again replaces the earlier name.
    pub fn stage(mut self, kind: StageKind, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(previous) = self.stages.insert(kind, name.clone()) {
            warn!("{} \"{}\" replaces \"{}\"", kind, name, previous);
        }
        self
    }

    /// Requests every `(kind, name)` pair in `stages`.
    pub fn stages<I, S>(self, stages: I) -> Self
    where
        I: IntoIterator<Item = (StageKind, S)>,
        S: Into<String>,
    {
        stages
            .into_iter()
            .fold(self, |builder, (kind, name)| builder.stage(kind, name))
    }

    /// The requested stages, in the order they will be compiled.
    pub fn requested(&self) -> impl Iterator<Item = (StageKind, &str)> {
        self.stages.iter().map(|(kind, name)| (*kind, name.as_str()))
    }

    /// Loads, compiles and links the requested stages.
    ///
    /// Can be called more than once; every call produces a new, independent program.
    pub fn build(&self) -> Result<ShaderProgram<D>, BuildError> {
        if self.stages.is_empty() {
            return Err(BuildError::NoStages);
        }

        debug!("building program from {} stages", self.stages.len());

        let mut compiled = Vec::with_capacity(self.stages.len());
        for (&kind, name) in &self.stages {
            debug!("loading {} \"{}\"", kind, name);
            let source = ShaderStageSource::new(kind, self.loader.load(name)?);

            debug!("compiling {} \"{}\"", kind, name);
            compiled.push(CompiledStage::compile(&self.driver, &source, name)?);
        }

        let program = ShaderProgram::link(&self.driver, &compiled)?;
        info!(
            "built program {} from {}",
            program.id(),
            self.stages.values().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        Ok(program)
    }
}
