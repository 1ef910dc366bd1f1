//! Shader program construction on top of raw OpenGL.
//!
//! Building a program is a short, strictly ordered sequence: read each stage's source text, compile
//! it, link all compiled stages into one program, and report whatever the driver had to say if any
//! of that fails. This crate wraps that sequence in a safe interface:
//!
//! * [`SourceLoader`] reads shader text from disk.
//! * [`ProgramBuilder`] takes a mapping of [`StageKind`] to source name and produces a linked
//!   [`ShaderProgram`], or a [`BuildError`] carrying the driver's info log.
//! * [`ShaderDriver`] is the handful of GL entry points the builder needs. [`GlDriver`] forwards
//!   them to the `gl` crate; anything else implementing the trait (a fake, in the tests) can stand
//!   in for a real context.

pub mod builder;
pub mod driver;
pub mod error;
pub mod loader;
pub mod program;
pub mod stage;

#[cfg(test)]
pub(crate) mod mock;

pub use builder::ProgramBuilder;
pub use driver::{GlDriver, ShaderDriver};
pub use error::{BuildError, BuildPhase};
pub use loader::{load_source, SourceLoader};
pub use program::{CompiledStage, ShaderProgram, INLINE_SOURCE};
pub use stage::{ShaderStageSource, StageKind};
