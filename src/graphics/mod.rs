//! Everything drawn on screen that isn't a shader: buffers, the quad, and the scene tying them to a
//! program.

pub mod opengl;
pub mod quad;
pub mod scene;
pub mod utils;
pub mod version;
