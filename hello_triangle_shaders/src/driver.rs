//! The graphics-API calls that building a program depends on.
//!
//! Every handle here is the raw `GLuint` the driver hands out, and `0` is never a valid object. The
//! wrappers in [`crate::program`] own these handles; nothing else should delete them.

use std::ffi::CString;

use gl::types::*;

use crate::stage::StageKind;

/// The subset of OpenGL needed to compile, link and use a shader program.
///
/// Implementors are cheap handles (cloned into every program they create) and must only be used
/// on the thread that owns the context.
pub trait ShaderDriver: Clone {
    /// Returns `0` if the driver couldn't create the object.
    fn create_shader(&self, kind: StageKind) -> GLuint;
    /// Uploads `source` and compiles it, returning the compile status.
    fn compile_shader(&self, shader: GLuint, source: &str) -> bool;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn delete_shader(&self, shader: GLuint);

    /// Returns `0` if the driver couldn't create the object.
    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    /// Links the program, returning the link status.
    fn link_program(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint) -> String;
    fn delete_program(&self, program: GLuint);

    /// Binds `program` for drawing, or unbinds whatever is bound with `0`.
    fn use_program(&self, program: GLuint);
    fn attrib_location(&self, program: GLuint, name: &str) -> Option<GLuint>;
}

/// Forwards to the global `gl` function pointers.
///
/// `gl::load_with` has to have been called with a current context before any of these are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlDriver;

impl ShaderDriver for GlDriver {
    fn create_shader(&self, kind: StageKind) -> GLuint {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn compile_shader(&self, shader: GLuint, source: &str) -> bool {
        // Pass the length explicitly so the source doesn't need a trailing NUL.
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;

        let mut success = GLint::from(gl::FALSE);
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }

        success == GLint::from(gl::TRUE)
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };

        read_info_log(len, |capacity, written, buf| unsafe {
            gl::GetShaderInfoLog(shader, capacity, written, buf)
        })
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) -> bool {
        let mut success = GLint::from(gl::FALSE);
        unsafe {
            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }

        success == GLint::from(gl::TRUE)
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };

        read_info_log(len, |capacity, written, buf| unsafe {
            gl::GetProgramInfoLog(program, capacity, written, buf)
        })
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn attrib_location(&self, program: GLuint, name: &str) -> Option<GLuint> {
        // A name with an interior NUL can't match any attribute.
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(program, name.as_ptr()) };

        if location < 0 { None } else { Some(location as GLuint) }
    }
}

/// Fetches an info log of `len` bytes (as reported by `GL_INFO_LOG_LENGTH`, terminator included).
///
/// `fetch` is handed the buffer capacity, a slot for the number of bytes written and the buffer
/// itself. The buffer lives only for the duration of this call.
fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buf.as_mut_ptr() as *mut GLchar);

    buf.truncate((written.max(0) as usize).min(buf.len()));
    String::from_utf8_lossy(&buf).trim_end().to_string()
}
