use std::ffi::CStr;

use gl::types::*;

/// Reads one of the driver's identification strings (`gl::VERSION`, `gl::RENDERER`, ...).
///
/// `None` if the driver returned a null pointer, which usually means there is no current context.
pub fn gl_string(name: GLenum) -> Option<String> {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return None;
        }

        Some(CStr::from_ptr(ptr as *const GLchar).to_string_lossy().into_owned())
    }
}

/// Pops every pending error off the driver's error queue.
pub fn drain_errors() -> Vec<GLenum> {
    let mut errors = Vec::new();
    loop {
        let error = unsafe { gl::GetError() };
        // A lost context can keep reporting errors.
        if error == gl::NO_ERROR || errors.len() >= 8 {
            break;
        }
        errors.push(error);
    }
    errors
}

pub fn error_name(error: GLenum) -> &'static str {
    match error {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}
