//! Safe wrappers around the OpenGL buffer and vertex array objects the scene is built from.
//!
//! Each wrapper owns its GL object and deletes it when dropped, so they must all be dropped while
//! the context that created them is still current. Shader programs live in the `shaders` crate.

use std::ffi::c_void;
use std::mem::size_of;

use gl::types::*;

/// Which binding point a buffer is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlBufferType {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize,
}

/// A [vertex array object](https://www.khronos.org/opengl/wiki/Vertex_Specification#Vertex_Array_Object),
/// which records which buffers feed which shader attributes, and in what format.
pub struct GlVertexArray {
    id: GLuint,
}

impl GlVertexArray {
    pub fn generate() -> Self {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        Self { id }
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) }
    }

    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) }
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) }
    }
}

/// A vertex buffer object holding `f32` vertex data.
pub struct GlVertexBuffer {
    id: GLuint,
}

impl GlVertexBuffer {
    /// Creates the buffer and uploads `data` once, for drawing many times.
    pub fn init(data: &[f32]) -> Self {
        let vbo = Self { id: generate_buffer() };
        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * size_of::<f32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        unbind_buffers(GlBufferType::Array);

        vbo
    }

    pub fn id(&self) -> GLuint { self.id }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id) }
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

/// An element buffer object: a list of `u16` vertex indices.
pub struct GlElementBuffer {
    id: GLuint,
    len: usize,
}

impl GlElementBuffer {
    /// Creates the buffer and uploads `data`.
    ///
    /// Binding an element buffer while a vertex array is bound attaches it to that array, so this
    /// leaves the buffer unbound; call [`GlElementBuffer::bind`] with the target array bound.
    pub fn init(data: &[u16]) -> Self {
        let ebo = Self { id: generate_buffer(), len: data.len() };
        ebo.bind();
        unsafe {
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (data.len() * size_of::<u16>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        unbind_buffers(GlBufferType::Element);

        ebo
    }

    pub fn id(&self) -> GLuint { self.id }

    /// Number of indices in the buffer.
    pub fn len(&self) -> usize { self.len }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id) }
    }
}

impl Drop for GlElementBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

fn generate_buffer() -> GLuint {
    let mut id = 0;
    unsafe { gl::GenBuffers(1, &mut id) };
    id
}

pub fn unbind_buffers(buffer_type: GlBufferType) {
    unsafe { gl::BindBuffer(buffer_type as GLenum, 0) }
}

/// Points attribute `index` at tightly packed `f32` vectors of `size` components, starting
/// `offset` bytes into the bound array buffer, and enables it.
pub fn set_vertex_attrib(index: GLuint, size: GLint, offset: usize) {
    unsafe {
        gl::VertexAttribPointer(index, size, gl::FLOAT, gl::FALSE, 0, offset as *const c_void);
        gl::EnableVertexAttribArray(index);
    }
}
