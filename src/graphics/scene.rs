use gl::types::*;
use log::{debug, warn};
use shaders::{GlDriver, ShaderProgram};

use super::opengl::{set_vertex_attrib, GlElementBuffer, GlVertexArray, GlVertexBuffer};
use super::quad::Mesh;
use super::utils::{drain_errors, error_name};
use crate::error::AppError;

/// How the scene's indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// One patch of `vertices` control points, for programs with tessellation stages.
    Patches { vertices: GLint },
    /// A fan around the first vertex; four vertices make a quad.
    TriangleFan,
}

impl DrawMode {
    /// Tessellated programs only accept patches; everything else gets a triangle fan.
    pub fn for_program(tessellated: bool, vertex_count: usize) -> Self {
        if tessellated {
            DrawMode::Patches { vertices: vertex_count as GLint }
        } else {
            DrawMode::TriangleFan
        }
    }

    pub fn primitive(self) -> GLenum {
        match self {
            DrawMode::Patches { .. } => gl::PATCHES,
            DrawMode::TriangleFan => gl::TRIANGLE_FAN,
        }
    }
}

/// Everything needed to draw a frame: the program and the buffers it reads from.
///
/// Dropping the scene deletes all of it, so it has to go before the context does.
pub struct Scene {
    // Declared so the vertex array is deleted before the buffers it references.
    vao: GlVertexArray,
    _vbo: GlVertexBuffer,
    ibo: GlElementBuffer,
    program: ShaderProgram<GlDriver>,
    mode: DrawMode,
    clear_color: [f32; 4],
}

impl Scene {
    pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

    /// Uploads `mesh` and records its layout against `program`'s `position` and `color` inputs.
    pub fn new(program: ShaderProgram<GlDriver>, mesh: &Mesh) -> Result<Self, AppError> {
        mesh.validate().map_err(AppError::Config)?;

        let position = program
            .attrib_location("position")
            .ok_or(AppError::MissingAttribute("position"))?;
        let color = program.attrib_location("color");
        if color.is_none() {
            warn!("shader program has no \"color\" input; the quad will not be colored per vertex");
        }

        let vbo = GlVertexBuffer::init(&mesh.vertex_data());
        let ibo = GlElementBuffer::init(&mesh.indices);
        let vao = GlVertexArray::generate();

        vao.bind();
        vbo.bind();
        set_vertex_attrib(position, Mesh::POSITION_COMPONENTS, 0);
        if let Some(color) = color {
            set_vertex_attrib(color, Mesh::COLOR_COMPONENTS, mesh.color_offset());
        }
        ibo.bind();

        let mode = DrawMode::for_program(program.is_tessellated(), mesh.vertex_count());
        if let DrawMode::Patches { vertices } = mode {
            unsafe { gl::PatchParameteri(gl::PATCH_VERTICES, vertices) };
        }
        GlVertexArray::unbind();

        debug!(
            "scene ready: vao {}, vbo {}, ibo {} ({} indices), {:?}",
            vao.id(),
            vbo.id(),
            ibo.id(),
            ibo.len(),
            mode
        );

        Ok(Self {
            vao,
            _vbo: vbo,
            ibo,
            program,
            mode,
            clear_color: Self::CLEAR_COLOR,
        })
    }

    pub fn mode(&self) -> DrawMode { self.mode }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) }
    }

    /// Clears the frame and draws the mesh once.
    pub fn render(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.vao.bind();
        unsafe {
            gl::DrawElements(
                self.mode.primitive(),
                self.ibo.len() as GLsizei,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
            );
        }
        GlVertexArray::unbind();
        self.program.unuse();

        for error in drain_errors() {
            warn!("OpenGL error while drawing: {} (0x{:04X})", error_name(error), error);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tessellated_programs_draw_patches() {
        let mode = DrawMode::for_program(true, 4);
        assert_eq!(mode, DrawMode::Patches { vertices: 4 });
        assert_eq!(mode.primitive(), gl::PATCHES);
    }

    #[test]
    fn plain_programs_draw_a_fan() {
        let mode = DrawMode::for_program(false, 4);
        assert_eq!(mode.primitive(), gl::TRIANGLE_FAN);
    }
}
