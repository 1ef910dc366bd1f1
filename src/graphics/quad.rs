//! The geometry that gets drawn: four corners of a square, each with its own color.

use std::mem::size_of;

/// Vertex data kept as one block of positions followed by one block of colors, rather than
/// interleaved per vertex. Attribute pointers use a stride of 0 (tightly packed) and the color
/// attribute starts at [`Mesh::color_offset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub const POSITION_COMPONENTS: i32 = 3;
    pub const COLOR_COMPONENTS: i32 = 4;

    /// A square half the height of the window, centered, with magenta, green, cyan and white
    /// corners (counter-clockwise from the bottom left).
    pub fn quad() -> Self {
        Self {
            positions: vec![
                [-0.5, -0.5, -1.0],
                [ 0.5, -0.5, -1.0],
                [ 0.5,  0.5, -1.0],
                [-0.5,  0.5, -1.0],
            ],
            colors: vec![
                [1.0, 0.0, 1.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 1.0, 1.0, 1.0],
                [1.0, 1.0, 1.0, 1.0],
            ],
            indices: vec![0, 1, 2, 3],
        }
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }

    /// All positions, then all colors, flattened into what gets uploaded to the vertex buffer.
    pub fn vertex_data(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| p.iter())
            .chain(self.colors.iter().flat_map(|c| c.iter()))
            .copied()
            .collect()
    }

    /// Byte offset of the first color in [`Mesh::vertex_data`].
    pub fn color_offset(&self) -> usize {
        self.positions.len() * Self::POSITION_COMPONENTS as usize * size_of::<f32>()
    }

    /// Checks that every vertex has a color and every index points at a vertex.
    pub fn validate(&self) -> Result<(), String> {
        if self.positions.len() != self.colors.len() {
            return Err(format!(
                "{} positions but {} colors",
                self.positions.len(),
                self.colors.len()
            ));
        }

        match self.indices.iter().find(|&&i| i as usize >= self.positions.len()) {
            Some(i) => Err(format!("index {} is out of range for {} vertices", i, self.positions.len())),
            None => Ok(()),
        }
    }
}
