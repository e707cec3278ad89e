use crate::error::EngineError;
use crate::gpu::buffer::{AttributeFlags, IndexBuffer, VertexBuffer, VertexLayout};

/// How the vertex stream is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    Lines,
}

impl DrawMode {
    pub fn topology(&self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// The vertex-array analog: one vertex buffer, at most one index buffer, and
/// the draw mode. Owns its buffers exclusively; dropping the mesh releases
/// them. Surfaces replace the whole mesh when topology changes and patch the
/// vertex buffer in place for data-only changes.
#[derive(Debug)]
pub struct Mesh {
    mode: DrawMode,
    vertices: VertexBuffer,
    indices: Option<IndexBuffer>,
}

impl Mesh {
    pub fn from_data(
        device: &wgpu::Device,
        mode: DrawMode,
        data: Vec<f32>,
        flags: AttributeFlags,
        index_data: Option<&[u16]>,
    ) -> Result<Self, EngineError> {
        let vertices = VertexBuffer::new(device, data, VertexLayout::new(flags))?;
        let indices = index_data.map(|indices| IndexBuffer::new(device, indices));
        Ok(Self {
            mode,
            vertices,
            indices,
        })
    }

    pub fn from_buffers(mode: DrawMode, vertices: VertexBuffer, indices: Option<IndexBuffer>) -> Self {
        Self {
            mode,
            vertices,
            indices,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn layout(&self) -> VertexLayout {
        self.vertices.layout()
    }

    pub fn vertex_buffer_mut(&mut self) -> &mut VertexBuffer {
        &mut self.vertices
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertices
    }

    /// Issues the draw call: indexed if an index buffer is present, otherwise
    /// over the raw vertex range.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertices.slice());
        match &self.indices {
            Some(indices) => {
                rpass.set_index_buffer(indices.slice(), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..indices.index_count(), 0, 0..1);
            }
            None => rpass.draw(0..self.vertices.vertex_count(), 0..1),
        }
    }

    /// Deep-copies both buffers into fresh device memory.
    pub fn duplicate(&self, device: &wgpu::Device) -> Self {
        Self {
            mode: self.mode,
            vertices: self.vertices.duplicate(device),
            indices: self.indices.as_ref().map(|i| i.duplicate(device)),
        }
    }
}
