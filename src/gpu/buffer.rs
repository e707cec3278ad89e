use bitflags::bitflags;
use wgpu::util::DeviceExt;

use crate::error::EngineError;

bitflags! {
    /// Optional per-vertex attributes carried alongside the (always present)
    /// three-float position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeFlags: u32 {
        const COLOR      = 0x01;
        const NORMAL     = 0x02;
        const TEX_COORDS = 0x04;
        const TEX_INDEX  = 0x08;
    }
}

/// The interleaved attribute layout of a vertex buffer.
///
/// Attributes occupy fixed shader locations in a canonical order: position(3)
/// at location 0, then color(4), normal(3), tex-coords(2) and texture-index(1)
/// for whichever flags are set. Offsets accumulate only over enabled
/// attributes, so the stride always equals the sum of the enabled widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    flags: AttributeFlags,
}

const FLOAT_BYTES: u64 = std::mem::size_of::<f32>() as u64;

impl VertexLayout {
    pub fn new(flags: AttributeFlags) -> Self {
        VertexLayout { flags }
    }

    pub fn flags(&self) -> AttributeFlags {
        self.flags
    }

    pub fn stride_floats(&self) -> usize {
        let mut floats = 3;
        if self.flags.contains(AttributeFlags::COLOR) {
            floats += 4;
        }
        if self.flags.contains(AttributeFlags::NORMAL) {
            floats += 3;
        }
        if self.flags.contains(AttributeFlags::TEX_COORDS) {
            floats += 2;
        }
        if self.flags.contains(AttributeFlags::TEX_INDEX) {
            floats += 1;
        }
        floats
    }

    pub fn stride_bytes(&self) -> u64 {
        self.stride_floats() as u64 * FLOAT_BYTES
    }

    /// The attribute pointers for this layout, in canonical order.
    pub fn attributes(&self) -> Vec<wgpu::VertexAttribute> {
        let mut attributes = vec![wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }];
        let mut offset = 3 * FLOAT_BYTES;
        let mut location = 1;

        let mut push = |format: wgpu::VertexFormat, floats: u64| {
            attributes.push(wgpu::VertexAttribute {
                format,
                offset,
                shader_location: location,
            });
            offset += floats * FLOAT_BYTES;
            location += 1;
        };

        if self.flags.contains(AttributeFlags::COLOR) {
            push(wgpu::VertexFormat::Float32x4, 4);
        }
        if self.flags.contains(AttributeFlags::NORMAL) {
            push(wgpu::VertexFormat::Float32x3, 3);
        }
        if self.flags.contains(AttributeFlags::TEX_COORDS) {
            push(wgpu::VertexFormat::Float32x2, 2);
        }
        if self.flags.contains(AttributeFlags::TEX_INDEX) {
            push(wgpu::VertexFormat::Float32, 1);
        }
        attributes
    }

    pub fn buffer_layout<'a>(
        &self,
        attributes: &'a [wgpu::VertexAttribute],
    ) -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride_bytes(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// A vertex buffer in device memory plus the host copy it was uploaded from.
///
/// The host copy is authoritative: deep copies re-upload it instead of reading
/// device memory back, and in-place updates patch both sides.
#[derive(Debug)]
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    data: Vec<f32>,
    layout: VertexLayout,
    vertex_count: u32,
}

impl VertexBuffer {
    pub fn new(
        device: &wgpu::Device,
        data: Vec<f32>,
        layout: VertexLayout,
    ) -> Result<Self, EngineError> {
        let stride_floats = layout.stride_floats();
        if data.is_empty() || data.len() % stride_floats != 0 {
            return Err(EngineError::StrideMismatch {
                len: data.len(),
                stride_floats,
            });
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let vertex_count = (data.len() / stride_floats) as u32;
        Ok(Self {
            buffer,
            data,
            layout,
            vertex_count,
        })
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Patches a float range of the buffer in place, device and host side.
    /// Used for recoloring without rebuilding topology.
    pub fn write_range(&mut self, queue: &wgpu::Queue, float_offset: usize, values: &[f32]) {
        debug_assert!(float_offset + values.len() <= self.data.len());
        self.data[float_offset..float_offset + values.len()].copy_from_slice(values);
        queue.write_buffer(
            &self.buffer,
            float_offset as u64 * FLOAT_BYTES,
            bytemuck::cast_slice(values),
        );
    }

    /// Deep copy: re-uploads the retained host data into a fresh GPU buffer.
    pub fn duplicate(&self, device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            data: self.data.clone(),
            layout: self.layout,
            vertex_count: self.vertex_count,
        }
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

#[derive(Debug)]
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    indices: Vec<u16>,
}

impl IndexBuffer {
    pub fn new(device: &wgpu::Device, indices: &[u16]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            buffer,
            indices: indices.to_vec(),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn duplicate(&self, device: &wgpu::Device) -> Self {
        IndexBuffer::new(device, &self.indices)
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}
