use log::warn;
use wgpu::util::DeviceExt;

/// Type tag for a uniform field. Matrices upload row-major, each row padded
/// to a vec4 boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    /// Alignment of the field inside the block, per WGSL uniform layout rules.
    pub fn alignment(&self) -> u32 {
        match self {
            UniformKind::Float => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 | UniformKind::Vec4 => 16,
            UniformKind::Mat2 => 8,
            UniformKind::Mat3 | UniformKind::Mat4 => 16,
        }
    }

    /// Bytes the field occupies, including internal row padding.
    pub fn byte_size(&self) -> u32 {
        match self {
            UniformKind::Float => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 => 12,
            UniformKind::Vec4 => 16,
            UniformKind::Mat2 => 16,
            UniformKind::Mat3 => 48,
            UniformKind::Mat4 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([[f32; 2]; 2]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            UniformValue::Float(_) => UniformKind::Float,
            UniformValue::Vec2(_) => UniformKind::Vec2,
            UniformValue::Vec3(_) => UniformKind::Vec3,
            UniformValue::Vec4(_) => UniformKind::Vec4,
            UniformValue::Mat2(_) => UniformKind::Mat2,
            UniformValue::Mat3(_) => UniformKind::Mat3,
            UniformValue::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Serializes the value with the padding rules of [`UniformKind`].
    pub fn to_bytes(&self) -> Vec<u8> {
        fn rows(rows: &[&[f32]], padded: usize) -> Vec<u8> {
            let mut out = Vec::with_capacity(rows.len() * padded * 4);
            for row in rows {
                for v in *row {
                    out.extend_from_slice(&v.to_le_bytes());
                }
                for _ in row.len()..padded {
                    out.extend_from_slice(&0f32.to_le_bytes());
                }
            }
            out
        }
        match self {
            UniformValue::Float(v) => v.to_le_bytes().to_vec(),
            UniformValue::Vec2(v) => bytemuck::cast_slice(v).to_vec(),
            UniformValue::Vec3(v) => bytemuck::cast_slice(v).to_vec(),
            UniformValue::Vec4(v) => bytemuck::cast_slice(v).to_vec(),
            UniformValue::Mat2(m) => rows(&[&m[0], &m[1]], 2),
            UniformValue::Mat3(m) => rows(&[&m[0], &m[1], &m[2]], 4),
            UniformValue::Mat4(m) => rows(&[&m[0], &m[1], &m[2], &m[3]], 4),
        }
    }
}

#[derive(Debug, Clone)]
struct UniformField {
    name: &'static str,
    kind: UniformKind,
    offset: u32,
}

/// The named-field layout of one uniform block. wgpu has no by-name uniform
/// lookup, so every program template declares its block layout up front and
/// surfaces address fields through it.
#[derive(Debug, Clone)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
    size: u32,
}

impl UniformLayout {
    pub fn new(fields: &[(&'static str, UniformKind)]) -> Self {
        let mut laid_out = Vec::with_capacity(fields.len());
        let mut cursor = 0u32;
        for &(name, kind) in fields {
            let align = kind.alignment();
            cursor = (cursor + align - 1) / align * align;
            laid_out.push(UniformField {
                name,
                kind,
                offset: cursor,
            });
            cursor += kind.byte_size();
        }
        // uniform blocks round up to a 16-byte boundary
        let size = (cursor + 15) / 16 * 16;
        Self {
            fields: laid_out,
            size,
        }
    }

    pub fn byte_size(&self) -> u32 {
        self.size
    }

    pub fn offset_of(&self, name: &str) -> Option<(u32, UniformKind)> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| (f.offset, f.kind))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

/// One uniform buffer + bind group, owned by a single surface.
#[derive(Debug)]
pub struct UniformBlock {
    layout: UniformLayout,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformBlock {
    pub fn new(
        device: &wgpu::Device,
        layout: UniformLayout,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let zeroed = vec![0u8; layout.byte_size() as usize];
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Uniform Buffer"),
            contents: &zeroed,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: None,
                }),
            }],
            label: Some("surface_uniform_bind_group"),
        });
        Self {
            layout,
            buffer,
            bind_group,
        }
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Writes `value` into the named field. An unknown name or a kind
    /// mismatch is a logged no-op, never an error: optional uniforms
    /// legitimately differ between program variants.
    pub fn set(&self, queue: &wgpu::Queue, name: &str, value: UniformValue) -> bool {
        let Some((offset, kind)) = self.layout.offset_of(name) else {
            warn!("uniform '{name}' not present in this program's block; ignoring");
            return false;
        };
        if kind != value.kind() {
            warn!(
                "uniform '{name}' is {kind:?} but a {:?} was supplied; ignoring",
                value.kind()
            );
            return false;
        }
        queue.write_buffer(&self.buffer, offset as u64, &value.to_bytes());
        true
    }
}
