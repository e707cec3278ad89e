use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use log::debug;

use crate::error::EngineError;
use crate::gpu::buffer::{AttributeFlags, VertexLayout};
use crate::gpu::mesh::DrawMode;
use crate::gpu::uniform::{UniformKind, UniformLayout};

/// The maximum number of textures a blending program can sample at once.
pub const MAX_BLEND_TEXTURES: usize = 3;

/// Cache key derived from the full text of a vertex/fragment source pair.
/// Identical pairs always map to the same key, so a program is only ever
/// compiled once per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramKey(u64);

impl ProgramKey {
    pub fn of(vertex_source: &str, fragment_source: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        vertex_source.hash(&mut hasher);
        fragment_source.hash(&mut hasher);
        ProgramKey(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Everything needed to build (or look up) a program: shader sources, vertex
/// layout, uniform block shape, and how many textures the fragment stage
/// samples.
#[derive(Debug, Clone)]
pub struct ProgramDesc {
    pub label: &'static str,
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
    pub attribute_flags: AttributeFlags,
    pub uniform_layout: UniformLayout,
    pub texture_count: usize,
    pub draw_mode: DrawMode,
}

const TRANSFORM_FIELDS: [(&str, UniformKind); 4] = [
    ("translation", UniformKind::Vec2),
    ("rotation", UniformKind::Vec2),
    ("scale", UniformKind::Vec2),
    ("center", UniformKind::Vec2),
];

impl ProgramDesc {
    /// Single fill color shared by the whole polygon.
    pub fn solid_polygon() -> Self {
        let mut fields = TRANSFORM_FIELDS.to_vec();
        fields.push(("color", UniformKind::Vec4));
        Self {
            label: "solid polygon",
            vertex_source: include_str!("../../shaders/solid.vert.wgsl"),
            fragment_source: include_str!("../../shaders/solid.frag.wgsl"),
            attribute_flags: AttributeFlags::empty(),
            uniform_layout: UniformLayout::new(&fields),
            texture_count: 0,
            draw_mode: DrawMode::Triangles,
        }
    }

    /// One RGBA color per vertex.
    pub fn vertex_color_polygon() -> Self {
        Self {
            label: "vertex color polygon",
            vertex_source: include_str!("../../shaders/gradient.vert.wgsl"),
            fragment_source: include_str!("../../shaders/gradient.frag.wgsl"),
            attribute_flags: AttributeFlags::COLOR,
            uniform_layout: UniformLayout::new(&TRANSFORM_FIELDS),
            texture_count: 0,
            draw_mode: DrawMode::Triangles,
        }
    }

    /// Per-vertex color modulated by 0 to 3 blended textures. With zero
    /// textures the surface draws its colors alone until one is assigned.
    pub fn textured_polygon(texture_count: usize) -> Result<Self, EngineError> {
        let fragment_source = match texture_count {
            0 => include_str!("../../shaders/textured0.frag.wgsl"),
            1 => include_str!("../../shaders/textured1.frag.wgsl"),
            2 => include_str!("../../shaders/textured2.frag.wgsl"),
            3 => include_str!("../../shaders/textured3.frag.wgsl"),
            _ => {
                return Err(EngineError::TextureCount {
                    got: texture_count,
                    max: MAX_BLEND_TEXTURES,
                })
            }
        };
        let mut fields = TRANSFORM_FIELDS.to_vec();
        fields.push(("blend", UniformKind::Vec4));
        Ok(Self {
            label: "textured polygon",
            vertex_source: include_str!("../../shaders/textured.vert.wgsl"),
            fragment_source,
            attribute_flags: AttributeFlags::COLOR | AttributeFlags::TEX_COORDS,
            uniform_layout: UniformLayout::new(&fields),
            texture_count,
            draw_mode: DrawMode::Triangles,
        })
    }

    pub fn key(&self) -> ProgramKey {
        ProgramKey::of(self.vertex_source, self.fragment_source)
    }
}

/// A compiled render pipeline plus the layouts a surface needs to bind to it.
#[derive(Debug)]
pub struct Program {
    key: ProgramKey,
    pipeline: wgpu::RenderPipeline,
    uniform_layout: UniformLayout,
    uniform_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group_layout: Option<wgpu::BindGroupLayout>,
    texture_count: usize,
}

impl Program {
    pub fn key(&self) -> ProgramKey {
        self.key
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// The uniform block shape surfaces instantiate for this program.
    pub fn uniform_layout(&self) -> &UniformLayout {
        &self.uniform_layout
    }

    pub fn uniform_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_bind_group_layout
    }

    pub fn texture_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.texture_bind_group_layout.as_ref()
    }

    pub fn texture_count(&self) -> usize {
        self.texture_count
    }
}

/// Deduplicates compiled programs by source-pair key. Owned by the render
/// context; programs are never evicted while the context lives, so repeated
/// surface construction never recompiles a shader pair.
#[derive(Debug)]
pub struct ProgramCache {
    programs: HashMap<ProgramKey, Rc<Program>>,
    surface_format: wgpu::TextureFormat,
}

impl ProgramCache {
    pub fn new(surface_format: wgpu::TextureFormat) -> Self {
        Self {
            programs: HashMap::new(),
            surface_format,
        }
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn get_or_create(&mut self, device: &wgpu::Device, desc: &ProgramDesc) -> Rc<Program> {
        let key = desc.key();
        if let Some(program) = self.programs.get(&key) {
            debug!("program cache hit for '{}' ({:#018x})", desc.label, key.value());
            return Rc::clone(program);
        }
        let program = Rc::new(Self::build(device, self.surface_format, key, desc));
        self.programs.insert(key, Rc::clone(&program));
        program
    }

    fn build(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        key: ProgramKey,
        desc: &ProgramDesc,
    ) -> Program {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(desc.vertex_source)),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(desc.fragment_source)),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("surface_uniform_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            desc.uniform_layout.byte_size() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout = if desc.texture_count > 0 {
            let mut entries = Vec::with_capacity(desc.texture_count * 2);
            for slot in 0..desc.texture_count as u32 {
                entries.push(wgpu::BindGroupLayoutEntry {
                    binding: slot * 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                });
                entries.push(wgpu::BindGroupLayoutEntry {
                    binding: slot * 2 + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                });
            }
            Some(
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("texture_bind_group_layout"),
                    entries: &entries,
                }),
            )
        } else {
            None
        };

        let mut bind_group_layouts = vec![&uniform_bind_group_layout];
        if let Some(layout) = &texture_bind_group_layout {
            bind_group_layouts.push(layout);
        }
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let vertex_layout = VertexLayout::new(desc.attribute_flags);
        let attributes = vertex_layout.attributes();
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout.buffer_layout(&attributes)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.draw_mode.topology(),
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Program {
            key,
            pipeline,
            uniform_layout: desc.uniform_layout.clone(),
            uniform_bind_group_layout,
            texture_bind_group_layout,
            texture_count: desc.texture_count,
        }
    }
}
