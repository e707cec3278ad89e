use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use log::debug;

use crate::assets::bmp;
use crate::error::EngineError;
use crate::gpu::program::{Program, MAX_BLEND_TEXTURES};
use crate::utils::Size;

/// Texture coordinate wrapping outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl WrapMode {
    fn address_mode(self) -> wgpu::AddressMode {
        match self {
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
            WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

impl FilterMode {
    fn filter(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// A GPU texture decoded from a bitmap file, plus its sampler.
///
/// Handles are shared via `Rc` out of the store's path-keyed cache; the
/// underlying GPU object stays alive for the store's whole lifetime even if
/// every surface referencing it is dropped. That is deliberate: reloading is
/// considered more expensive than the memory held by a small 2D asset set.
#[derive(Debug)]
pub struct Texture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    size: Size,
}

impl Texture {
    pub fn from_bitmap(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bitmap: &bmp::Bitmap,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Bitmap Texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[wgpu::TextureFormat::Rgba8UnormSrgb],
        });
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(bitmap.width * 4),
                rows_per_image: Some(bitmap.height),
            },
            extent,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wrap_s.address_mode(),
            address_mode_v: wrap_t.address_mode(),
            mag_filter: mag_filter.filter(),
            min_filter: min_filter.filter(),
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            view,
            sampler,
            size: Size::new(bitmap.width as f32, bitmap.height as f32),
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Sequential texture-unit slots for `count` textures, wrapping at the
/// device's queried maximum.
pub fn assign_slots(count: usize, max_slots: u32) -> Vec<u32> {
    (0..count as u32).map(|i| i % max_slots.max(1)).collect()
}

/// Path-keyed texture cache. Loading a path twice decodes and uploads once.
#[derive(Debug)]
pub struct TextureStore {
    textures: HashMap<String, Rc<Texture>>,
    max_slots: u32,
    decode_count: usize,
}

impl TextureStore {
    pub fn new(device: &wgpu::Device) -> Self {
        // queried once and cached for slot assignment
        let max_slots = device.limits().max_sampled_textures_per_shader_stage;
        Self {
            textures: HashMap::new(),
            max_slots,
            decode_count: 0,
        }
    }

    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    /// How many bitmap decodes have actually run; cache hits do not add.
    pub fn decode_count(&self) -> usize {
        self.decode_count
    }

    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.textures.contains_key(&path.as_ref().to_string_lossy().into_owned())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> Result<Rc<Texture>, EngineError> {
        let key = path.as_ref().to_string_lossy().into_owned();
        if let Some(texture) = self.textures.get(&key) {
            debug!("texture '{key}' already resident; reusing");
            return Ok(Rc::clone(texture));
        }
        let bitmap = bmp::decode_file(path.as_ref())?;
        self.decode_count += 1;
        let texture = Rc::new(Texture::from_bitmap(
            device, queue, &bitmap, wrap_s, wrap_t, min_filter, mag_filter,
        ));
        self.textures.insert(key, Rc::clone(&texture));
        Ok(texture)
    }
}

/// A group of textures bound together for one of the blending programs, with
/// their assigned unit slots.
#[derive(Debug)]
pub struct TextureArray {
    textures: Vec<Rc<Texture>>,
    slots: Vec<u32>,
    bind_group: wgpu::BindGroup,
}

impl TextureArray {
    /// Builds the bind group matching `program`'s texture layout. The program
    /// must have been created for exactly `textures.len()` textures.
    pub fn new(
        device: &wgpu::Device,
        program: &Program,
        textures: Vec<Rc<Texture>>,
        max_slots: u32,
    ) -> Result<Self, EngineError> {
        if textures.is_empty() || textures.len() > MAX_BLEND_TEXTURES {
            return Err(EngineError::TextureCount {
                got: textures.len(),
                max: MAX_BLEND_TEXTURES,
            });
        }
        let layout = program
            .texture_bind_group_layout()
            .expect("textured program always carries a texture bind group layout");
        let slots = assign_slots(textures.len(), max_slots);
        let mut entries = Vec::with_capacity(textures.len() * 2);
        for (i, texture) in textures.iter().enumerate() {
            entries.push(wgpu::BindGroupEntry {
                binding: i as u32 * 2,
                resource: wgpu::BindingResource::TextureView(texture.view()),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: i as u32 * 2 + 1,
                resource: wgpu::BindingResource::Sampler(texture.sampler()),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &entries,
            label: Some("texture_array_bind_group"),
        });
        Ok(Self {
            textures,
            slots,
            bind_group,
        })
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn textures(&self) -> &[Rc<Texture>] {
        &self.textures
    }
}
