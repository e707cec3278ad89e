pub mod assets {
    pub mod bmp;
    pub mod texture;
}
pub mod error;
pub mod gpu {
    pub mod buffer;
    pub mod mesh;
    pub mod program;
    pub mod uniform;
}
pub mod surface {
    pub mod color;
    pub mod frame;
    pub mod shape;
    pub mod transform;
}
pub mod utils;

use std::path::Path;
use std::rc::Rc;

use pollster::block_on;
use winit::dpi::PhysicalSize;

use assets::texture::{FilterMode, Texture, TextureStore, WrapMode};
use error::EngineError;
use gpu::program::ProgramCache;
use surface::color::Rgba;
use surface::frame::{AnimationCycle, AnimationRect, FrameRect, FrameStyle};
use surface::shape::{
    GradientRect, GradientTriangle, SolidRect, SolidTriangle, TexturedRect,
};
use utils::{Position, ScreenSpace};

pub use surface::shape::{Colorable, Drawable, Transformable};

/// The explicit graphics context: wgpu surface/device/queue, the shader
/// program cache, the texture store, and the screen-space conversions. Every
/// resource the engine creates hangs off an instance of this; there is no
/// process-wide state. Single threaded by construction — all GPU work runs
/// synchronously on the calling thread.
pub struct RenderContext<'a> {
    pub size: PhysicalSize<u32>,
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    screen: ScreenSpace,
    programs: ProgramCache,
    textures: TextureStore,
    clear_color: wgpu::Color,
}

impl<'a> RenderContext<'a> {
    pub fn new(surface: wgpu::Surface<'a>, instance: wgpu::Instance, size: PhysicalSize<u32>) -> Self {
        let adapter = block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .expect("Failed to find an appropriate adapter");

        let (device, queue) = block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .expect("Failed to create device");

        // GPU errors are programmer errors here, not recoverable conditions
        device.on_uncaptured_error(Box::new(|error| {
            log::error!("fatal GPU error: {error}");
            panic!("fatal GPU error: {error}");
        }));

        let config = wgpu::SurfaceConfiguration {
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![wgpu::TextureFormat::Bgra8UnormSrgb],
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
        };
        surface.configure(&device, &config);

        let programs = ProgramCache::new(config.format);
        let textures = TextureStore::new(&device);
        let screen = ScreenSpace::new(size.width as f32, size.height as f32);

        Self {
            size,
            surface,
            device,
            queue,
            config,
            screen,
            programs,
            textures,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
        }
    }

    pub fn resize(&mut self, new_size: &PhysicalSize<u32>) {
        self.size = *new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.screen = ScreenSpace::new(new_size.width as f32, new_size.height as f32);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// The screen-space conversions as of the last resize. Surfaces snapshot
    /// this at construction.
    pub fn screen(&self) -> ScreenSpace {
        self.screen
    }

    pub fn set_clear_color(&mut self, color: Rgba) {
        let [r, g, b, a] = color.normalized();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
    }

    pub fn program_cache(&self) -> &ProgramCache {
        &self.programs
    }

    pub fn texture_store(&self) -> &TextureStore {
        &self.textures
    }

    /* ASSET LOADING */

    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
        min_filter: FilterMode,
        mag_filter: FilterMode,
    ) -> Result<Rc<Texture>, EngineError> {
        self.textures.load(
            &self.device,
            &self.queue,
            path,
            wrap_s,
            wrap_t,
            min_filter,
            mag_filter,
        )
    }

    /// Loads a texture with repeat wrapping and nearest filtering.
    pub fn load_texture_default(&mut self, path: impl AsRef<Path>) -> Result<Rc<Texture>, EngineError> {
        self.load_texture(
            path,
            WrapMode::Repeat,
            WrapMode::Repeat,
            FilterMode::Nearest,
            FilterMode::Nearest,
        )
    }

    /* SURFACE CREATION */

    pub fn create_solid_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    ) -> Result<SolidRect, EngineError> {
        SolidRect::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            x,
            y,
            width,
            height,
            fill,
        )
    }

    pub fn create_solid_triangle(
        &mut self,
        vertices: [Position; 3],
        fill: Rgba,
    ) -> Result<SolidTriangle, EngineError> {
        SolidTriangle::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            vertices,
            fill,
        )
    }

    pub fn create_gradient_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colors: &[Rgba],
    ) -> Result<GradientRect, EngineError> {
        GradientRect::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            x,
            y,
            width,
            height,
            colors,
        )
    }

    pub fn create_gradient_triangle(
        &mut self,
        vertices: [Position; 3],
        colors: &[Rgba],
    ) -> Result<GradientTriangle, EngineError> {
        GradientTriangle::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            vertices,
            colors,
        )
    }

    pub fn create_textured_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colors: &[Rgba],
        textures: Vec<Rc<Texture>>,
    ) -> Result<TexturedRect, EngineError> {
        TexturedRect::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            x,
            y,
            width,
            height,
            colors,
            textures,
            self.textures.max_slots(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_frame_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colors: &[Rgba],
        texture: Option<Rc<Texture>>,
        style: FrameStyle,
    ) -> Result<FrameRect, EngineError> {
        FrameRect::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            x,
            y,
            width,
            height,
            colors,
            texture,
            style,
            self.textures.max_slots(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_animation_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        cycles: Vec<AnimationCycle>,
        colors: &[Rgba],
        style: FrameStyle,
    ) -> Result<AnimationRect, EngineError> {
        AnimationRect::new(
            &self.device,
            &self.queue,
            &mut self.programs,
            self.screen,
            x,
            y,
            width,
            height,
            cycles,
            colors,
            style,
            self.textures.max_slots(),
        )
    }

    /* RENDERING */

    /// Renders the flat list of surfaces in order into one pass over the
    /// next swapchain frame.
    pub fn render(&mut self, surfaces: &[&dyn Drawable]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for surface in surfaces {
                surface.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
