use std::rc::Rc;

use log::warn;

use crate::assets::texture::{Texture, TextureArray};
use crate::error::EngineError;
use crate::gpu::buffer::AttributeFlags;
use crate::gpu::mesh::{DrawMode, Mesh};
use crate::gpu::program::{Program, ProgramCache, ProgramDesc};
use crate::gpu::uniform::{UniformBlock, UniformValue};
use crate::surface::color::{self, Rgba};
use crate::surface::transform::Transform2D;
use crate::utils::{Position, Rectangle, ScreenSpace, Size};

/// Anything a frame can render. A frame is just a flat list of drawables;
/// there is no scene graph.
pub trait Drawable {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>);
}

/// Translation, rotation and scale mutation plus pivot control. Angles are
/// degrees at this boundary. Every mutation pushes the affected uniform to
/// the GPU immediately; nothing is deferred to render time.
pub trait Transformable {
    fn set_translation(&mut self, queue: &wgpu::Queue, x: f32, y: f32);
    fn change_translation_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32);
    fn set_rotation(&mut self, queue: &wgpu::Queue, degrees: f32);
    fn change_rotation_by(&mut self, queue: &wgpu::Queue, degrees: f32);
    fn set_scale(&mut self, queue: &wgpu::Queue, x: f32, y: f32);
    fn change_scale_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32);
    /// Re-derives the pivot from the shape's own centroid.
    fn set_rotation_about_center(&mut self, queue: &wgpu::Queue);
    /// Redirects the pivot to an arbitrary pixel-space point.
    fn set_rotation_about_point(&mut self, queue: &wgpu::Queue, point: Position);
}

/// Surfaces that expose a fill color.
pub trait Colorable {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba);
}

/// State shared by every concrete surface: the mesh, the (possibly shared)
/// program, this surface's own uniform block, and its transform. GPU
/// resources are allocated in full at construction; dropping the surface
/// releases the mesh and uniform buffer, while program and textures stay in
/// their context-owned caches.
#[derive(Debug)]
pub struct SurfaceCore {
    mesh: Mesh,
    program: Rc<Program>,
    uniforms: UniformBlock,
    transform: Transform2D,
    screen: ScreenSpace,
}

impl SurfaceCore {
    pub fn new(
        device: &wgpu::Device,
        screen: ScreenSpace,
        program: Rc<Program>,
        mesh: Mesh,
    ) -> Self {
        let uniforms = UniformBlock::new(
            device,
            program.uniform_layout().clone(),
            program.uniform_bind_group_layout(),
        );
        Self {
            mesh,
            program,
            uniforms,
            transform: Transform2D::new(),
            screen,
        }
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    pub fn program(&self) -> &Rc<Program> {
        &self.program
    }

    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn screen(&self) -> ScreenSpace {
        self.screen
    }

    /// Swaps in a different program (and a fresh uniform block for its
    /// layout). The caller re-pushes all uniform state afterwards.
    pub fn rebind_program(&mut self, device: &wgpu::Device, program: Rc<Program>) {
        self.uniforms = UniformBlock::new(
            device,
            program.uniform_layout().clone(),
            program.uniform_bind_group_layout(),
        );
        self.program = program;
    }

    fn push_translation(&self, queue: &wgpu::Queue) {
        let ndc = self.screen.delta_to_ndc(self.transform.translation());
        self.uniforms
            .set(queue, "translation", UniformValue::Vec2([ndc.x, ndc.y]));
    }

    fn push_rotation(&self, queue: &wgpu::Queue) {
        self.uniforms
            .set(queue, "rotation", UniformValue::Vec2(self.transform.rotation_pair()));
    }

    fn push_scale(&self, queue: &wgpu::Queue) {
        let scale = self.transform.scale();
        self.uniforms
            .set(queue, "scale", UniformValue::Vec2([scale.x, scale.y]));
    }

    fn push_pivot(&self, queue: &wgpu::Queue) {
        // the shader rotates scale-applied NDC positions, so a centroid pivot
        // has to be scaled the same way; an arbitrary point is taken as-is
        let ndc = self.screen.point_to_ndc(self.transform.pivot());
        let ndc = if self.transform.is_about_center() {
            ndc * self.transform.scale()
        } else {
            ndc
        };
        self.uniforms
            .set(queue, "center", UniformValue::Vec2([ndc.x, ndc.y]));
    }

    /// Pushes the whole transform state; used after construction and after
    /// program swaps.
    pub fn push_transform(&self, queue: &wgpu::Queue) {
        self.push_translation(queue);
        self.push_rotation(queue);
        self.push_scale(queue);
        self.push_pivot(queue);
    }

    pub fn set_translation(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.transform.set_translation(x, y);
        self.push_translation(queue);
    }

    pub fn change_translation_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.transform.change_translation_by(dx, dy);
        self.push_translation(queue);
    }

    pub fn set_rotation(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.transform.set_rotation(degrees);
        self.push_rotation(queue);
    }

    pub fn change_rotation_by(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.transform.change_rotation_by(degrees);
        self.push_rotation(queue);
    }

    pub fn set_scale(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.transform.set_scale(x, y);
        self.push_scale(queue);
        self.push_pivot(queue);
    }

    pub fn change_scale_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.transform.change_scale_by(dx, dy);
        self.push_scale(queue);
        self.push_pivot(queue);
    }

    pub fn set_pivot_to_center(&mut self, queue: &wgpu::Queue, centroid: Position) {
        self.transform.set_pivot_to_center(centroid);
        self.push_pivot(queue);
    }

    pub fn set_pivot_to_point(&mut self, queue: &wgpu::Queue, point: Position) {
        self.transform.set_pivot_to_point(point);
        self.push_pivot(queue);
    }

    pub fn draw_with(&self, rpass: &mut wgpu::RenderPass<'_>, textures: Option<&wgpu::BindGroup>) {
        rpass.set_pipeline(self.program.pipeline());
        rpass.set_bind_group(0, self.uniforms.bind_group(), &[]);
        if let Some(bind_group) = textures {
            rpass.set_bind_group(1, bind_group, &[]);
        }
        self.mesh.draw(rpass);
    }
}

/// Rectangle geometry in pixel space (bottom-left origin) with a cached
/// centroid. The centroid is not self-maintaining: whoever mutates position,
/// size or scale must call [`update_center`](Self::update_center) or the
/// cache goes stale.
#[derive(Debug, Clone, Copy)]
pub struct RectGeometry {
    pos: Position,
    size: Size,
    center: Position,
}

impl RectGeometry {
    pub fn new(pos: Position, size: Size) -> Self {
        let center = pos + Position::new(size.width / 2.0, size.height / 2.0);
        Self { pos, size, center }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn base_size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Position {
        self.center
    }

    /// Re-derives the cached centroid from position and scale-adjusted size.
    pub fn update_center(&mut self, scale: Position) {
        let scaled = self.size * scale;
        self.center = self.pos + Position::new(scaled.width / 2.0, scaled.height / 2.0);
    }

    /// Corner positions in draw order: bottom-left, top-left, top-right,
    /// bottom-right.
    pub fn corners(&self) -> [Position; 4] {
        [
            self.pos,
            self.pos + Position::new(0.0, self.size.height),
            self.pos + Position::new(self.size.width, self.size.height),
            self.pos + Position::new(self.size.width, 0.0),
        ]
    }

    /// Where the rectangle actually renders: scaled, rotation-corrected when
    /// the pivot is not its own centroid, translated. Round-trips the
    /// construction rectangle under the identity transform.
    pub fn rendered_rect(&self, transform: &Transform2D) -> Rectangle {
        let pos = transform.apply_to_point(self.pos);
        let size = self.size * transform.scale();
        Rectangle::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn rendered_center(&self, transform: &Transform2D) -> Position {
        let rect = self.rendered_rect(transform);
        rect.pos() + Position::new(rect.width / 2.0, rect.height / 2.0)
    }
}

/// Triangle geometry in pixel space; centroid is the vertex mean, cached
/// under the same explicit-update contract as [`RectGeometry`].
#[derive(Debug, Clone, Copy)]
pub struct TriangleGeometry {
    vertices: [Position; 3],
    center: Position,
}

impl TriangleGeometry {
    pub fn new(vertices: [Position; 3]) -> Self {
        let center = (vertices[0] + vertices[1] + vertices[2]) / 3.0;
        Self { vertices, center }
    }

    pub fn vertices(&self) -> [Position; 3] {
        self.vertices
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn update_center(&mut self) {
        self.center = (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0;
    }

    pub fn rendered_center(&self, transform: &Transform2D) -> Position {
        transform.apply_to_point(self.center)
    }
}

const RECT_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

// uv origin is the texture's top-left; corners are BL, TL, TR, BR
const RECT_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];

fn rect_position_data(screen: ScreenSpace, geometry: &RectGeometry) -> Vec<f32> {
    let mut data = Vec::with_capacity(4 * 3);
    for corner in geometry.corners() {
        let ndc = screen.point_to_ndc(corner);
        data.extend_from_slice(&[ndc.x, ndc.y, 0.0]);
    }
    data
}

fn rect_color_data(screen: ScreenSpace, geometry: &RectGeometry, colors: &[[f32; 4]; 4]) -> Vec<f32> {
    let mut data = Vec::with_capacity(4 * 7);
    for (corner, color) in geometry.corners().iter().zip(colors) {
        let ndc = screen.point_to_ndc(*corner);
        data.extend_from_slice(&[ndc.x, ndc.y, 0.0]);
        data.extend_from_slice(color);
    }
    data
}

fn rect_textured_data(
    screen: ScreenSpace,
    geometry: &RectGeometry,
    colors: &[[f32; 4]; 4],
) -> Vec<f32> {
    let mut data = Vec::with_capacity(4 * 9);
    for ((corner, color), uv) in geometry.corners().iter().zip(colors).zip(RECT_UVS) {
        let ndc = screen.point_to_ndc(*corner);
        data.extend_from_slice(&[ndc.x, ndc.y, 0.0]);
        data.extend_from_slice(color);
        data.extend_from_slice(&uv);
    }
    data
}

/// A rectangle with a single fill color shared by all four corners.
#[derive(Debug)]
pub struct SolidRect {
    core: SurfaceCore,
    geometry: RectGeometry,
    fill: Rgba,
}

impl SolidRect {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        screen: ScreenSpace,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    ) -> Result<Self, EngineError> {
        let geometry = RectGeometry::new(Position::new(x, y), Size::new(width, height));
        let program = programs.get_or_create(device, &ProgramDesc::solid_polygon());
        let mesh = Mesh::from_data(
            device,
            DrawMode::Triangles,
            rect_position_data(screen, &geometry),
            AttributeFlags::empty(),
            Some(&RECT_INDICES),
        )?;
        let mut core = SurfaceCore::new(device, screen, program, mesh);
        core.transform.set_pivot_to_center(geometry.center());
        core.push_transform(queue);
        let rect = Self {
            core,
            geometry,
            fill,
        };
        rect.push_fill(queue);
        Ok(rect)
    }

    fn push_fill(&self, queue: &wgpu::Queue) {
        self.core
            .uniforms()
            .set(queue, "color", UniformValue::Vec4(self.fill.normalized()));
    }

    pub fn fill_color(&self) -> Rgba {
        self.fill
    }

    pub fn rect(&self) -> Rectangle {
        self.geometry.rendered_rect(self.core.transform())
    }

    pub fn center(&self) -> Position {
        self.geometry.rendered_center(self.core.transform())
    }

    /// Re-derives the cached centroid after a scale change and, when the
    /// pivot tracks the centroid, re-pushes it.
    pub fn update_center(&mut self, queue: &wgpu::Queue) {
        self.geometry.update_center(self.core.transform().scale());
        if self.core.transform().is_about_center() {
            self.core.set_pivot_to_center(queue, self.geometry.center());
        }
    }
}

impl Colorable for SolidRect {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.fill = color;
        self.push_fill(queue);
    }
}

impl Drawable for SolidRect {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.core.draw_with(rpass, None);
    }
}

/// A triangle with a single fill color.
#[derive(Debug)]
pub struct SolidTriangle {
    core: SurfaceCore,
    geometry: TriangleGeometry,
    fill: Rgba,
}

impl SolidTriangle {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        screen: ScreenSpace,
        vertices: [Position; 3],
        fill: Rgba,
    ) -> Result<Self, EngineError> {
        let geometry = TriangleGeometry::new(vertices);
        let program = programs.get_or_create(device, &ProgramDesc::solid_polygon());
        let mut data = Vec::with_capacity(3 * 3);
        for vertex in geometry.vertices() {
            let ndc = screen.point_to_ndc(vertex);
            data.extend_from_slice(&[ndc.x, ndc.y, 0.0]);
        }
        let mesh = Mesh::from_data(device, DrawMode::Triangles, data, AttributeFlags::empty(), None)?;
        let mut core = SurfaceCore::new(device, screen, program, mesh);
        core.transform.set_pivot_to_center(geometry.center());
        core.push_transform(queue);
        let triangle = Self {
            core,
            geometry,
            fill,
        };
        triangle.push_fill(queue);
        Ok(triangle)
    }

    fn push_fill(&self, queue: &wgpu::Queue) {
        self.core
            .uniforms()
            .set(queue, "color", UniformValue::Vec4(self.fill.normalized()));
    }

    pub fn center(&self) -> Position {
        self.geometry.rendered_center(self.core.transform())
    }

    pub fn update_center(&mut self, queue: &wgpu::Queue) {
        self.geometry.update_center();
        if self.core.transform().is_about_center() {
            self.core.set_pivot_to_center(queue, self.geometry.center());
        }
    }
}

impl Colorable for SolidTriangle {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.fill = color;
        self.push_fill(queue);
    }
}

impl Drawable for SolidTriangle {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.core.draw_with(rpass, None);
    }
}

/// A rectangle with one color per corner.
#[derive(Debug)]
pub struct GradientRect {
    core: SurfaceCore,
    geometry: RectGeometry,
}

impl GradientRect {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        screen: ScreenSpace,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colors: &[Rgba],
    ) -> Result<Self, EngineError> {
        let geometry = RectGeometry::new(Position::new(x, y), Size::new(width, height));
        let program = programs.get_or_create(device, &ProgramDesc::vertex_color_polygon());
        let spread = color::spread_rect_colors(colors);
        let mesh = Mesh::from_data(
            device,
            DrawMode::Triangles,
            rect_color_data(screen, &geometry, &spread),
            AttributeFlags::COLOR,
            Some(&RECT_INDICES),
        )?;
        let mut core = SurfaceCore::new(device, screen, program, mesh);
        core.transform.set_pivot_to_center(geometry.center());
        core.push_transform(queue);
        Ok(Self { core, geometry })
    }

    /// Respreads `colors` over the corners via the fixed case table and
    /// patches the vertex buffer in place; topology is untouched.
    pub fn define_colors(&mut self, queue: &wgpu::Queue, colors: &[Rgba]) {
        let spread = color::spread_rect_colors(colors);
        let stride = self.core.mesh_mut().layout().stride_floats();
        for (i, color) in spread.iter().enumerate() {
            self.core
                .mesh_mut()
                .vertex_buffer_mut()
                .write_range(queue, i * stride + 3, color);
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.geometry.rendered_rect(self.core.transform())
    }

    pub fn center(&self) -> Position {
        self.geometry.rendered_center(self.core.transform())
    }

    pub fn update_center(&mut self, queue: &wgpu::Queue) {
        self.geometry.update_center(self.core.transform().scale());
        if self.core.transform().is_about_center() {
            self.core.set_pivot_to_center(queue, self.geometry.center());
        }
    }
}

impl Colorable for GradientRect {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.define_colors(queue, &[color]);
    }
}

impl Drawable for GradientRect {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.core.draw_with(rpass, None);
    }
}

/// A triangle with one color per vertex.
#[derive(Debug)]
pub struct GradientTriangle {
    core: SurfaceCore,
    geometry: TriangleGeometry,
}

impl GradientTriangle {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        screen: ScreenSpace,
        vertices: [Position; 3],
        colors: &[Rgba],
    ) -> Result<Self, EngineError> {
        let geometry = TriangleGeometry::new(vertices);
        let program = programs.get_or_create(device, &ProgramDesc::vertex_color_polygon());
        let spread = color::spread_triangle_colors(colors);
        let mut data = Vec::with_capacity(3 * 7);
        for (vertex, color) in geometry.vertices().iter().zip(&spread) {
            let ndc = screen.point_to_ndc(*vertex);
            data.extend_from_slice(&[ndc.x, ndc.y, 0.0]);
            data.extend_from_slice(color);
        }
        let mesh = Mesh::from_data(device, DrawMode::Triangles, data, AttributeFlags::COLOR, None)?;
        let mut core = SurfaceCore::new(device, screen, program, mesh);
        core.transform.set_pivot_to_center(geometry.center());
        core.push_transform(queue);
        Ok(Self { core, geometry })
    }

    pub fn define_colors(&mut self, queue: &wgpu::Queue, colors: &[Rgba]) {
        let spread = color::spread_triangle_colors(colors);
        let stride = self.core.mesh_mut().layout().stride_floats();
        for (i, color) in spread.iter().enumerate() {
            self.core
                .mesh_mut()
                .vertex_buffer_mut()
                .write_range(queue, i * stride + 3, color);
        }
    }

    pub fn center(&self) -> Position {
        self.geometry.rendered_center(self.core.transform())
    }

    pub fn update_center(&mut self, queue: &wgpu::Queue) {
        self.geometry.update_center();
        if self.core.transform().is_about_center() {
            self.core.set_pivot_to_center(queue, self.geometry.center());
        }
    }
}

impl Colorable for GradientTriangle {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.define_colors(queue, &[color]);
    }
}

impl Drawable for GradientTriangle {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.core.draw_with(rpass, None);
    }
}

macro_rules! forward_transformable {
    ($ty:ty) => {
        impl Transformable for $ty {
            fn set_translation(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
                self.core.set_translation(queue, x, y);
            }
            fn change_translation_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
                self.core.change_translation_by(queue, dx, dy);
            }
            fn set_rotation(&mut self, queue: &wgpu::Queue, degrees: f32) {
                self.core.set_rotation(queue, degrees);
            }
            fn change_rotation_by(&mut self, queue: &wgpu::Queue, degrees: f32) {
                self.core.change_rotation_by(queue, degrees);
            }
            fn set_scale(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
                self.core.set_scale(queue, x, y);
            }
            fn change_scale_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
                self.core.change_scale_by(queue, dx, dy);
            }
            fn set_rotation_about_center(&mut self, queue: &wgpu::Queue) {
                self.core
                    .set_pivot_to_center(queue, self.geometry.center());
            }
            fn set_rotation_about_point(&mut self, queue: &wgpu::Queue, point: Position) {
                self.core.set_pivot_to_point(queue, point);
            }
        }
    };
}

/// A rectangle sampling up to three blended textures, modulated by
/// per-corner colors. Constructible with no texture at all for deferred
/// assignment; until one is bound it draws its colors alone.
#[derive(Debug)]
pub struct TexturedRect {
    core: SurfaceCore,
    geometry: RectGeometry,
    textures: Option<TextureArray>,
    blend: [f32; 4],
    max_slots: u32,
}

impl TexturedRect {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        screen: ScreenSpace,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colors: &[Rgba],
        textures: Vec<Rc<Texture>>,
        max_slots: u32,
    ) -> Result<Self, EngineError> {
        let geometry = RectGeometry::new(Position::new(x, y), Size::new(width, height));
        let program =
            programs.get_or_create(device, &ProgramDesc::textured_polygon(textures.len())?);
        let spread = color::spread_rect_colors(colors);
        let mesh = Mesh::from_data(
            device,
            DrawMode::Triangles,
            rect_textured_data(screen, &geometry, &spread),
            AttributeFlags::COLOR | AttributeFlags::TEX_COORDS,
            Some(&RECT_INDICES),
        )?;
        let texture_array = if textures.is_empty() {
            None
        } else {
            Some(TextureArray::new(device, &program, textures, max_slots)?)
        };
        let mut core = SurfaceCore::new(device, screen, program, mesh);
        core.transform.set_pivot_to_center(geometry.center());
        core.push_transform(queue);
        let rect = Self {
            core,
            geometry,
            textures: texture_array,
            blend: [0.5, 0.5, 0.0, 0.0],
            max_slots,
        };
        rect.push_blend(queue);
        Ok(rect)
    }

    fn push_blend(&self, queue: &wgpu::Queue) {
        self.core
            .uniforms()
            .set(queue, "blend", UniformValue::Vec4(self.blend));
    }

    pub fn texture_count(&self) -> usize {
        self.textures.as_ref().map_or(0, TextureArray::len)
    }

    /// Swaps the primary texture binding. The vertex data is never touched;
    /// only the bind group is rebuilt around the new texture.
    pub fn change_texture(&mut self, device: &wgpu::Device, texture: Rc<Texture>) {
        let Some(array) = &self.textures else {
            warn!("change_texture on a textureless surface; assign textures first");
            return;
        };
        let mut textures = array.textures().to_vec();
        textures[0] = texture;
        self.textures = Some(
            TextureArray::new(device, self.core.program(), textures, self.max_slots)
                .expect("rebinding preserves the texture count"),
        );
    }

    /// Replaces the whole texture set, switching the program variant when the
    /// count changes. The mesh survives untouched; all uniform state is
    /// re-pushed against the new program's block.
    pub fn set_textures(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        programs: &mut ProgramCache,
        textures: Vec<Rc<Texture>>,
    ) -> Result<(), EngineError> {
        let desc = ProgramDesc::textured_polygon(textures.len())?;
        let program = programs.get_or_create(device, &desc);
        let texture_array = if textures.is_empty() {
            None
        } else {
            Some(TextureArray::new(device, &program, textures, self.max_slots)?)
        };
        self.core.rebind_program(device, program);
        self.core.push_transform(queue);
        self.textures = texture_array;
        self.push_blend(queue);
        Ok(())
    }

    /// Sets the mix weight for blend level 1 (second texture) or 2 (third).
    pub fn set_blend_weight(&mut self, queue: &wgpu::Queue, level: usize, weight: f32) {
        match level {
            1 => self.blend[0] = weight,
            2 => self.blend[1] = weight,
            _ => {
                warn!("blend level {level} out of range (1-2); ignoring");
                return;
            }
        }
        self.push_blend(queue);
    }

    pub fn define_colors(&mut self, queue: &wgpu::Queue, colors: &[Rgba]) {
        let spread = color::spread_rect_colors(colors);
        let stride = self.core.mesh_mut().layout().stride_floats();
        for (i, color) in spread.iter().enumerate() {
            self.core
                .mesh_mut()
                .vertex_buffer_mut()
                .write_range(queue, i * stride + 3, color);
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.geometry.rendered_rect(self.core.transform())
    }

    pub fn center(&self) -> Position {
        self.geometry.rendered_center(self.core.transform())
    }

    pub fn update_center(&mut self, queue: &wgpu::Queue) {
        self.geometry.update_center(self.core.transform().scale());
        if self.core.transform().is_about_center() {
            self.core.set_pivot_to_center(queue, self.geometry.center());
        }
    }

    /// Deep copy: fresh mesh and uniform block, shared program and textures.
    pub fn duplicate(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let mesh = self.core.mesh.duplicate(device);
        let mut core = SurfaceCore::new(device, self.core.screen, Rc::clone(&self.core.program), mesh);
        core.transform = self.core.transform;
        core.push_transform(queue);
        let textures = self.textures.as_ref().map(|array| {
            TextureArray::new(
                device,
                &core.program,
                array.textures().to_vec(),
                self.max_slots,
            )
            .expect("duplicating preserves the texture count")
        });
        let copy = Self {
            core,
            geometry: self.geometry,
            textures,
            blend: self.blend,
            max_slots: self.max_slots,
        };
        copy.push_blend(queue);
        copy
    }
}

impl Colorable for TexturedRect {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.define_colors(queue, &[color]);
    }
}

impl Drawable for TexturedRect {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.core
            .draw_with(rpass, self.textures.as_ref().map(TextureArray::bind_group));
    }
}

forward_transformable!(SolidRect);
forward_transformable!(SolidTriangle);
forward_transformable!(GradientRect);
forward_transformable!(GradientTriangle);
forward_transformable!(TexturedRect);
