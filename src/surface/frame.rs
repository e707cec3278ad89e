use std::rc::Rc;

use bitflags::bitflags;

use crate::assets::texture::Texture;
use crate::error::EngineError;
use crate::gpu::program::ProgramCache;
use crate::surface::color::Rgba;
use crate::surface::shape::{Colorable, Drawable, TexturedRect, Transformable};
use crate::utils::{Position, Rectangle, ScreenSpace};

bitflags! {
    /// Style flags controlling how frame construction coordinates are read.
    ///
    /// Percent flags reinterpret the matching value as 0-100 percent of the
    /// window's width or height; `ANCHOR_TO_CENTER` makes (x, y) the frame's
    /// center instead of its corner. Conversion happens once, at
    /// construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameStyle: u32 {
        const ANCHOR_TO_CENTER  = 0x01;
        const X_IS_PERCENT      = 0x02;
        const Y_IS_PERCENT      = 0x04;
        const WIDTH_IS_PERCENT  = 0x08;
        const HEIGHT_IS_PERCENT = 0x10;
    }
}

/// Resolves frame-style construction coordinates to the pixel-space,
/// bottom-left-origin rectangle the surface layer works in. Frame
/// coordinates are measured from the top of the screen.
pub fn resolve_frame_rect(
    screen: ScreenSpace,
    mut x: f32,
    mut y: f32,
    mut width: f32,
    mut height: f32,
    style: FrameStyle,
) -> Rectangle {
    if style.contains(FrameStyle::X_IS_PERCENT) {
        x = (x / 100.0) * screen.width;
    }
    if style.contains(FrameStyle::Y_IS_PERCENT) {
        y = (y / 100.0) * screen.height;
    }
    if style.contains(FrameStyle::WIDTH_IS_PERCENT) {
        width = (width / 100.0) * screen.width;
    }
    if style.contains(FrameStyle::HEIGHT_IS_PERCENT) {
        height = (height / 100.0) * screen.height;
    }
    if style.contains(FrameStyle::ANCHOR_TO_CENTER) {
        x -= width / 2.0;
        y -= height / 2.0;
    }
    // frame y grows downward from the top edge
    let y = (screen.height - y) - height;
    Rectangle::new(x, y, width, height)
}

/// A screen-anchored textured rectangle: the placement layer over
/// [`TexturedRect`]. Queries report in percent-of-screen units so callers
/// can stay resolution independent.
#[derive(Debug)]
pub struct FrameRect {
    rect: TexturedRect,
    style: FrameStyle,
    screen: ScreenSpace,
}

impl FrameRect {
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
        texture: Option<Rc<Texture>>,
        style: FrameStyle,
        max_slots: u32,
    ) -> Result<Self, EngineError> {
        let resolved = resolve_frame_rect(screen, x, y, width, height, style);
        let rect = TexturedRect::new(
            device,
            queue,
            programs,
            screen,
            resolved.x,
            resolved.y,
            resolved.width,
            resolved.height,
            colors,
            texture.into_iter().collect(),
            max_slots,
        )?;
        Ok(Self {
            rect,
            style,
            screen,
        })
    }

    pub fn style(&self) -> FrameStyle {
        self.style
    }

    pub fn inner(&self) -> &TexturedRect {
        &self.rect
    }

    pub fn inner_mut(&mut self) -> &mut TexturedRect {
        &mut self.rect
    }

    pub fn change_texture(&mut self, device: &wgpu::Device, texture: Rc<Texture>) {
        self.rect.change_texture(device, texture);
    }

    /// The rendered rectangle in percent-of-screen units.
    pub fn rect(&self) -> Rectangle {
        let r = self.rect.rect();
        Rectangle::new(
            (r.x / self.screen.width) * 100.0,
            (r.y / self.screen.height) * 100.0,
            (r.width / self.screen.width) * 100.0,
            (r.height / self.screen.height) * 100.0,
        )
    }

    /// The rendered center in percent-of-screen units.
    pub fn center(&self) -> Position {
        self.screen.pixels_to_percent(self.rect.center())
    }

    /// Pivot redirection, optionally given in percent units.
    pub fn set_rotation_about_point_percent(&mut self, queue: &wgpu::Queue, point: Position) {
        let pixel = self.screen.percent_to_pixels(point);
        self.rect.set_rotation_about_point(queue, pixel);
    }

    pub fn duplicate(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            rect: self.rect.duplicate(device, queue),
            style: self.style,
            screen: self.screen,
        }
    }
}

impl Transformable for FrameRect {
    fn set_translation(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.rect.set_translation(queue, x, y);
    }
    fn change_translation_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.rect.change_translation_by(queue, dx, dy);
    }
    fn set_rotation(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.rect.set_rotation(queue, degrees);
    }
    fn change_rotation_by(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.rect.change_rotation_by(queue, degrees);
    }
    fn set_scale(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.rect.set_scale(queue, x, y);
    }
    fn change_scale_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.rect.change_scale_by(queue, dx, dy);
    }
    fn set_rotation_about_center(&mut self, queue: &wgpu::Queue) {
        self.rect.set_rotation_about_center(queue);
    }
    fn set_rotation_about_point(&mut self, queue: &wgpu::Queue, point: Position) {
        self.rect.set_rotation_about_point(queue, point);
    }
}

impl Colorable for FrameRect {
    fn set_fill_color(&mut self, queue: &wgpu::Queue, color: Rgba) {
        self.rect.set_fill_color(queue, color);
    }
}

impl Drawable for FrameRect {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.rect.draw(rpass);
    }
}

/// One animation: playback rate, its ordered frame textures, and whether it
/// repeats.
#[derive(Debug, Clone)]
pub struct AnimationCycle {
    pub fps: u32,
    pub frames: Vec<Rc<Texture>>,
    pub looped: bool,
}

/// Frame-stepping bookkeeping for one cycle, separated from the GPU side so
/// the timing behavior stands on its own.
#[derive(Debug, Clone)]
pub struct AnimationState {
    cycles: Vec<(u32, usize, bool)>, // fps, frame count, looped
    cycle: usize,
    frame: usize,
    elapsed: f32,
    animating: bool,
}

impl AnimationState {
    pub fn new(cycles: Vec<(u32, usize, bool)>) -> Self {
        Self {
            cycles,
            cycle: 0,
            frame: 0,
            elapsed: 0.0,
            animating: true,
        }
    }

    pub fn cycle(&self) -> usize {
        self.cycle
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Selects a cycle (index taken modulo the cycle count, so any index is
    /// valid), resetting frame, elapsed time, and the animating flag.
    pub fn change_cycle(&mut self, index: usize) -> usize {
        self.cycle = index % self.cycles.len();
        self.frame = 0;
        self.elapsed = 0.0;
        self.animating = true;
        self.cycle
    }

    /// Accumulates `dt` seconds and steps the frame index once per elapsed
    /// 1/fps period, carrying the remainder. Returns the frame to display
    /// when it changed. A non-looping cycle stops animating the moment its
    /// frame index wraps back to zero.
    pub fn advance(&mut self, dt: f32) -> Option<usize> {
        if !self.animating {
            return None;
        }
        let (fps, frame_count, looped) = self.cycles[self.cycle];
        if fps == 0 || frame_count == 0 {
            return None;
        }
        let period = 1.0 / fps as f32;
        self.elapsed += dt;
        let mut changed = None;
        while self.elapsed >= period {
            self.elapsed -= period;
            self.frame = (self.frame + 1) % frame_count;
            changed = Some(self.frame);
            if !looped && self.frame == 0 {
                self.animating = false;
                break;
            }
        }
        changed
    }
}

/// A [`FrameRect`] cycling through per-cycle frame textures over time.
#[derive(Debug)]
pub struct AnimationRect {
    frame_rect: FrameRect,
    cycles: Vec<AnimationCycle>,
    state: AnimationState,
}

impl AnimationRect {
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
        cycles: Vec<AnimationCycle>,
        colors: &[Rgba],
        style: FrameStyle,
        max_slots: u32,
    ) -> Result<Self, EngineError> {
        if cycles.is_empty() || cycles.iter().any(|c| c.frames.is_empty()) {
            return Err(EngineError::EmptyAnimation);
        }
        let first = Rc::clone(&cycles[0].frames[0]);
        let frame_rect = FrameRect::new(
            device,
            queue,
            programs,
            screen,
            x,
            y,
            width,
            height,
            colors,
            Some(first),
            style,
            max_slots,
        )?;
        let state = AnimationState::new(
            cycles
                .iter()
                .map(|c| (c.fps, c.frames.len(), c.looped))
                .collect(),
        );
        Ok(Self {
            frame_rect,
            cycles,
            state,
        })
    }

    pub fn current_cycle(&self) -> usize {
        self.state.cycle()
    }

    pub fn current_frame(&self) -> usize {
        self.state.frame()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn frame_rect(&self) -> &FrameRect {
        &self.frame_rect
    }

    pub fn frame_rect_mut(&mut self) -> &mut FrameRect {
        &mut self.frame_rect
    }

    /// Advances the animation clock by `dt` seconds, rebinding the frame
    /// texture whenever the index steps.
    pub fn update(&mut self, device: &wgpu::Device, dt: f32) {
        if let Some(frame) = self.state.advance(dt) {
            let texture = Rc::clone(&self.cycles[self.state.cycle()].frames[frame]);
            self.frame_rect.change_texture(device, texture);
        }
    }

    /// Switches to another cycle (any index is valid, it wraps) and shows
    /// its first frame immediately.
    pub fn change_animation_cycle(&mut self, device: &wgpu::Device, index: usize) {
        let cycle = self.state.change_cycle(index);
        let texture = Rc::clone(&self.cycles[cycle].frames[0]);
        self.frame_rect.change_texture(device, texture);
    }
}

impl Drawable for AnimationRect {
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.frame_rect.draw(rpass);
    }
}

impl Transformable for AnimationRect {
    fn set_translation(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.frame_rect.set_translation(queue, x, y);
    }
    fn change_translation_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.frame_rect.change_translation_by(queue, dx, dy);
    }
    fn set_rotation(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.frame_rect.set_rotation(queue, degrees);
    }
    fn change_rotation_by(&mut self, queue: &wgpu::Queue, degrees: f32) {
        self.frame_rect.change_rotation_by(queue, degrees);
    }
    fn set_scale(&mut self, queue: &wgpu::Queue, x: f32, y: f32) {
        self.frame_rect.set_scale(queue, x, y);
    }
    fn change_scale_by(&mut self, queue: &wgpu::Queue, dx: f32, dy: f32) {
        self.frame_rect.change_scale_by(queue, dx, dy);
    }
    fn set_rotation_about_center(&mut self, queue: &wgpu::Queue) {
        self.frame_rect.set_rotation_about_center(queue);
    }
    fn set_rotation_about_point(&mut self, queue: &wgpu::Queue, point: Position) {
        self.frame_rect.set_rotation_about_point(queue, point);
    }
}
