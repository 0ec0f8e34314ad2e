//! Rendering boundary
//!
//! The engine never talks to a graphics API. The draw system produces
//! [`DrawCall`]s in layer order and hands them to a [`RenderTarget`]; the
//! application drains them into whatever [`Renderer`] backs the window.

use crate::foundation::math::Vec2;

/// Which frame of which sprite sheet to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Sprite sheet name
    pub sheet: String,
    /// Frame index inside the sheet
    pub frame: usize,
}

/// Color treatment applied to a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    /// Draw as authored
    #[default]
    Normal,
    /// Whitened flash used while an entity is hit-stunned
    Flash,
}

/// Draw layer, drawn in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    /// Projectiles, under everything else
    Bullets,
    /// Ships and enemies
    Entities,
    /// Explosions and hit sparks
    Effects,
}

/// One sprite draw, centered on a point
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Image to draw
    pub image: ImageRef,
    /// World-space center of the image
    pub center: Vec2,
    /// Color treatment
    pub tint: Tint,
}

impl DrawCall {
    /// Create a draw call with the normal tint
    pub fn new(sheet: impl Into<String>, frame: usize, center: Vec2) -> Self {
        Self {
            image: ImageRef {
                sheet: sheet.into(),
                frame,
            },
            center,
            tint: Tint::Normal,
        }
    }

    /// Set the tint
    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }
}

/// Sink the draw system submits into
pub trait RenderTarget {
    /// Accept one draw call
    fn submit(&mut self, call: DrawCall);
}

/// Backend that turns draw calls into pixels
pub trait Renderer {
    /// Called before the first draw of a frame
    fn begin_frame(&mut self) {}

    /// Draw one image
    fn draw(&mut self, call: &DrawCall);

    /// Called after the last draw of a frame
    fn end_frame(&mut self) {}
}

/// Draw calls collected during one frame, in submission order
#[derive(Debug, Default)]
pub struct DrawQueue {
    calls: Vec<DrawCall>,
}

impl DrawQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued calls
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of queued calls
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drop queued calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Send every queued call to a renderer as one frame and empty the queue
    pub fn present(&mut self, renderer: &mut dyn Renderer) {
        renderer.begin_frame();
        for call in self.calls.drain(..) {
            renderer.draw(&call);
        }
        renderer.end_frame();
    }
}

impl RenderTarget for DrawQueue {
    fn submit(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

/// Renderer that keeps the last presented frame, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    current: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames: usize,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls of the most recently finished frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    /// Number of frames presented
    pub fn frame_count(&self) -> usize {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, call: &DrawCall) {
        self.current.push(call.clone());
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.current);
        self.frames += 1;
    }
}
