//=========================================================================
// Renderer
//=========================================================================
//
// Drawing capability handed to scenes, plus the per-frame view of it.
//
// A renderer is bound to one graphics context lifetime: the director
// builds it on window creation and drops it on window destruction.
// Construction failures (e.g. a shader that does not compile) leave the
// renderer in a persistent "not ok" state instead of failing every frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GraphicsContext;
use crate::core::geometry::Size2u;

//=== Renderer ============================================================

/// Drawing primitives used by scenes.
///
/// Coordinates are in the scene's virtual resolution with a bottom-left
/// origin.
pub trait Renderer: Send {
    /// `false` when construction failed; such a renderer is never used.
    fn is_ok(&self) -> bool {
        true
    }

    /// Sets the virtual resolution mapped onto the whole surface.
    fn set_view_size(&mut self, view: Size2u);

    fn clear(&mut self);

    fn draw_rectangle(&mut self, left_x: f32, bottom_y: f32, width: f32, height: f32);
}

/// Builds a renderer for a surface of the given pixel size.
pub type RendererFactory = Box<dyn FnMut(Size2u) -> Box<dyn Renderer> + Send>;

//=== DisplayListRenderer =================================================

/// A recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rectangle {
        left_x: f32,
        bottom_y: f32,
        width: f32,
        height: f32,
    },
}

/// Renderer that records the current frame's commands.
///
/// Backends that rasterize elsewhere (or tests) read the list back after
/// each frame. `clear` starts a new frame.
#[derive(Debug, Clone)]
pub struct DisplayListRenderer {
    surface: Size2u,
    view: Size2u,
    commands: Vec<DrawCommand>,
    frames: u64,
    failure: Option<String>,
}

impl DisplayListRenderer {
    pub fn new(surface: Size2u) -> Self {
        Self {
            surface,
            view: surface,
            commands: Vec::with_capacity(64),
            frames: 0,
            failure: None,
        }
    }

    /// A renderer whose construction failed with `reason`.
    pub fn failed(surface: Size2u, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(surface)
        }
    }

    pub fn factory() -> RendererFactory {
        Box::new(|surface| Box::new(Self::new(surface)))
    }

    pub fn surface_size(&self) -> Size2u {
        self.surface
    }

    pub fn view_size(&self) -> Size2u {
        self.view
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started with `clear`.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl Renderer for DisplayListRenderer {
    fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    fn set_view_size(&mut self, view: Size2u) {
        self.view = view;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn draw_rectangle(&mut self, left_x: f32, bottom_y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Rectangle {
            left_x,
            bottom_y,
            width,
            height,
        });
    }
}

//=== Frame ===============================================================

/// What a scene renders into during one frame.
///
/// Only constructed while the graphics lock is held and the context is
/// available.
pub struct Frame<'a> {
    renderer: &'a mut dyn Renderer,
    graphics: &'a dyn GraphicsContext,
    view_size: Size2u,
}

impl<'a> Frame<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        graphics: &'a dyn GraphicsContext,
        view_size: Size2u,
    ) -> Self {
        Self {
            renderer,
            graphics,
            view_size,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// The locked, available graphics context.
    pub fn graphics(&self) -> &dyn GraphicsContext {
        self.graphics
    }

    /// The scene's virtual resolution for this frame.
    pub fn view_size(&self) -> Size2u {
        self.view_size
    }

    pub fn draw_rectangle(&mut self, left_x: f32, bottom_y: f32, width: f32, height: f32) {
        self.renderer.draw_rectangle(left_x, bottom_y, width, height);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
