//=========================================================================
// Scene
//=========================================================================
//
// The pluggable unit of application behavior driven by the director.
//
// Lifecycle:
//   initialize() ─> resume() ─> [handle()* update() render()]* ─> suspend()
//                      ▲                                             │
//                      └─────────────────────────────────────────────┘
//
// `resume`/`suspend` follow the director's composite state: they fire
// exactly when "active AND focused AND graphics available" flips.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::geometry::Size2u;
use crate::core::graphics::Frame;

//=== Scene Trait =========================================================

/// Behavior plugged into the director.
///
/// Only `view_size`, `update` and `render` are required.
///
/// ```rust
/// use basics_runtime::prelude::*;
///
/// struct Blank;
///
/// impl Scene for Blank {
///     fn view_size(&self) -> Size2u {
///         Size2u::new(1280, 720)
///     }
///
///     fn update(&mut self, _time: f32) {}
///
///     fn render(&mut self, frame: &mut Frame<'_>) {
///         frame.draw_rectangle(0.0, 0.0, 1280.0, 720.0);
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Virtual resolution the scene renders and receives input in.
    fn view_size(&self) -> Size2u;

    /// Fixed duration of the first frame in seconds.
    ///
    /// Negative means "use measured wall-clock time".
    fn frame_duration(&self) -> f32 {
        -1.0
    }

    /// Called once before the scene is installed. Returning `false`
    /// discards the scene.
    fn initialize(&mut self) -> bool {
        true
    }

    /// The application stopped running (background, focus or surface lost).
    fn suspend(&mut self) {}

    /// The application started running again.
    fn resume(&mut self) {}

    /// Input event, with touch coordinates already in the virtual
    /// resolution and a bottom-left origin.
    fn handle(&mut self, _event: &Event) {}

    /// Advances the simulation by `time` seconds.
    ///
    /// Resources that need the graphics context (textures, buffers) are
    /// uploaded here or in `initialize` through
    /// [`DirectorHandle::lock_graphics_context`](crate::core::director::DirectorHandle::lock_graphics_context).
    fn update(&mut self, time: f32);

    /// Draws the scene. Only called while the surface is available.
    fn render(&mut self, frame: &mut Frame<'_>);
}
