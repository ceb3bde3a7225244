//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the director thread.
//
// Architecture:
// ```text
//  Main Thread:                          Director Thread:
//  ┌───────────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop             │    │  Director run-loop   │
//  │   ├─ resumed/suspended ───────┼───►│  application queue   │
//  │   ├─ Focused ─────────────────┼───►│  window queue        │
//  │   ├─ Touch/Mouse              │    │                      │
//  │   │   ↓ TouchTranslator ──────┼───►│  input queue         │
//  │   └─ CloseRequested ──────────┼───►│  Quit                │
//  │                               │    │                      │
//  │  SurfaceContext ◄─────────────┼────┤  lock → render →     │
//  │   (graphics lock)             │    │  flush_and_display   │
//  │                               │    │                      │
//  │  user_event(Exit) ◄───────────┼────┤  run_scene returns   │
//  └───────────────────────────────┘    └──────────────────────┘
// ```
//
// Surface teardown order (suspend or exit):
//   1. push LostGraphicsContext to the window
//   2. invalidate the context (no lock; in-flight frames fail fast)
//   3. post WindowDestroyed + Suspend
//   4. release the context (waits for any live accessor)
//
// A resize runs the same teardown without Suspend and attaches a context
// with the new size, so the director re-caches the surface size.
//
// Winit mandates the main thread on macOS/iOS, so this runs on the
// thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod surface;
mod touch;

//=== External Crates =====================================================

use std::sync::Arc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent as NativeEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window as NativeWindow, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::director::DirectorHandle;
use crate::core::event::{ApplicationEvent, Event, WindowEvent};
use crate::core::geometry::Size2u;
use crate::core::graphics::GraphicsContext;
use crate::core::window::Window;
use crate::engine::WindowConfig;
use surface::SurfaceContext;
use touch::TouchTranslator;

//=== PlatformRequest =====================================================

/// Requests sent to the event loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlatformRequest {
    /// The director finished; leave the event loop.
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop the engine cannot run.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== Platform ============================================================

/// Native window owner and event translator.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, window, director)`
/// 2. **Execution**: `platform.run(event_loop)` blocks until exit
/// 3. **Resume**: native window created once, surface context attached
/// 4. **Suspend**: surface context torn down (window kept)
/// 5. **Shutdown**: `PlatformRequest::Exit` from the director thread
///
/// # Thread Safety
///
/// Stays on the main thread. The shared [`Window`] and the
/// [`DirectorHandle`] are the only things crossing threads.
pub(crate) struct Platform {
    config: WindowConfig,

    /// Engine-side window shared with the director.
    window: Arc<Window>,

    /// OS window (None until `resumed()` called).
    native: Option<Arc<NativeWindow>>,

    /// Size of the attached surface context.
    surface_size: Size2u,

    director: DirectorHandle,
    touch: TouchTranslator,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(config: WindowConfig, window: Arc<Window>, director: DirectorHandle) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            window,
            native: None,
            surface_size: Size2u::default(),
            director,
            touch: TouchTranslator::new(),
        }
    }

    /// Creates the event loop carrying [`PlatformRequest`]s.
    pub fn create_event_loop() -> Result<EventLoop<PlatformRequest>, PlatformError> {
        EventLoop::<PlatformRequest>::with_user_event()
            .build()
            .map_err(PlatformError::EventLoopCreation)
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until [`PlatformRequest::Exit`] arrives.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self, event_loop: EventLoop<PlatformRequest>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Surface Lifecycle ------------------------------------------------

    /// Attaches `context` to the shared window and announces it.
    ///
    /// Returns `false` if the window rejected the context.
    pub(crate) fn attach_surface(&mut self, context: Arc<dyn GraphicsContext>, focused: bool) -> bool {
        let size = context.surface_size();
        if !self.window.set_graphics_context(context) {
            warn!(target: "platform", "Window rejected the new surface context");
            return false;
        }
        self.surface_size = size;

        if focused {
            self.window.push_event(WindowEvent::GotFocus);
        }

        self.director
            .post(ApplicationEvent::WindowCreated(Arc::downgrade(&self.window)));
        true
    }

    /// Tears down the attached context, if any.
    pub(crate) fn detach_surface(&mut self) {
        self.release_surface(true);
    }

    /// Swaps the attached context for `context` without suspending.
    pub(crate) fn replace_surface(&mut self, context: Arc<dyn GraphicsContext>) -> bool {
        self.release_surface(false);
        self.attach_surface(context, false)
    }

    fn release_surface(&mut self, suspend: bool) {
        if !self.window.has_graphics_context() {
            return;
        }

        self.window.push_event(WindowEvent::LostGraphicsContext);
        self.window.invalidate_graphics_context();

        self.director.post(ApplicationEvent::WindowDestroyed);
        if suspend {
            self.director.post(ApplicationEvent::Suspend);
        }

        self.window.release_graphics_context();
        self.surface_size = Size2u::default();
        debug!(target: "platform", "Surface detached");
    }

    fn on_resized(&mut self, size: Size2u) {
        if size.is_empty() || size == self.surface_size || !self.window.has_graphics_context() {
            return;
        }

        let Some(native) = self.native.clone() else {
            return;
        };

        debug!(
            target: "platform",
            "Surface resized {}x{} -> {}x{}",
            self.surface_size.width,
            self.surface_size.height,
            size.width,
            size.height
        );

        let context: Arc<dyn GraphicsContext> = Arc::new(SurfaceContext::new(native));
        self.replace_surface(context);
    }

    //--- Input ------------------------------------------------------------

    fn dispatch(&self, event: Option<Event>) {
        if let Some(event) = event {
            trace!(target: "platform::input", "Input event: {:?}", event.id);
            self.director.handle_event(event);
        }
    }

    fn on_focus(&mut self, focused: bool) {
        if focused {
            self.window.push_event(WindowEvent::GotFocus);
        } else {
            let cancelled = self.touch.cancel();
            self.dispatch(cancelled);
            self.window.push_event(WindowEvent::LostFocus);
        }
    }

    //--- Window Creation --------------------------------------------------

    fn native_window(&mut self, event_loop: &ActiveEventLoop) -> Option<Arc<NativeWindow>> {
        if let Some(native) = &self.native {
            return Some(Arc::clone(native));
        }

        let size = self.config.size;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(native) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    native.inner_size().width,
                    native.inner_size().height,
                    native.scale_factor()
                );
                let native = Arc::new(native);
                self.native = Some(Arc::clone(&native));
                Some(native)
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                None
            }
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<PlatformRequest> for Platform {
    /// Called at startup and on every mobile resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.director.post(ApplicationEvent::Resume);

        let Some(native) = self.native_window(event_loop) else {
            self.director.post(ApplicationEvent::Quit);
            return;
        };

        let focused = native.has_focus();
        let context: Arc<dyn GraphicsContext> = Arc::new(SurfaceContext::new(Arc::clone(&native)));
        if self.attach_surface(context, focused) {
            native.request_redraw();
        }
    }

    /// Mobile suspend: the surface goes away, the window stays.
    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Application suspended");
        self.detach_surface();
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: NativeEvent) {
        match event {
            NativeEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.director.post(ApplicationEvent::Quit);
            }

            NativeEvent::Focused(focused) => {
                debug!(target: "platform", "Window focus: {}", focused);
                self.on_focus(focused);
            }

            NativeEvent::Touch(touch) => {
                let event = self.touch.touch(touch.phase, touch.location.x, touch.location.y);
                self.dispatch(Some(event));
            }

            NativeEvent::CursorMoved { position, .. } => {
                let event = self.touch.cursor_moved(position.x, position.y);
                self.dispatch(event);
            }

            NativeEvent::MouseInput { state, button, .. } => {
                let event = self.touch.mouse_button(button, state);
                self.dispatch(event);
            }

            NativeEvent::Resized(size) => {
                trace!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.on_resized(Size2u::new(size.width, size.height));
            }

            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, request: PlatformRequest) {
        match request {
            PlatformRequest::Exit => {
                info!(target: "platform", "Director finished, leaving event loop");
                self.detach_surface();
                event_loop.exit();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.detach_surface();
        self.native = None;
        info!(target: "platform", "Event loop exiting");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
