//=========================================================================
// basics++ Runtime Engine
//
// Main entry point and coordinator for the runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(scene)──>  [Runtime]
//         │                          │
//         ├─ with_title()            ├─ spawns the director thread
//         ├─ with_window_size()      ├─ runs the platform event loop
//         ├─ with_target_fps()       └─ blocks until both finish
//         └─ with_renderer_factory()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use crate::core::director::{Director, DirectorConfig};
use crate::core::event::ApplicationEvent;
use crate::core::geometry::Size2u;
use crate::core::graphics::RendererFactory;
use crate::core::scene::Scene;
use crate::core::window::Window;
use crate::platform::{Platform, PlatformRequest};

//=== WindowConfig ========================================================

/// Native window settings.
///
/// # Default Values
///
/// - **title**: "basics++"
/// - **size**: 800x480 logical pixels
/// - **resizable**: false (a resize replaces the surface context, which
///   the running scene observes as a new window)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub size: Size2u,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "basics++".to_owned(),
            size: Size2u::new(800, 480),
            resizable: false,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// See [`WindowConfig`] and [`DirectorConfig`]. The renderer defaults to
/// the display-list renderer.
///
/// # Examples
///
/// ```no_run
/// use basics_runtime::prelude::*;
///
/// struct Blank;
///
/// impl Scene for Blank {
///     fn view_size(&self) -> Size2u {
///         Size2u::new(1280, 720)
///     }
///     fn update(&mut self, _time: f32) {}
///     fn render(&mut self, _frame: &mut Frame<'_>) {}
/// }
///
/// EngineBuilder::new()
///     .with_title("Blank")
///     .with_window_size(1280, 720)
///     .with_target_fps(60.0)
///     .build()
///     .run(Box::new(Blank));
/// ```
pub struct EngineBuilder {
    window: WindowConfig,
    director: DirectorConfig,
    renderer_factory: Option<RendererFactory>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            window: WindowConfig::default(),
            director: DirectorConfig::default(),
            renderer_factory: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial inner size of the window in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either side is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.window.size = Size2u::new(width, height);
        self
    }

    /// Allows the user to resize the window. Each size change swaps in a
    /// new surface context and rebuilds the renderer.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.window.resizable = resizable;
        self
    }

    /// Caps the frame rate while the scene is running.
    ///
    /// Default: uncapped
    ///
    /// # Panics
    ///
    /// Panics if `fps <= 0.0`.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        assert!(fps > 0.0, "Target FPS must be positive, got {}", fps);
        self.director.target_fps = Some(fps);
        self
    }

    /// Sets the elapsed time handed to the first update when the scene
    /// measures its own time.
    ///
    /// Default: 1/60 s
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_default_frame_duration(mut self, seconds: f32) -> Self {
        assert!(
            seconds > 0.0,
            "Default frame duration must be positive, got {}",
            seconds
        );
        self.director.default_frame_duration = seconds;
        self
    }

    /// Sets how long the director sleeps per iteration while not running.
    ///
    /// Default: 10 ms
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.director.idle_sleep = idle_sleep;
        self
    }

    pub fn with_renderer_factory(mut self, factory: RendererFactory) -> Self {
        self.renderer_factory = Some(factory);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (window: \"{}\" {}x{}, fps: {:?})",
            self.window.title,
            self.window.size.width,
            self.window.size.height,
            self.director.target_fps
        );

        Engine {
            window: self.window,
            director: self.director,
            renderer_factory: self.renderer_factory,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// basics++ runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► Director (director thread)
///   │     └─► Scene: handle / update / render
///   │
///   └─► Platform (Winit event loop)
///         └─► native window, surface context, input
///
/// Communication: crossbeam queues (events) + graphics lock (surface)
/// ```
pub struct Engine {
    window: WindowConfig,
    director: DirectorConfig,
    renderer_factory: Option<RendererFactory>,
}

impl Engine {
    /// Runs `scene` and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the Winit event loop
    /// 2. Spawns the director thread running `scene`
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Director finishes → `PlatformRequest::Exit` → event loop exits
    ///
    /// # Thread Panic Handling
    ///
    /// If the director thread panics, the error is logged once the event
    /// loop exits. The platform keeps running so the window can be closed
    /// normally.
    pub fn run(self, scene: Box<dyn Scene>) {
        info!("Starting engine runtime");

        //--- 1. Create the event loop ------------------------------------
        let event_loop = match Platform::create_event_loop() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                error!("Platform error: {}", e);
                return;
            }
        };
        let proxy = event_loop.create_proxy();

        //--- 2. Spawn the director thread --------------------------------
        let mut director = Director::new(self.director);
        if let Some(factory) = self.renderer_factory {
            director = director.with_renderer_factory(factory);
        }
        let handle = director.handle();

        let spawned = thread::Builder::new()
            .name("director".to_owned())
            .spawn(move || {
                director.run_scene(scene);
                if proxy.send_event(PlatformRequest::Exit).is_err() {
                    debug!(target: "director", "Event loop already closed");
                }
            });

        let director_thread = match spawned {
            Ok(join_handle) => join_handle,
            Err(e) => {
                error!("Failed to spawn director thread: {}", e);
                return;
            }
        };
        info!("Director thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let window = Arc::new(Window::new());
        let platform = Platform::new(self.window, window, handle.clone());
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run(event_loop) {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the director to terminate ---------------
        handle.post(ApplicationEvent::Quit);

        match director_thread.join() {
            Ok(()) => info!("Director thread terminated cleanly"),
            Err(e) => error!("Director thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
