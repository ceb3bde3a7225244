//=========================================================================
// Director Handle
//=========================================================================
//
// Thread-safe front door to a director.
//
// The director itself lives on the run-loop thread. Everything else
// (platform callbacks, input dispatch, scenes that want to switch scenes)
// talks to it through a cloneable `DirectorHandle`, which only enqueues
// messages and flips atomic flags.
//
// The handle also reaches the window the director currently drives, so a
// scene can take the graphics lock outside `render` (resource uploads in
// `initialize` or `update`).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::debug;
use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use crate::core::event::{ApplicationEvent, Event, EventSender};
use crate::core::graphics::Accessor;
use crate::core::scene::Scene;
use crate::core::window::Window;

//=== Kernel ==============================================================

/// Run-loop flags and current window, shared between the director and
/// its handles.
#[derive(Debug, Default)]
pub(crate) struct Kernel {
    running: AtomicBool,
    exit: AtomicBool,
    window: Mutex<Weak<Window>>,
}

impl Kernel {
    pub(crate) fn start(&self) {
        self.exit.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);
    }

    pub(crate) fn finish(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub(crate) fn request_exit(&self) {
        self.exit.store(true, Ordering::Release);
    }

    /// Requests exit only while the loop is running.
    pub(crate) fn stop(&self) {
        if self.is_running() {
            self.request_exit();
        }
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn set_window(&self, window: Weak<Window>) {
        *self.window.lock() = window;
    }

    pub(crate) fn window(&self) -> Option<Arc<Window>> {
        self.window.lock().upgrade()
    }
}

//=== DirectorCommand =====================================================

/// Scene changes applied at the next frame boundary.
pub(crate) enum DirectorCommand {
    RunScene(Box<dyn Scene>),
    EndScene,
}

impl fmt::Debug for DirectorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunScene(_) => write!(f, "RunScene"),
            Self::EndScene => write!(f, "EndScene"),
        }
    }
}

//=== DirectorHandle ======================================================

/// Cloneable, `Send` handle for talking to a director from any thread.
#[derive(Clone)]
pub struct DirectorHandle {
    pub(crate) kernel: Arc<Kernel>,
    pub(crate) application: EventSender<ApplicationEvent>,
    pub(crate) input: EventSender<Event>,
    pub(crate) commands: EventSender<DirectorCommand>,
}

impl DirectorHandle {
    /// Delivers an application lifecycle event.
    pub fn post(&self, event: ApplicationEvent) {
        debug!(target: "director", "Application event posted: {:?}", event);
        self.application.push(event);
    }

    /// Queues an input event for the current scene.
    pub fn handle_event(&self, event: Event) {
        self.input.push(event);
    }

    /// Ends the run-loop at the end of the current iteration.
    ///
    /// Has no effect when the loop is not running.
    pub fn stop(&self) {
        self.kernel.stop();
    }

    /// Replaces the current scene at the next frame boundary.
    pub fn run_scene(&self, scene: Box<dyn Scene>) {
        self.commands.push(DirectorCommand::RunScene(scene));
    }

    /// Removes the current scene, which ends the run-loop.
    pub fn end_scene(&self) {
        self.commands.push(DirectorCommand::EndScene);
    }

    pub fn is_running(&self) -> bool {
        self.kernel.is_running()
    }

    //--- Graphics Access --------------------------------------------------

    /// Runs `f` with the graphics lock of the current window held.
    ///
    /// Blocks while another accessor holds the lock. Without a window the
    /// accessor is empty. The lock is released when `f` returns.
    ///
    /// Must not be called from [`Scene::render`], which already runs under
    /// the lock; use the frame's context there.
    pub fn lock_graphics_context<R>(&self, f: impl FnOnce(&Accessor<'_>) -> R) -> R {
        let window = self.kernel.window();
        let accessor = match &window {
            Some(window) => window.lock_graphics_context(),
            None => Accessor::empty(),
        };
        f(&accessor)
    }

    /// Like [`Self::lock_graphics_context`] but never blocks: on contention
    /// `f` receives an accessor that owns no lock.
    pub fn try_lock_graphics_context<R>(&self, f: impl FnOnce(&Accessor<'_>) -> R) -> R {
        let window = self.kernel.window();
        let accessor = match &window {
            Some(window) => window.try_lock_graphics_context(),
            None => Accessor::empty(),
        };
        f(&accessor)
    }
}

impl fmt::Debug for DirectorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorHandle")
            .field("running", &self.is_running())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
