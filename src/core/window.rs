//=========================================================================
// Window
//=========================================================================
//
// Owner of the graphics context and of the mutex guarding it.
//
// The window holds the only authoritative `Arc` of its context. Borrowers
// (director, scenes, renderers) go through `lock_graphics_context()`,
// which returns an `Accessor`. Releasing the context takes the same
// mutex, so it waits for any accessor in flight; only then does the
// window's reference go away and, if it was the last one, the context
// finalizes itself.
//
// Lock order: graphics mutex, then the slot. The slot mutex only guards
// short critical sections and is never held across user code.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::{Mutex, MutexGuard};

//=== Internal Dependencies ===============================================

use crate::core::event::{EventQueue, EventSender, WindowEvent};
use crate::core::graphics::{Accessor, ContextObserver, GraphicsContext};

//=== Window ==============================================================

/// A drawable window as seen by the core.
pub struct Window {
    graphics_mutex: Mutex<()>,
    graphics_context: Mutex<Option<Arc<dyn GraphicsContext>>>,
    events: EventQueue<WindowEvent>,
}

impl Window {
    pub fn new() -> Self {
        Self {
            graphics_mutex: Mutex::new(()),
            graphics_context: Mutex::new(None),
            events: EventQueue::new(),
        }
    }

    //--- Graphics Context -------------------------------------------------

    pub fn has_graphics_context(&self) -> bool {
        self.slot().is_some()
    }

    /// Attaches `context`.
    ///
    /// Returns `false` if a context is already attached or `context` is
    /// not available. Waits for any accessor currently holding the lock.
    pub fn set_graphics_context(&self, context: Arc<dyn GraphicsContext>) -> bool {
        if !context.is_available() {
            warn!(target: "graphics", "Refusing to attach an unavailable graphics context");
            return false;
        }

        let _lock = self.lock_mutex();
        let mut slot = self.slot();

        if slot.is_some() {
            warn!(target: "graphics", "Window already has a graphics context");
            return false;
        }

        info!(
            target: "graphics",
            "Graphics context attached ({}x{})",
            context.surface_width(),
            context.surface_height()
        );
        *slot = Some(context);
        true
    }

    /// Weak observer of the current context (detached when none).
    pub fn context_observer(&self) -> ContextObserver {
        match self.slot().as_ref() {
            Some(context) => ContextObserver::new(context),
            None => ContextObserver::detached(),
        }
    }

    /// Blocks until the graphics lock is held, then resolves the context.
    pub fn lock_graphics_context(&self) -> Accessor<'_> {
        let observer = self.context_observer();
        Accessor::lock(&observer, &self.graphics_mutex)
    }

    /// Like [`Self::lock_graphics_context`] but never blocks.
    pub fn try_lock_graphics_context(&self) -> Accessor<'_> {
        let observer = self.context_observer();
        Accessor::try_lock(&observer, &self.graphics_mutex)
    }

    /// Flags the context as lost. Does not take the graphics lock.
    pub fn invalidate_graphics_context(&self) {
        if let Some(context) = self.slot().as_ref() {
            debug!(target: "graphics", "Graphics context invalidated");
            context.invalidate();
        }
    }

    /// Detaches the context after every accessor has released the lock.
    ///
    /// Returns `true` if a context was attached. The context finalizes
    /// when its last reference goes, which happens here unless the caller
    /// kept its own clone.
    pub fn release_graphics_context(&self) -> bool {
        let _lock = self.lock_mutex();
        let released = self.slot().take();

        match released {
            Some(context) => {
                context.invalidate();
                drop(context);
                info!(target: "graphics", "Graphics context released");
                true
            }
            None => false,
        }
    }

    //--- Window Events ----------------------------------------------------

    pub fn push_event(&self, event: WindowEvent) {
        self.events.push(event);
    }

    pub fn poll(&self) -> Option<WindowEvent> {
        self.events.poll()
    }

    pub fn event_sender(&self) -> EventSender<WindowEvent> {
        self.events.sender()
    }

    //--- Internal Helpers -------------------------------------------------

    fn lock_mutex(&self) -> MutexGuard<'_, ()> {
        self.graphics_mutex.lock()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<dyn GraphicsContext>>> {
        self.graphics_context.lock()
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
