//=========================================================================
// Surface Context
//=========================================================================
//
// Graphics context bound to a native Winit window.
//
// Presentation is driven by Winit: `flush_and_display` notifies the
// window that a frame is about to be presented and requests the next
// redraw. Both calls are valid from the director thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use winit::window::Window as NativeWindow;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size2u;
use crate::core::graphics::GraphicsContext;

//=== SurfaceContext ======================================================

pub(crate) struct SurfaceContext {
    native: Arc<NativeWindow>,
    size: Size2u,
    available: AtomicBool,
    current: AtomicBool,
    finalized: AtomicBool,
    sync_swap: AtomicBool,
    frames_presented: AtomicU64,
}

impl SurfaceContext {
    /// Binds a context to `native`, capturing its current inner size.
    pub(crate) fn new(native: Arc<NativeWindow>) -> Self {
        let inner = native.inner_size();
        debug!(
            target: "graphics",
            "Surface context created ({}x{})",
            inner.width,
            inner.height
        );

        Self {
            native,
            size: Size2u::new(inner.width, inner.height),
            available: AtomicBool::new(true),
            current: AtomicBool::new(false),
            finalized: AtomicBool::new(false),
            sync_swap: AtomicBool::new(true),
            frames_presented: AtomicU64::new(0),
        }
    }
}

impl GraphicsContext for SurfaceContext {
    fn invalidate(&self) {
        if self.available.swap(false, Ordering::AcqRel) {
            trace!(target: "graphics", "Surface context invalidated");
        }
    }

    fn suspend(&self) {
        self.current.store(false, Ordering::Release);
    }

    fn resume(&self) -> bool {
        self.make_current()
    }

    fn finalize(&self) {
        if !self.finalized.swap(true, Ordering::AcqRel) {
            self.available.store(false, Ordering::Release);
            self.current.store(false, Ordering::Release);
            debug!(
                target: "graphics",
                "Surface context finalized after {} frames",
                self.frames_presented.load(Ordering::Acquire)
            );
        }
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    fn is_current(&self) -> bool {
        self.is_available() && self.current.load(Ordering::Acquire)
    }

    fn make_current(&self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.current.store(true, Ordering::Release);
        true
    }

    fn set_sync_swap(&self, activated: bool) -> bool {
        if !self.is_available() {
            return false;
        }
        self.sync_swap.store(activated, Ordering::Release);
        true
    }

    fn flush_and_display(&self) -> bool {
        if !self.is_available() {
            return false;
        }

        self.native.pre_present_notify();
        if self.sync_swap.load(Ordering::Acquire) {
            self.native.request_redraw();
        }
        self.frames_presented.fetch_add(1, Ordering::AcqRel);
        true
    }

    fn surface_width(&self) -> u32 {
        self.size.width
    }

    fn surface_height(&self) -> u32 {
        self.size.height
    }
}

impl Drop for SurfaceContext {
    fn drop(&mut self) {
        self.finalize();
    }
}

impl fmt::Debug for SurfaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceContext")
            .field("window", &self.native.id())
            .field("size", &self.size)
            .field("available", &self.is_available())
            .finish()
    }
}
