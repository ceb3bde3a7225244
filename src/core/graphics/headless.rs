//=========================================================================
// Headless Context
//=========================================================================
//
// Off-screen graphics context with a fixed surface size.
//
// Presents nothing; counts presented frames instead. Used where no native
// surface exists (tests, servers, the default context factory).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use log::debug;

//=== Internal Dependencies ===============================================

use super::GraphicsContext;
use crate::core::geometry::Size2u;

//=== HeadlessContext =====================================================

#[derive(Debug)]
pub struct HeadlessContext {
    size: Size2u,
    available: AtomicBool,
    current: AtomicBool,
    finalized: AtomicBool,
    sync_swap: AtomicBool,
    frames_presented: AtomicU64,
}

impl HeadlessContext {
    pub fn new(size: Size2u) -> Self {
        Self {
            size,
            available: AtomicBool::new(true),
            current: AtomicBool::new(false),
            finalized: AtomicBool::new(false),
            sync_swap: AtomicBool::new(true),
            frames_presented: AtomicU64::new(0),
        }
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented.load(Ordering::Acquire)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::Acquire)
    }

    pub fn sync_swap(&self) -> bool {
        self.sync_swap.load(Ordering::Acquire)
    }
}

impl GraphicsContext for HeadlessContext {
    fn invalidate(&self) {
        self.available.store(false, Ordering::Release);
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
            debug!(target: "graphics", "Headless context finalized after {} frames", self.frames_presented());
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

impl Drop for HeadlessContext {
    fn drop(&mut self) {
        self.finalize();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
