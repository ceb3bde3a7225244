//=========================================================================
// Test Support
//=========================================================================
//
// Instrumented graphics context for lifetime and ordering tests.
//
//=========================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{GraphicsContext, HeadlessContext};
use crate::core::geometry::Size2u;

/// Observations shared between a [`TrackedContext`] and the test.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    finalized: AtomicBool,
    dropped: AtomicBool,
}

impl Lifecycle {
    pub(crate) fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::SeqCst)
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

/// Headless context that reports finalization and drop through a [`Lifecycle`].
pub(crate) struct TrackedContext {
    inner: HeadlessContext,
    lifecycle: Arc<Lifecycle>,
}

impl TrackedContext {
    pub(crate) fn shared(size: Size2u) -> (Arc<dyn GraphicsContext>, Arc<Lifecycle>) {
        let (context, lifecycle) = Self::concrete(size);
        let context: Arc<dyn GraphicsContext> = context;
        (context, lifecycle)
    }

    pub(crate) fn concrete(size: Size2u) -> (Arc<TrackedContext>, Arc<Lifecycle>) {
        let lifecycle = Arc::new(Lifecycle::default());
        let context = Arc::new(Self {
            inner: HeadlessContext::new(size),
            lifecycle: Arc::clone(&lifecycle),
        });
        (context, lifecycle)
    }

    pub(crate) fn frames_presented(&self) -> u64 {
        self.inner.frames_presented()
    }
}

impl GraphicsContext for TrackedContext {
    fn invalidate(&self) {
        self.inner.invalidate()
    }

    fn suspend(&self) {
        self.inner.suspend()
    }

    fn resume(&self) -> bool {
        self.inner.resume()
    }

    fn finalize(&self) {
        self.inner.finalize();
        self.lifecycle.finalized.store(true, Ordering::SeqCst);
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn is_current(&self) -> bool {
        self.inner.is_current()
    }

    fn make_current(&self) -> bool {
        self.inner.make_current()
    }

    fn set_sync_swap(&self, activated: bool) -> bool {
        self.inner.set_sync_swap(activated)
    }

    fn flush_and_display(&self) -> bool {
        self.inner.flush_and_display()
    }

    fn surface_width(&self) -> u32 {
        self.inner.surface_width()
    }

    fn surface_height(&self) -> u32 {
        self.inner.surface_height()
    }
}

impl Drop for TrackedContext {
    fn drop(&mut self) {
        self.finalize();
        self.lifecycle.dropped.store(true, Ordering::SeqCst);
    }
}
