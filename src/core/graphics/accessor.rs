//=========================================================================
// Context Accessor
//=========================================================================
//
// Scoped, lock-guarded access to a graphics context that may vanish.
//
// Protocol:
//   1. Take an observer (weak reference) of the context
//   2. Acquire the window's graphics mutex (may block)
//   3. Resolve the observer while holding the lock
//
// While an accessor holds the lock, the owner cannot release its
// reference (releasing requires the same lock), so a resolved context
// stays alive and un-finalized for the accessor's lifetime. A context
// that was already released before step 3 simply fails to resolve.
//
// Drop order: the context reference is released first, then the lock.
// Any teardown triggered by dropping the last reference therefore
// completes before the next waiter can acquire the mutex.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

//=== Internal Dependencies ===============================================

use super::{ContextObserver, GraphicsContext};

//=== Accessor ============================================================

/// Move-only handle that holds the graphics lock and, if still alive,
/// a strong reference to the context.
///
/// The accessor is *valid* only when it owns the lock, has a context and
/// that context reports itself available. Each condition is queryable on
/// its own so callers can tell "lock contended" from "no context yet"
/// from "context lost mid-lock".
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use basics_runtime::core::geometry::Size2u;
/// use basics_runtime::core::graphics::{Accessor, ContextObserver, GraphicsContext, HeadlessContext};
///
/// let mutex = Mutex::new(());
/// let context: Arc<dyn GraphicsContext> = Arc::new(HeadlessContext::new(Size2u::new(64, 64)));
/// let observer = ContextObserver::new(&context);
///
/// let graphics = Accessor::lock(&observer, &mutex);
/// if graphics.is_valid() {
///     graphics.flush_and_display();
/// }
/// ```
pub struct Accessor<'a> {
    // Declared before `lock` so it is also dropped first.
    context: Option<Arc<dyn GraphicsContext>>,
    lock: Option<MutexGuard<'a, ()>>,
}

impl<'a> Accessor<'a> {
    //--- Construction -----------------------------------------------------

    /// An accessor holding neither lock nor context.
    pub fn empty() -> Self {
        Self {
            context: None,
            lock: None,
        }
    }

    /// Blocks until `mutex` is acquired, then resolves `observer`.
    pub fn lock(observer: &ContextObserver, mutex: &'a Mutex<()>) -> Self {
        let lock = mutex.lock();
        let context = observer.upgrade();

        Self {
            context,
            lock: Some(lock),
        }
    }

    /// Tries to acquire `mutex` without blocking.
    ///
    /// On contention the accessor holds neither lock nor context.
    pub fn try_lock(observer: &ContextObserver, mutex: &'a Mutex<()>) -> Self {
        let lock = mutex.try_lock();

        let context = match lock {
            Some(_) => observer.upgrade(),
            None => None,
        };

        Self { context, lock }
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn owns_lock(&self) -> bool {
        self.lock.is_some()
    }

    /// Lock held, context resolved and available.
    pub fn is_valid(&self) -> bool {
        self.owns_lock()
            && self
                .context
                .as_ref()
                .is_some_and(|context| context.is_available())
    }

    /// The context, only while the accessor is valid.
    pub fn context(&self) -> Option<&dyn GraphicsContext> {
        if self.is_valid() {
            self.context.as_deref()
        } else {
            None
        }
    }

    //--- Release ----------------------------------------------------------

    /// Releases the context reference and then the lock.
    pub fn release(mut self) {
        self.context.take();
        self.lock.take();
    }
}

impl Default for Accessor<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for Accessor<'_> {
    fn drop(&mut self) {
        // The context reference must go before the guard.
        self.context.take();
    }
}

impl Deref for Accessor<'_> {
    type Target = dyn GraphicsContext;

    /// # Panics
    ///
    /// Panics if the accessor does not own the lock or has no context.
    fn deref(&self) -> &Self::Target {
        match (&self.context, &self.lock) {
            (Some(context), Some(_)) => &**context,
            _ => panic!(
                "dereferenced an empty graphics context accessor (lock: {}, context: {})",
                self.owns_lock(),
                self.has_context()
            ),
        }
    }
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("owns_lock", &self.owns_lock())
            .field("has_context", &self.has_context())
            .field("valid", &self.is_valid())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
