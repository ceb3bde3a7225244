//=========================================================================
// Graphics Context
//=========================================================================
//
// The live link to a rendering surface.
//
// A context is shared through `Arc` between the window that owns it and
// any accessor currently borrowing it. Surface loss may be signalled from
// any thread through `invalidate()`, which only flips a flag; teardown
// happens in the implementation's `Drop`, which cannot run while an
// accessor still holds a reference.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::{Arc, Weak};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size2u;

//=== GraphicsContext =====================================================

/// Capability of a rendering surface that can be invalidated at any time.
///
/// Surface loss is an expected condition: every fallible operation returns
/// `false` instead of failing loudly.
///
/// Once invalidated, a context never becomes available again. A new
/// context must be created and attached to the window instead.
pub trait GraphicsContext: Send + Sync {
    /// Marks the surface as lost. Idempotent and callable from any thread.
    fn invalidate(&self);

    /// Releases the current binding while keeping the surface.
    fn suspend(&self);

    /// Rebinds a suspended context; fails once invalidated.
    fn resume(&self) -> bool;

    /// Releases native resources. Idempotent.
    fn finalize(&self);

    fn is_available(&self) -> bool;

    fn is_current(&self) -> bool;

    fn make_current(&self) -> bool;

    /// Enables or disables presentation synchronized to the display.
    fn set_sync_swap(&self, activated: bool) -> bool;

    /// Presents the rendered frame.
    fn flush_and_display(&self) -> bool;

    /// Surface width in pixels. Stale once the context is unavailable.
    fn surface_width(&self) -> u32;

    /// Surface height in pixels. Stale once the context is unavailable.
    fn surface_height(&self) -> u32;

    fn surface_size(&self) -> Size2u {
        Size2u::new(self.surface_width(), self.surface_height())
    }
}

//=== ContextObserver =====================================================

/// Weak observer of a graphics context.
///
/// Resolving an observer only yields a context if some owner still holds
/// it; callers must resolve it while holding the window's graphics lock.
#[derive(Clone, Default)]
pub struct ContextObserver {
    context: Option<Weak<dyn GraphicsContext>>,
}

impl ContextObserver {
    pub fn new(context: &Arc<dyn GraphicsContext>) -> Self {
        Self {
            context: Some(Arc::downgrade(context)),
        }
    }

    /// An observer that never resolves.
    pub fn detached() -> Self {
        Self { context: None }
    }

    pub fn upgrade(&self) -> Option<Arc<dyn GraphicsContext>> {
        self.context.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_detached(&self) -> bool {
        self.context.is_none()
    }
}

impl fmt::Debug for ContextObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextObserver")
            .field("detached", &self.is_detached())
            .finish()
    }
}

//=== GraphicsError =======================================================

/// Errors raised while attaching a graphics context to a window.
///
/// Losing a surface is not an error; it is reported through accessor
/// validity and `bool` results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// The window has no context and none could be created.
    NoGraphicsContext,

    /// Context creation failed (display, surface or config setup).
    ContextCreation(String),

    /// The window refused the context (already attached or unavailable).
    ContextRejected,
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGraphicsContext => write!(f, "window has no graphics context"),
            Self::ContextCreation(e) => write!(f, "failed to create graphics context: {}", e),
            Self::ContextRejected => write!(f, "window rejected the graphics context"),
        }
    }
}

impl std::error::Error for GraphicsError {}

//=========================================================================
// Unit Tests
//=========================================================================
