//=========================================================================
// Core Systems
//
// Everything that runs independently of the OS layer.
//
// Layout:
// - `geometry`  : sizes shared by surfaces and views
// - `event`     : identifiers, properties, events and their queues
// - `graphics`  : context capability, lock accessor, renderer seam
// - `window`    : graphics lock + context slot + window event queue
// - `scene`     : the application-facing lifecycle trait
// - `director`  : the run-loop driving one scene at a time
//
// Threading:
// The director runs on its own thread. The platform thread reaches it
// only through `DirectorHandle` and the shared `Window`.
//
//=========================================================================

pub mod director;
pub mod event;
pub mod geometry;
pub mod graphics;
pub mod scene;
pub mod window;

//=== Re-exports ==========================================================

pub use director::{Director, DirectorConfig, DirectorHandle, State};
pub use scene::Scene;
pub use window::Window;
