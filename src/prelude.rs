//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use basics_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, WindowConfig};

// Director and scenes
pub use crate::core::director::{Director, DirectorConfig, DirectorHandle, State};
pub use crate::core::scene::Scene;

// Events
pub use crate::core::event::{event_id, property, ApplicationEvent, Event, Id, Var, WindowEvent};

// Geometry
pub use crate::core::geometry::{Size2f, Size2u};

// Graphics
pub use crate::core::graphics::{
    Accessor, DisplayListRenderer, Frame, GraphicsContext, HeadlessContext, Renderer,
};
pub use crate::core::window::Window;
