//=========================================================================
// Graphics
//=========================================================================
//
// Graphics context capability and the lock protocol guarding it.
//
// Architecture:
//   Window
//     ├─ graphics mutex
//     └─ Arc<dyn GraphicsContext>  (authoritative owner)
//            ▲
//   Accessor ┘  lock mutex → resolve observer → use → drop ref → unlock
//
// Components:
// - `context`: `GraphicsContext` trait, weak observer, errors
// - `accessor`: the scoped lock-guarded handle
// - `headless`: off-screen context implementation
// - `renderer`: drawing capability and per-frame `Frame`
//
//=========================================================================

//=== Module Declarations =================================================

mod accessor;
mod context;
mod headless;
mod renderer;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use accessor::Accessor;
pub use context::{ContextObserver, GraphicsContext, GraphicsError};
pub use headless::HeadlessContext;
pub use renderer::{DisplayListRenderer, DrawCommand, Frame, Renderer, RendererFactory};
