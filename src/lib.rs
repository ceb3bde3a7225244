//=========================================================================
// basics++ Runtime — Library Root
//
// This crate defines the public API surface of the basics++ runtime.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the core systems (director, scenes, events, graphics access)
// - Keep the Winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use basics_runtime::prelude::*;
//
// fn main() {
//     EngineBuilder::new().build().run(Box::new(MyScene::default()));
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the director, scene lifecycle, event queues and the
// graphics-context access protocol. It is usable without a native window,
// which is how its tests drive it.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, input
// translation) and is kept private.
//
// `engine` wires the platform and the director thread together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, WindowConfig};
