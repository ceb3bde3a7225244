//=========================================================================
// Touch Remapping
//=========================================================================
//
// Converts raw device touch coordinates (pixels, top-left origin) into a
// scene's virtual resolution (bottom-left origin):
//
//   x' = x * Vw / Sw
//   y' = (Sh - y) * Vh / Sh
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::event::{property, Event};
use crate::core::geometry::{Size2f, Size2u};

//=========================================================================

/// Maps a raw device point into the virtual resolution `view`.
pub fn remap_point(x: f32, y: f32, surface: Size2f, view: Size2u) -> (f32, f32) {
    let h_ratio = view.width as f32 / surface.width;
    let v_ratio = view.height as f32 / surface.height;

    (x * h_ratio, (surface.height - y) * v_ratio)
}

/// Remaps the position of a touch event in place.
///
/// Non-touch events, events without float `x`/`y` properties and an empty
/// surface leave the event untouched. Returns whether it was remapped.
pub fn remap_touch(event: &mut Event, surface: Size2f, view: Size2u) -> bool {
    if !event.is_touch() {
        return false;
    }

    if surface.is_empty() {
        trace!(target: "director", "No surface size cached, touch left in device space");
        return false;
    }

    let Some((x, y)) = event.position() else {
        trace!(target: "director", "Touch event {:?} without float position", event.id);
        return false;
    };

    let (x, y) = remap_point(x, y, surface, view);
    event.properties.set(property::X, x);
    event.properties.set(property::Y, y);
    true
}

//=========================================================================
// Unit Tests
//=========================================================================
