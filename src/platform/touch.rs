//=========================================================================
// Touch Translator
//=========================================================================
//
// Converts Winit pointer input into engine touch events.
//
// Architecture:
//   Winit Touch / MouseInput / CursorMoved → TouchTranslator → Event
//
// Native touches map one to one. The left mouse button acts as a single
// finger: press starts a touch at the last cursor position, cursor motion
// while pressed moves it, release ends it. Coordinates stay in physical
// surface pixels with a top-left origin; the director remaps them into
// view space.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, MouseButton, TouchPhase};

//=== Internal Dependencies ===============================================

use crate::core::event::{event_id, Event};

//=== TouchTranslator =====================================================

/// Stateful pointer-to-touch converter.
#[derive(Debug, Default)]
pub(crate) struct TouchTranslator {
    cursor: (f32, f32),
    pressed: bool,
}

impl TouchTranslator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Native Touch -----------------------------------------------------

    pub(crate) fn touch(&self, phase: TouchPhase, x: f64, y: f64) -> Event {
        let id = match phase {
            TouchPhase::Started => event_id::TOUCH_STARTED,
            TouchPhase::Moved => event_id::TOUCH_MOVED,
            TouchPhase::Ended | TouchPhase::Cancelled => event_id::TOUCH_ENDED,
        };

        Event::touch(id, x as f32, y as f32)
    }

    //--- Mouse Emulation --------------------------------------------------

    /// Left button only; other buttons yield nothing.
    pub(crate) fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> Option<Event> {
        if button != MouseButton::Left {
            return None;
        }

        let (x, y) = self.cursor;

        match state {
            ElementState::Pressed if !self.pressed => {
                self.pressed = true;
                Some(Event::touch(event_id::TOUCH_STARTED, x, y))
            }
            ElementState::Released if self.pressed => {
                self.pressed = false;
                Some(Event::touch(event_id::TOUCH_ENDED, x, y))
            }
            _ => None,
        }
    }

    /// Tracks the cursor; emits a move only while the button is held.
    pub(crate) fn cursor_moved(&mut self, x: f64, y: f64) -> Option<Event> {
        self.cursor = (x as f32, y as f32);

        self.pressed
            .then(|| Event::touch(event_id::TOUCH_MOVED, self.cursor.0, self.cursor.1))
    }

    /// Ends an emulated touch when the window loses focus mid-drag.
    pub(crate) fn cancel(&mut self) -> Option<Event> {
        if !self.pressed {
            return None;
        }

        self.pressed = false;
        Some(Event::touch(event_id::TOUCH_ENDED, self.cursor.0, self.cursor.1))
    }

    #[cfg(test)]
    pub(crate) fn is_pressed(&self) -> bool {
        self.pressed
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
