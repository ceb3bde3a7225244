//=========================================================================
// Events
//=========================================================================
//
// Event types crossing from the platform into the director.
//
// Three streams exist:
// - `ApplicationEvent`: process lifecycle (resume, surface created, quit)
// - `WindowEvent`: per-window focus and context-loss notifications
// - `Event`: input events with an id and a bag of typed properties,
//   delivered to the current scene
//
//=========================================================================

//=== Module Declarations =================================================

mod id;
mod queue;
mod var;

//=== Public API ==========================================================

pub use id::{event_id, property, Id};
pub use queue::{EventQueue, EventSender};
pub use var::Var;

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::Weak;

//=== Internal Dependencies ===============================================

use crate::core::window::Window;

//=== ApplicationEvent ====================================================

/// Process-level lifecycle events.
#[derive(Clone)]
pub enum ApplicationEvent {
    /// The application came to the foreground.
    Resume,

    /// The application went to the background.
    Suspend,

    /// A window with a drawable surface is ready.
    WindowCreated(Weak<Window>),

    /// The window surface was torn down.
    WindowDestroyed,

    /// The application must terminate.
    Quit,
}

impl fmt::Debug for ApplicationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resume => write!(f, "Resume"),
            Self::Suspend => write!(f, "Suspend"),
            Self::WindowCreated(_) => write!(f, "WindowCreated"),
            Self::WindowDestroyed => write!(f, "WindowDestroyed"),
            Self::Quit => write!(f, "Quit"),
        }
    }
}

//=== WindowEvent =========================================================

/// Window-level notifications polled from a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    GotFocus,
    LostFocus,

    /// Informational: the context already reports itself unavailable.
    LostGraphicsContext,
}

//=== Properties ==========================================================

/// Property bag of an [`Event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: HashMap<Id, Var>,
}

impl Properties {
    pub fn get(&self, id: Id) -> Option<&Var> {
        self.values.get(&id)
    }

    pub fn set(&mut self, id: Id, value: impl Into<Var>) {
        self.values.insert(id, value.into());
    }

    /// Returns the property as a float, or `None` if absent or not a float.
    pub fn float(&self, id: Id) -> Option<f32> {
        self.get(id).and_then(Var::as_float)
    }

    /// Returns the property as a bool, or `None` if absent or not a bool.
    pub fn bool(&self, id: Id) -> Option<bool> {
        self.get(id).and_then(Var::as_bool)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.values.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

//=== Event ===============================================================

/// An input event handed to [`crate::core::scene::Scene::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Id,
    pub properties: Properties,
}

impl Event {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            properties: Properties::default(),
        }
    }

    /// Builds a touch event at `(x, y)`.
    pub fn touch(id: Id, x: f32, y: f32) -> Self {
        let mut event = Self::new(id);
        event.properties.set(property::X, x);
        event.properties.set(property::Y, y);
        event
    }

    pub fn with(mut self, id: Id, value: impl Into<Var>) -> Self {
        self.properties.set(id, value);
        self
    }

    pub fn is_touch(&self) -> bool {
        matches!(
            self.id,
            event_id::TOUCH_STARTED | event_id::TOUCH_MOVED | event_id::TOUCH_ENDED
        )
    }

    /// Shortcut for the `x` / `y` float properties.
    pub fn position(&self) -> Option<(f32, f32)> {
        Some((
            self.properties.float(property::X)?,
            self.properties.float(property::Y)?,
        ))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
