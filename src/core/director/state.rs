//=========================================================================
// Director State
//=========================================================================
//
// Composite activity state and loop control signals.
//
//=========================================================================

//=== State ===============================================================

/// Composite activity state of the application.
///
/// The director is *running* only when the application is active, the
/// window is focused and a graphics surface exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    pub active: bool,
    pub focused: bool,
    pub graphics: bool,
}

impl State {
    pub fn is_running(&self) -> bool {
        self.active && self.focused && self.graphics
    }
}

//=== Transition ==========================================================

/// Scene-visible change of the composite state between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    None,
    Resume,
    Suspend,
}

impl Transition {
    pub(crate) fn between(previous: State, current: State) -> Self {
        match (previous.is_running(), current.is_running()) {
            (false, true) => Self::Resume,
            (true, false) => Self::Suspend,
            _ => Self::None,
        }
    }
}

//=== TickControl =========================================================

/// Run-loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=========================================================================
// Unit Tests
//=========================================================================
