//=========================================================================
// Identifiers
//=========================================================================
//
// Interned identifiers for events and event properties.
//
// Identifiers are FNV-1a hashes computed at compile time, so producers
// and consumers agree on them without sharing a string table.
//
//=========================================================================

use std::fmt;

//=== Id ==================================================================

/// Hashed identifier of an event kind or an event property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl Id {
    const FNV_OFFSET: u32 = 0x811c_9dc5;
    const FNV_PRIME: u32 = 0x0100_0193;

    /// Hashes `name` with 32-bit FNV-1a.
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET;
        let mut i = 0;

        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }

        Self(hash)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:#010x})", self.0)
    }
}

//=== Well-known identifiers ==============================================

/// Input event kinds produced by the platform dispatcher.
pub mod event_id {
    use super::Id;

    pub const TOUCH_STARTED: Id = Id::from_name("touch-started");
    pub const TOUCH_MOVED: Id = Id::from_name("touch-moved");
    pub const TOUCH_ENDED: Id = Id::from_name("touch-ended");
}

/// Property keys carried by input events.
pub mod property {
    use super::Id;

    /// Horizontal position in pixels.
    pub const X: Id = Id::from_name("x");

    /// Vertical position in pixels.
    pub const Y: Id = Id::from_name("y");
}
