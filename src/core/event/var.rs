//=========================================================================
// Var
//=========================================================================
//
// Small tagged value stored in event properties.
//
// Typed accessors return `None` when the stored tag does not match the
// requested type; a payload is never reinterpreted as another type.
//
//=========================================================================

//=== Var =================================================================

/// A dynamically typed property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Var {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl Var {
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(value) => Some(value),
            _ => None,
        }
    }

    /// Name of the stored type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
        }
    }
}

impl Default for Var {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl From<bool> for Var {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Var {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for Var {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}
