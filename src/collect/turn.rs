use crate::host::ElementId;
use std::fmt;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One classified message element and its native copy button, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationTurn {
    pub element: ElementId,
    pub role: Role,
    pub control: Option<ElementId>,
}

/// A turn's captured text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedTurn {
    pub role: Role,
    pub text: String,
}

impl CollectedTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn empty(role: Role) -> Self {
        Self::new(role, String::new())
    }
}
