//! Conversation text assembly
//!
//! Captured text is passed through untouched; only role tags and separators
//! are added.

use crate::collect::{CollectedTurn, Role};

pub const USER_TAG: &str = "「用户」\n";
pub const ASSISTANT_TAG: &str = "「助手」\n";
pub const SEPARATOR: &str = "\n\n========\n\n";

pub fn role_tag(role: Role) -> &'static str {
    match role {
        Role::User => USER_TAG,
        Role::Assistant => ASSISTANT_TAG,
    }
}

/// `<tag><text>`, with no trailing newline added
pub fn format_block(role: Role, text: &str) -> String {
    format!("{}{}", role_tag(role), text)
}

/// The whole conversation as one clipboard string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPayload {
    blocks: Vec<String>,
    text: String,
}

impl AssembledPayload {
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

pub fn assemble(turns: &[CollectedTurn]) -> AssembledPayload {
    let blocks: Vec<String> = turns
        .iter()
        .map(|turn| format_block(turn.role, &turn.text))
        .collect();
    let text = blocks.join(SEPARATOR);
    AssembledPayload { blocks, text }
}
