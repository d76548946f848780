//! Turn classification and copy-button lookup

use super::turn::Role;
use crate::host::Element;

/// Recognises conversation turns and their copy buttons in a page snapshot
pub trait TurnClassifier: Send + Sync {
    fn classify(&self, element: &Element) -> Option<Role>;

    fn copy_control<'a>(&self, turn: &'a Element, role: Role) -> Option<&'a Element>;
}

/// Localised labels of the prompt copy button
const USER_COPY_LABELS: [&str; 2] = ["复制提示", "Copy prompt"];

const ASSISTANT_COPY_TEST_ID: &str = "copy-button";

/// Markup of gemini.google.com
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiClassifier;

impl GeminiClassifier {
    fn is_user_copy_button(el: &Element) -> bool {
        el.is_tag("button")
            && ["aria-label", "mattooltip"].iter().any(|attr| {
                el.attr(attr)
                    .is_some_and(|label| USER_COPY_LABELS.contains(&label))
            })
    }

    fn is_assistant_copy_button(el: &Element) -> bool {
        el.is_tag("button") && el.attr("data-test-id") == Some(ASSISTANT_COPY_TEST_ID)
    }
}

impl TurnClassifier for GeminiClassifier {
    fn classify(&self, element: &Element) -> Option<Role> {
        if element.is_tag("user-query") {
            Some(Role::User)
        } else if element.is_tag("model-response") {
            Some(Role::Assistant)
        } else {
            None
        }
    }

    fn copy_control<'a>(&self, turn: &'a Element, role: Role) -> Option<&'a Element> {
        match role {
            Role::User => turn.descendants().find(|el| Self::is_user_copy_button(el)),
            Role::Assistant => {
                // A response can carry hidden duplicates of its toolbar
                let mut first = None;
                for (el, visible) in turn.descendants_with_visibility() {
                    if !Self::is_assistant_copy_button(el) {
                        continue;
                    }
                    if visible {
                        return Some(el);
                    }
                    first.get_or_insert(el);
                }
                first
            }
        }
    }
}
