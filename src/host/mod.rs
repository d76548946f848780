//! Host page model
//!
//! A snapshot of the chat page as an element tree, plus the capability used
//! to activate one of its controls. Lookups run against the snapshot; clicks
//! go through [`ControlActivator`] to the live page.

pub mod simulated;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of an element within a page snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Activates (clicks) a control on the live page
pub trait ControlActivator: Send + Sync {
    fn activate(&self, control: ElementId);
}

fn visible_by_default() -> bool {
    true
}

/// One element of the page snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// False when the element itself is not rendered
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    /// Own text content
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: u64, tag: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            tag: tag.into(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            visible: true,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Case-insensitive tag comparison
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// All descendants in document order, excluding `self`
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        self.descendants_with_visibility().map(|(el, _)| el)
    }

    /// Descendants paired with whether they are rendered, i.e. they and every
    /// ancestor below `self` are visible
    pub fn descendants_with_visibility(&self) -> Descendants<'_> {
        Descendants {
            stack: self
                .children
                .iter()
                .rev()
                .map(|c| (c, self.visible))
                .collect(),
        }
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.descendants().find(|el| el.id == id)
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Element whose `id` attribute equals `dom_id`
    pub fn find_by_dom_id_mut(&mut self, dom_id: &str) -> Option<&mut Element> {
        if self.attr("id") == Some(dom_id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_by_dom_id_mut(dom_id))
    }

    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<&Element> {
        if self.attr("id") == Some(dom_id) {
            return Some(self);
        }
        self.descendants().find(|el| el.attr("id") == Some(dom_id))
    }

    /// Largest element id in this subtree
    pub fn max_id(&self) -> ElementId {
        self.descendants()
            .map(|el| el.id)
            .fold(self.id, std::cmp::max)
    }

    /// Remove every descendant matching `pred`, with its subtree
    pub fn remove_descendants(&mut self, pred: &dyn Fn(&Element) -> bool) {
        self.children.retain(|c| !pred(c));
        for child in &mut self.children {
            child.remove_descendants(pred);
        }
    }

    /// Clear text everywhere in this subtree
    pub fn clear_text(&mut self) {
        self.text.clear();
        for child in &mut self.children {
            child.clear_text();
        }
    }
}

/// Pre-order walk over an element's descendants
pub struct Descendants<'a> {
    stack: Vec<(&'a Element, bool)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (&'a Element, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (el, parent_visible) = self.stack.pop()?;
        let visible = parent_visible && el.visible;
        self.stack
            .extend(el.children.iter().rev().map(|c| (c, visible)));
        Some((el, visible))
    }
}
