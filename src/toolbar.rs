//! Toolbar button injection
//!
//! The button is a clone of one of the toolbar's own buttons, stripped of
//! anything that would tie it to the original's menu or tooltip.

use crate::host::{Element, ElementId};
use crate::layout::{place_button, Rect, ToolbarGeometry, BUTTON_SIZE};
use tracing::{debug, info};

pub const BUTTON_ID: &str = "__gemini_copy_all_btn_top";
pub const BUTTON_LABEL: &str = "复制全对话";
const ICON_NAME: &str = "content_copy";
const ICON_CLASSES: [&str; 6] = [
    "mat-icon",
    "notranslate",
    "gds-icon-l",
    "google-symbols",
    "mat-ligature-font",
    "mat-icon-no-color",
];

/// Attributes that bind a button to menus, overlays, tooltips or logging
const STRIPPED_ATTRS: [&str; 11] = [
    "aria-haspopup",
    "aria-controls",
    "aria-expanded",
    "aria-owns",
    "mat-menu-trigger-for",
    "data-mat-menu-trigger",
    "cdk-overlay-origin",
    "cdkconnectedoverlayorigin",
    "aria-describedby",
    "cdk-describedby-host",
    "jslog",
];

/// `top-bar-actions .top-bar-actions <class>` elements
fn toolbar_sections<'a>(page: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found: Vec<&Element> = Vec::new();
    for host in page.descendants().filter(|el| el.is_tag("top-bar-actions")) {
        for bar in host.descendants().filter(|el| el.has_class("top-bar-actions")) {
            let matches: Vec<&Element> = if class.is_empty() {
                vec![bar]
            } else {
                bar.descendants().filter(|el| el.has_class(class)).collect()
            };
            for el in matches {
                if !found.iter().any(|f| f.id == el.id) {
                    found.push(el);
                }
            }
        }
    }
    found
}

fn single<'a>(page: &'a Element, class: &str) -> Option<&'a Element> {
    match toolbar_sections(page, class).as_slice() {
        [one] => Some(*one),
        _ => None,
    }
}

fn renumber(el: &mut Element, next: &mut u64) {
    el.id = ElementId(*next);
    *next += 1;
    for child in &mut el.children {
        renumber(child, next);
    }
}

fn sanitize(button: &mut Element) {
    for attr in STRIPPED_ATTRS {
        button.attrs.remove(attr);
    }
    button.attrs.remove("disabled");
    button.classes.retain(|c| c != "mat-mdc-button-disabled");
}

fn first_tag_mut<'a>(el: &'a mut Element, tag: &str) -> Option<&'a mut Element> {
    if el.is_tag(tag) {
        return Some(el);
    }
    el.children
        .iter_mut()
        .find_map(|child| first_tag_mut(child, tag))
}

fn first_class_mut<'a>(el: &'a mut Element, class: &str) -> Option<&'a mut Element> {
    if el.has_class(class) {
        return Some(el);
    }
    el.children
        .iter_mut()
        .find_map(|child| first_class_mut(child, class))
}

fn set_icon(button: &mut Element, next_id: &mut u64) {
    let mut icon = match first_tag_mut(button, "mat-icon") {
        Some(existing) => existing.clone(),
        None => {
            let fresh = Element::new(*next_id, "mat-icon");
            *next_id += 1;
            fresh
        }
    };
    let icon_id = icon.id;
    button.remove_descendants(&|el| el.id == icon_id);

    icon.classes = ICON_CLASSES.iter().map(|c| c.to_string()).collect();
    icon.attrs.insert("role".into(), "img".into());
    icon.attrs.insert("aria-hidden".into(), "true".into());
    for attr in ["fonticon", "data-mat-icon-name", "data-mat-icon-type"] {
        icon.attrs.remove(attr);
    }
    icon.children.clear();
    icon.text = ICON_NAME.to_string();

    match first_class_mut(button, "mdc-button__label") {
        Some(label) => label.children.insert(0, icon),
        None => button.children.insert(0, icon),
    }
}

/// Build the copy button from the toolbar's template button
fn build_button(template: &Element, first_id: u64) -> Element {
    let mut button = template.clone();
    let mut next_id = first_id;
    renumber(&mut button, &mut next_id);

    button.attrs.insert("id".into(), BUTTON_ID.into());
    button.attrs.insert("aria-label".into(), BUTTON_LABEL.into());
    if button.attrs.contains_key("mattooltip") {
        button.attrs.insert("mattooltip".into(), BUTTON_LABEL.into());
    }
    button.attrs.insert("title".into(), BUTTON_LABEL.into());
    sanitize(&mut button);

    button.remove_descendants(&|el| el.is_tag("img") || el.is_tag("svg"));
    // Only the icon ligature keeps its text
    button.clear_text();
    set_icon(&mut button, &mut next_id);
    button
}

/// Inject the copy button into the toolbar unless it is already there
///
/// Returns the button's element id, or None when the toolbar is not in the
/// expected shape.
pub fn ensure_button(page: &mut Element) -> Option<ElementId> {
    if let Some(existing) = page.find_by_dom_id(BUTTON_ID) {
        return Some(existing.id);
    }

    let root = single(page, "")?.id;
    single(page, "center-section")?;
    let right = single(page, "right-section")?;
    let template = right.descendants().find(|el| el.is_tag("button"))?;

    let button = build_button(template, page.max_id().0 + 1);
    let id = button.id;
    page.find_mut(root)?.children.push(button);
    info!("Copy button injected into toolbar");
    Some(id)
}

/// Pin the injected button beside the toolbar's centre section
///
/// Returns the button's on-screen rectangle, or None when there is no button.
pub fn position_button(page: &mut Element, geometry: ToolbarGeometry) -> Option<Rect> {
    let button = page.find_by_dom_id_mut(BUTTON_ID)?;
    let at = place_button(geometry.root, geometry.center);
    button.attrs.insert(
        "style".into(),
        format!(
            "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;z-index:5",
            at.x, at.y, BUTTON_SIZE, BUTTON_SIZE
        ),
    );
    debug!("Copy button placed at ({}, {})", at.x, at.y);
    Some(geometry.button_rect())
}

/// Disable or re-enable the injected button
pub fn set_busy(page: &mut Element, busy: bool) {
    let Some(button) = page.find_by_dom_id_mut(BUTTON_ID) else {
        debug!("No copy button to update");
        return;
    };
    if busy {
        button.attrs.insert("disabled".into(), String::new());
    } else {
        button.attrs.remove("disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Element {
        let template = Element::new(20, "button")
            .with_class("mat-mdc-button-disabled")
            .with_attr("aria-label", "Settings")
            .with_attr("mattooltip", "Settings")
            .with_attr("aria-haspopup", "menu")
            .with_attr("jslog", "123")
            .with_attr("disabled", "")
            .with_child(Element::new(21, "svg"))
            .with_child(
                Element::new(22, "span")
                    .with_class("mdc-button__label")
                    .with_text("Settings"),
            );
        Element::new(1, "html").with_child(
            Element::new(2, "top-bar-actions").with_child(
                Element::new(3, "div")
                    .with_class("top-bar-actions")
                    .with_child(Element::new(4, "div").with_class("center-section"))
                    .with_child(
                        Element::new(5, "div")
                            .with_class("right-section")
                            .with_child(template),
                    ),
            ),
        )
    }

    #[test]
    fn test_injects_sanitized_clone() {
        let mut page = page();
        let id = ensure_button(&mut page).unwrap();
        assert_eq!(id, ElementId(23));

        let button = page.find(id).unwrap();
        assert_eq!(button.attr("id"), Some(BUTTON_ID));
        assert_eq!(button.attr("aria-label"), Some(BUTTON_LABEL));
        assert_eq!(button.attr("mattooltip"), Some(BUTTON_LABEL));
        assert_eq!(button.attr("title"), Some(BUTTON_LABEL));
        assert_eq!(button.attr("aria-haspopup"), None);
        assert_eq!(button.attr("jslog"), None);
        assert_eq!(button.attr("disabled"), None);
        assert!(!button.has_class("mat-mdc-button-disabled"));
        assert!(button.descendants().all(|el| !el.is_tag("svg")));

        let label = button
            .descendants()
            .find(|el| el.has_class("mdc-button__label"))
            .unwrap();
        assert_eq!(label.text, "");
        assert!(label.children[0].is_tag("mat-icon"));
        assert_eq!(label.children[0].text, "content_copy");

        // The template itself is untouched
        assert_eq!(page.find(ElementId(20)).unwrap().attr("aria-label"), Some("Settings"));
        // Ids stay unique
        let mut ids: Vec<u64> = page.descendants().map(|e| e.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), page.descendants().count());
    }

    #[test]
    fn test_second_call_reuses_button() {
        let mut page = page();
        let first = ensure_button(&mut page).unwrap();
        let count = page.descendants().count();
        assert_eq!(ensure_button(&mut page), Some(first));
        assert_eq!(page.descendants().count(), count);
    }

    #[test]
    fn test_needs_exactly_one_toolbar() {
        let mut page = page();
        let mut duplicate = page.children[0].clone();
        let mut next = page.max_id().0 + 1;
        renumber(&mut duplicate, &mut next);
        page.children.push(duplicate);
        assert_eq!(ensure_button(&mut page), None);

        let mut bare = Element::new(1, "html");
        assert_eq!(ensure_button(&mut bare), None);
    }

    #[test]
    fn test_position_sets_style_and_returns_screen_rect() {
        let geometry = ToolbarGeometry {
            root: Rect::new(100.0, 10.0, 800.0, 64.0),
            center: Rect::new(300.0, 22.0, 200.0, 40.0),
        };
        let mut bare = page();
        assert_eq!(position_button(&mut bare, geometry), None);

        let mut page = page();
        let id = ensure_button(&mut page).unwrap();
        let rect = position_button(&mut page, geometry).unwrap();

        assert_eq!(rect, Rect::new(508.0, 22.0, 40.0, 40.0));
        assert_eq!(
            page.find(id).unwrap().attr("style"),
            Some("position:absolute;left:408px;top:12px;width:40px;height:40px;z-index:5")
        );
    }

    #[test]
    fn test_busy_toggles_disabled() {
        let mut page = page();
        let id = ensure_button(&mut page).unwrap();

        set_busy(&mut page, true);
        assert_eq!(page.find(id).unwrap().attr("disabled"), Some(""));
        set_busy(&mut page, false);
        assert_eq!(page.find(id).unwrap().attr("disabled"), None);
    }
}
