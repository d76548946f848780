//! Geometry for the toolbar button and its toasts

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Client rectangle, as returned by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Toolbar button edge length
pub const BUTTON_SIZE: f64 = 40.0;

const BUTTON_GAP: f64 = 8.0;
const TOAST_GAP: f64 = 8.0;
const TOAST_SHIFT_LEFT: f64 = 36.0;
const VIEWPORT_PADDING: f64 = 8.0;
const TOAST_FALLBACK: Point = Point { x: 16.0, y: 16.0 };

/// Button offset inside the toolbar root: just right of the centre section,
/// vertically centred on it
pub fn place_button(root: Rect, center: Rect) -> Point {
    Point {
        x: (center.right() - root.left + BUTTON_GAP).round(),
        y: (center.top - root.top + (center.height - BUTTON_SIZE) / 2.0).round(),
    }
}

/// On-screen rectangles of the toolbar root and its centre section
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolbarGeometry {
    pub root: Rect,
    pub center: Rect,
}

impl ToolbarGeometry {
    /// Where the button ends up on screen once placed
    pub fn button_rect(&self) -> Rect {
        let offset = place_button(self.root, self.center);
        Rect::new(
            self.root.left + offset.x,
            self.root.top + offset.y,
            BUTTON_SIZE,
            BUTTON_SIZE,
        )
    }
}

/// Toast position below `anchor`, kept inside the viewport
///
/// Flips above the anchor when there is no room below.
pub fn place_toast(anchor: Option<Rect>, toast: Size, viewport: Size) -> Point {
    let Some(anchor) = anchor else {
        return TOAST_FALLBACK;
    };

    let top = (anchor.bottom() + TOAST_GAP).round();
    let left = anchor.left.round();

    let mut x = left - TOAST_SHIFT_LEFT;
    if x + toast.width > viewport.width - VIEWPORT_PADDING {
        x = (viewport.width - VIEWPORT_PADDING - toast.width).max(VIEWPORT_PADDING);
    }
    if x < VIEWPORT_PADDING {
        x = VIEWPORT_PADDING;
    }

    let mut y = top;
    if y + toast.height > viewport.height - VIEWPORT_PADDING {
        y = (anchor.top - TOAST_GAP - toast.height)
            .round()
            .max(VIEWPORT_PADDING);
    }

    Point { x, y }
}
