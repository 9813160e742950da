//! Shared window-manager geometry and stacking helpers used by the desktop reducer.

use crate::model::{ResizeEdge, WindowRecord, WindowRect};

/// Returns the top window: the non-minimized, non-closing window with the highest z-index.
///
/// Z-indices come from a strictly increasing counter, so the result is unique.
pub fn top_window(windows: &[WindowRecord]) -> Option<&WindowRecord> {
    windows
        .iter()
        .filter(|w| !w.minimized && !w.is_closing())
        .max_by_key(|w| w.z_index)
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Width and height never drop below the minimum. Handles on the top or left side move the
/// origin so that the opposite edge stays fixed, including when the size is clamped.
pub fn resize_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_w: i32,
    min_h: i32,
) -> WindowRect {
    let (left, right, top, bottom) = match edge {
        ResizeEdge::North => (false, false, true, false),
        ResizeEdge::South => (false, false, false, true),
        ResizeEdge::East => (false, true, false, false),
        ResizeEdge::West => (true, false, false, false),
        ResizeEdge::NorthEast => (false, true, true, false),
        ResizeEdge::NorthWest => (true, false, true, false),
        ResizeEdge::SouthEast => (false, true, false, true),
        ResizeEdge::SouthWest => (true, false, false, true),
    };

    let mut rect = start;
    if right {
        rect.w = (start.w + dx).max(min_w);
    }
    if left {
        rect.w = (start.w - dx).max(min_w);
        rect.x = start.x + start.w - rect.w;
    }
    if bottom {
        rect.h = (start.h + dy).max(min_h);
    }
    if top {
        rect.h = (start.h - dy).max(min_h);
        rect.y = start.y + start.h - rect.h;
    }
    rect
}

/// Moves a dragged window, keeping it inside the desktop container.
pub fn dragged_rect(start: WindowRect, dx: i32, dy: i32, bounds: WindowRect) -> WindowRect {
    start.offset(dx, dy).bounded_within(bounds)
}
