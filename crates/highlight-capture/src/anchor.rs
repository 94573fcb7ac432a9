//! Affordance placement.

use crate::host::{Point, Rect, Viewport};

const AFFORDANCE_HEIGHT: f64 = 40.0;
const GAP: f64 = 10.0;
const HALF_WIDTH: f64 = 70.0;
const EDGE_MARGIN: f64 = 10.0;
const RIGHT_RESERVE: f64 = 140.0;

/// Where to show the affordance for a selection with bounding box `rect`.
///
/// Below the selection when it fits in the viewport, above it otherwise,
/// horizontally centred and kept inside `[10, width - 140]`. When the
/// viewport is too narrow for that range the right bound wins.
pub fn compute_anchor(rect: Rect, viewport: &dyn Viewport) -> Point {
    let scroll_y = viewport.scroll_y();

    let mut top = rect.bottom() + scroll_y + GAP;
    if top + AFFORDANCE_HEIGHT > viewport.height() + scroll_y {
        top = rect.top + scroll_y - AFFORDANCE_HEIGHT - GAP;
    }

    let mut left = rect.left + rect.width / 2.0 - HALF_WIDTH + viewport.scroll_x();
    if left < EDGE_MARGIN {
        left = EDGE_MARGIN;
    }
    let max_left = viewport.width() - RIGHT_RESERVE;
    if left > max_left {
        left = max_left;
    }

    Point { top, left }
}
