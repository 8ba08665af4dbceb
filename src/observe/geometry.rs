use crate::foundation::core::{ElementId, Rect};
use crate::observe::backend::IntersectionEntry;
use crate::observe::config::ObservationConfig;

/// Overlap of two rects, edges included. `None` when they are disjoint.
///
/// An inverted rect (`x0 > x1` or `y0 > y1`) is empty and overlaps nothing.
pub fn overlap(a: Rect, b: Rect) -> Option<Rect> {
    if is_inverted(a) || is_inverted(b) {
        return None;
    }
    let x0 = a.x0.max(b.x0);
    let y0 = a.y0.max(b.y0);
    let x1 = a.x1.min(b.x1);
    let y1 = a.y1.min(b.y1);
    (x0 <= x1 && y0 <= y1).then(|| Rect::new(x0, y0, x1, y1))
}

/// Fraction of `target`'s area inside `root`, in `[0, 1]`.
///
/// Zero-area targets count as fully visible whenever they touch the root.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let Some(hit) = overlap(target, root) else {
        return 0.0;
    };
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (hit.area() / area).clamp(0.0, 1.0)
}

fn is_inverted(r: Rect) -> bool {
    r.x0 > r.x1 || r.y0 > r.y1
}

/// Test `target` against `viewport` under `config`, producing the entry a platform would report.
pub fn measure(
    target_id: ElementId,
    target: Rect,
    viewport: Rect,
    config: &ObservationConfig,
    time_secs: f64,
) -> IntersectionEntry {
    let root = config.root_margin.expand(viewport);
    // A margin that shrinks the root to nothing leaves nothing to intersect.
    let (ratio, is_intersecting) = if root.width() <= 0.0 || root.height() <= 0.0 {
        (0.0, false)
    } else {
        let touching = overlap(target, root).is_some();
        let ratio = intersection_ratio(target, root);
        (
            ratio,
            touching && (config.threshold <= 0.0 || ratio >= config.threshold),
        )
    };

    IntersectionEntry {
        target: target_id,
        is_intersecting,
        intersection_ratio: ratio,
        time_secs,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/geometry.rs"]
mod tests;
