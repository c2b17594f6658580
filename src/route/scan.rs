//! Straight-leg scanning: blocking obstacles, parallel conflicts with
//! already-routed wires, and the direct-connect shortcut.

use crate::geometry::{GEOM_EPS, Point, Rect};

/// A leg cut short by an obstacle: the rectangle hit and where the leg stops.
#[derive(Debug, Clone, Copy)]
pub(super) struct Blocking {
    pub(super) rect: Rect,
    pub(super) stop: Point,
}

/// Nearest rectangle blocking the axis-aligned leg `from → to`. A rectangle
/// blocks when the leg's row or column passes strictly through it and its
/// near edge lies strictly between the two endpoints.
pub(super) fn nearest_blocking(obstacles: &[Rect], from: Point, to: Point) -> Option<Blocking> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > GEOM_EPS && dy.abs() <= GEOM_EPS {
        let y = from.y;
        let mut best: Option<(f32, Rect)> = None;
        for rect in obstacles {
            if y <= rect.top + GEOM_EPS || y >= rect.bottom - GEOM_EPS {
                continue;
            }
            let near = if dx > 0.0 { rect.left } else { rect.right };
            let between = if dx > 0.0 {
                near > from.x + GEOM_EPS && near < to.x - GEOM_EPS
            } else {
                near < from.x - GEOM_EPS && near > to.x + GEOM_EPS
            };
            if !between {
                continue;
            }
            let dist = (near - from.x).abs();
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, *rect));
            }
        }
        best.map(|(_, rect)| Blocking {
            rect,
            stop: Point::new(if dx > 0.0 { rect.left } else { rect.right }, y),
        })
    } else if dy.abs() > GEOM_EPS && dx.abs() <= GEOM_EPS {
        let x = from.x;
        let mut best: Option<(f32, Rect)> = None;
        for rect in obstacles {
            if x <= rect.left + GEOM_EPS || x >= rect.right - GEOM_EPS {
                continue;
            }
            let near = if dy > 0.0 { rect.top } else { rect.bottom };
            let between = if dy > 0.0 {
                near > from.y + GEOM_EPS && near < to.y - GEOM_EPS
            } else {
                near < from.y - GEOM_EPS && near > to.y + GEOM_EPS
            };
            if !between {
                continue;
            }
            let dist = (near - from.y).abs();
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, *rect));
            }
        }
        best.map(|(_, rect)| Blocking {
            rect,
            stop: Point::new(x, if dy > 0.0 { rect.top } else { rect.bottom }),
        })
    } else {
        None
    }
}

/// Does the leg run colinear with an existing routed segment, within the
/// parallel tolerance and over a positively overlapping range?
pub(super) fn parallel_conflict(
    existing: &[Vec<Point>],
    from: Point,
    to: Point,
    tolerance: f32,
) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > GEOM_EPS && dy.abs() <= GEOM_EPS {
        let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
        for path in existing {
            for pair in path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if (a.y - b.y).abs() > GEOM_EPS || (a.y - from.y).abs() > tolerance {
                    continue;
                }
                let (slo, shi) = (a.x.min(b.x), a.x.max(b.x));
                if shi.min(hi) - slo.max(lo) > GEOM_EPS {
                    return true;
                }
            }
        }
    } else if dy.abs() > GEOM_EPS && dx.abs() <= GEOM_EPS {
        let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
        for path in existing {
            for pair in path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if (a.x - b.x).abs() > GEOM_EPS || (a.x - from.x).abs() > tolerance {
                    continue;
                }
                let (slo, shi) = (a.y.min(b.y), a.y.max(b.y));
                if shi.min(hi) - slo.max(lo) > GEOM_EPS {
                    return true;
                }
            }
        }
    }
    false
}

/// Can the two offset points be joined by one straight unobstructed line?
/// They must share an axis within `align_eps`, with no obstacle span lying
/// strictly between them along it.
pub(super) fn direct_connect(obstacles: &[Rect], a: Point, b: Point, align_eps: f32) -> bool {
    if (a.x - b.x).abs() <= align_eps {
        let x = a.x;
        let (lo, hi) = (a.y.min(b.y), a.y.max(b.y));
        return !obstacles
            .iter()
            .any(|r| r.left < x && x < r.right && r.top < hi && r.bottom > lo);
    }
    if (a.y - b.y).abs() <= align_eps {
        let y = a.y;
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        return !obstacles
            .iter()
            .any(|r| r.top < y && y < r.bottom && r.left < hi && r.right > lo);
    }
    false
}

/// Obstacles whose rectangle lies directly along the straight segment
/// `from → to`; used by the direction-preference score.
pub(super) fn count_blockers(obstacles: &[Rect], from: Point, to: Point) -> usize {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > GEOM_EPS && dy.abs() <= GEOM_EPS {
        let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
        obstacles
            .iter()
            .filter(|r| r.top < from.y && from.y < r.bottom && r.left < hi && r.right > lo)
            .count()
    } else if dy.abs() > GEOM_EPS && dx.abs() <= GEOM_EPS {
        let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
        obstacles
            .iter()
            .filter(|r| r.left < from.x && from.x < r.right && r.top < hi && r.bottom > lo)
            .count()
    } else {
        0
    }
}
