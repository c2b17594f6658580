//! True-crossing detection between a candidate polyline and the set of
//! previously routed paths.

use crate::geometry::{Point, Segment, orthogonal_intersection};

/// Consecutive-point segments of a polyline.
pub(super) fn segments(points: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    points.windows(2).map(|pair| Segment::new(pair[0], pair[1]))
}

/// Total real crossings the candidate path makes against every existing
/// path. Only horizontal × vertical pairs can cross, and only strictly
/// inside both segments; shared endpoints never count.
pub fn count_crossings(path: &[Point], existing: &[Vec<Point>]) -> usize {
    let mut total = 0;
    for segment in segments(path) {
        for other_path in existing {
            for other in segments(other_path) {
                if orthogonal_intersection(segment, other).is_some() {
                    total += 1;
                }
            }
        }
    }
    total
}
