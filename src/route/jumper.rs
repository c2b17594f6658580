//! Jumper ("hop") insertion: a small diamond detour spliced wherever the
//! new route truly crosses an already-drawn one, marking "no connection".

use crate::geometry::{Point, Segment, orthogonal_intersection};

use super::crossing::segments;

/// Splice a diamond detour into the finalized path at every real crossing
/// with the existing paths. Crossings on a segment are handled in order of
/// distance from the segment's start; segments without crossings pass
/// through unchanged. Older paths are never retrofitted.
pub(super) fn insert_jumpers(points: Vec<Point>, existing: &[Vec<Point>], half: f32) -> Vec<Point> {
    if points.len() < 2 || existing.is_empty() || half <= 0.0 {
        return points;
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for pair in points.windows(2) {
        let segment = Segment::new(pair[0], pair[1]);
        let mut hits: Vec<Point> = Vec::new();
        for path in existing {
            for other in segments(path) {
                if let Some(hit) = orthogonal_intersection(segment, other) {
                    hits.push(hit);
                }
            }
        }
        hits.sort_by(|a, b| {
            segment
                .a
                .manhattan(*a)
                .total_cmp(&segment.a.manhattan(*b))
        });
        hits.dedup_by(|a, b| a.approx_eq(*b));
        for hit in hits {
            out.extend(diamond(segment, hit, half));
        }
        out.push(pair[1]);
    }
    out
}

/// The five detour points, in travel order. Horizontal segments always arc
/// upward and vertical segments always arc to the right; reverse travel
/// mirrors the entry/exit order so the arc side stays fixed.
fn diamond(segment: Segment, center: Point, half: f32) -> [Point; 5] {
    if segment.is_horizontal() {
        let dir = if segment.b.x >= segment.a.x { 1.0 } else { -1.0 };
        [
            Point::new(center.x - dir * half, center.y),
            Point::new(center.x - dir * half / 2.0, center.y - half / 2.0),
            Point::new(center.x, center.y - half),
            Point::new(center.x + dir * half / 2.0, center.y - half / 2.0),
            Point::new(center.x + dir * half, center.y),
        ]
    } else {
        let dir = if segment.b.y >= segment.a.y { 1.0 } else { -1.0 };
        [
            Point::new(center.x, center.y - dir * half),
            Point::new(center.x + half / 2.0, center.y - dir * half / 2.0),
            Point::new(center.x + half, center.y),
            Point::new(center.x + half / 2.0, center.y + dir * half / 2.0),
            Point::new(center.x, center.y + dir * half),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_crossing_splices_five_points() {
        let path = vec![Point::new(0.0, 100.0), Point::new(400.0, 100.0)];
        let existing = vec![vec![Point::new(200.0, 0.0), Point::new(200.0, 200.0)]];
        let out = insert_jumpers(path, &existing, 5.0);
        assert_eq!(out.len(), 7);
        assert_eq!(out[1], Point::new(195.0, 100.0));
        assert_eq!(out[3], Point::new(200.0, 95.0));
        assert_eq!(out[5], Point::new(205.0, 100.0));
    }

    #[test]
    fn reverse_travel_mirrors_entry_but_keeps_arc_side() {
        let path = vec![Point::new(400.0, 100.0), Point::new(0.0, 100.0)];
        let existing = vec![vec![Point::new(200.0, 0.0), Point::new(200.0, 200.0)]];
        let out = insert_jumpers(path, &existing, 5.0);
        // Entry comes from the right, apex still arcs upward.
        assert_eq!(out[1], Point::new(205.0, 100.0));
        assert_eq!(out[3], Point::new(200.0, 95.0));
        assert_eq!(out[5], Point::new(195.0, 100.0));
    }

    #[test]
    fn vertical_segment_arcs_to_the_right() {
        let path = vec![Point::new(100.0, 0.0), Point::new(100.0, 400.0)];
        let existing = vec![vec![Point::new(0.0, 200.0), Point::new(200.0, 200.0)]];
        let out = insert_jumpers(path, &existing, 5.0);
        assert_eq!(out[1], Point::new(100.0, 195.0));
        assert_eq!(out[3], Point::new(105.0, 200.0));
        assert_eq!(out[5], Point::new(100.0, 205.0));
    }

    #[test]
    fn crossings_are_spliced_in_travel_order() {
        let path = vec![Point::new(0.0, 100.0), Point::new(400.0, 100.0)];
        let existing = vec![
            vec![Point::new(300.0, 0.0), Point::new(300.0, 200.0)],
            vec![Point::new(120.0, 0.0), Point::new(120.0, 200.0)],
        ];
        let out = insert_jumpers(path, &existing, 5.0);
        assert_eq!(out.len(), 12);
        // The nearer crossing's detour comes first despite listing order.
        assert_eq!(out[3], Point::new(120.0, 95.0));
        assert_eq!(out[8], Point::new(300.0, 95.0));
    }

    #[test]
    fn crossing_at_shared_endpoint_adds_nothing() {
        let path = vec![
            Point::new(0.0, 100.0),
            Point::new(200.0, 100.0),
            Point::new(200.0, 300.0),
        ];
        let existing = vec![vec![Point::new(200.0, 0.0), Point::new(200.0, 100.0)]];
        let out = insert_jumpers(path.clone(), &existing, 5.0);
        assert_eq!(out, path);
    }
}
