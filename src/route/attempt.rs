//! Bounded two-strategy path search with sideways continuations.
//!
//! Attempts are value objects: a failed attempt is never mutated, a
//! continuation derives a fresh attempt from it. Selection is a separate
//! comparator so the policy can be swapped without touching the search.

use tracing::trace;

use crate::geometry::{GEOM_EPS, Point, Rect};

use super::RouteContext;
use super::crossing::count_crossings;
use super::scan;

/// Weight of obstacle rectangles lying straight along a candidate direction.
const BLOCKER_WEIGHT: f32 = 4.0;
/// Weight of the naive two-leg path's crossings with existing routes.
const CROSSING_WEIGHT: f32 = 2.0;
/// Weight of the first-leg extent; longer first legs score better.
const EXTENT_WEIGHT: f32 = 0.01;
/// Constant nudge toward horizontal-first on otherwise equal scores.
const HORIZONTAL_FIRST_BIAS: f32 = 0.5;
/// Continuations derived after both base attempts fail.
const MAX_CONTINUATIONS: usize = 4;

/// Which axis a strategy's first leg travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegOrder {
    HorizontalFirst,
    VerticalFirst,
}

impl LegOrder {
    pub fn opposite(self) -> Self {
        match self {
            Self::HorizontalFirst => Self::VerticalFirst,
            Self::VerticalFirst => Self::HorizontalFirst,
        }
    }

    fn first_axis(self) -> Axis {
        match self {
            Self::HorizontalFirst => Axis::Horizontal,
            Self::VerticalFirst => Axis::Vertical,
        }
    }

    fn second_axis(self) -> Axis {
        self.first_axis().other()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// One candidate route, built leg by leg. Never mutated once reported;
/// continuations derive new attempts instead.
#[derive(Debug, Clone)]
pub struct PathAttempt {
    pub points: Vec<Point>,
    pub success: bool,
    /// The rectangle that cut a leg short, if any.
    pub obstacle: Option<Rect>,
    pub first_leg_parallel: bool,
    pub second_leg_parallel: bool,
    pub order: LegOrder,
}

enum LegOutcome {
    Clear,
    Blocked { rect: Rect, stop: Point },
    Parallel,
}

fn run_leg(ctx: &RouteContext<'_>, from: Point, to: Point) -> LegOutcome {
    if let Some(block) = scan::nearest_blocking(&ctx.obstacles, from, to) {
        return LegOutcome::Blocked {
            rect: block.rect,
            stop: block.stop,
        };
    }
    if scan::parallel_conflict(ctx.existing, from, to, ctx.metrics.parallel_tol) {
        return LegOutcome::Parallel;
    }
    LegOutcome::Clear
}

/// Run both legs from the attempt's current tail toward `goal`. An obstacle
/// truncates the leg at its near edge and stops the attempt; a parallel
/// conflict stops it without appending anything.
fn extend_attempt(ctx: &RouteContext<'_>, attempt: &mut PathAttempt, goal: Point) {
    let Some(&from) = attempt.points.last() else {
        return;
    };
    let corner = match attempt.order {
        LegOrder::HorizontalFirst => Point::new(goal.x, from.y),
        LegOrder::VerticalFirst => Point::new(from.x, goal.y),
    };
    match run_leg(ctx, from, corner) {
        LegOutcome::Blocked { rect, stop } => {
            attempt.points.push(stop);
            attempt.obstacle = Some(rect);
            return;
        }
        LegOutcome::Parallel => {
            attempt.first_leg_parallel = true;
            return;
        }
        LegOutcome::Clear => {
            if !corner.approx_eq(from) {
                attempt.points.push(corner);
            }
        }
    }
    match run_leg(ctx, corner, goal) {
        LegOutcome::Blocked { rect, stop } => {
            attempt.points.push(stop);
            attempt.obstacle = Some(rect);
        }
        LegOutcome::Parallel => {
            attempt.second_leg_parallel = true;
        }
        LegOutcome::Clear => {
            if !goal.approx_eq(corner) {
                attempt.points.push(goal);
            }
            attempt.success = true;
        }
    }
}

fn base_attempt(
    ctx: &RouteContext<'_>,
    start: Point,
    goal: Point,
    order: LegOrder,
) -> PathAttempt {
    let mut attempt = PathAttempt {
        points: vec![start],
        success: false,
        obstacle: None,
        first_leg_parallel: false,
        second_leg_parallel: false,
        order,
    };
    extend_attempt(ctx, &mut attempt, goal);
    attempt
}

/// Axis of the leg that stopped the failed attempt.
fn failed_leg_axis(failed: &PathAttempt) -> Axis {
    if failed.obstacle.is_some() && failed.points.len() >= 2 {
        let n = failed.points.len();
        let a = failed.points[n - 2];
        let b = failed.points[n - 1];
        if (a.y - b.y).abs() <= GEOM_EPS {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    } else if failed.first_leg_parallel {
        failed.order.first_axis()
    } else {
        failed.order.second_axis()
    }
}

/// Point one sidestep past the recorded obstacle's edge, on whichever side
/// is closer to the attempt's starting coordinate.
fn sidestep_around(rect: Rect, base: Point, origin: Point, axis: Axis, clearance: f32) -> Point {
    match axis {
        Axis::Horizontal => {
            let y = if (origin.y - rect.top).abs() <= (origin.y - rect.bottom).abs() {
                rect.top - clearance
            } else {
                rect.bottom + clearance
            };
            Point::new(base.x, y)
        }
        Axis::Vertical => {
            let x = if (origin.x - rect.left).abs() <= (origin.x - rect.right).abs() {
                rect.left - clearance
            } else {
                rect.right + clearance
            };
            Point::new(x, base.y)
        }
    }
}

/// Sidestep used when the failed attempt recorded no obstacle (a pure
/// parallel conflict): move perpendicular to the conflicting corridor, on
/// the attempt's origin side.
fn sidestep_clear(base: Point, origin: Point, axis: Axis, clearance: f32) -> Point {
    match axis {
        Axis::Horizontal => {
            let y = if origin.y <= base.y {
                base.y - clearance
            } else {
                base.y + clearance
            };
            Point::new(base.x, y)
        }
        Axis::Vertical => {
            let x = if origin.x <= base.x {
                base.x - clearance
            } else {
                base.x + clearance
            };
            Point::new(x, base.y)
        }
    }
}

/// Derive a fresh attempt from a failed one: discard the truncated kink,
/// sidestep past the recorded obstacle, re-run both legs in the opposite
/// order from the new point.
fn continue_attempt(ctx: &RouteContext<'_>, failed: &PathAttempt, goal: Point) -> PathAttempt {
    let axis = failed_leg_axis(failed);
    let mut points = failed.points.clone();
    if failed.obstacle.is_some() && points.len() > 1 {
        points.pop();
    }
    let base = points[points.len() - 1];
    let origin = failed.points[0];
    let side_point = match failed.obstacle {
        Some(rect) => sidestep_around(rect, base, origin, axis, ctx.metrics.sidestep),
        None => sidestep_clear(base, origin, axis, ctx.metrics.sidestep),
    };
    if !side_point.approx_eq(base) {
        points.push(side_point);
    }
    let mut attempt = PathAttempt {
        points,
        success: false,
        obstacle: None,
        first_leg_parallel: false,
        second_leg_parallel: false,
        order: failed.order.opposite(),
    };
    extend_attempt(ctx, &mut attempt, goal);
    attempt
}

/// Generate the ordered attempt list: the two base strategies, then (only
/// when both fail) up to four continuations, each derived from the attempt
/// two places back, stopping at the first success. At most six attempts.
pub(super) fn generate_attempts(
    ctx: &RouteContext<'_>,
    start: Point,
    goal: Point,
) -> Vec<PathAttempt> {
    let mut attempts = vec![
        base_attempt(ctx, start, goal, LegOrder::HorizontalFirst),
        base_attempt(ctx, start, goal, LegOrder::VerticalFirst),
    ];
    if attempts.iter().any(|attempt| attempt.success) {
        return attempts;
    }
    for _ in 0..MAX_CONTINUATIONS {
        let parent = &attempts[attempts.len() - 2];
        let next = continue_attempt(ctx, parent, goal);
        trace!(
            attempt = attempts.len() + 1,
            success = next.success,
            points = next.points.len(),
            "continuation attempt"
        );
        let done = next.success;
        attempts.push(next);
        if done {
            break;
        }
    }
    attempts
}

/// Selection policy: success beats failure, fewer crossings beat more, and
/// exact ties fall to the precomputed direction preference. With no success
/// at all, the last (sixth) attempt is returned as-is: a visible, imperfect
/// wire beats no wire.
pub(super) fn select_attempt(
    ctx: &RouteContext<'_>,
    attempts: &[PathAttempt],
    start: Point,
    goal: Point,
) -> usize {
    let successes: Vec<usize> = attempts
        .iter()
        .enumerate()
        .filter(|(_, attempt)| attempt.success)
        .map(|(idx, _)| idx)
        .collect();
    match successes.as_slice() {
        [] => attempts.len() - 1,
        [only] => *only,
        multiple => {
            let (score_h, score_v) = direction_preference(ctx, start, goal);
            let mut best = multiple[0];
            let mut best_crossings = count_crossings(&attempts[best].points, ctx.existing);
            let mut best_score = order_score(attempts[best].order, score_h, score_v);
            for &idx in &multiple[1..] {
                let crossings = count_crossings(&attempts[idx].points, ctx.existing);
                let score = order_score(attempts[idx].order, score_h, score_v);
                if crossings < best_crossings
                    || (crossings == best_crossings && score < best_score)
                {
                    best = idx;
                    best_crossings = crossings;
                    best_score = score;
                }
            }
            best
        }
    }
}

fn order_score(order: LegOrder, score_h: f32, score_v: f32) -> f32 {
    match order {
        LegOrder::HorizontalFirst => score_h,
        LegOrder::VerticalFirst => score_v,
    }
}

/// Preference scores for routing horizontally or vertically first; lower is
/// better. Weights the obstacle count straight along each direction, the
/// naive two-leg path's crossings, and the first-leg extent, with a small
/// bias toward horizontal-first.
fn direction_preference(ctx: &RouteContext<'_>, start: Point, goal: Point) -> (f32, f32) {
    let dx = (goal.x - start.x).abs();
    let dy = (goal.y - start.y).abs();
    let h_corner = Point::new(goal.x, start.y);
    let v_corner = Point::new(start.x, goal.y);
    let blockers_h = scan::count_blockers(&ctx.obstacles, start, h_corner) as f32;
    let blockers_v = scan::count_blockers(&ctx.obstacles, start, v_corner) as f32;
    let naive_h = count_crossings(&[start, h_corner, goal], ctx.existing) as f32;
    let naive_v = count_crossings(&[start, v_corner, goal], ctx.existing) as f32;
    let score_h = blockers_h * BLOCKER_WEIGHT + naive_h * CROSSING_WEIGHT - dx * EXTENT_WEIGHT
        - HORIZONTAL_FIRST_BIAS;
    let score_v = blockers_v * BLOCKER_WEIGHT + naive_v * CROSSING_WEIGHT - dy * EXTENT_WEIGHT;
    (score_h, score_v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Metrics, RoutingConfig};

    fn ctx<'a>(obstacles: Vec<Rect>, existing: &'a [Vec<Point>]) -> RouteContext<'a> {
        RouteContext {
            obstacles,
            existing,
            metrics: Metrics::new(&RoutingConfig::default()),
        }
    }

    #[test]
    fn clear_field_produces_two_leg_attempts() {
        let existing: Vec<Vec<Point>> = Vec::new();
        let ctx = ctx(Vec::new(), &existing);
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(100.0, 80.0);
        let attempts = generate_attempts(&ctx, start, goal);
        assert_eq!(attempts.len(), 2);
        assert!(attempts[0].success && attempts[1].success);
        assert_eq!(
            attempts[0].points,
            vec![start, Point::new(100.0, 0.0), goal]
        );
        assert_eq!(attempts[1].points, vec![start, Point::new(0.0, 80.0), goal]);
    }

    #[test]
    fn obstacle_truncates_and_records() {
        let existing: Vec<Vec<Point>> = Vec::new();
        let rect = Rect::new(40.0, -20.0, 60.0, 20.0);
        let ctx = ctx(vec![rect], &existing);
        let attempt = base_attempt(
            &ctx,
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            LegOrder::HorizontalFirst,
        );
        assert!(!attempt.success);
        assert_eq!(attempt.obstacle, Some(rect));
        assert_eq!(
            attempt.points,
            vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0)]
        );
    }

    #[test]
    fn parallel_conflict_fails_without_appending() {
        let existing = vec![vec![Point::new(-50.0, 1.0), Point::new(150.0, 1.0)]];
        let ctx = ctx(Vec::new(), &existing);
        let attempt = base_attempt(
            &ctx,
            Point::new(0.0, 0.0),
            Point::new(100.0, 80.0),
            LegOrder::HorizontalFirst,
        );
        assert!(!attempt.success);
        assert!(attempt.first_leg_parallel);
        assert!(attempt.obstacle.is_none());
        assert_eq!(attempt.points, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn continuation_sidesteps_obstacle_in_opposite_order() {
        let existing: Vec<Vec<Point>> = Vec::new();
        // Blocks both base strategies near the corner, but leaves the top
        // corridor free.
        let rect = Rect::new(30.0, -30.0, 70.0, 110.0);
        let ctx = ctx(vec![rect], &existing);
        let attempts = generate_attempts(&ctx, Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(attempts.len() > 2, "base attempts should both fail");
        let winner = attempts
            .iter()
            .find(|attempt| attempt.success)
            .expect("a continuation should clear the obstacle");
        // Derived from the failed vertical-first base, so it runs the
        // opposite leg order.
        assert_eq!(winner.order, LegOrder::HorizontalFirst);
        // Sidestep went above the rectangle (closer to the start row).
        assert!(
            winner
                .points
                .iter()
                .any(|p| (p.y - (rect.top - 10.0)).abs() <= GEOM_EPS)
        );
    }

    #[test]
    fn six_failures_return_last_partial() {
        let existing: Vec<Vec<Point>> = Vec::new();
        // Concentric walls; every attempt dead-ends.
        let walls = vec![
            Rect::new(-1000.0, 20.0, 1000.0, 40.0),
            Rect::new(-1000.0, -40.0, 1000.0, -20.0),
            Rect::new(20.0, -1000.0, 40.0, 1000.0),
            Rect::new(-40.0, -1000.0, -20.0, 1000.0),
        ];
        let ctx = ctx(walls, &existing);
        let attempts = generate_attempts(&ctx, Point::new(0.0, 0.0), Point::new(500.0, 500.0));
        assert_eq!(attempts.len(), 6);
        assert!(attempts.iter().all(|attempt| !attempt.success));
        let chosen = select_attempt(&ctx, &attempts, Point::new(0.0, 0.0), Point::new(500.0, 500.0));
        assert_eq!(chosen, 5);
        assert!(!attempts[chosen].points.is_empty());
    }

    #[test]
    fn selection_prefers_fewer_crossings() {
        let existing = vec![
            vec![Point::new(40.0, -50.0), Point::new(40.0, 50.0)],
            vec![Point::new(60.0, -50.0), Point::new(60.0, 50.0)],
        ];
        let ctx = ctx(Vec::new(), &existing);
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(100.0, 100.0);
        let attempts = generate_attempts(&ctx, start, goal);
        let chosen = select_attempt(&ctx, &attempts, start, goal);
        assert_eq!(attempts[chosen].order, LegOrder::VerticalFirst);
    }

    #[test]
    fn symmetric_tie_leans_horizontal_first() {
        let existing: Vec<Vec<Point>> = Vec::new();
        let ctx = ctx(Vec::new(), &existing);
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(100.0, 100.0);
        let attempts = generate_attempts(&ctx, start, goal);
        let chosen = select_attempt(&ctx, &attempts, start, goal);
        assert_eq!(attempts[chosen].order, LegOrder::HorizontalFirst);
    }
}
