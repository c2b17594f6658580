//! Connector routing: endpoint resolution, the bounded path search, label
//! placement, and jumper insertion.
//!
//! Routing is append-only and order-dependent: each connector is routed
//! against the paths of connectors routed earlier in the same pass, and the
//! caller owns that ordering (see [`route_diagram`]).

mod attempt;
mod crossing;
mod jumper;
mod label;
mod scan;

pub use attempt::{LegOrder, PathAttempt};
pub use crossing::count_crossings;

use tracing::debug;

use crate::config::{Metrics, RoutingConfig};
use crate::error::RouteError;
use crate::geometry::{Point, Rect};
use crate::model::{CanvasItem, Connector, RoutedConnector};

/// Borrowed inputs shared by every stage of a single routing call.
pub(crate) struct RouteContext<'a> {
    pub(crate) obstacles: Vec<Rect>,
    pub(crate) existing: &'a [Vec<Point>],
    pub(crate) metrics: Metrics,
}

/// Side of an item's bounding box a connection point attaches through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// The side nearest to the connection point; ties resolve in the listed
/// priority order left, right, top, bottom.
fn nearest_side(bounds: Rect, point: Point) -> ItemSide {
    let candidates = [
        (ItemSide::Left, point.x - bounds.left),
        (ItemSide::Right, bounds.right - point.x),
        (ItemSide::Top, point.y - bounds.top),
        (ItemSide::Bottom, bounds.bottom - point.y),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Push a connection point outward from its item side by the standoff
/// distance. This offset point is the routing endpoint; the original point
/// remains as the visible stub into the symbol.
fn standoff_point(point: Point, side: ItemSide, distance: f32) -> Point {
    match side {
        ItemSide::Left => Point::new(point.x - distance, point.y),
        ItemSide::Right => Point::new(point.x + distance, point.y),
        ItemSide::Top => Point::new(point.x, point.y - distance),
        ItemSide::Bottom => Point::new(point.x, point.y + distance),
    }
}

fn find_item<'a>(items: &'a [CanvasItem], id: &str) -> Result<&'a CanvasItem, RouteError> {
    items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| RouteError::UnknownItem(id.to_string()))
}

/// Absolute canvas coordinate of a named connection point.
fn terminal_point(item: &CanvasItem, key: &str) -> Result<Point, RouteError> {
    let relative = item
        .connection_points
        .get(key)
        .ok_or_else(|| RouteError::UnknownConnectionPoint {
            item: item.id.clone(),
            point: key.to_string(),
        })?;
    Ok(Point::new(
        item.position.x + relative.x,
        item.position.y + relative.y,
    ))
}

fn drop_consecutive_duplicates(points: &mut Vec<Point>) {
    points.dedup_by(|a, b| a.approx_eq(*b));
}

/// Route one connector against the items and the already-routed paths.
///
/// The result is deterministic for identical inputs. Failure is reserved
/// for caller contract violations (unknown ids); geometric trouble always
/// degrades to a best-effort path instead.
pub fn route_connector(
    items: &[CanvasItem],
    connector: &Connector,
    existing: &[Vec<Point>],
    config: &RoutingConfig,
) -> Result<RoutedConnector, RouteError> {
    let metrics = Metrics::new(config);
    let source = find_item(items, &connector.source.item)?;
    let target = find_item(items, &connector.target.item)?;
    let start = terminal_point(source, &connector.source.point)?;
    let end = terminal_point(target, &connector.target.point)?;
    let start_offset = standoff_point(start, nearest_side(source.bounds(), start), metrics.standoff);
    let end_offset = standoff_point(end, nearest_side(target.bounds(), end), metrics.standoff);

    // Obstacles are the other placed symbols; the connector's own endpoints
    // never block it.
    let obstacles: Vec<Rect> = items
        .iter()
        .filter(|item| item.id != connector.source.item && item.id != connector.target.item)
        .map(|item| item.bounds().expanded(metrics.margin))
        .collect();
    let ctx = RouteContext {
        obstacles,
        existing,
        metrics,
    };

    let core = if scan::direct_connect(&ctx.obstacles, start_offset, end_offset, metrics.align_eps)
    {
        debug!(source = %connector.source.item, target = %connector.target.item, "direct connect");
        vec![start_offset, end_offset]
    } else {
        let attempts = attempt::generate_attempts(&ctx, start_offset, end_offset);
        let chosen = attempt::select_attempt(&ctx, &attempts, start_offset, end_offset);
        debug!(
            source = %connector.source.item,
            target = %connector.target.item,
            attempts = attempts.len(),
            chosen,
            success = attempts[chosen].success,
            "path search"
        );
        attempts[chosen].points.clone()
    };

    let mut points = Vec::with_capacity(core.len() + 2);
    points.push(start);
    points.extend(core);
    points.push(end);
    drop_consecutive_duplicates(&mut points);

    let label = label::place_label(connector, source, target, &points, &metrics);
    let points = jumper::insert_jumpers(points, existing, metrics.jumper_half);
    Ok(RoutedConnector { points, label })
}

/// Route a whole diagram in the order the connectors are given. Each
/// finalized path is appended to the accumulator only after its connector
/// is routed, so the same input always reproduces the same drawing.
pub fn route_diagram(
    items: &[CanvasItem],
    connectors: &[Connector],
    config: &RoutingConfig,
) -> Result<Vec<RoutedConnector>, RouteError> {
    let mut existing: Vec<Vec<Point>> = Vec::with_capacity(connectors.len());
    let mut routed = Vec::with_capacity(connectors.len());
    for connector in connectors {
        let result = route_connector(items, connector, &existing, config)?;
        existing.push(result.points.clone());
        routed.push(result);
    }
    Ok(routed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaterialType, Size, SymbolKind, Terminal};
    use indexmap::IndexMap;

    fn item(id: &str, x: f32, y: f32, points: &[(&str, f32, f32)]) -> CanvasItem {
        CanvasItem {
            id: id.to_string(),
            kind: SymbolKind::Equipment,
            position: Point::new(x, y),
            size: Size {
                width: 40.0,
                height: 40.0,
            },
            connection_points: points
                .iter()
                .map(|(name, px, py)| (name.to_string(), Point::new(*px, *py)))
                .collect(),
            net: None,
        }
    }

    fn connector(source: (&str, &str), target: (&str, &str)) -> Connector {
        Connector {
            source: Terminal {
                item: source.0.to_string(),
                point: source.1.to_string(),
            },
            target: Terminal {
                item: target.0.to_string(),
                point: target.1.to_string(),
            },
            material: MaterialType::Wiring,
            properties: IndexMap::new(),
        }
    }

    #[test]
    fn side_ties_resolve_left_right_top_bottom() {
        let bounds = Rect::new(0.0, 0.0, 40.0, 40.0);
        // Dead center: all four distances equal, left wins.
        assert_eq!(nearest_side(bounds, Point::new(20.0, 20.0)), ItemSide::Left);
        // Equidistant from right and top.
        assert_eq!(nearest_side(bounds, Point::new(30.0, 10.0)), ItemSide::Right);
        // Clearly nearest bottom.
        assert_eq!(nearest_side(bounds, Point::new(20.0, 39.0)), ItemSide::Bottom);
    }

    #[test]
    fn standoff_pushes_outward() {
        let p = Point::new(10.0, 10.0);
        assert_eq!(standoff_point(p, ItemSide::Left, 20.0), Point::new(-10.0, 10.0));
        assert_eq!(standoff_point(p, ItemSide::Right, 20.0), Point::new(30.0, 10.0));
        assert_eq!(standoff_point(p, ItemSide::Top, 20.0), Point::new(10.0, -10.0));
        assert_eq!(standoff_point(p, ItemSide::Bottom, 20.0), Point::new(10.0, 30.0));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let items = vec![item("a", 0.0, 0.0, &[("out", 40.0, 20.0)])];
        let config = RoutingConfig::default();
        let missing_item = connector(("a", "out"), ("ghost", "in"));
        assert!(matches!(
            route_connector(&items, &missing_item, &[], &config),
            Err(RouteError::UnknownItem(_))
        ));
        let missing_point = connector(("a", "ghost"), ("a", "out"));
        assert!(matches!(
            route_connector(&items, &missing_point, &[], &config),
            Err(RouteError::UnknownConnectionPoint { .. })
        ));
    }

    #[test]
    fn routed_paths_accumulate_in_order() {
        let items = vec![
            item("a", 0.0, 80.0, &[("right", 40.0, 20.0)]),
            item("b", 400.0, 80.0, &[("left", 0.0, 20.0)]),
            item("c", 0.0, 200.0, &[("right", 40.0, 20.0)]),
            item("d", 400.0, 200.0, &[("left", 0.0, 20.0)]),
        ];
        let connectors = vec![
            connector(("a", "right"), ("b", "left")),
            connector(("c", "right"), ("d", "left")),
        ];
        let config = RoutingConfig::default();
        let routed = route_diagram(&items, &connectors, &config).expect("diagram routes");
        assert_eq!(routed.len(), 2);
        // The second wire runs parallel far from the first: no jumpers, no
        // interference.
        assert_eq!(routed[0].points.len(), 4);
        assert_eq!(routed[1].points.len(), 4);
    }
}
