//! Conductor specification text and its placement along the routed path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Metrics;
use crate::geometry::{GEOM_EPS, Point, Segment};
use crate::model::{CanvasItem, Connector, MaterialType, SpecLabel};

use super::crossing::segments;

/// Average glyph width as a fraction of font size, for width estimation.
const CHAR_WIDTH_RATIO: f32 = 0.45;
/// Property values kept for cable specs.
const CABLE_VALUE_CAP: usize = 4;
/// Property values kept for wiring specs.
const WIRING_VALUE_CAP: usize = 3;
/// Label for point-style switch boards, regardless of connector properties.
const POINT_BOARD_SPEC: &str = "Cu,2 C,1.5 Sq mm,Wire";

static CORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcore\b").unwrap());

/// Known material names, abbreviated by exact match after trimming.
fn abbreviate(value: &str) -> &str {
    match value.trim() {
        "Copper" => "Cu",
        "Aluminum" | "Aluminium" => "Al",
        "Armoured" | "Armored" => "Ar",
        "Un-armoured" | "Un-armored" => "Un-Ar",
        other => other,
    }
}

/// Build the conductor spec string, or nothing when the connector has no
/// properties and neither endpoint is a point-style switch board.
pub(super) fn spec_text(
    connector: &Connector,
    source: &CanvasItem,
    target: &CanvasItem,
) -> Option<String> {
    if source.kind.is_point_board() || target.kind.is_point_board() {
        return Some(POINT_BOARD_SPEC.to_string());
    }
    if connector.properties.is_empty() {
        return None;
    }
    let cap = match connector.material {
        MaterialType::Cable => CABLE_VALUE_CAP,
        MaterialType::Wiring => WIRING_VALUE_CAP,
    };
    let parts: Vec<&str> = connector
        .properties
        .values()
        .map(|value| abbreviate(value))
        .take(cap)
        .collect();
    let mut text = parts.join(",");
    text.push(',');
    text.push_str(match connector.material {
        MaterialType::Cable => "Cable",
        MaterialType::Wiring => "Wire",
    });
    Some(CORE_RE.replace_all(&text, "C").into_owned())
}

/// Place the spec text on the longest segment able to hold it: at the
/// midpoint, below a horizontal run or to the right of a vertical one. No
/// fitting segment means no label; placement is never forced.
pub(super) fn place_label(
    connector: &Connector,
    source: &CanvasItem,
    target: &CanvasItem,
    points: &[Point],
    metrics: &Metrics,
) -> Option<SpecLabel> {
    let text = spec_text(connector, source, target)?;
    let estimated = text.chars().count() as f32 * metrics.font_size * CHAR_WIDTH_RATIO;
    let mut best: Option<Segment> = None;
    for segment in segments(points) {
        if segment.length() + GEOM_EPS < estimated {
            continue;
        }
        if best.is_none_or(|current| segment.length() > current.length()) {
            best = Some(segment);
        }
    }
    let segment = best?;
    let mid = segment.midpoint();
    let horizontal = segment.is_horizontal();
    let position = if horizontal {
        Point::new(mid.x, mid.y + metrics.label_gap)
    } else {
        Point::new(mid.x + metrics.label_gap, mid.y)
    };
    Some(SpecLabel {
        text,
        position,
        horizontal,
    })
}
