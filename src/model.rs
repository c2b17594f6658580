//! Canvas and connector data model consumed by the router.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    #[default]
    Equipment,
    DistributionBoard,
    SwitchBoardLightPoint,
    SwitchBoardPowerPoint,
    /// Cross-sheet bridge; carries a net name, see [`crate::trace`].
    Portal,
}

impl SymbolKind {
    /// Point-style switch boards label their feeds with a fixed literal.
    pub fn is_point_board(self) -> bool {
        matches!(
            self,
            SymbolKind::SwitchBoardLightPoint | SymbolKind::SwitchBoardPowerPoint
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub id: String,
    #[serde(default)]
    pub kind: SymbolKind,
    pub position: Point,
    pub size: Size,
    /// Named, symbol-relative attachment offsets, in declaration order.
    #[serde(default)]
    pub connection_points: IndexMap<String, Point>,
    /// Net bridged by portal symbols across sheets.
    #[serde(default)]
    pub net: Option<String>,
}

impl CanvasItem {
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.size.width,
            self.position.y + self.size.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    Cable,
    Wiring,
}

/// One end of a connector: an item id plus a connection-point name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    pub item: String,
    pub point: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub source: Terminal,
    pub target: Terminal,
    pub material: MaterialType,
    /// Conductor properties (material, core count, gauge, ...) in
    /// declaration order; the order drives the spec-text layout.
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

/// Annotation describing the physical conductor, placed along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecLabel {
    pub text: String,
    pub position: Point,
    pub horizontal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedConnector {
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SpecLabel>,
}

/// A whole diagram, as the CLI consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub items: Vec<CanvasItem>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}
