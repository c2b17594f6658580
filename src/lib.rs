#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod route;
pub mod trace;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{RoutingConfig, load_config};
pub use error::RouteError;
pub use geometry::Point;
pub use model::{
    CanvasItem, Connector, Diagram, MaterialType, RoutedConnector, SpecLabel, SymbolKind, Terminal,
};
pub use route::{route_connector, route_diagram};
