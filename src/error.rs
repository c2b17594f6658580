use thiserror::Error;

/// Caller contract violations surfaced by endpoint resolution. Geometric
/// degeneracies never error; see the routing fallback policies instead.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unknown item id `{0}`")]
    UnknownItem(String),
    #[error("item `{item}` has no connection point `{point}`")]
    UnknownConnectionPoint { item: String, point: String },
}
