//! Electrical continuity tracing over the item/connector graph.
//!
//! An explicit-stack depth-first walk: connector edges are consumed once,
//! and portal symbols bridge same-named nets across sheets behind a
//! visited-net guard, so cyclic diagrams terminate.

use std::collections::{BTreeSet, HashSet};

use crate::model::{CanvasItem, Connector, SymbolKind};

/// Item ids reachable from `source_id` through connectors and portal nets,
/// in stable (sorted) order. Unknown sources yield just themselves.
pub fn trace_energized(
    items: &[CanvasItem],
    connectors: &[Connector],
    source_id: &str,
) -> Vec<String> {
    let mut energized: BTreeSet<&str> = BTreeSet::new();
    let mut visited_edges: HashSet<usize> = HashSet::new();
    let mut visited_nets: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![source_id];

    while let Some(current) = stack.pop() {
        if !energized.insert(current) {
            continue;
        }
        for (idx, connector) in connectors.iter().enumerate() {
            if visited_edges.contains(&idx) {
                continue;
            }
            let other = if connector.source.item == current {
                connector.target.item.as_str()
            } else if connector.target.item == current {
                connector.source.item.as_str()
            } else {
                continue;
            };
            visited_edges.insert(idx);
            stack.push(other);
        }
        if let Some(portal) = items
            .iter()
            .find(|item| item.id == current && item.kind == SymbolKind::Portal)
            && let Some(net) = portal.net.as_deref()
            && visited_nets.insert(net)
        {
            for peer in items {
                if peer.kind == SymbolKind::Portal
                    && peer.id != current
                    && peer.net.as_deref() == Some(net)
                {
                    stack.push(peer.id.as_str());
                }
            }
        }
    }

    energized.into_iter().map(str::to_string).collect()
}
