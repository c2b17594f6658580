//! Routing configuration and the derived, zoom-scaled thresholds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Offset points within this distance of sharing an axis count as aligned.
const AXIS_ALIGN_EPS: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Canvas zoom factor. Every distance threshold is multiplied by it,
    /// keeping the whole computation in one coordinate space.
    pub scale: f32,
    /// Font size used to estimate spec-label width.
    pub font_size: f32,
    /// Clearance added around each obstacle item's bounding box.
    pub obstacle_margin: f32,
    /// Distance a routing endpoint stands off from its item's side.
    pub endpoint_standoff: f32,
    /// Colinear legs closer than this to an existing segment conflict.
    pub parallel_tolerance: f32,
    /// Clearance used when a continuation steps around an obstacle edge.
    pub sidestep_clearance: f32,
    /// Half-diagonal of the diamond detour spliced at wire crossings.
    pub jumper_half_size: f32,
    /// Gap between a label and the segment carrying it.
    pub label_gap: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_size: 12.0,
            obstacle_margin: 10.0,
            endpoint_standoff: 20.0,
            parallel_tolerance: 3.0,
            sidestep_clearance: 10.0,
            jumper_half_size: 5.0,
            label_gap: 5.0,
        }
    }
}

/// Load a config file (JSON or JSON5); absent path means defaults.
pub fn load_config(path: Option<&Path>) -> Result<RoutingConfig> {
    let Some(path) = path else {
        return Ok(RoutingConfig::default());
    };
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config =
        json5::from_str(&raw).with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}

/// Distance thresholds with the zoom factor applied exactly once, here.
/// Nothing downstream reads a raw constant; every threshold lives in the
/// same coordinate space at every zoom level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Metrics {
    pub(crate) margin: f32,
    pub(crate) standoff: f32,
    pub(crate) parallel_tol: f32,
    pub(crate) sidestep: f32,
    pub(crate) jumper_half: f32,
    pub(crate) label_gap: f32,
    pub(crate) align_eps: f32,
    pub(crate) font_size: f32,
}

impl Metrics {
    pub(crate) fn new(config: &RoutingConfig) -> Self {
        let scale = if config.scale > 0.0 { config.scale } else { 1.0 };
        Self {
            margin: config.obstacle_margin * scale,
            standoff: config.endpoint_standoff * scale,
            parallel_tol: config.parallel_tolerance * scale,
            sidestep: config.sidestep_clearance * scale,
            jumper_half: config.jumper_half_size * scale,
            label_gap: config.label_gap * scale,
            align_eps: AXIS_ALIGN_EPS * scale,
            font_size: config.font_size * scale,
        }
    }
}
