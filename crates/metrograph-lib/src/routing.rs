//! Route planning: the request/plan types and the metric-dispatching
//! orchestrator.
//!
//! # Example
//!
//! ```ignore
//! use metrograph_lib::{plan_route, Metric, RouteRequest};
//!
//! let request = RouteRequest::new("Aldgate", "Monument", Metric::Cost);
//! let plan = plan_route(&map, &request)?;
//! println!("Route: {} hops for {}", plan.hop_count(), plan.total);
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::node::Metric;
use crate::path::{find_route_a_star, find_route_dijkstra};

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub metric: Metric,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, metric: Metric) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            metric,
        }
    }

    /// Convenience constructor for a distance-optimal route.
    pub fn distance(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(start, goal, Metric::Distance)
    }

    /// Convenience constructor for a fare-optimal route.
    pub fn cost(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(start, goal, Metric::Cost)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub metric: Metric,
    pub start: String,
    pub goal: String,
    /// Node names from start to goal inclusive.
    pub steps: Vec<String>,
    /// Sum of edge weights under the chosen metric.
    pub total: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route under the request's metric.
///
/// Distance-weighted requests run A* with the straight-line heuristic;
/// fare-weighted requests run plain Dijkstra, where that heuristic would not
/// be admissible. Endpoint names resolve first, so a typo fails with
/// suggestions instead of an empty search.
pub fn plan_route(map: &Map, request: &RouteRequest) -> Result<RoutePlan> {
    map.get_node(&request.start)?;
    map.get_node(&request.goal)?;

    let steps = match request.metric {
        Metric::Distance => find_route_a_star(map, &request.start, &request.goal, request.metric),
        Metric::Cost => find_route_dijkstra(map, &request.start, &request.goal, request.metric),
    }
    .ok_or_else(|| Error::RouteNotFound {
        start: request.start.clone(),
        goal: request.goal.clone(),
    })?;

    let total = total_weight(map, &steps, request.metric)?;

    Ok(RoutePlan {
        metric: request.metric,
        start: request.start.clone(),
        goal: request.goal.clone(),
        steps,
        total,
    })
}

/// Total weight along a path of pairwise-adjacent nodes.
fn total_weight(map: &Map, steps: &[String], metric: Metric) -> Result<f64> {
    let mut total = 0.0;
    for pair in steps.windows(2) {
        total += map.get_node(&pair[0])?.weight(&pair[1], metric)?;
    }
    Ok(total)
}
