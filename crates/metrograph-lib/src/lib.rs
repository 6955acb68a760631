//! Metrograph library entry points.
//!
//! This crate models a transit network as a graph of stations and track
//! corners, plans optimal routes under interchangeable metrics (track
//! distance or fare cost), validates map topology, and persists maps to a
//! local SQLite store keyed by city. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod map;
pub mod node;
pub mod output;
pub mod path;
pub mod routing;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use map::Map;
pub use node::{GridPoint, LineColor, Metric, Node, NodeFilter, TrackEdge};
pub use output::{RouteEndpoint, RouteStep, RouteSummary};
pub use path::{find_route_a_star, find_route_dijkstra};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use store::{
    default_store_path, delete_map, list_cities, load_map, open_store, resolve_store_path,
    save_map,
};
pub use validate::{check, diagnostic_text, Diagnostic};
