//! Topology validation: the structural checks a map must pass before it is
//! trusted for routing, with the operator-facing diagnostic strings.
//!
//! Validation is advisory. It is a total function over any map state and
//! never blocks mutation or persistence; editors surface the text after
//! every change and routing callers gate on it before planning.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use tracing::debug;

use crate::map::Map;
use crate::node::{Node, NodeFilter};

/// A loop of track counts as a legitimate line only when it serves at least
/// this many distinct stations.
const MIN_STATIONS_ON_LOOP: u32 = 3;

/// Structural defect found in a map.
///
/// The `Display` form is the fixed operator message; the variants carry the
/// first offending node where one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The map has no stations at all.
    NoStations,
    /// At least one node cannot reach the rest of the map.
    Disconnected,
    /// A corner with more than two tracks.
    CornerIntersection { name: String },
    /// A corner with fewer than two tracks.
    DanglingCorner { name: String },
    /// A corner whose track loops back without serving three stations.
    CyclicTrack { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Diagnostic::NoStations | Diagnostic::DanglingCorner { .. } => "MAP IS INCOMPLETE",
            Diagnostic::Disconnected => "MAP IS NOT CONNECTED",
            Diagnostic::CornerIntersection { .. } => {
                "TRACK INTERSECTION CAN ONLY HAPPEN AT STATIONS AND TRACK OVERLAP \
                 CAN ONLY HAPPEN AT CROSSES OF THE GRID"
            }
            Diagnostic::CyclicTrack { .. } => "MAP CONTAINS INVALID CYCLIC TRACK",
        };
        f.write_str(text)
    }
}

/// Run every structural check, returning the first failure.
///
/// Checks run in a fixed order so the reported defect is stable: missing
/// stations, then connectivity, then corner intersections, then dangling
/// corners, then cyclic tracks. Corners are visited in name order, so the
/// offending node is stable too.
pub fn check(map: &Map) -> Option<Diagnostic> {
    debug!(nodes = map.len(), "validating map topology");

    if map.all_nodes(NodeFilter::Stations).is_empty() {
        return Some(Diagnostic::NoStations);
    }

    if !is_connected(map) {
        return Some(Diagnostic::Disconnected);
    }

    let corners = map.all_nodes(NodeFilter::Corners);
    for corner in &corners {
        if corner.degree() > 2 {
            return Some(Diagnostic::CornerIntersection {
                name: corner.name.clone(),
            });
        }
    }
    for corner in &corners {
        if corner.degree() < 2 {
            return Some(Diagnostic::DanglingCorner {
                name: corner.name.clone(),
            });
        }
    }
    for corner in &corners {
        if let Some(diagnostic) = cyclic_track_at(map, corner) {
            return Some(diagnostic);
        }
    }

    None
}

/// The operator-facing report: an empty string when the map is well-formed,
/// otherwise the diagnostic message.
pub fn diagnostic_text(map: &Map) -> String {
    check(map).map(|diagnostic| diagnostic.to_string()).unwrap_or_default()
}

/// Adjacency is strictly symmetric, so pairwise mutual reachability reduces
/// to a single flood visiting every node.
fn is_connected(map: &Map) -> bool {
    let Some(first) = map.nodes().keys().next() else {
        return true;
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![first.as_str()];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(node) = map.nodes().get(current) {
            for next in node.neighbour_names() {
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
        }
    }

    visited.len() == map.len()
}

/// Probe one corner for a degenerate loop.
///
/// Runs only after the degree checks, so the corner has exactly two
/// neighbours and every corner corridor walks deterministically to some
/// station. The track through the corner loops when both directions lead to
/// the same first station, or when the two sides reconnect behind the corner
/// through fewer than [`MIN_STATIONS_ON_LOOP`] distinct stations.
fn cyclic_track_at(map: &Map, corner: &Node) -> Option<Diagnostic> {
    let neighbours = corner.neighbour_names();
    let (n1, n2) = match neighbours.as_slice() {
        [n1, n2] => (*n1, *n2),
        _ => return None,
    };

    let excluded: HashSet<&str> = HashSet::from([corner.name.as_str()]);
    let cyclic = match (
        map.nearest_station(n1, &excluded),
        map.nearest_station(n2, &excluded),
    ) {
        (Some(a), Some(b)) if a.name != b.name => min_stations_on_path(map, n1, n2, &excluded)
            .is_some_and(|stations| stations < MIN_STATIONS_ON_LOOP),
        // Both directions converge on one station, or a probe dead-ends:
        // the track folds back on itself either way.
        _ => true,
    };

    cyclic.then(|| Diagnostic::CyclicTrack {
        name: corner.name.clone(),
    })
}

/// Fewest distinct stations on any path from `from` to `to` that avoids the
/// excluded names, counting both endpoints. `None` when no such path exists.
///
/// Stations weigh one and corners zero, so the deque search is a 0-1 BFS
/// and the first settled visit of `to` is minimal.
fn min_stations_on_path(
    map: &Map,
    from: &str,
    to: &str,
    excluded: &HashSet<&str>,
) -> Option<u32> {
    let from_node = map.nodes().get(from)?;
    if excluded.contains(from) {
        return None;
    }

    let mut dist: HashMap<&str, u32> = HashMap::new();
    let mut deque: VecDeque<(&str, u32)> = VecDeque::new();
    let start = u32::from(from_node.is_station);
    dist.insert(from, start);
    deque.push_back((from, start));

    while let Some((current, cost)) = deque.pop_front() {
        if dist.get(current).is_some_and(|best| *best < cost) {
            continue;
        }
        if current == to {
            return Some(cost);
        }
        let Some(node) = map.nodes().get(current) else {
            continue;
        };
        for next in node.neighbour_names() {
            if excluded.contains(next) {
                continue;
            }
            let Some(peer) = map.nodes().get(next) else {
                continue;
            };
            let step = u32::from(peer.is_station);
            let next_cost = cost + step;
            if next_cost < *dist.get(next).unwrap_or(&u32::MAX) {
                dist.insert(next, next_cost);
                if step == 0 {
                    deque.push_front((next, next_cost));
                } else {
                    deque.push_back((next, next_cost));
                }
            }
        }
    }

    None
}
