//! The owning map arena: node storage, track mutation, traversal probes,
//! and the top-level route entry point.
//!
//! Nodes are keyed by unique name and never hold references to each other;
//! every operation that touches both endpoints of a track lives here so the
//! symmetric adjacency invariant holds by construction.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::node::{LineColor, Metric, Node, NodeFilter, TrackEdge};
use crate::routing::{plan_route, RouteRequest};

/// Similarity floor below which a name is not worth suggesting.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Number of fuzzy suggestions attached to a failed lookup.
const SUGGESTION_LIMIT: usize = 3;

/// A transit map: an owning arena of nodes keyed by unique name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    nodes: HashMap<String, Node>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Insert a new node. Names are unique; re-adding an existing name is
    /// rejected so the old node's tracks cannot be orphaned.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(Error::DuplicateNode { name: node.name });
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Look up a node by its case-sensitive name.
    pub fn get_node(&self, name: &str) -> Result<&Node> {
        self.nodes.get(name).ok_or_else(|| self.unknown_node(name))
    }

    /// Closest node names to `name` by Jaro-Winkler similarity, best first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// All nodes passing the filter, sorted by name.
    pub fn all_nodes(&self, filter: NodeFilter) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self
            .nodes
            .values()
            .filter(|node| filter.admits(node))
            .collect();
        nodes.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        nodes
    }

    /// Direct neighbours of a node passing the filter, sorted by name.
    pub fn neighbours(&self, name: &str, filter: NodeFilter) -> Result<Vec<&Node>> {
        let node = self.get_node(name)?;
        let mut out = Vec::new();
        for neighbour in node.neighbour_names() {
            if let Some(peer) = self.nodes.get(neighbour) {
                if filter.admits(peer) {
                    out.push(peer);
                }
            }
        }
        Ok(out)
    }

    /// Lay a track between two nodes.
    ///
    /// The cached weight triple (Euclidean distance, fare, color) is computed
    /// here and stored identically on both endpoints. Laying a track over an
    /// existing one overwrites the triple, which is how a line gets
    /// re-colored.
    pub fn add_track(&mut self, name1: &str, name2: &str, color: LineColor) -> Result<()> {
        if name1 == name2 {
            return Err(Error::SelfTrack {
                name: name1.to_string(),
            });
        }
        let edge = {
            let a = self.get_node(name1)?;
            let b = self.get_node(name2)?;
            TrackEdge::between(a, b, color)
        };
        self.set_track_halves(name1, name2, edge);
        debug!(from = name1, to = name2, color = %color, "laid track");
        Ok(())
    }

    /// Remove the track between two nodes. Removing a track that does not
    /// exist fails with [`Error::NotAdjacent`], including a second removal
    /// of the same track.
    pub fn remove_track(&mut self, name1: &str, name2: &str) -> Result<()> {
        self.get_node(name2)?;
        if !self.get_node(name1)?.is_adjacent(name2) {
            return Err(Error::NotAdjacent {
                from: name1.to_string(),
                to: name2.to_string(),
            });
        }
        if let Some(node) = self.nodes.get_mut(name1) {
            node.unset_track(name2);
        }
        if let Some(node) = self.nodes.get_mut(name2) {
            node.unset_track(name1);
        }
        debug!(from = name1, to = name2, "removed track");
        Ok(())
    }

    /// Re-tag a node's fare zone.
    ///
    /// Existing tracks keep the fares they were laid with; call
    /// [`Map::refresh_track_weights`] afterwards to bring them in line.
    pub fn set_zone(&mut self, name: &str, zone: Option<String>) -> Result<()> {
        match self.nodes.get_mut(name) {
            Some(node) => {
                node.zone = zone;
                Ok(())
            }
            None => Err(self.unknown_node(name)),
        }
    }

    /// Recompute every cached track triple from current coordinates and
    /// zones. Loading a stored map replays this, and callers that edit zones
    /// use it to repair stale fares.
    pub fn refresh_track_weights(&mut self) {
        let mut refreshed = Vec::new();
        for (name, node) in &self.nodes {
            for (other, edge) in node.tracks() {
                if name.as_str() >= other {
                    continue;
                }
                match self.nodes.get(other) {
                    Some(peer) => refreshed.push((
                        name.clone(),
                        other.to_string(),
                        TrackEdge::between(node, peer, edge.color),
                    )),
                    None => warn!(from = %name, to = other, "skipping track to a missing node"),
                }
            }
        }
        let tracks = refreshed.len();
        for (name1, name2, edge) in refreshed {
            self.set_track_halves(&name1, &name2, edge);
        }
        debug!(tracks, "refreshed track weights");
    }

    /// Delete a node and every track attached to it, returning the node.
    pub fn remove_node(&mut self, name: &str) -> Result<Node> {
        let node = match self.nodes.remove(name) {
            Some(node) => node,
            None => return Err(self.unknown_node(name)),
        };
        for (other, _) in node.tracks() {
            if let Some(peer) = self.nodes.get_mut(other) {
                peer.unset_track(name);
            }
        }
        debug!(name, "removed node");
        Ok(node)
    }

    /// Drop corners left with no tracks at all, returning the removed names
    /// in sorted order.
    ///
    /// Track removal never deletes nodes on its own; map editors call this
    /// afterwards to sweep up stranded corners.
    pub fn prune_isolated_corners(&mut self) -> Vec<String> {
        let mut stranded: Vec<String> = self
            .nodes
            .values()
            .filter(|node| !node.is_station && node.degree() == 0)
            .map(|node| node.name.clone())
            .collect();
        stranded.sort_unstable();
        for name in &stranded {
            self.nodes.remove(name);
        }
        if !stranded.is_empty() {
            debug!(pruned = stranded.len(), "removed stranded corners");
        }
        stranded
    }

    /// Whether `target` can be reached from `from` without entering any node
    /// named in `excluded`. Unknown names are simply unreachable.
    pub fn reachable(&self, from: &str, target: &str, excluded: &HashSet<&str>) -> bool {
        if excluded.contains(from) {
            return false;
        }
        if from == target {
            return true;
        }
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for next in node.neighbour_names() {
                if excluded.contains(next) || visited.contains(next) {
                    continue;
                }
                if next == target {
                    return true;
                }
                stack.push(next);
            }
        }
        false
    }

    /// First station reached walking outward from `from`, never entering
    /// nodes named in `excluded`. `from` itself counts when it is a station.
    /// Neighbours expand in sorted name order so the probe is deterministic.
    pub fn nearest_station(&self, from: &str, excluded: &HashSet<&str>) -> Option<&Node> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if excluded.contains(current) || !visited.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.is_station {
                return Some(node);
            }
            for next in node.neighbour_names().into_iter().rev() {
                if !visited.contains(next) && !excluded.contains(next) {
                    stack.push(next);
                }
            }
        }
        None
    }

    /// Best route between two stops under the chosen metric, as the list of
    /// node names from start to destination inclusive.
    pub fn optimized_route(
        &self,
        start: &str,
        destination: &str,
        metric: Metric,
    ) -> Result<Vec<String>> {
        let request = RouteRequest::new(start, destination, metric);
        plan_route(self, &request).map(|plan| plan.steps)
    }

    pub(crate) fn nodes(&self) -> &HashMap<String, Node> {
        &self.nodes
    }

    fn unknown_node(&self, name: &str) -> Error {
        Error::NodeNotFound {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, SUGGESTION_LIMIT),
        }
    }

    fn set_track_halves(&mut self, name1: &str, name2: &str, edge: TrackEdge) {
        if let Some(node) = self.nodes.get_mut(name1) {
            node.set_track(name2.to_string(), edge);
        }
        if let Some(node) = self.nodes.get_mut(name2) {
            node.set_track(name1.to_string(), edge);
        }
    }
}
