//! Priority-queue route search over a [`Map`].
//!
//! Both searches keep a binary min-heap frontier with lazy invalidation:
//! relaxing a node pushes a fresh entry instead of updating the old one, and
//! stale entries are skipped when popped. Ties in the frontier break by node
//! name so equal-cost routes come out the same way every run.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::map::Map;
use crate::node::Metric;

/// Run Dijkstra's algorithm under the chosen metric.
///
/// Correct for any non-negative edge weighting, so this is the search used
/// for fare cost, where no admissible geometric heuristic exists. Unknown
/// start or goal names yield `None`.
pub fn find_route_dijkstra(
    map: &Map,
    start: &str,
    goal: &str,
    metric: Metric,
) -> Option<Vec<String>> {
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(entry.node) {
            Some(distance) if (*distance - entry.cost.0).abs() < f64::EPSILON => *distance,
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        let Some(node) = map.nodes().get(entry.node) else {
            continue;
        };
        for (next, edge) in node.tracks() {
            let next_cost = current_distance + edge.weight(metric);
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

/// Run A* guided by the straight-line grid distance to the goal.
///
/// The heuristic never exceeds the real remaining track length, so this is
/// only used for the distance metric; fare-weighted searches go through
/// [`find_route_dijkstra`]. Unknown start or goal names yield `None`.
pub fn find_route_a_star(
    map: &Map,
    start: &str,
    goal: &str,
    metric: Metric,
) -> Option<Vec<String>> {
    if start == goal {
        return Some(vec![start.to_string()]);
    }

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    let start_estimate = heuristic_distance(map, start, goal);
    queue.push(AStarEntry::new(start, 0.0, start_estimate));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(entry.node) {
            Some(score) if (*score - entry.cost.0).abs() < f64::EPSILON => *score,
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        let Some(node) = map.nodes().get(entry.node) else {
            continue;
        };
        for (next, edge) in node.tracks() {
            let tentative_g = current_score + edge.weight(metric);
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                let heuristic = heuristic_distance(map, next, goal);
                queue.push(AStarEntry::new(next, tentative_g, heuristic));
            }
        }
    }

    None
}

fn heuristic_distance(map: &Map, from: &str, to: &str) -> f64 {
    match (map.nodes().get(from), map.nodes().get(to)) {
        (Some(a), Some(b)) => a.coordinates.distance_to(b.coordinates),
        _ => 0.0,
    }
}

fn reconstruct_path(parents: &HashMap<&str, Option<&str>>, start: &str, goal: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node.to_string());
        if node == start {
            break;
        }
        current = parents.get(node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl<'a> AStarEntry<'a> {
    fn new(node: &'a str, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for AStarEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
