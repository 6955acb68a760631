//! Node-level types for the transit map: grid coordinates, line colors,
//! metrics, cached track weights, and the [`Node`] itself.
//!
//! Adjacency lives on each node as a name-keyed table of [`TrackEdge`]
//! entries, but it is only ever mutated through [`crate::Map`] so the two
//! endpoints of a track cannot drift out of sync.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Integer position on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another grid point.
    pub fn distance_to(&self, other: GridPoint) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Palette of transit line colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineColor {
    Blue,
    Red,
    Yellow,
    Green,
    Brown,
    Purple,
    Orange,
    Pink,
}

impl LineColor {
    /// Every color in the palette, in display order.
    pub const ALL: [LineColor; 8] = [
        LineColor::Blue,
        LineColor::Red,
        LineColor::Yellow,
        LineColor::Green,
        LineColor::Brown,
        LineColor::Purple,
        LineColor::Orange,
        LineColor::Pink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LineColor::Blue => "blue",
            LineColor::Red => "red",
            LineColor::Yellow => "yellow",
            LineColor::Green => "green",
            LineColor::Brown => "brown",
            LineColor::Purple => "purple",
            LineColor::Orange => "orange",
            LineColor::Pink => "pink",
        }
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineColor {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        LineColor::ALL
            .iter()
            .copied()
            .find(|color| color.as_str() == value)
            .ok_or_else(|| Error::UnknownLineColor {
                value: value.to_string(),
            })
    }
}

/// Weighting applied to tracks during route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Physical track length (Euclidean grid distance).
    #[default]
    Distance,
    /// Fare units, driven by zone boundaries.
    Cost,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Metric::Distance => "distance",
            Metric::Cost => "cost",
        };
        f.write_str(value)
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "distance" => Ok(Metric::Distance),
            "cost" => Ok(Metric::Cost),
            other => Err(Error::UnknownMetric {
                value: other.to_string(),
            }),
        }
    }
}

/// Cached weights and color for one track.
///
/// Both endpoints of a track hold an identical copy. The triple is computed
/// when the track is laid and is not rewritten by later zone edits; see
/// [`crate::Map::refresh_track_weights`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackEdge {
    pub distance: f64,
    pub fare: u32,
    pub color: LineColor,
}

impl TrackEdge {
    /// Compute the cached triple for a track between two nodes. Crossing a
    /// zone boundary costs two fare units; staying inside a zone, or touching
    /// a stop with no zone assigned, costs one.
    pub(crate) fn between(a: &Node, b: &Node, color: LineColor) -> Self {
        let fare = match (&a.zone, &b.zone) {
            (Some(za), Some(zb)) if za != zb => 2,
            _ => 1,
        };
        Self {
            distance: a.coordinates.distance_to(b.coordinates),
            fare,
            color,
        }
    }

    /// Edge weight under the chosen metric.
    pub fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Distance => self.distance,
            Metric::Cost => f64::from(self.fare),
        }
    }
}

/// Filter applied when listing nodes or neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeFilter {
    #[default]
    All,
    Stations,
    Corners,
}

impl NodeFilter {
    pub(crate) fn admits(&self, node: &Node) -> bool {
        match self {
            NodeFilter::All => true,
            NodeFilter::Stations => node.is_station,
            NodeFilter::Corners => !node.is_station,
        }
    }
}

/// A single stop on the map: a named station or a track corner.
///
/// Corners carry no passengers; they only bend tracks across the grid and
/// must end up with exactly two tracks in a well-formed map. Stations may
/// have any number of tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub coordinates: GridPoint,
    pub is_station: bool,
    /// Fare zone tag; `None` means the stop has not been zoned yet.
    pub zone: Option<String>,
    edges: HashMap<String, TrackEdge>,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        coordinates: GridPoint,
        is_station: bool,
        zone: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            coordinates,
            is_station,
            zone,
            edges: HashMap::new(),
        }
    }

    /// Convenience constructor for an unzoned station.
    pub fn station(name: impl Into<String>, coordinates: GridPoint) -> Self {
        Self::new(name, coordinates, true, None)
    }

    /// Convenience constructor for a track corner.
    pub fn corner(name: impl Into<String>, coordinates: GridPoint) -> Self {
        Self::new(name, coordinates, false, None)
    }

    /// Builder-style zone assignment, handy when constructing fixtures.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Number of tracks attached to this node.
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Whether a track runs directly to `other`.
    pub fn is_adjacent(&self, other: &str) -> bool {
        self.edges.contains_key(other)
    }

    /// Names of all directly connected nodes, sorted for determinism.
    pub fn neighbour_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.edges.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The cached track to `other`, if one exists.
    pub fn track(&self, other: &str) -> Option<&TrackEdge> {
        self.edges.get(other)
    }

    /// All tracks attached to this node, in arbitrary order.
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &TrackEdge)> {
        self.edges.iter().map(|(name, edge)| (name.as_str(), edge))
    }

    /// Weight of the track to `other` under the chosen metric.
    pub fn weight(&self, other: &str, metric: Metric) -> Result<f64> {
        self.track(other)
            .map(|edge| edge.weight(metric))
            .ok_or_else(|| Error::NotAdjacent {
                from: self.name.clone(),
                to: other.to_string(),
            })
    }

    /// Line color of the track to `other`.
    pub fn color(&self, other: &str) -> Result<LineColor> {
        self.track(other)
            .map(|edge| edge.color)
            .ok_or_else(|| Error::NotAdjacent {
                from: self.name.clone(),
                to: other.to_string(),
            })
    }

    pub(crate) fn set_track(&mut self, other: String, edge: TrackEdge) {
        self.edges.insert(other, edge);
    }

    pub(crate) fn unset_track(&mut self, other: &str) -> Option<TrackEdge> {
        self.edges.remove(other)
    }
}
