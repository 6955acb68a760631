use thiserror::Error;

/// Convenient result alias for the metrograph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node name could not be found in the map.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    NodeNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when adding a node under a name the map already holds.
    #[error("node {name} already exists in the map")]
    DuplicateNode { name: String },

    /// Raised when laying a track from a node back onto itself.
    #[error("cannot lay a track from {name} onto itself")]
    SelfTrack { name: String },

    /// Raised when querying or removing a track between unconnected nodes.
    #[error("no track between {from} and {to}")]
    NotAdjacent { from: String, to: String },

    /// Raised when a metric name is outside the supported set.
    #[error("unknown metric: {value} (expected 'distance' or 'cost')")]
    UnknownMetric { value: String },

    /// Raised when a line color is outside the palette.
    #[error("unknown line color: {value}")]
    UnknownLineColor { value: String },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any stops.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when the store has no map saved under a city name.
    #[error("no stored map for city: {name}")]
    UnknownCity { name: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the map store")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
