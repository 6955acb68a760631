//! SQLite persistence for maps, one stored map per city.
//!
//! Cached track weights are never persisted. Loading replays every stored
//! track through [`Map::add_track`], so a stored map always comes back with
//! weights recomputed from current coordinates and zones.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{Error, Result};
use crate::map::Map;
use crate::node::{GridPoint, LineColor, Node, NodeFilter};

/// Default filename for the map store.
const STORE_FILENAME: &str = "map_storage.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS stations (
    city TEXT NOT NULL,
    name TEXT NOT NULL,
    is_station INTEGER NOT NULL,
    x INTEGER NOT NULL,
    y INTEGER NOT NULL,
    zone TEXT,
    PRIMARY KEY (city, name)
);
CREATE TABLE IF NOT EXISTS connections (
    city TEXT NOT NULL,
    name_1 TEXT NOT NULL,
    name_2 TEXT NOT NULL,
    color TEXT NOT NULL
);
";

/// Resolve the default store location using platform-specific project
/// directories.
pub fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "metrograph", "metrograph")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(STORE_FILENAME))
}

/// Resolve the store path.
///
/// The resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `METROGRAPH_DB` environment variable.
/// 3. Platform-specific project directories.
pub fn resolve_store_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os("METROGRAPH_DB") {
        return Ok(PathBuf::from(env_path));
    }

    default_store_path()
}

/// Open the store at `path`, creating the file and schema on first use.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(path)?;
    connection.execute_batch(SCHEMA)?;
    debug!(path = %path.display(), "opened map store");
    Ok(connection)
}

/// Persist a map under a city name, replacing any previous version.
///
/// One transaction: the city's old rows go, node rows land in name order,
/// and each undirected track is written exactly once with `name_1 < name_2`.
pub fn save_map(connection: &mut Connection, city: &str, map: &Map) -> Result<()> {
    let tx = connection.transaction()?;
    tx.execute("DELETE FROM stations WHERE city = ?1", params![city])?;
    tx.execute("DELETE FROM connections WHERE city = ?1", params![city])?;

    let mut tracks = 0usize;
    let nodes = map.all_nodes(NodeFilter::All);
    for node in &nodes {
        tx.execute(
            "INSERT INTO stations (city, name, is_station, x, y, zone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                city,
                node.name,
                node.is_station,
                node.coordinates.x,
                node.coordinates.y,
                node.zone,
            ],
        )?;

        let mut peers: Vec<(&str, LineColor)> = node
            .tracks()
            .filter(|(other, _)| node.name.as_str() < *other)
            .map(|(other, edge)| (other, edge.color))
            .collect();
        peers.sort_unstable_by_key(|(other, _)| *other);
        for (other, color) in peers {
            tx.execute(
                "INSERT INTO connections (city, name_1, name_2, color)
                 VALUES (?1, ?2, ?3, ?4)",
                params![city, node.name, other, color.as_str()],
            )?;
            tracks += 1;
        }
    }

    tx.commit()?;
    debug!(city, nodes = nodes.len(), tracks, "saved map");
    Ok(())
}

/// Load the map stored under a city name.
///
/// Fails with [`Error::UnknownCity`] when the city has no node rows. Any
/// track row referencing a missing endpoint or an unknown color fails the
/// load; a stored map comes back whole or not at all.
pub fn load_map(connection: &Connection, city: &str) -> Result<Map> {
    let mut map = Map::new();

    let mut stmt = connection.prepare(
        "SELECT name, is_station, x, y, zone FROM stations WHERE city = ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![city], |row| {
        let name: String = row.get(0)?;
        let is_station: bool = row.get(1)?;
        let x: i32 = row.get(2)?;
        let y: i32 = row.get(3)?;
        let zone: Option<String> = row.get(4)?;
        Ok(Node::new(
            name,
            GridPoint::new(x, y),
            is_station,
            normalize_zone(zone),
        ))
    })?;
    for entry in rows {
        map.add_node(entry?)?;
    }

    if map.is_empty() {
        return Err(Error::UnknownCity {
            name: city.to_string(),
        });
    }

    let mut stmt = connection.prepare(
        "SELECT name_1, name_2, color FROM connections WHERE city = ?1 ORDER BY name_1, name_2",
    )?;
    let rows = stmt.query_map(params![city], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;
    for entry in rows {
        let (name_1, name_2, color) = entry?;
        let color: LineColor = color.parse()?;
        map.add_track(&name_1, &name_2, color)?;
    }

    debug!(city, nodes = map.len(), "loaded map");
    Ok(map)
}

/// All city names with stored maps, sorted.
pub fn list_cities(connection: &Connection) -> Result<Vec<String>> {
    let mut stmt = connection.prepare("SELECT DISTINCT city FROM stations ORDER BY city")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut cities = Vec::new();
    for entry in rows {
        cities.push(entry?);
    }
    Ok(cities)
}

/// Remove a stored city entirely.
pub fn delete_map(connection: &mut Connection, city: &str) -> Result<()> {
    let tx = connection.transaction()?;
    let removed = tx.execute("DELETE FROM stations WHERE city = ?1", params![city])?;
    tx.execute("DELETE FROM connections WHERE city = ?1", params![city])?;
    if removed == 0 {
        return Err(Error::UnknownCity {
            name: city.to_string(),
        });
    }
    tx.commit()?;
    debug!(city, "deleted stored map");
    Ok(())
}

/// Some editors write an unset zone as an empty string; map both encodings
/// to `None`.
fn normalize_zone(zone: Option<String>) -> Option<String> {
    zone.filter(|zone| !zone.is_empty())
}
