use std::path::Path;

use metrograph_lib::{
    delete_map, list_cities, load_map, open_store, resolve_store_path, save_map, Error, Metric,
    NodeFilter, Result,
};
use tempfile::NamedTempFile;

mod common;

use common::{corridor_map, zoned_ring_map};

#[test]
fn save_and_load_round_trips_a_zoned_map() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;

    let map = zoned_ring_map();
    save_map(&mut conn, "london", &map)?;
    let loaded = load_map(&conn, "london")?;

    assert_eq!(loaded, map);
    Ok(())
}

#[test]
fn save_and_load_round_trips_corners() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;

    let map = corridor_map();
    save_map(&mut conn, "york", &map)?;
    let loaded = load_map(&conn, "york")?;

    assert_eq!(loaded, map);
    assert_eq!(loaded.all_nodes(NodeFilter::Corners).len(), 2);
    assert_eq!(loaded.get_node("c1")?.zone, None, "NULL zone loads as unset");
    Ok(())
}

#[test]
fn each_track_is_stored_once_with_ordered_endpoints() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;
    save_map(&mut conn, "york", &corridor_map())?;

    let tracks: i64 = conn.query_row(
        "SELECT COUNT(*) FROM connections WHERE city = ?1",
        ["york"],
        |row| row.get(0),
    )?;
    assert_eq!(tracks, 3);

    let unordered: i64 = conn.query_row(
        "SELECT COUNT(*) FROM connections WHERE city = ?1 AND name_1 >= name_2",
        ["york"],
        |row| row.get(0),
    )?;
    assert_eq!(unordered, 0);
    Ok(())
}

#[test]
fn loading_an_unknown_city_fails() -> Result<()> {
    let file = NamedTempFile::new()?;
    let conn = open_store(file.path())?;

    let err = load_map(&conn, "atlantis").expect_err("no such city");
    assert!(matches!(err, Error::UnknownCity { name } if name == "atlantis"));
    Ok(())
}

#[test]
fn empty_zone_text_loads_as_unset() -> Result<()> {
    let file = NamedTempFile::new()?;
    let conn = open_store(file.path())?;
    conn.execute(
        "INSERT INTO stations (city, name, is_station, x, y, zone)
         VALUES ('york', 'Aldgate', 1, 0, 0, '')",
        [],
    )?;

    let loaded = load_map(&conn, "york")?;
    assert_eq!(loaded.get_node("Aldgate")?.zone, None);
    Ok(())
}

#[test]
fn loaded_fares_are_recomputed_from_current_zones() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;

    let mut map = zoned_ring_map();
    map.set_zone("Monument", Some("3".to_string()))?;
    // The cached fare on Barbican-Monument is still the zone-1 value.
    assert_eq!(
        map.get_node("Barbican")?.weight("Monument", Metric::Cost)?,
        1.0,
    );

    save_map(&mut conn, "london", &map)?;
    let loaded = load_map(&conn, "london")?;
    assert_eq!(
        loaded.get_node("Barbican")?.weight("Monument", Metric::Cost)?,
        2.0,
        "loading replays tracks against current zones",
    );
    Ok(())
}

#[test]
fn save_replaces_the_previous_version() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;

    save_map(&mut conn, "york", &corridor_map())?;
    save_map(&mut conn, "york", &zoned_ring_map())?;

    let loaded = load_map(&conn, "york")?;
    assert!(!loaded.contains("c1"), "old nodes are gone");
    assert!(loaded.contains("Aldgate"));
    assert_eq!(loaded.len(), 5);
    Ok(())
}

#[test]
fn cities_list_sorted_and_shrinks_on_delete() -> Result<()> {
    let file = NamedTempFile::new()?;
    let mut conn = open_store(file.path())?;

    save_map(&mut conn, "york", &corridor_map())?;
    save_map(&mut conn, "london", &zoned_ring_map())?;
    assert_eq!(
        list_cities(&conn)?,
        vec!["london".to_string(), "york".to_string()],
    );

    delete_map(&mut conn, "york")?;
    assert_eq!(list_cities(&conn)?, vec!["london".to_string()]);
    let err = load_map(&conn, "york").expect_err("york was deleted");
    assert!(matches!(err, Error::UnknownCity { .. }));

    let err = delete_map(&mut conn, "atlantis").expect_err("nothing to delete");
    assert!(matches!(err, Error::UnknownCity { .. }));
    Ok(())
}

#[test]
fn connection_to_a_missing_node_fails_the_load() -> Result<()> {
    let file = NamedTempFile::new()?;
    let conn = open_store(file.path())?;
    conn.execute_batch(
        "INSERT INTO stations (city, name, is_station, x, y, zone)
             VALUES ('york', 'Aldgate', 1, 0, 0, NULL);
         INSERT INTO connections (city, name_1, name_2, color)
             VALUES ('york', 'Aldgate', 'Ghost', 'blue');",
    )?;

    let err = load_map(&conn, "york").expect_err("edge endpoint is missing");
    assert!(matches!(err, Error::NodeNotFound { name, .. } if name == "Ghost"));
    Ok(())
}

#[test]
fn unknown_color_fails_the_load() -> Result<()> {
    let file = NamedTempFile::new()?;
    let conn = open_store(file.path())?;
    conn.execute_batch(
        "INSERT INTO stations (city, name, is_station, x, y, zone) VALUES
             ('york', 'Aldgate', 1, 0, 0, NULL),
             ('york', 'Monument', 1, 4, 0, NULL);
         INSERT INTO connections (city, name_1, name_2, color)
             VALUES ('york', 'Aldgate', 'Monument', 'magenta');",
    )?;

    let err = load_map(&conn, "york").expect_err("color is outside the palette");
    assert!(matches!(err, Error::UnknownLineColor { value } if value == "magenta"));
    Ok(())
}

#[test]
fn store_path_resolution_prefers_explicit_then_env() {
    std::env::set_var("METROGRAPH_DB", "/tmp/env-store.db");

    let explicit = Path::new("/tmp/explicit-store.db");
    let resolved = resolve_store_path(Some(explicit)).expect("resolve explicit");
    assert_eq!(resolved, explicit);

    let from_env = resolve_store_path(None).expect("resolve from env");
    assert_eq!(from_env, Path::new("/tmp/env-store.db"));

    std::env::remove_var("METROGRAPH_DB");
}
