//! Common map fixtures shared across integration tests.

use metrograph_lib::{GridPoint, LineColor, Map, Node};

/// Two stations joined by a corridor of degree-two corners, all on the blue
/// line: West (0,0) - c1 (2,0) - c2 (4,0) - East (6,0). Structurally valid.
#[allow(dead_code)]
pub fn corridor_map() -> Map {
    let mut map = Map::new();
    map.add_node(Node::station("West", GridPoint::new(0, 0)))
        .expect("add West");
    map.add_node(Node::corner("c1", GridPoint::new(2, 0)))
        .expect("add c1");
    map.add_node(Node::corner("c2", GridPoint::new(4, 0)))
        .expect("add c2");
    map.add_node(Node::station("East", GridPoint::new(6, 0)))
        .expect("add East");
    map.add_track("West", "c1", LineColor::Blue)
        .expect("lay West-c1");
    map.add_track("c1", "c2", LineColor::Blue).expect("lay c1-c2");
    map.add_track("c2", "East", LineColor::Blue)
        .expect("lay c2-East");
    map
}

/// Five stations where the geometric shortcut crosses a fare zone.
///
/// The blue line runs Aldgate (0,0) - Temple (3,0) - Monument (6,0) with
/// Temple in zone 2; the red line detours Aldgate - Angel (0,4) -
/// Barbican (6,4) - Monument entirely inside zone 1. Aldgate to Monument is
/// 6.0 long but 4 fare units via Temple, and 14.0 long but 3 fare units the
/// red way, so the two metrics disagree about the best route.
#[allow(dead_code)]
pub fn zoned_ring_map() -> Map {
    let mut map = Map::new();
    map.add_node(Node::station("Aldgate", GridPoint::new(0, 0)).with_zone("1"))
        .expect("add Aldgate");
    map.add_node(Node::station("Temple", GridPoint::new(3, 0)).with_zone("2"))
        .expect("add Temple");
    map.add_node(Node::station("Monument", GridPoint::new(6, 0)).with_zone("1"))
        .expect("add Monument");
    map.add_node(Node::station("Angel", GridPoint::new(0, 4)).with_zone("1"))
        .expect("add Angel");
    map.add_node(Node::station("Barbican", GridPoint::new(6, 4)).with_zone("1"))
        .expect("add Barbican");

    map.add_track("Aldgate", "Temple", LineColor::Blue)
        .expect("lay Aldgate-Temple");
    map.add_track("Temple", "Monument", LineColor::Blue)
        .expect("lay Temple-Monument");
    map.add_track("Aldgate", "Angel", LineColor::Red)
        .expect("lay Aldgate-Angel");
    map.add_track("Angel", "Barbican", LineColor::Red)
        .expect("lay Angel-Barbican");
    map.add_track("Barbican", "Monument", LineColor::Red)
        .expect("lay Barbican-Monument");
    map
}
