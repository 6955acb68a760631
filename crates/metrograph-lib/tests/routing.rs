use metrograph_lib::{
    plan_route, Error, GridPoint, LineColor, Map, Metric, Node, RouteRequest, RouteSummary,
};

mod common;

use common::{corridor_map, zoned_ring_map};

#[test]
fn route_to_self_is_a_single_stop() {
    let map = zoned_ring_map();
    for metric in [Metric::Distance, Metric::Cost] {
        let route = map
            .optimized_route("Aldgate", "Aldgate", metric)
            .expect("trivial route");
        assert_eq!(route, vec!["Aldgate".to_string()]);
    }
}

#[test]
fn single_hop_route_has_euclidean_total() {
    let mut map = Map::new();
    map.add_node(Node::station("Aldgate", GridPoint::new(0, 0)))
        .expect("add Aldgate");
    map.add_node(Node::station("Monument", GridPoint::new(3, 4)))
        .expect("add Monument");
    map.add_track("Aldgate", "Monument", LineColor::Blue)
        .expect("lay track");

    let plan = plan_route(&map, &RouteRequest::distance("Aldgate", "Monument"))
        .expect("route exists");
    assert_eq!(
        plan.steps,
        vec!["Aldgate".to_string(), "Monument".to_string()]
    );
    assert_eq!(plan.total, 5.0);
    assert_eq!(plan.hop_count(), 1);
}

#[test]
fn metrics_disagree_when_the_shortcut_crosses_a_zone() {
    let map = zoned_ring_map();

    let by_distance = map
        .optimized_route("Aldgate", "Monument", Metric::Distance)
        .expect("distance route");
    assert_eq!(
        by_distance,
        vec![
            "Aldgate".to_string(),
            "Temple".to_string(),
            "Monument".to_string(),
        ],
        "distance should take the short blue line through zone 2",
    );

    let by_cost = map
        .optimized_route("Aldgate", "Monument", Metric::Cost)
        .expect("cost route");
    assert_eq!(
        by_cost,
        vec![
            "Aldgate".to_string(),
            "Angel".to_string(),
            "Barbican".to_string(),
            "Monument".to_string(),
        ],
        "cost should stay inside zone 1 on the red line",
    );

    let distance_plan = plan_route(&map, &RouteRequest::distance("Aldgate", "Monument"))
        .expect("distance plan");
    assert_eq!(distance_plan.total, 6.0);

    let cost_plan = plan_route(&map, &RouteRequest::cost("Aldgate", "Monument"))
        .expect("cost plan");
    assert_eq!(cost_plan.total, 3.0);
}

#[test]
fn routes_ride_through_corners() {
    let map = corridor_map();
    let route = map
        .optimized_route("West", "East", Metric::Distance)
        .expect("corridor route");
    assert_eq!(
        route,
        vec![
            "West".to_string(),
            "c1".to_string(),
            "c2".to_string(),
            "East".to_string(),
        ],
    );
}

#[test]
fn unreachable_goal_reports_route_not_found() {
    let mut map = corridor_map();
    map.add_node(Node::station("Island", GridPoint::new(20, 20)))
        .expect("add Island");

    let err = map
        .optimized_route("West", "Island", Metric::Distance)
        .expect_err("no track to Island");
    assert!(matches!(err, Error::RouteNotFound { start, goal } if start == "West" && goal == "Island"));
}

#[test]
fn unknown_endpoint_fails_with_suggestions() {
    let map = zoned_ring_map();
    let err = plan_route(&map, &RouteRequest::distance("Algate", "Monument"))
        .expect_err("typo must fail");
    assert!(matches!(err, Error::NodeNotFound { .. }));
    assert!(err.to_string().contains("Did you mean"));
}

#[test]
fn summary_resolves_zones_and_leg_lines() {
    let map = zoned_ring_map();
    let plan = plan_route(&map, &RouteRequest::cost("Aldgate", "Monument")).expect("cost plan");
    let summary = RouteSummary::from_plan(&map, &plan).expect("summary");

    assert_eq!(summary.hops, 3);
    assert_eq!(summary.total, 3.0);
    assert_eq!(summary.start.name, "Aldgate");
    assert_eq!(summary.goal.name, "Monument");
    assert_eq!(summary.goal.zone.as_deref(), Some("1"));

    let first = &summary.steps[0];
    assert!(first.line.is_none(), "no track leads into the first stop");
    assert!(first.leg_distance.is_none());

    let second = &summary.steps[1];
    assert_eq!(second.name, "Angel");
    assert_eq!(second.line, Some(LineColor::Red));
    assert_eq!(second.leg_distance, Some(4.0));
    assert_eq!(second.leg_fare, Some(1));
}

#[test]
fn summary_renders_plain_text() {
    let map = zoned_ring_map();
    let plan =
        plan_route(&map, &RouteRequest::distance("Aldgate", "Monument")).expect("distance plan");
    let text = RouteSummary::from_plan(&map, &plan)
        .expect("summary")
        .render_plain();

    assert!(text.contains("Route: Aldgate -> Monument"));
    assert!(text.contains("metric: distance"));
    assert!(text.contains("Temple"));
    assert!(text.contains("via blue"));
}

#[test]
fn summary_serializes_without_empty_fields() {
    let map = corridor_map();
    let plan = plan_route(&map, &RouteRequest::distance("West", "East")).expect("plan");
    let summary = RouteSummary::from_plan(&map, &plan).expect("summary");

    let json = serde_json::to_value(&summary).expect("serialize");
    let first = &json["steps"][0];
    assert_eq!(first["name"], "West");
    assert!(
        first.get("line").is_none(),
        "first step must omit the leg fields",
    );
    let second = &json["steps"][1];
    assert_eq!(second["line"], "blue");
}
