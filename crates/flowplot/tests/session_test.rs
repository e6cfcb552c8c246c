use flowplot::{
    BiFlowOptions, Edge, LayoutSession, Orientation, SessionConfig, Transaction, ViewContext,
    biflow_layout,
};

fn graph() -> (Vec<String>, Vec<Edge>) {
    let nodes = ["A", "B", "C"].map(String::from).to_vec();
    let edges = vec![Edge::new("B", "A"), Edge::new("A", "C")];
    (nodes, edges)
}

#[test]
fn session_serves_repeat_layouts_from_cache() {
    let (nodes, edges) = graph();
    let mut session = LayoutSession::default();

    let (first, hit) = session.biflow_with_hit(&nodes, &edges, "A", Orientation::LeftRight);
    assert!(!hit);
    let mut shuffled = nodes.clone();
    shuffled.reverse();
    let (second, hit) = session.biflow_with_hit(&shuffled, &edges, "A", Orientation::LeftRight);
    assert!(hit);
    for id in &nodes {
        assert_eq!(first[id], second[id]);
    }
}

#[test]
fn session_keys_cache_by_focus_and_orientation() {
    let (nodes, edges) = graph();
    let mut session = LayoutSession::default();

    let lr = session.biflow(&nodes, &edges, "A", Orientation::LeftRight);
    let (tb, hit) = session.biflow_with_hit(&nodes, &edges, "A", Orientation::TopBottom);
    assert!(!hit);
    assert_ne!(lr, tb);

    let (_, hit) = session.biflow_with_hit(&nodes, &edges, "B", Orientation::LeftRight);
    assert!(!hit);

    let lr_mode = LayoutSession::biflow_mode_key(Orientation::LeftRight);
    let tb_mode = LayoutSession::biflow_mode_key(Orientation::TopBottom);
    assert_eq!(lr_mode, "biflow:LR");
    assert_eq!(session.cache().len(&lr_mode), 2);
    assert_eq!(session.cache().len(&tb_mode), 1);
}

#[test]
fn session_weight_change_misses_cache() {
    let nodes = ["hub", "a", "z"].map(String::from).to_vec();
    let light = vec![Edge::weighted("hub", "a", 1.0), Edge::weighted("hub", "z", 1.0)];
    let heavy = vec![Edge::weighted("hub", "a", 1.0), Edge::weighted("hub", "z", 10_000.0)];
    let mut session = LayoutSession::default();

    let (before, _) = session.biflow_with_hit(&nodes, &light, "hub", Orientation::LeftRight);
    let (after, hit) = session.biflow_with_hit(&nodes, &heavy, "hub", Orientation::LeftRight);
    assert!(!hit);

    let fresh = biflow_layout(
        &nodes,
        &heavy,
        "hub",
        Orientation::LeftRight,
        &BiFlowOptions::default(),
    );
    assert_eq!(after, fresh);
    assert!(after["z"].y < after["a"].y);
    assert!(before["a"].y < before["z"].y);
}

#[test]
fn session_duplicate_edges_miss_cache() {
    let nodes = ["hub", "a", "z"].map(String::from).to_vec();
    let single = vec![Edge::new("hub", "a"), Edge::new("hub", "z")];
    let doubled = vec![Edge::new("hub", "a"), Edge::new("hub", "z"), Edge::new("hub", "z")];
    let mut session = LayoutSession::default();

    session.biflow(&nodes, &single, "hub", Orientation::LeftRight);
    let (_, hit) = session.biflow_with_hit(&nodes, &doubled, "hub", Orientation::LeftRight);
    assert!(!hit);
}

#[test]
fn session_weighted_edge_order_still_hits_cache() {
    let nodes = ["hub", "a", "z"].map(String::from).to_vec();
    let edges = vec![
        Edge::weighted("hub", "a", 3.0),
        Edge::weighted("hub", "z", 7.0),
        Edge::weighted("hub", "z", 2.0),
    ];
    let mut reordered = edges.clone();
    reordered.reverse();
    let mut session = LayoutSession::default();

    let first = session.biflow(&nodes, &edges, "hub", Orientation::LeftRight);
    let (second, hit) = session.biflow_with_hit(&nodes, &reordered, "hub", Orientation::LeftRight);
    assert!(hit);
    assert_eq!(first, second);
}

#[test]
fn session_option_change_invalidates_cache() {
    let (nodes, edges) = graph();
    let mut session = LayoutSession::default();
    session.biflow(&nodes, &edges, "A", Orientation::LeftRight);

    session.set_biflow_options(BiFlowOptions::default());
    assert!(!session.cache().is_empty());

    session.set_biflow_options(BiFlowOptions {
        tier_spacing: 100.0,
        ..Default::default()
    });
    assert!(session.cache().is_empty());
    let p = session.biflow(&nodes, &edges, "A", Orientation::LeftRight);
    assert_eq!(p["C"].x, 100.0);
}

#[test]
fn session_reset_clears_cache() {
    let (nodes, edges) = graph();
    let mut session = LayoutSession::default();
    session.biflow(&nodes, &edges, "A", Orientation::LeftRight);
    session.reset();
    assert!(session.cache().is_empty());
}

#[test]
fn session_config_respects_cache_capacity() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"cache":{"capacity":2},"biflow":{"collisionPasses":0}}"#)
            .expect("config");
    assert_eq!(config.biflow.collision_passes, 0);
    assert_eq!(config.biflow.tier_spacing, 360.0);

    let mut session = LayoutSession::new(config);
    let nodes = ["A", "B", "C", "D"].map(String::from).to_vec();
    for focus in ["A", "B", "C", "D"] {
        session.biflow(&nodes, &[], focus, Orientation::LeftRight);
    }
    let mode = LayoutSession::biflow_mode_key(Orientation::LeftRight);
    assert_eq!(session.cache().len(&mode), 2);
}

#[test]
fn session_initial_preset_only_for_lone_edge() {
    let session = LayoutSession::default();
    let nodes = ["from", "to"];
    let p = session
        .initial_preset(false, &nodes, &[Edge::new("from", "to")])
        .expect("preset");
    assert_eq!(p["from"].y, -210.0);
    assert_eq!(p["to"].y, 210.0);
    assert!(session.initial_preset(true, &nodes, &[Edge::new("from", "to")]).is_none());
    assert!(session.initial_preset(false, &nodes, &[]).is_none());
}

#[test]
fn session_timeline_and_plan_delegate() {
    let session = LayoutSession::default();
    let p = session.timeline(&[Transaction::new("h", "me", "you")], "me");
    assert_eq!(p.len(), 1);

    let view: ViewContext = serde_json::from_str(
        r#"{"pathViewActive":false,"nodeCount":9,"pathNodeOrderLength":0,"pathCount":0,"layoutMode":"fcose"}"#,
    )
    .expect("view");
    assert_eq!(session.plan(&view).as_str(), "mode-layout");
}
