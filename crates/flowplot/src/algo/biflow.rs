//! Tiered bidirectional-flow layout anchored on a focus node.
//!
//! Nodes reachable by following outgoing edges from the focus are placed on positive tiers,
//! nodes reaching the focus on negative tiers, and everything else is parked on a separate row.
//! Within a tier, heavier nodes (by log-compressed incident edge weight) come first along the
//! row; equal weights fall back to id order so the same snapshot always lays out identically.

use crate::algo::BiFlowOptions;
use crate::algo::collision::resolve_collision_passes;
use crate::graph::{Edge, Orientation, Point, Positions};
use indexmap::IndexSet;
use std::collections::{BTreeMap, VecDeque};

/// Node ids grouped by signed tier, each group already in placement order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierAssignment {
    /// The resolved focus (the first node when the requested focus is absent).
    pub focus: Option<String>,
    pub tiers: BTreeMap<i64, Vec<String>>,
    /// Nodes with no directed path to or from the focus.
    pub disconnected: Vec<String>,
}

impl TierAssignment {
    pub fn tier_of(&self, id: &str) -> Option<i64> {
        self.tiers
            .iter()
            .find(|(_, ids)| ids.iter().any(|n| n == id))
            .map(|(tier, _)| *tier)
    }
}

struct FlowGraph<'a> {
    ids: IndexSet<&'a str>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
    weight: Vec<f64>,
}

impl<'a> FlowGraph<'a> {
    fn build<N: AsRef<str>>(nodes: &'a [N], edges: &[Edge]) -> Self {
        let ids = nodes.iter().map(AsRef::as_ref).collect::<IndexSet<&str>>();
        let n = ids.len();
        let mut outgoing = vec![Vec::new(); n];
        let mut incoming = vec![Vec::new(); n];
        let mut weight = vec![0.0; n];

        for e in edges {
            let (Some(s), Some(t)) = (
                ids.get_index_of(e.source.as_str()),
                ids.get_index_of(e.target.as_str()),
            ) else {
                continue;
            };
            outgoing[s].push(t);
            incoming[t].push(s);
            let w = (1.0 + e.effective_weight()).log10();
            weight[s] += w;
            weight[t] += w;
        }

        Self {
            ids,
            outgoing,
            incoming,
            weight,
        }
    }

    fn id(&self, idx: usize) -> &'a str {
        self.ids[idx]
    }

    /// Group indices by tier; each group is sorted by weight desc, then id asc.
    fn assign(&self, focus: usize) -> (BTreeMap<i64, Vec<usize>>, Vec<usize>) {
        let out_depth = bfs(&self.outgoing, focus);
        let in_depth = bfs(&self.incoming, focus);

        let mut tiers: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut disconnected = Vec::new();
        tiers.entry(0).or_default().push(focus);

        for idx in 0..self.ids.len() {
            if idx == focus {
                continue;
            }
            match tier_for(out_depth[idx], in_depth[idx]) {
                Some(tier) => tiers.entry(tier).or_default().push(idx),
                None => disconnected.push(idx),
            }
        }

        for group in tiers.values_mut() {
            self.sort_group(group);
        }
        self.sort_group(&mut disconnected);
        (tiers, disconnected)
    }

    fn sort_group(&self, group: &mut [usize]) {
        group.sort_by(|&a, &b| {
            self.weight[b]
                .total_cmp(&self.weight[a])
                .then_with(|| self.id(a).cmp(self.id(b)))
        });
    }
}

fn tier_for(out_depth: Option<usize>, in_depth: Option<usize>) -> Option<i64> {
    match (out_depth, in_depth) {
        (Some(o), i) if o > 0 && i.is_none_or(|i| o <= i) => Some(o as i64),
        (o, Some(i)) if i > 0 && o.is_none_or(|o| i < o) => Some(-(i as i64)),
        _ => None,
    }
}

fn bfs(adjacency: &[Vec<usize>], start: usize) -> Vec<Option<usize>> {
    let mut depth = vec![None; adjacency.len()];
    depth[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(v) = queue.pop_front() {
        let next = depth[v].unwrap_or(0) + 1;
        for &w in &adjacency[v] {
            if depth[w].is_none() {
                depth[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    depth
}

fn resolve_focus(ids: &IndexSet<&str>, focus: &str) -> usize {
    ids.get_index_of(focus).unwrap_or(0)
}

/// Tier assignment without coordinates.
pub fn tiers<N: AsRef<str>>(nodes: &[N], edges: &[Edge], focus: &str) -> TierAssignment {
    let graph = FlowGraph::build(nodes, edges);
    if graph.ids.is_empty() {
        return TierAssignment::default();
    }
    let focus = resolve_focus(&graph.ids, focus);
    let (tiers, disconnected) = graph.assign(focus);
    let names = |group: Vec<usize>| {
        group
            .into_iter()
            .map(|idx| graph.id(idx).to_string())
            .collect::<Vec<_>>()
    };
    TierAssignment {
        focus: Some(graph.id(focus).to_string()),
        tiers: tiers
            .into_iter()
            .map(|(tier, group)| (tier, names(group)))
            .collect(),
        disconnected: names(disconnected),
    }
}

/// Computes BiFlow positions. Never fails: missing focus, dangling edges and bad weights all
/// degrade to documented defaults.
pub fn layout<N: AsRef<str>>(
    nodes: &[N],
    edges: &[Edge],
    focus: &str,
    orientation: Orientation,
    opts: &BiFlowOptions,
) -> Positions {
    let graph = FlowGraph::build(nodes, edges);
    if graph.ids.is_empty() {
        return Positions::default();
    }

    let focus_idx = resolve_focus(&graph.ids, focus);
    let (tiers, disconnected) = graph.assign(focus_idx);

    let mut positions = Positions::with_capacity(graph.ids.len());
    for (&tier, group) in &tiers {
        let primary = tier as f64 * opts.tier_spacing;
        for (i, secondary) in row_offsets(group.len(), opts.node_spacing).enumerate() {
            let p = match orientation {
                Orientation::LeftRight => Point::new(primary, secondary),
                Orientation::TopBottom => Point::new(secondary, primary),
            };
            positions.insert(graph.id(group[i]).to_string(), p);
        }
    }
    for (i, x) in row_offsets(disconnected.len(), opts.node_spacing).enumerate() {
        positions.insert(
            graph.id(disconnected[i]).to_string(),
            Point::new(x, opts.parking_offset),
        );
    }

    tracing::debug!(
        nodes = graph.ids.len(),
        edges = edges.len(),
        focus = graph.id(focus_idx),
        orientation = orientation.as_str(),
        tiers = tiers.len(),
        disconnected = disconnected.len(),
        "biflow layout"
    );

    resolve_collision_passes(&mut positions, opts.min_node_distance, opts.collision_passes);
    positions
}

/// Offsets of `k` items centred on zero, `spacing` apart.
fn row_offsets(k: usize, spacing: f64) -> impl Iterator<Item = f64> {
    let mid = (k as f64 - 1.0) / 2.0;
    (0..k).map(move |i| (i as f64 - mid) * spacing)
}

#[cfg(test)]
mod tests {
    use super::{bfs, row_offsets, tier_for};

    #[test]
    fn ties_between_directions_prefer_outgoing() {
        assert_eq!(tier_for(Some(2), Some(2)), Some(2));
        assert_eq!(tier_for(Some(3), Some(1)), Some(-1));
        assert_eq!(tier_for(Some(1), None), Some(1));
        assert_eq!(tier_for(None, Some(4)), Some(-4));
        assert_eq!(tier_for(None, None), None);
    }

    #[test]
    fn bfs_records_shortest_hop_counts() {
        // 0 -> 1 -> 2, 0 -> 2, 3 isolated
        let adj = vec![vec![1, 2], vec![2], vec![], vec![]];
        assert_eq!(bfs(&adj, 0), vec![Some(0), Some(1), Some(1), None]);
    }

    #[test]
    fn row_offsets_are_centred() {
        assert_eq!(row_offsets(1, 120.0).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(
            row_offsets(3, 120.0).collect::<Vec<_>>(),
            vec![-120.0, 0.0, 120.0]
        );
        assert_eq!(row_offsets(2, 100.0).collect::<Vec<_>>(), vec![-50.0, 50.0]);
    }
}
