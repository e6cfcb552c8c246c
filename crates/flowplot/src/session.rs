//! A long-lived layout context: configuration plus the position cache.
//!
//! Create one per view (or per process), hand it to whatever drives layouts, and call
//! [`LayoutSession::reset`] to start from a cold cache.

use crate::algo::{BiFlowOptions, TimelineOptions, biflow, timeline};
use crate::cache::{CacheOptions, LayoutPositionCache};
use crate::fingerprint::fingerprint;
use crate::graph::{Edge, LayoutMode, Orientation, Positions, Transaction};
use crate::strategy::{self, LayoutStrategy, ViewContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Prefix for the synthetic edge key that records the focus; real keys never start with U+0002.
const FOCUS_KEY_PREFIX: &str = "\u{2}focus|";
// Prefix for the synthetic per-edge key listing the weights of every copy of that edge.
const WEIGHT_KEY_PREFIX: &str = "\u{2}w|";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub cache: CacheOptions,
    pub biflow: BiFlowOptions,
    pub timeline: TimelineOptions,
}

#[derive(Debug, Clone)]
pub struct LayoutSession {
    config: SessionConfig,
    cache: LayoutPositionCache,
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl LayoutSession {
    pub fn new(config: SessionConfig) -> Self {
        let cache = LayoutPositionCache::from_options(&config.cache);
        Self { config, cache }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cache(&self) -> &LayoutPositionCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut LayoutPositionCache {
        &mut self.cache
    }

    /// Replaces the BiFlow options. Cached layouts were computed with the old options, so the
    /// cache is cleared when they differ.
    pub fn set_biflow_options(&mut self, opts: BiFlowOptions) {
        if self.config.biflow != opts {
            self.config.biflow = opts;
            self.cache.clear();
            tracing::debug!("biflow options changed; layout cache cleared");
        }
    }

    pub fn set_timeline_options(&mut self, opts: TimelineOptions) {
        self.config.timeline = opts;
    }

    /// Drops all cached layouts.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Cache namespace for BiFlow layouts in `orientation`.
    pub fn biflow_mode_key(orientation: Orientation) -> String {
        format!("{}:{}", LayoutMode::BiFlow.as_str(), orientation.as_str())
    }

    /// Cache key for a BiFlow layout: the topology fingerprint extended with the resolved focus
    /// and the effective weight of every edge, duplicates included.
    pub fn biflow_fingerprint<N>(nodes: &[N], edges: &[Edge], focus: &str) -> String
    where
        N: AsRef<str>,
    {
        let focus = resolved_focus(nodes, focus).unwrap_or_default();

        let mut weights: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        for edge in edges {
            weights
                .entry(edge.key())
                .or_default()
                .push(edge.effective_weight().to_bits());
        }

        let mut keys = Vec::with_capacity(weights.len() * 2 + 1);
        for (key, mut bits) in weights {
            bits.sort_unstable();
            let bits = bits
                .iter()
                .map(|b| format!("{b:016x}"))
                .collect::<Vec<_>>()
                .join(",");
            keys.push(format!("{WEIGHT_KEY_PREFIX}{key}|{bits}"));
            keys.push(key);
        }
        keys.push(format!("{FOCUS_KEY_PREFIX}{focus}"));
        fingerprint(nodes, &keys)
    }

    /// BiFlow positions, served from the cache when this topology, weighting, focus and
    /// orientation were laid out before.
    pub fn biflow<N: AsRef<str>>(
        &mut self,
        nodes: &[N],
        edges: &[Edge],
        focus: &str,
        orientation: Orientation,
    ) -> Positions {
        self.biflow_with_hit(nodes, edges, focus, orientation).0
    }

    /// Like [`LayoutSession::biflow`], also reporting whether the cache answered.
    pub fn biflow_with_hit<N: AsRef<str>>(
        &mut self,
        nodes: &[N],
        edges: &[Edge],
        focus: &str,
        orientation: Orientation,
    ) -> (Positions, bool) {
        if nodes.is_empty() {
            return (Positions::default(), false);
        }

        let mode = Self::biflow_mode_key(orientation);
        let key = Self::biflow_fingerprint(nodes, edges, focus);
        if let Some(hit) = self.cache.get(&mode, &key) {
            return (hit, true);
        }

        let positions = biflow::layout(nodes, edges, focus, orientation, &self.config.biflow);
        self.cache.save(&mode, &key, &positions);
        (positions, false)
    }

    /// Timeline positions. Not cached: the grid depends on transaction order, which a
    /// fingerprint ignores.
    pub fn timeline(&self, transactions: &[Transaction], focus: &str) -> Positions {
        timeline::layout(transactions, focus, &self.config.timeline)
    }

    pub fn plan(&self, view: &ViewContext) -> LayoutStrategy {
        view.strategy()
    }

    /// Positions for a graph's first render when it is a lone two-node edge, `None` otherwise.
    pub fn initial_preset<N: AsRef<str>>(
        &self,
        path_view_active: bool,
        nodes: &[N],
        edges: &[Edge],
    ) -> Option<Positions> {
        if !strategy::use_two_node_preset(path_view_active, nodes.len(), edges.len()) {
            return None;
        }
        Some(strategy::tiny_preset(nodes[0].as_ref(), nodes[1].as_ref()))
    }
}

fn resolved_focus<'a, N: AsRef<str>>(nodes: &'a [N], focus: &'a str) -> Option<&'a str> {
    if nodes.iter().any(|n| n.as_ref() == focus) {
        return Some(focus);
    }
    nodes.first().map(AsRef::as_ref)
}
