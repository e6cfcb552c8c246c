#![forbid(unsafe_code)]

//! Deterministic layout positioning for address/transaction flow graphs.
//!
//! `flowplot` turns a snapshot of nodes and edges into 2D coordinates without touching any
//! rendering surface. It provides:
//!
//! - [`algo::biflow`]: tiered layout radiating from a focus node along edge direction,
//! - [`algo::timeline`]: a two-lane chronological grid for one address's transactions,
//! - [`strategy`]: the rules deciding which layout a view should run,
//! - [`cache`] and [`fingerprint`]: a per-mode LRU keyed by an order-independent topology hash.
//!
//! Every layout is a pure function of its inputs. [`LayoutSession`] bundles the configuration
//! with an explicitly owned cache for callers that want memoization.

pub mod algo;
pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod request;
pub mod session;
pub mod strategy;

pub use algo::biflow::TierAssignment;
pub use algo::{BiFlowOptions, TimelineOptions};
pub use cache::{CacheOptions, LayoutPositionCache};
pub use error::{Error, Result};
pub use fingerprint::{fingerprint, fingerprint_graph};
pub use graph::{Edge, LayoutMode, Orientation, Point, Positions, Transaction};
pub use request::{LayoutRequest, LayoutResponse};
pub use session::{LayoutSession, SessionConfig};
pub use strategy::{LayoutStrategy, ViewContext};

/// BiFlow layout with the given options. See [`algo::biflow::layout`].
pub fn biflow_layout<N: AsRef<str>>(
    nodes: &[N],
    edges: &[Edge],
    focus: &str,
    orientation: Orientation,
    opts: &BiFlowOptions,
) -> Positions {
    algo::biflow::layout(nodes, edges, focus, orientation, opts)
}

/// Timeline layout with default options. See [`algo::timeline::layout`].
pub fn timeline_layout(transactions: &[Transaction], focus: &str) -> Positions {
    algo::timeline::layout(transactions, focus, &TimelineOptions::default())
}
