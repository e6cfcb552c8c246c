//! JSON request/response envelope for driving a [`LayoutSession`] from outside Rust.

use crate::error::Result;
use crate::fingerprint::fingerprint_graph;
use crate::graph::{Edge, Orientation, Positions, Transaction};
use crate::session::LayoutSession;
use crate::strategy::{LayoutStrategy, ViewContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutRequest {
    Biflow {
        nodes: Vec<String>,
        #[serde(default)]
        edges: Vec<Edge>,
        #[serde(default)]
        focus: String,
        #[serde(default)]
        orientation: Orientation,
    },
    Timeline {
        transactions: Vec<Transaction>,
        focus: String,
    },
    Strategy(ViewContext),
    #[serde(rename_all = "camelCase")]
    InitialPreset {
        #[serde(default)]
        path_view_active: bool,
        nodes: Vec<String>,
        #[serde(default)]
        edges: Vec<Edge>,
    },
    Fingerprint {
        nodes: Vec<String>,
        #[serde(default)]
        edges: Vec<Edge>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutResponse {
    Positions { positions: Positions, cached: bool },
    Strategy { strategy: LayoutStrategy },
    /// `positions` is `None` when the graph does not qualify for the preset.
    Preset { positions: Option<Positions> },
    Fingerprint { fingerprint: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<LayoutRequest>),
    Many(Vec<LayoutRequest>),
}

impl LayoutRequest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Accepts a single request object or an array of them.
    pub fn batch_from_json(text: &str) -> Result<Vec<Self>> {
        Ok(match serde_json::from_str::<OneOrMany>(text)? {
            OneOrMany::One(req) => vec![*req],
            OneOrMany::Many(reqs) => reqs,
        })
    }

    pub fn execute(&self, session: &mut LayoutSession) -> LayoutResponse {
        match self {
            Self::Biflow {
                nodes,
                edges,
                focus,
                orientation,
            } => {
                let (positions, cached) =
                    session.biflow_with_hit(nodes, edges, focus, *orientation);
                LayoutResponse::Positions { positions, cached }
            }
            Self::Timeline {
                transactions,
                focus,
            } => LayoutResponse::Positions {
                positions: session.timeline(transactions, focus),
                cached: false,
            },
            Self::Strategy(view) => LayoutResponse::Strategy {
                strategy: session.plan(view),
            },
            Self::InitialPreset {
                path_view_active,
                nodes,
                edges,
            } => LayoutResponse::Preset {
                positions: session.initial_preset(*path_view_active, nodes, edges),
            },
            Self::Fingerprint { nodes, edges } => LayoutResponse::Fingerprint {
                fingerprint: fingerprint_graph(nodes, edges),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutRequest, LayoutResponse};
    use crate::graph::{LayoutMode, Orientation};
    use crate::session::LayoutSession;
    use crate::strategy::LayoutStrategy;

    #[test]
    fn biflow_request_defaults_orientation_and_edges() {
        let req = LayoutRequest::from_json(r#"{"kind":"biflow","nodes":["a"]}"#).expect("req");
        let LayoutRequest::Biflow {
            edges, orientation, ..
        } = req
        else {
            panic!("expected biflow request");
        };
        assert!(edges.is_empty());
        assert_eq!(orientation, Orientation::LeftRight);
    }

    #[test]
    fn biflow_request_accepts_lowercase_orientation() {
        let req =
            LayoutRequest::from_json(r#"{"kind":"biflow","nodes":["a"],"orientation":"tb"}"#)
                .expect("req");
        let LayoutRequest::Biflow { orientation, .. } = req else {
            panic!("expected biflow request");
        };
        assert_eq!(orientation, Orientation::TopBottom);
    }

    #[test]
    fn strategy_request_carries_view_context() {
        let req = LayoutRequest::from_json(
            r#"{"kind":"strategy","pathViewActive":true,"nodeCount":2,
                "pathNodeOrderLength":2,"pathCount":2,"layoutMode":"fcose"}"#,
        )
        .expect("req");
        let LayoutRequest::Strategy(view) = &req else {
            panic!("expected strategy request");
        };
        assert_eq!(view.layout_mode, LayoutMode::Fcose);

        let mut session = LayoutSession::default();
        assert_eq!(
            req.execute(&mut session),
            LayoutResponse::Strategy {
                strategy: LayoutStrategy::PathFcose
            }
        );
    }

    #[test]
    fn batch_accepts_object_or_array() {
        let one = LayoutRequest::batch_from_json(r#"{"kind":"fingerprint","nodes":[]}"#)
            .expect("single");
        assert_eq!(one.len(), 1);
        let many = LayoutRequest::batch_from_json(
            r#"[{"kind":"fingerprint","nodes":["a"]},{"kind":"fingerprint","nodes":["b"]}]"#,
        )
        .expect("array");
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn unknown_kind_is_an_invalid_request() {
        let err = LayoutRequest::from_json(r#"{"kind":"dagre","nodes":[]}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid layout request"));
    }

    #[test]
    fn repeated_biflow_request_is_served_from_cache() {
        let req = LayoutRequest::from_json(
            r#"{"kind":"biflow","nodes":["a","b"],"edges":[{"source":"a","target":"b"}],
                "focus":"a","orientation":"TB"}"#,
        )
        .expect("req");
        let mut session = LayoutSession::default();
        let first = req.execute(&mut session);
        let second = req.execute(&mut session);
        let (
            LayoutResponse::Positions {
                positions: p1,
                cached: c1,
            },
            LayoutResponse::Positions {
                positions: p2,
                cached: c2,
            },
        ) = (first, second)
        else {
            panic!("expected positions");
        };
        assert!(!c1);
        assert!(c2);
        assert_eq!(p1, p2);
    }
}
