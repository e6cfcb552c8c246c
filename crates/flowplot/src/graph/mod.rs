use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Node id → position. Iteration follows insertion order so that repeated layouts of the same
/// input enumerate (and therefore resolve collisions) identically.
pub type Positions = IndexMap<String, Point>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Raw weight as supplied by the caller. Use [`Edge::effective_weight`] when computing.
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: None,
        }
    }

    pub fn weighted(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: Some(weight),
        }
    }

    /// Missing, non-finite and non-positive weights all count as `1`.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }

    /// `source|target`, the edge key hashed into a graph fingerprint.
    pub fn key(&self) -> String {
        format!("{}|{}", self.source, self.target)
    }
}

// Transaction-count weights arrive from loosely typed API payloads (numbers, numeric strings,
// nulls). Anything that is not a JSON number is treated as absent.
fn lenient_weight<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
}

impl Transaction {
    pub fn new(hash: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Orientation {
    /// Tiers advance along x.
    #[default]
    #[serde(rename = "LR")]
    LeftRight,
    /// Tiers advance along y.
    #[serde(rename = "TB")]
    TopBottom,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftRight => "LR",
            Self::TopBottom => "TB",
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LR" => Ok(Self::LeftRight),
            "TB" => Ok(Self::TopBottom),
            _ => Err(Error::UnknownOrientation {
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout family selected in the UI. Also the namespace of a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Fcose,
    BiFlow,
    TxTimeline,
    Other(String),
}

impl LayoutMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fcose => "fcose",
            Self::BiFlow => "biflow",
            Self::TxTimeline => "tx-timeline",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for LayoutMode {
    fn from(value: &str) -> Self {
        match value {
            "fcose" => Self::Fcose,
            "biflow" => Self::BiFlow,
            "tx-timeline" => Self::TxTimeline,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayoutMode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LayoutMode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, LayoutMode, Orientation};

    #[test]
    fn effective_weight_falls_back_to_one() {
        assert_eq!(Edge::new("a", "b").effective_weight(), 1.0);
        assert_eq!(Edge::weighted("a", "b", 0.0).effective_weight(), 1.0);
        assert_eq!(Edge::weighted("a", "b", -3.0).effective_weight(), 1.0);
        assert_eq!(Edge::weighted("a", "b", f64::NAN).effective_weight(), 1.0);
        assert_eq!(Edge::weighted("a", "b", f64::INFINITY).effective_weight(), 1.0);
        assert_eq!(Edge::weighted("a", "b", 42.0).effective_weight(), 42.0);
    }

    #[test]
    fn non_numeric_weight_deserializes_as_absent() {
        let e: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","weight":"12"}"#).expect("edge");
        assert_eq!(e.weight, None);
        let e: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","weight":null}"#).expect("edge");
        assert_eq!(e.weight, None);
        let e: Edge = serde_json::from_str(r#"{"source":"a","target":"b"}"#).expect("edge");
        assert_eq!(e.weight, None);
        let e: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","weight":7}"#).expect("edge");
        assert_eq!(e.weight, Some(7.0));
    }

    #[test]
    fn orientation_parses_case_insensitively() {
        assert_eq!("lr".parse::<Orientation>().unwrap(), Orientation::LeftRight);
        assert_eq!(" TB ".parse::<Orientation>().unwrap(), Orientation::TopBottom);
        assert!("RL".parse::<Orientation>().is_err());
    }

    #[test]
    fn orientation_deserializes_like_from_str() {
        let o: Orientation = serde_json::from_str(r#""tb""#).expect("orientation");
        assert_eq!(o, Orientation::TopBottom);
        let o: Orientation = serde_json::from_str(r#""LR""#).expect("orientation");
        assert_eq!(o, Orientation::LeftRight);
        assert!(serde_json::from_str::<Orientation>(r#""RL""#).is_err());
        assert_eq!(serde_json::to_string(&Orientation::TopBottom).expect("json"), r#""TB""#);
    }

    #[test]
    fn layout_mode_round_trips_known_names() {
        for name in ["fcose", "biflow", "tx-timeline", "concentric"] {
            assert_eq!(LayoutMode::from(name).as_str(), name);
        }
        assert_eq!(LayoutMode::from("fcose"), LayoutMode::Fcose);
    }
}
