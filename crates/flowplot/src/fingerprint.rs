//! Order-independent topology fingerprints used as layout cache keys.
//!
//! The hash is FNV-1a (64-bit) over the UTF-16 code units of
//! `sorted(node_ids).join('\0') + '\x01' + sorted(edge_keys).join('\0')`, rendered as 16 lowercase
//! hex digits. It is not collision resistant; a collision only costs a wrong cache hit.

use crate::graph::Edge;
use std::cmp::Ordering;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const ITEM_SEPARATOR: u16 = 0x00;
const SECTION_SEPARATOR: u16 = 0x01;

/// Fingerprint of a node id set and an edge key set (`source|target`).
///
/// Input order and repeated entries never affect the result.
pub fn fingerprint<N, E>(node_ids: &[N], edge_keys: &[E]) -> String
where
    N: AsRef<str>,
    E: AsRef<str>,
{
    let nodes = sorted_utf16(node_ids);
    let edges = sorted_utf16(edge_keys);

    let mut hasher = Fnv1a::new();
    hasher.write_joined(&nodes);
    hasher.write_unit(SECTION_SEPARATOR);
    hasher.write_joined(&edges);
    format!("{:016x}", hasher.finish())
}

/// Fingerprint of a graph snapshot, using [`Edge::key`] for every edge.
pub fn fingerprint_graph<N>(node_ids: &[N], edges: &[Edge]) -> String
where
    N: AsRef<str>,
{
    let keys = edges.iter().map(Edge::key).collect::<Vec<_>>();
    fingerprint(node_ids, &keys)
}

// Sort by UTF-16 code units, which is how the browser client orders strings. For BMP-only input
// this is identical to byte order. Duplicates collapse: the inputs are sets.
fn sorted_utf16<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    let mut out = items.iter().map(AsRef::as_ref).collect::<Vec<_>>();
    out.sort_by(|a, b| cmp_utf16(a, b));
    out.dedup();
    out
}

fn cmp_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET_BASIS)
    }

    fn write_unit(&mut self, unit: u16) {
        self.0 ^= u64::from(unit);
        self.0 = self.0.wrapping_mul(FNV_PRIME);
    }

    fn write_str(&mut self, s: &str) {
        for unit in s.encode_utf16() {
            self.write_unit(unit);
        }
    }

    fn write_joined(&mut self, items: &[&str]) {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.write_unit(ITEM_SEPARATOR);
            }
            self.write_str(item);
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
