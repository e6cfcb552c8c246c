//! Grid-bucketed overlap removal.
//!
//! Points are bucketed into square cells of side `min_distance`, so any pair closer than
//! `min_distance` lives in the same or an adjacent cell. Each pass is O(n) for evenly spread
//! input instead of the naive O(n²).

use crate::graph::{Point, Positions};
use rustc_hash::FxHashMap;

/// Per-pass damping decay used by [`resolve_collision_passes`].
pub const DAMPING_DECAY: f64 = 0.2;

type Cell = (i64, i64);

/// One separation pass over `positions`, in place.
///
/// Every pair closer than `min_distance` is pushed apart symmetrically along the line joining
/// them by `(min_distance - distance) / 2 * damping` each. Coincident points are split along
/// the x axis. Returns the number of pairs that were moved.
pub fn resolve_collisions(positions: &mut Positions, min_distance: f64, damping: f64) -> usize {
    if positions.len() < 2 || !(min_distance.is_finite() && min_distance > 0.0) {
        return 0;
    }

    let ids = positions.keys().cloned().collect::<Vec<_>>();
    let mut points = positions.values().copied().collect::<Vec<_>>();

    // Buckets are built from the positions at the start of the pass; distances below always use
    // the live (already nudged) coordinates.
    let cells = points
        .iter()
        .map(|p| cell_of(p, min_distance))
        .collect::<Vec<_>>();
    let mut grid: FxHashMap<Cell, Vec<usize>> = FxHashMap::default();
    for (idx, cell) in cells.iter().enumerate() {
        grid.entry(*cell).or_default().push(idx);
    }

    let min_sq = min_distance * min_distance;
    let mut moved = 0usize;
    for a in 0..points.len() {
        let (cx, cy) = cells[a];
        // Cells saturate at the i64 range for huge coordinates.
        for gx in cx.saturating_sub(1)..=cx.saturating_add(1) {
            for gy in cy.saturating_sub(1)..=cy.saturating_add(1) {
                let Some(bucket) = grid.get(&(gx, gy)) else {
                    continue;
                };
                for &b in bucket {
                    if ids[a] >= ids[b] {
                        continue;
                    }
                    if separate(&mut points, a, b, min_distance, min_sq, damping) {
                        moved += 1;
                    }
                }
            }
        }
    }

    for (slot, p) in positions.values_mut().zip(points) {
        *slot = p;
    }
    moved
}

/// Runs `passes` rounds of [`resolve_collisions`] with damping `1.0 - pass * 0.2`.
///
/// Damping is floored at zero; passes past the fifth therefore leave positions untouched.
pub fn resolve_collision_passes(positions: &mut Positions, min_distance: f64, passes: usize) {
    for pass in 0..passes {
        let damping = (1.0 - pass as f64 * DAMPING_DECAY).max(0.0);
        if damping <= 0.0 {
            break;
        }
        let moved = resolve_collisions(positions, min_distance, damping);
        tracing::trace!(pass, damping, moved, "collision pass");
    }
}

fn cell_of(p: &Point, size: f64) -> Cell {
    ((p.x / size).floor() as i64, (p.y / size).floor() as i64)
}

fn separate(
    points: &mut [Point],
    a: usize,
    b: usize,
    min_distance: f64,
    min_sq: f64,
    damping: f64,
) -> bool {
    let dx = points[b].x - points[a].x;
    let dy = points[b].y - points[a].y;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq.is_nan() || dist_sq >= min_sq {
        return false;
    }

    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        let push = (min_distance - dist) / 2.0 * damping;
        let (ux, uy) = (dx / dist, dy / dist);
        points[a].x -= ux * push;
        points[a].y -= uy * push;
        points[b].x += ux * push;
        points[b].y += uy * push;
    } else {
        let push = min_distance / 2.0 * damping;
        points[a].x -= push;
        points[b].x += push;
    }
    true
}
