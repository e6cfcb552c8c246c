//! Two-lane chronological grid for one address's transaction history.
//!
//! Transactions fill rows left to right in input order. Each row has an incoming lane (above)
//! and an outgoing lane (below); the finished grid is centred on the origin.

use crate::algo::TimelineOptions;
use crate::graph::{Point, Positions, Transaction};

/// Columns per row for `n` transactions: `round(sqrt(n) * factor)` clamped to the row bounds.
pub fn per_row(n: usize, opts: &TimelineOptions) -> usize {
    let lo = opts.min_per_row.max(1);
    let hi = opts.max_per_row.max(lo);
    let raw = ((n as f64).sqrt() * opts.row_width_factor).round();
    // `as` saturates; NaN from a bad factor becomes 0 and is clamped up.
    (raw as usize).clamp(lo, hi)
}

/// Positions keyed by transaction hash. A hash repeated in the input keeps the position of its
/// last occurrence.
pub fn layout(transactions: &[Transaction], focus: &str, opts: &TimelineOptions) -> Positions {
    if transactions.is_empty() {
        return Positions::default();
    }

    let per_row = per_row(transactions.len(), opts);
    let mut positions = Positions::with_capacity(transactions.len());
    let mut incoming_count = 0usize;
    for (i, tx) in transactions.iter().enumerate() {
        let row = (i / per_row) as f64;
        let col = (i % per_row) as f64;
        let incoming = tx.to == focus;
        if incoming {
            incoming_count += 1;
        }
        let lane = if incoming {
            -opts.lane_offset
        } else {
            opts.lane_offset
        };
        positions.insert(
            tx.hash.clone(),
            Point::new(col * opts.column_width, row * opts.row_height + lane),
        );
    }

    recenter(&mut positions);

    tracing::debug!(
        transactions = transactions.len(),
        per_row,
        incoming = incoming_count,
        "tx timeline layout"
    );
    positions
}

fn recenter(positions: &mut Positions) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in positions.values() {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return;
    }

    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    for p in positions.values_mut() {
        p.x -= cx;
        p.y -= cy;
    }
}
