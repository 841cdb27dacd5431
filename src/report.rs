//! Output of ranked results.
//!
//! Writes the best configurations as JSONL, one object per line, and renders
//! a single configuration as a plain-text board.

use std::io::{self, Write};

use serde::Serialize;

use crate::board::entity::{Entity, Vehicle};
use crate::board::grid::SLOT_COUNT;
use crate::eval::Metrics;
use crate::rank::Ranking;

/// One ranked configuration with entity names resolved.
#[derive(Debug, Serialize)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    /// Entity name in each slot, row-major.
    pub board: [&'a str; SLOT_COUNT],
    pub hidden: &'a str,
    #[serde(flatten)]
    pub metrics: &'a Metrics,
}

impl<'a> RankedEntry<'a> {
    pub fn new(rank: usize, metrics: &'a Metrics, pool: &'a [Entity]) -> Self {
        let board = metrics
            .assignment
            .map(|idx| pool.get(idx as usize).map_or("?", |e| e.name.as_str()));
        RankedEntry {
            rank,
            board,
            hidden: board.get(metrics.picked_slot as usize).copied().unwrap_or("?"),
            metrics,
        }
    }
}

/// Writes the first `top` ranked results as JSONL.
pub fn write_jsonl<W: Write>(
    ranking: &Ranking,
    pool: &[Entity],
    top: usize,
    out: &mut W,
) -> io::Result<()> {
    for (rank, metrics) in ranking.iter().take(top).enumerate() {
        serde_json::to_writer(&mut *out, &RankedEntry::new(rank, metrics, pool))?;
        writeln!(out)?;
    }
    out.flush()
}

/// Renders a configuration as text. The hidden slot is shown in brackets,
/// and the vehicles are drawn at their off-grid positions.
pub fn render_board(metrics: &Metrics, pool: &[Entity]) -> String {
    let names: [String; SLOT_COUNT] = std::array::from_fn(|slot| {
        let name = pool
            .get(metrics.assignment[slot] as usize)
            .map_or("?", |e| e.name.as_str());
        if slot == metrics.picked_slot as usize {
            format!("[{}]", name)
        } else {
            name.to_string()
        }
    });
    let width = names
        .iter()
        .map(String::len)
        .chain(Vehicle::ALL.iter().map(|v| v.entity().name.len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:w$}  {:w$}  {:w$}  {:w$}  {:w$}\n",
        "", "", "", Vehicle::Plane.entity().name, "", w = width
    );
    for row in 0..3 {
        let left = if row == 0 { Vehicle::Car.entity().name.as_str() } else { "" };
        let right = if row == 2 { Vehicle::Boat.entity().name.as_str() } else { "" };
        out.push_str(&format!(
            "{:w$}  {:w$}  {:w$}  {:w$}  {}\n",
            left,
            names[row * 3],
            names[row * 3 + 1],
            names[row * 3 + 2],
            right,
            w = width
        ));
    }
    out.push_str(&format!(
        "total={} unique={} vehicle={} miss={} components={} vehicle_components={}\n",
        metrics.total,
        metrics.unique,
        metrics.vehicle,
        metrics.miss,
        metrics.component_count,
        metrics.vehicle_component_count
    ));
    out
}
