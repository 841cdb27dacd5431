//! Exhaustive sweep over every configuration.
//!
//! A configuration is a bijection of the nine pool entities onto the nine
//! slots plus a choice of hidden slot: 9! × 9 = 3,265,920 in total. One
//! [`Grid`] is reused for the whole sweep (per worker when sharded); each
//! permutation overwrites all nine slots and then the nine picks are scored
//! in turn.
//!
//! Hosts drive long sweeps through a cooperative contract: every
//! `yield_every` configurations the sweep reports progress and checks for
//! cancellation. A cancelled sweep is not an error; whatever was produced
//! so far can still be ranked.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::board::entity::Entity;
use crate::board::grid::{Grid, SLOT_COUNT};
use crate::error::SweepError;
use crate::eval::{score_grid, Metrics};

use super::permute::{factorial, is_permutation, Permutations, IDENTITY};

/// Total configurations in a full sweep.
pub const CONFIGURATION_COUNT: u64 = factorial(SLOT_COUNT) * SLOT_COUNT as u64;

/// Configurations in one shard (slot 0 fixed to a single pool entity).
pub const SHARD_CONFIGURATION_COUNT: u64 = factorial(SLOT_COUNT - 1) * SLOT_COUNT as u64;

/// Default number of configurations between yield points.
pub const DEFAULT_YIELD_EVERY: u64 = 65_536;

/// Knobs for a sweep.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Configurations between progress reports and cancellation checks.
    /// Zero disables yielding.
    pub yield_every: u64,
    /// Worker threads for [`enumerate_parallel`].
    pub threads: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            yield_every: DEFAULT_YIELD_EVERY,
            threads: 1,
        }
    }
}

/// Progress report handed to the host at each yield point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepProgress {
    pub produced: u64,
    pub total: u64,
    pub elapsed: Duration,
}

impl SweepProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.produced as f64 / self.total as f64
    }
}

/// Outcome of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub produced: u64,
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Checks that a pool holds nine distinct, placeable entities.
pub fn validate_pool(pool: &[Entity]) -> Result<&[Entity; SLOT_COUNT], SweepError> {
    let pool: &[Entity; SLOT_COUNT] = pool
        .try_into()
        .map_err(|_| SweepError::InvalidPoolSize(pool.len()))?;

    for (i, entity) in pool.iter().enumerate() {
        if entity.is_vehicle() {
            return Err(SweepError::VehicleInPool(entity.name.clone()));
        }
        if pool[..i].iter().any(|other| other.name == entity.name) {
            return Err(SweepError::DuplicateEntity(entity.name.clone()));
        }
    }
    Ok(pool)
}

/// Writes a permutation into the grid: slot `s` receives `pool[perm[s]]`.
#[inline]
fn populate<'a>(grid: &mut Grid<'a>, pool: &'a [Entity; SLOT_COUNT], perm: &[u8; SLOT_COUNT]) {
    for (slot, &idx) in perm.iter().enumerate() {
        grid.set_slot(slot, &pool[idx as usize]);
    }
}

/// Scores a single configuration.
///
/// `assignment[slot]` is the pool index placed in `slot`; `picked_slot` is
/// the hidden slot.
pub fn score_configuration(
    pool: &[Entity],
    assignment: &[usize],
    picked_slot: usize,
) -> Result<Metrics, SweepError> {
    let pool = validate_pool(pool)?;
    if !is_permutation(assignment) {
        return Err(SweepError::InvalidAssignment(assignment.to_vec()));
    }
    if picked_slot >= SLOT_COUNT {
        return Err(SweepError::PickedSlotOutOfRange(picked_slot));
    }

    let mut perm = [0u8; SLOT_COUNT];
    for (slot, &idx) in assignment.iter().enumerate() {
        perm[slot] = idx as u8;
    }

    let mut grid = Grid::new();
    populate(&mut grid, pool, &perm);
    grid.pick(Some(picked_slot));
    Ok(score_grid(&grid).tag(perm, picked_slot as u8))
}

/// Runs a full sweep on the calling thread, handing every result to
/// `on_result`. Returns the number of configurations produced.
pub fn enumerate<F>(pool: &[Entity], on_result: F) -> Result<u64, SweepError>
where
    F: FnMut(Metrics),
{
    let opts = SweepOptions {
        yield_every: 0,
        ..SweepOptions::default()
    };
    let summary = enumerate_with(pool, &opts, None, on_result, |_| ControlFlow::Continue(()))?;
    Ok(summary.produced)
}

/// Runs a sweep on the calling thread with progress reporting and
/// cooperative cancellation.
///
/// Every `opts.yield_every` configurations the optional `stop` flag is
/// polled and `on_progress` is called; either can end the sweep early. A
/// sweep that has already produced every configuration is never reported
/// as cancelled.
pub fn enumerate_with<F, P>(
    pool: &[Entity],
    opts: &SweepOptions,
    stop: Option<&AtomicBool>,
    mut on_result: F,
    mut on_progress: P,
) -> Result<SweepSummary, SweepError>
where
    F: FnMut(Metrics),
    P: FnMut(SweepProgress) -> ControlFlow<()>,
{
    let pool = validate_pool(pool)?;
    let start = Instant::now();
    info!(
        event = "sweep_start",
        configurations = CONFIGURATION_COUNT,
        yield_every = opts.yield_every,
    );

    let mut grid = Grid::new();
    let mut produced = 0u64;

    'sweep: for perm in Permutations::new(IDENTITY) {
        populate(&mut grid, pool, &perm);
        for picked in 0..SLOT_COUNT {
            grid.pick(Some(picked));
            on_result(score_grid(&grid).tag(perm, picked as u8));
            produced += 1;

            if opts.yield_every != 0 && produced % opts.yield_every == 0 {
                if stop.is_some_and(|s| s.load(Ordering::Relaxed)) {
                    break 'sweep;
                }
                let progress = SweepProgress {
                    produced,
                    total: CONFIGURATION_COUNT,
                    elapsed: start.elapsed(),
                };
                if on_progress(progress).is_break() {
                    break 'sweep;
                }
            }
        }
    }

    let summary = SweepSummary {
        produced,
        cancelled: produced < CONFIGURATION_COUNT,
        elapsed: start.elapsed(),
    };
    info!(
        event = "sweep_end",
        produced = summary.produced,
        cancelled = summary.cancelled,
        elapsed_ms = summary.elapsed.as_millis() as u64,
    );
    Ok(summary)
}

/// Sweeps one shard: every configuration with `pool[lead]` in slot 0.
fn sweep_shard<P>(
    pool: &[Entity; SLOT_COUNT],
    lead: usize,
    yield_every: u64,
    stop: &AtomicBool,
    produced: &AtomicU64,
    start: Instant,
    on_progress: &P,
) -> Vec<Metrics>
where
    P: Fn(SweepProgress) + Sync,
{
    let mut items = IDENTITY;
    items.swap(0, lead);

    let mut grid = Grid::new();
    let mut out = Vec::with_capacity(SHARD_CONFIGURATION_COUNT as usize);
    let mut since_yield = 0u64;

    'shard: for perm in Permutations::with_fixed_prefix(items, 1) {
        populate(&mut grid, pool, &perm);
        for picked in 0..SLOT_COUNT {
            grid.pick(Some(picked));
            out.push(score_grid(&grid).tag(perm, picked as u8));
            since_yield += 1;

            if yield_every != 0 && since_yield == yield_every {
                let done = produced.fetch_add(since_yield, Ordering::Relaxed) + since_yield;
                since_yield = 0;
                debug!(shard = lead, produced = done, "shard yield");
                on_progress(SweepProgress {
                    produced: done,
                    total: CONFIGURATION_COUNT,
                    elapsed: start.elapsed(),
                });
                if stop.load(Ordering::Relaxed) {
                    break 'shard;
                }
            }
        }
    }

    produced.fetch_add(since_yield, Ordering::Relaxed);
    out
}

/// Runs a sweep sharded across a rayon pool of `opts.threads` workers.
///
/// The space is split by which pool entity occupies slot 0; each worker
/// owns its own grid. Results are concatenated in shard order, which does
/// not matter to ranking. Setting `stop` ends every shard at its next
/// yield point.
///
/// `on_progress` runs on the worker threads each time a shard reaches a
/// yield point, with the running total across all shards.
pub fn enumerate_parallel<P>(
    pool: &[Entity],
    opts: &SweepOptions,
    stop: &AtomicBool,
    on_progress: P,
) -> Result<(Vec<Metrics>, SweepSummary), SweepError>
where
    P: Fn(SweepProgress) + Sync,
{
    let pool = validate_pool(pool)?;
    let workers = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads.max(1))
        .build()?;

    let start = Instant::now();
    info!(
        event = "sweep_start",
        configurations = CONFIGURATION_COUNT,
        threads = opts.threads.max(1),
        yield_every = opts.yield_every,
    );

    let produced = AtomicU64::new(0);
    let shards: Vec<Vec<Metrics>> = workers.install(|| {
        (0..SLOT_COUNT)
            .into_par_iter()
            .map(|lead| {
                sweep_shard(pool, lead, opts.yield_every, stop, &produced, start, &on_progress)
            })
            .collect()
    });

    let mut results = Vec::with_capacity(shards.iter().map(Vec::len).sum());
    for shard in shards {
        results.extend(shard);
    }

    let summary = SweepSummary {
        produced: results.len() as u64,
        cancelled: (results.len() as u64) < CONFIGURATION_COUNT,
        elapsed: start.elapsed(),
    };
    info!(
        event = "sweep_end",
        produced = summary.produced,
        cancelled = summary.cancelled,
        elapsed_ms = summary.elapsed.as_millis() as u64,
    );
    Ok((results, summary))
}
