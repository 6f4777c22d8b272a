use super::anneal::{Annealer, SearchObserver};
use super::space::{KeySpace, SquareSpace};
use crate::analysis::best_period;
use crate::cipher::transposition::undo_columnar;
use crate::cipher::TranspositionKey;
use crate::config::AnnealConfig;
use crate::consts::{DEFAULT_TOP_K, PROGRESS_INTERVAL, UNSET_SCORE};
use crate::core_types::{LaneOutcome, Ranked, RankedEntry, Scored};
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::NgramScorer;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use std::ops::{Range, RangeInclusive};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// Knobs shared by every fan-out entry point.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CoordinatorOptions {
    /// Worker threads; defaults to the available parallelism.
    #[builder(default)]
    pub threads: Option<usize>,
    /// Worker `i` is seeded with `seed + i`.
    #[builder(default)]
    pub seed: Option<u64>,
    #[builder(default = DEFAULT_TOP_K)]
    pub top_k: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Best score seen by any lane, stored as `f64` bits.
#[derive(Debug)]
pub struct AtomicBest(AtomicU64);

impl AtomicBest {
    pub fn new(initial: f64) -> Self {
        Self(AtomicU64::new(initial.to_bits()))
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Raises the stored value to `score` if it is higher. Returns `true`
    /// when this call set the record.
    pub fn offer(&self, score: f64) -> bool {
        if score.is_nan() {
            return false;
        }
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            if score <= f64::from_bits(current) {
                return false;
            }
            match self.0.compare_exchange_weak(
                current,
                score.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for AtomicBest {
    fn default() -> Self {
        Self::new(UNSET_SCORE)
    }
}

/// Splits `0..total` into at most `workers` contiguous chunks. The last
/// chunk absorbs the remainder.
pub fn partition(total: usize, workers: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);
    let chunk = total / workers;
    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == workers { total } else { start + chunk };
            start..end
        })
        .collect()
}

/// Every read-out order of the given width, in lexicographic order.
pub fn all_orders(width: usize) -> CfResult<Vec<TranspositionKey>> {
    if width == 0 {
        return Err(CipherForgeError::Validation(
            "Transposition width must be at least 1".to_string(),
        ));
    }
    (0..width)
        .permutations(width)
        .map(TranspositionKey::new)
        .collect()
}

fn worker_count(requested: Option<usize>, jobs: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    requested.unwrap_or(available).min(jobs).max(1)
}

fn build_pool(threads: usize) -> CfResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CipherForgeError::Config(format!("Thread pool: {}", e)))
}

fn worker_rng(seed: Option<u64>, worker: usize) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s.wrapping_add(worker as u64)),
        None => fastrand::Rng::new(),
    }
}

fn preview(text: &str) -> &str {
    let end = text.len().min(60);
    text.get(..end).unwrap_or(text)
}

/// Fans an ADFGVX square search out over `orders`. Each order gets its own
/// lane, lanes run in partition order on their worker, and the merged
/// results come back ranked best first.
pub fn search_transpositions(
    ciphertext: &[u8],
    orders: &[TranspositionKey],
    scorer: &NgramScorer,
    config: &AnnealConfig,
    options: &CoordinatorOptions,
) -> CfResult<Ranked<RankedEntry>> {
    let threads = worker_count(options.threads, orders.len());
    let partitions = partition(orders.len(), threads);
    info!(
        "Searching {} orders on {} workers ({} iterations each, {} scoring)",
        orders.len(),
        partitions.len(),
        config.max_iterations,
        config.mode
    );

    let global = AtomicBest::default();
    let done = AtomicUsize::new(0);
    let pool = build_pool(partitions.len().max(1))?;

    let per_worker: Vec<CfResult<Vec<RankedEntry>>> = pool.install(|| {
        partitions
            .par_iter()
            .enumerate()
            .map(|(worker, range)| {
                let mut rng = worker_rng(options.seed, worker);
                let mut local_best = UNSET_SCORE;
                let mut entries = Vec::with_capacity(range.len());

                for order in &orders[range.clone()] {
                    let space = SquareSpace::new(ciphertext, order.clone())?;
                    let outcome =
                        Annealer::new(&space, scorer, config.clone()).run(None, &mut rng);

                    if outcome.score > local_best {
                        local_best = outcome.score;
                        debug!(
                            worker,
                            "Local best {:.2} for order [{}]", outcome.score, order
                        );
                    }
                    if global.offer(outcome.score) {
                        info!(
                            worker,
                            "New global best {:.2} | order [{}] | square {} | {}",
                            outcome.score,
                            order,
                            outcome.key,
                            preview(&outcome.plaintext)
                        );
                    }

                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if finished % PROGRESS_INTERVAL == 0 {
                        info!(
                            "Progress: {}/{} orders, best so far {:.2}",
                            finished,
                            orders.len(),
                            global.get()
                        );
                    }

                    entries.push(RankedEntry {
                        order: order.clone(),
                        score: outcome.score,
                        square: outcome.key,
                        plaintext: outcome.plaintext,
                    });
                }
                Ok(entries)
            })
            .collect()
    });

    let mut merged = Vec::with_capacity(orders.len());
    for entries in per_worker {
        merged.extend(entries?);
    }
    Ok(Ranked::new(merged))
}

struct RecordLogger<'a> {
    lane: usize,
    global: &'a AtomicBest,
}

impl SearchObserver for RecordLogger<'_> {
    fn on_record(&self, iteration: usize, score: f64, plaintext: &str) {
        if self.global.offer(score) {
            info!(
                lane = self.lane,
                iteration,
                "New best {:.2}: {}",
                score,
                preview(plaintext)
            );
        }
    }

    fn on_reheat(&self, iteration: usize, restarted: bool) {
        debug!(lane = self.lane, iteration, restarted, "Stagnated, reheating");
    }
}

/// Runs `lanes` independent seeded lanes over one key space and returns
/// the best outcome. Ties go to the lowest lane.
pub fn run_lanes<S: KeySpace>(
    space: &S,
    scorer: &NgramScorer,
    config: &AnnealConfig,
    lanes: usize,
    seed_key: Option<S::Key>,
    options: &CoordinatorOptions,
) -> CfResult<LaneOutcome<S::Key>> {
    if lanes == 0 {
        return Err(CipherForgeError::Validation(
            "At least one lane is required".to_string(),
        ));
    }
    let pool = build_pool(worker_count(options.threads, lanes))?;
    let global = AtomicBest::default();

    let outcomes: Vec<LaneOutcome<S::Key>> = pool.install(|| {
        (0..lanes)
            .into_par_iter()
            .map(|lane| {
                let mut rng = worker_rng(options.seed, lane);
                let observer = RecordLogger {
                    lane,
                    global: &global,
                };
                let outcome = Annealer::new(space, scorer, config.clone()).run_observed(
                    seed_key.clone(),
                    &mut rng,
                    &observer,
                );
                debug!(lane, stats = ?outcome.stats, "Lane finished at {:.2}", outcome.score);
                outcome
            })
            .collect()
    });

    outcomes
        .into_iter()
        .reduce(|best, o| if o.score > best.score { o } else { best })
        .ok_or_else(|| CipherForgeError::Validation("No lane produced a result".to_string()))
}

/// A transposition order whose undone text looks periodic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepHit {
    pub order: TranspositionKey,
    pub period: usize,
    pub ic: f64,
    pub text: String,
}

impl Scored for SweepHit {
    fn score(&self) -> f64 {
        self.ic
    }
}

/// Undoes every order of every width and keeps those whose best periodic
/// IC reaches `threshold`.
pub fn sweep_transpositions(
    ciphertext: &[u8],
    widths: RangeInclusive<usize>,
    threshold: f64,
    max_period: usize,
    options: &CoordinatorOptions,
) -> CfResult<Ranked<SweepHit>> {
    let pool = build_pool(worker_count(options.threads, usize::MAX))?;
    let mut hits = Vec::new();

    for width in widths {
        let orders = all_orders(width)?;
        let found: Vec<SweepHit> = pool.install(|| {
            orders
                .par_iter()
                .filter_map(|order| {
                    let text = undo_columnar(ciphertext, order.as_slice())?;
                    let (period, ic) = best_period(&text, max_period);
                    (ic >= threshold).then(|| SweepHit {
                        order: order.clone(),
                        period,
                        ic,
                        text: String::from_utf8_lossy(&text).into_owned(),
                    })
                })
                .collect()
        });
        debug!(
            width,
            orders = orders.len(),
            hits = found.len(),
            "Width swept"
        );
        hits.extend(found);
    }

    info!("Sweep kept {} orders at IC >= {:.3}", hits.len(), threshold);
    Ok(Ranked::new(hits))
}
