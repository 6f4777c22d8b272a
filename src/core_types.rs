use crate::cipher::{SquareKey, TranspositionKey};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::Path;

/// Counters collected by one annealing lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneStats {
    pub iterations: usize,
    pub evaluated: usize,
    pub accepted: usize,
    pub invalid: usize,
    pub reheats: usize,
    pub restarts: usize,
}

/// The incumbent of one lane once its budget is spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneOutcome<K> {
    pub key: K,
    pub score: f64,
    pub plaintext: String,
    pub stats: LaneStats,
}

/// A transposition order and the best square found while it was fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub order: TranspositionKey,
    pub score: f64,
    pub square: SquareKey,
    pub plaintext: String,
}

/// A key with its score, ordered best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    pub entries: Vec<T>,
}

pub trait Scored {
    fn score(&self) -> f64;
}

impl Scored for RankedEntry {
    fn score(&self) -> f64 {
        self.score
    }
}

impl<T: Scored> Ranked<T> {
    /// Sorts descending by score; ties keep their input order.
    pub fn new(mut entries: Vec<T>) -> Self {
        entries.sort_by(|a, b| b.score().total_cmp(&a.score()));
        Self { entries }
    }

    pub fn top(&self, k: usize) -> &[T] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn best(&self) -> Option<&T> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ranked<RankedEntry> {
    /// One order per line, space-separated, best first.
    pub fn to_lines(&self, k: usize) -> String {
        lines(self.top(k).iter().map(|e| &e.order))
    }

    pub fn write_orders<P: AsRef<Path>>(&self, path: P, k: usize) -> io::Result<()> {
        fs::write(path, self.to_lines(k))
    }
}

pub(crate) fn lines<T: Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| format!("{}\n", i)).collect()
}
