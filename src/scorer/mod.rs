pub mod loader;

use self::loader::{load_counts, load_counts_from_path, RawCounts};
use crate::consts::{FLOOR_COUNT, INVALID_SCORE, NGRAM_LEN};
use crate::error::{CfResult, CipherForgeError};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::debug;

type Gram = [u8; NGRAM_LEN];

/// How text is normalized and which windows count against it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Windows containing a non-letter are skipped, not penalized.
    Tolerant,
    /// Letters and digits are both scorable; unknown windows get the floor.
    #[default]
    Strict,
}

/// Quadgram log-probability table. Immutable once built.
#[derive(Debug, Clone)]
pub struct NgramScorer {
    log_probs: FnvHashMap<Gram, f64>,
    floor: f64,
    total_count: u64,
    mode: ScoringMode,
}

impl NgramScorer {
    pub fn from_counts<I, S>(counts: I) -> CfResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut merged: FnvHashMap<Gram, u64> = FnvHashMap::default();
        let mut ignored = 0usize;

        for (gram, count) in counts {
            let bytes = gram.as_ref().as_bytes();
            if bytes.len() != NGRAM_LEN || !bytes.is_ascii() {
                ignored += 1;
                continue;
            }
            let mut key = [0u8; NGRAM_LEN];
            for (slot, b) in key.iter_mut().zip(bytes) {
                *slot = b.to_ascii_uppercase();
            }
            *merged.entry(key).or_default() += count;
        }

        let total_count: u64 = merged.values().sum();
        if total_count == 0 {
            return Err(CipherForgeError::Validation(
                "N-gram table is empty (total count is 0)".to_string(),
            ));
        }

        let total = total_count as f64;
        let log_probs = merged
            .into_iter()
            .filter(|(_, c)| *c > 0)
            .map(|(k, c)| (k, (c as f64 / total).log10()))
            .collect::<FnvHashMap<_, _>>();

        debug!(
            "Built quadgram table: {} entries, total count {}, {} records ignored",
            log_probs.len(),
            total_count,
            ignored
        );

        Ok(Self {
            log_probs,
            floor: (FLOOR_COUNT / total).log10(),
            total_count,
            mode: ScoringMode::default(),
        })
    }

    pub fn from_raw(raw: RawCounts) -> CfResult<Self> {
        Self::from_counts(raw.entries)
    }

    pub fn from_reader<R: Read>(reader: R) -> CfResult<Self> {
        Self::from_raw(load_counts(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        Self::from_raw(load_counts_from_path(path)?)
    }

    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }

    /// Log-probability of one window, the floor if unknown or not a quadgram.
    pub fn log_prob(&self, gram: &[u8]) -> f64 {
        let Ok(key) = <Gram>::try_from(gram) else {
            return self.floor;
        };
        let key = key.map(|b| b.to_ascii_uppercase());
        self.log_probs.get(&key).copied().unwrap_or(self.floor)
    }

    /// The most frequent quadgram in the table and its log-probability.
    pub fn most_frequent(&self) -> Option<(String, f64)> {
        self.log_probs
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &p)| (String::from_utf8_lossy(k).into_owned(), p))
    }

    /// Scores `text` with the scorer's configured mode.
    pub fn score(&self, text: &str) -> f64 {
        self.score_with(text, self.mode)
    }

    pub fn score_with(&self, text: &str, mode: ScoringMode) -> f64 {
        let clean = normalize(text);
        if clean.len() < NGRAM_LEN {
            return self.floor * NGRAM_LEN as f64;
        }

        let mut total = 0.0;
        for window in clean.windows(NGRAM_LEN) {
            if mode == ScoringMode::Tolerant && !window.iter().all(u8::is_ascii_alphabetic) {
                continue;
            }
            total += self.log_prob(window);
        }
        total
    }

    /// Fitness of a decryption attempt; unusable results get `INVALID_SCORE`.
    pub fn score_candidate(&self, plaintext: Option<&str>, mode: ScoringMode) -> f64 {
        match plaintext {
            Some(p) if !p.is_empty() => self.score_with(p, mode),
            _ => INVALID_SCORE,
        }
    }
}

/// Uppercases and keeps ASCII letters and digits.
fn normalize(text: &str) -> Vec<u8> {
    text.bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| b.to_ascii_uppercase())
        .collect()
}
