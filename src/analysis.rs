//! Letter statistics used to peel a Vigenère layer: index of coincidence
//! for period detection and chi-squared fitting of per-column shifts.

use crate::cipher::vigenere;
use crate::error::CfResult;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Expected letter percentages, A..Z.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LetterFrequencies {
    #[default]
    Dutch,
    English,
}

const DUTCH: [f64; 26] = [
    7.49, 1.58, 1.24, 5.93, 18.91, 0.81, 3.40, 2.38, 6.50, 1.46, 2.25, 3.57, 2.21, 10.03, 6.06,
    1.57, 0.01, 6.41, 3.73, 6.79, 1.99, 2.85, 1.52, 0.04, 0.03, 1.39,
];

const ENGLISH: [f64; 26] = [
    8.17, 1.49, 2.78, 4.25, 12.70, 2.23, 2.02, 6.09, 6.97, 0.15, 0.77, 4.03, 2.41, 6.75, 7.51,
    1.93, 0.10, 5.99, 6.33, 9.06, 2.76, 0.98, 2.36, 0.15, 1.97, 0.07,
];

impl LetterFrequencies {
    pub fn table(&self) -> &'static [f64; 26] {
        match self {
            LetterFrequencies::Dutch => &DUTCH,
            LetterFrequencies::English => &ENGLISH,
        }
    }
}

/// A recovered Vigenère layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VigenereSolution {
    pub key: String,
    pub period: usize,
    pub mean_ic: f64,
    pub plaintext: String,
}

fn letter_counts(text: impl Iterator<Item = u8>) -> ([usize; 26], usize) {
    let mut counts = [0usize; 26];
    let mut n = 0;
    for b in text {
        if b.is_ascii_alphabetic() {
            counts[(b.to_ascii_uppercase() - b'A') as usize] += 1;
            n += 1;
        }
    }
    (counts, n)
}

/// Probability that two letters drawn without replacement are equal.
/// Non-letters are ignored; fewer than two letters gives 0.
pub fn index_of_coincidence(text: &[u8]) -> f64 {
    let (counts, n) = letter_counts(text.iter().copied());
    ic_from_counts(&counts, n)
}

fn ic_from_counts(counts: &[usize; 26], n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let sum: usize = counts.iter().map(|&c| c * c.saturating_sub(1)).sum();
    sum as f64 / (n * (n - 1)) as f64
}

/// Mean IC of the `period` interleaved slices of `text`.
pub fn mean_slice_ic(text: &[u8], period: usize) -> f64 {
    if period == 0 {
        return 0.0;
    }
    let total: f64 = (0..period)
        .map(|i| {
            let (counts, n) = letter_counts(text.iter().skip(i).step_by(period).copied());
            ic_from_counts(&counts, n)
        })
        .sum();
    total / period as f64
}

/// Period in `1..=max_period` with the highest mean slice IC, and that IC.
/// The first period wins ties.
pub fn best_period(text: &[u8], max_period: usize) -> (usize, f64) {
    let mut best = (1, 0.0);
    for period in 1..=max_period.max(1) {
        let ic = mean_slice_ic(text, period);
        if ic > best.1 {
            best = (period, ic);
        }
    }
    best
}

/// How Vigenère-like a text looks: the best mean slice IC over periods.
pub fn periodic_ic(text: &[u8], max_period: usize) -> f64 {
    best_period(text, max_period).1
}

/// Chi-squared statistic of `text` decrypted with Caesar `shift`.
pub fn chi_squared(text: &[u8], shift: u8, freqs: LetterFrequencies) -> f64 {
    let (raw, n) = letter_counts(text.iter().copied());
    let table = freqs.table();
    let mut chi = 0.0;
    for (k, &expected_pct) in table.iter().enumerate() {
        // Plain letter k is cipher letter k + shift.
        let observed = raw[(k + shift as usize) % 26] as f64;
        let expected = expected_pct * n as f64 / 100.0;
        if expected > 0.0 {
            let diff = observed - expected;
            chi += diff * diff / expected;
        }
    }
    chi
}

/// Caesar shift (0..26) minimizing chi-squared; the lowest shift wins ties.
pub fn solve_caesar_shift(text: &[u8], freqs: LetterFrequencies) -> u8 {
    let mut best_shift = 0;
    let mut best_chi = f64::INFINITY;
    for shift in 0..26u8 {
        let chi = chi_squared(text, shift, freqs);
        if chi < best_chi {
            best_chi = chi;
            best_shift = shift;
        }
    }
    best_shift
}

/// Picks the period by IC, fits each column by chi-squared and decrypts.
pub fn solve_vigenere(
    text: &[u8],
    max_period: usize,
    freqs: LetterFrequencies,
) -> CfResult<VigenereSolution> {
    let letters: Vec<u8> = text
        .iter()
        .filter(|b| b.is_ascii_alphabetic())
        .map(u8::to_ascii_uppercase)
        .collect();
    let (period, mean_ic) = best_period(&letters, max_period);

    let key: String = (0..period)
        .map(|i| {
            let column: Vec<u8> = letters.iter().skip(i).step_by(period).copied().collect();
            (b'A' + solve_caesar_shift(&column, freqs)) as char
        })
        .collect();

    let plaintext = vigenere::decrypt(&String::from_utf8_lossy(&letters), &key)?;

    Ok(VigenereSolution {
        key,
        period,
        mean_ic,
        plaintext,
    })
}
