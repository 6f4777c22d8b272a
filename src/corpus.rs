//! Building n-gram count tables from raw text.

use crate::error::{CfResult, CipherForgeError};
use fnv::FnvHashMap;
use itertools::Itertools;
use std::fmt::Write;

/// Counts every overlapping `n`-window of the letters in `text`.
///
/// Text is uppercased and stripped to ASCII letters first, so windows run
/// across word boundaries. Results are sorted by descending count, then
/// alphabetically.
pub fn count_ngrams(text: &str, n: usize) -> CfResult<Vec<(String, u64)>> {
    if n == 0 {
        return Err(CipherForgeError::Validation(
            "N-gram length must be at least 1".to_string(),
        ));
    }

    let letters: Vec<u8> = text
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .collect();

    let mut counts: FnvHashMap<&[u8], u64> = FnvHashMap::default();
    for window in letters.windows(n) {
        *counts.entry(window).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(gram, count)| (String::from_utf8_lossy(gram).into_owned(), count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect())
}

/// Renders counts in the `NGRAM COUNT` line format the scorer loads.
pub fn format_counts(counts: &[(String, u64)]) -> String {
    let mut out = String::with_capacity(counts.len() * 12);
    for (gram, count) in counts {
        let _ = writeln!(out, "{} {}", gram, count);
    }
    out
}
