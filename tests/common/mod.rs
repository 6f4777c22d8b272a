#![allow(dead_code)]

use cipherforge::config::{AnnealConfig, MutationPolicy, RestartPolicy};
use cipherforge::corpus::count_ngrams;
use cipherforge::scorer::NgramScorer;
use std::io::Write;
use tempfile::NamedTempFile;

/// Playfair key with a hand-checked set of digraph decryptions.
pub const FIXTURE_KEY: &str = "YTVWXIGABRQELCMHUZDFSKNOP";

pub const SAMPLE_TEXT: &str = "It was late in the autumn when the surveyors reached the northern valley. The river had
already begun to freeze along its banks, and the old ferryman told them that no boat would cross
until the spring thaw. They made camp near the ruined mill and spent the evenings studying the maps
that the previous expedition had left behind. Most of the notes were written in a careful hand, but
some pages had been torn out, and others were covered with numbers that seemed to follow no pattern
at all. The youngest of the party believed the numbers were a message, perhaps a warning about the
mountain pass, and he spent many nights trying to read them by the light of a small lamp. By the
time the first snow fell he had found that every fifth figure repeated, and that the repeated
figures marked the places where the river could be crossed on foot. The others laughed at first,
yet when the ice grew thick enough they followed his markings and reached the far shore without
losing a single horse. Years later the story was still told in the villages along the valley, and
travellers who passed through in winter were always reminded to count the stones before stepping
onto the frozen river.";

/// Uppercase letters of [`SAMPLE_TEXT`].
pub fn sample_letters() -> String {
    SAMPLE_TEXT
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn scorer_from(entries: &[(&str, u64)]) -> NgramScorer {
    NgramScorer::from_counts(entries.iter().map(|(g, c)| (*g, *c))).unwrap()
}

/// Quadgram table trained on the sample text itself.
pub fn sample_scorer() -> NgramScorer {
    NgramScorer::from_counts(count_ngrams(SAMPLE_TEXT, 4).unwrap()).unwrap()
}

pub fn quick_config(iterations: usize) -> AnnealConfig {
    AnnealConfig::builder()
        .max_iterations(iterations)
        .initial_temperature(10.0)
        .cooling_rate(0.999)
        .stagnation_limit(Some(500))
        .reheat_temperature(10.0)
        .restart(RestartPolicy::Soft)
        .mutation(MutationPolicy::mixed(0.6, 0.4))
        .build()
}

pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}
