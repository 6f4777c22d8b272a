use crate::error::{CfResult, CipherForgeError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Parsed (n-gram, count) records, before any probability math.
#[derive(Debug, Default, Clone)]
pub struct RawCounts {
    pub entries: Vec<(String, u64)>,
    pub skipped: usize,
}

impl RawCounts {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }
}

/// Reads whitespace-delimited `NGRAM COUNT` pairs. A line may hold several
/// pairs; a dangling token or an unparsable count is skipped.
pub fn load_counts<R: Read>(reader: R) -> CfResult<RawCounts> {
    let reader = BufReader::new(reader);
    let mut raw = RawCounts::default();
    let mut lines_read = 0;

    for line in reader.lines() {
        let line = line?;
        lines_read += 1;

        let mut tokens = line.split_whitespace();
        while let Some(gram) = tokens.next() {
            let Some(count_str) = tokens.next() else {
                raw.skipped += 1;
                break;
            };
            match count_str.parse::<u64>() {
                Ok(count) => raw.entries.push((gram.to_ascii_uppercase(), count)),
                Err(_) => raw.skipped += 1,
            }
        }
    }

    debug!(
        "Scanned {} lines: {} records, {} skipped",
        lines_read,
        raw.entries.len(),
        raw.skipped
    );

    Ok(raw)
}

pub fn load_counts_from_path<P: AsRef<Path>>(path: P) -> CfResult<RawCounts> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        CipherForgeError::Validation(format!(
            "Could not open n-gram file at '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_counts(file)
}
