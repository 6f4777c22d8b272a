pub mod ngrams;
pub mod playfair;
pub mod presets;
pub mod square;
pub mod transposition;
pub mod vigenere;

use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::input;
use cipherforge::optimizer::CoordinatorOptions;
use cipherforge::scorer::NgramScorer;
use clap::Args;
use tracing::info;

/// Where the ciphertext comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct CiphertextArgs {
    /// File holding the ciphertext
    #[arg(short, long)]
    pub input: Option<String>,

    /// Ciphertext given inline
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,
}

impl CiphertextArgs {
    pub fn read(&self) -> CfResult<String> {
        match (&self.input, &self.text) {
            (Some(path), _) => {
                info!("📂 Loading ciphertext: {}", path);
                input::read_text(path)
            }
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => Err(CipherForgeError::Validation(
                "Provide the ciphertext with --input <file> or --text <ciphertext>".to_string(),
            )),
        }
    }
}

/// Parallelism and seeding.
#[derive(Args, Debug, Clone)]
pub struct LaneArgs {
    /// Independent lanes to run
    #[arg(short, long, default_value_t = 1)]
    pub lanes: usize,

    #[arg(long)]
    pub threads: Option<usize>,

    /// Lane `i` is seeded with `seed + i`
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl LaneArgs {
    pub fn options(&self) -> CoordinatorOptions {
        CoordinatorOptions::builder()
            .threads(self.threads)
            .seed(self.seed)
            .build()
    }
}

pub fn load_scorer(path: &str) -> CfResult<NgramScorer> {
    info!("📂 Loading quadgrams: {}", path);
    let scorer = NgramScorer::from_path(path)?;
    info!(
        "{} quadgrams, total count {}, floor {:.3}",
        scorer.len(),
        scorer.total_count(),
        scorer.floor()
    );
    Ok(scorer)
}

/// Fails when cleanup left nothing to work on.
pub fn require_symbols(text: String, what: &str) -> CfResult<String> {
    if text.is_empty() {
        return Err(CipherForgeError::Validation(format!(
            "No {} symbols left after cleanup",
            what
        )));
    }
    info!("Ciphertext: {} {} symbols", text.len(), what);
    Ok(text)
}
