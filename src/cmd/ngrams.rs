use cipherforge::consts::NGRAM_LEN;
use cipherforge::corpus::{count_ngrams, format_counts};
use cipherforge::error::CfResult;
use cipherforge::input;
use clap::Args;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct NgramsArgs {
    /// Raw corpus text
    #[arg(short, long)]
    pub input: String,

    #[arg(short, long, default_value = "data/quadgrams.txt")]
    pub output: String,

    #[arg(short = 'n', long, default_value_t = NGRAM_LEN)]
    pub length: usize,
}

pub fn run(args: NgramsArgs) -> CfResult<()> {
    info!("📂 Reading corpus: {}", args.input);
    let text = input::read_text(&args.input)?;
    let counts = count_ngrams(&text, args.length)?;

    fs::write(&args.output, format_counts(&counts))?;
    info!(
        "💾 {} distinct {}-grams written to {}",
        counts.len(),
        args.length,
        args.output
    );
    println!("Distinct: {}", counts.len());
    Ok(())
}
