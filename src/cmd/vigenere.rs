use super::{require_symbols, CiphertextArgs};
use crate::reports;
use cipherforge::analysis::{solve_vigenere, LetterFrequencies, VigenereSolution};
use cipherforge::consts::DEFAULT_TOP_K;
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::input::clean_letters;
use cipherforge::optimizer::{sweep_transpositions, CoordinatorOptions};
use clap::Args;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct VigenereArgs {
    #[command(flatten)]
    pub ciphertext: CiphertextArgs,

    #[arg(long, default_value_t = 2)]
    pub min_width: usize,

    /// Widths above 9 mean millions of orders
    #[arg(long, default_value_t = 8)]
    pub max_width: usize,

    /// Minimum periodic IC for an order to be kept
    #[arg(long, default_value_t = 0.077)]
    pub threshold: f64,

    /// Largest Vigenère period considered
    #[arg(long, default_value_t = 10)]
    pub max_period: usize,

    /// Letter frequencies used to fit the shifts
    #[arg(long, default_value_t = LetterFrequencies::Dutch)]
    pub language: LetterFrequencies,

    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    #[arg(long)]
    pub threads: Option<usize>,
}

pub fn run(args: VigenereArgs) -> CfResult<()> {
    if args.min_width == 0 || args.min_width > args.max_width {
        return Err(CipherForgeError::Validation(format!(
            "Invalid width range {}..={}",
            args.min_width, args.max_width
        )));
    }
    let ciphertext = require_symbols(clean_letters(&args.ciphertext.read()?), "letter")?;

    info!(
        "🔎 Sweeping widths {}..={} for periodic IC >= {:.3}",
        args.min_width, args.max_width, args.threshold
    );
    let options = CoordinatorOptions::builder()
        .threads(args.threads)
        .top_k(args.top)
        .build();
    let hits = sweep_transpositions(
        ciphertext.as_bytes(),
        args.min_width..=args.max_width,
        args.threshold,
        args.max_period,
        &options,
    )?;

    if hits.is_empty() {
        warn!("No order reached the threshold");
        return Ok(());
    }

    let solutions: Vec<(String, VigenereSolution)> = hits
        .top(options.top_k)
        .iter()
        .map(|hit| {
            solve_vigenere(hit.text.as_bytes(), args.max_period, args.language)
                .map(|s| (hit.order.to_string(), s))
        })
        .collect::<CfResult<_>>()?;

    reports::print_vigenere_solutions(&solutions);
    if let Some((order, best)) = solutions.first() {
        println!("Order: {}", order);
        println!("Key: {}", best.key);
        println!("IC: {:.4}", best.mean_ic);
        println!("Plaintext: {}", best.plaintext);
    }
    Ok(())
}
