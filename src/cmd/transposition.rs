use super::{load_scorer, require_symbols, CiphertextArgs};
use crate::reports;
use cipherforge::config::{AnnealOverrides, Preset};
use cipherforge::consts::{ADFGVX_COORDINATES, DEFAULT_TOP_K};
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::input::{self, clean_symbols, morse_to_adfgvx};
use cipherforge::optimizer::{all_orders, search_transpositions, CoordinatorOptions};
use clap::Args;
use tracing::info;

/// ADFGVX ciphertext options shared with the `square` command.
#[derive(Args, Debug, Clone)]
pub struct AdfgvxInput {
    #[command(flatten)]
    pub ciphertext: CiphertextArgs,

    /// Input is Morse code (`/` between letters)
    #[arg(long, default_value_t = false)]
    pub morse: bool,
}

impl AdfgvxInput {
    pub fn read(&self) -> CfResult<String> {
        let raw = self.ciphertext.read()?;
        let text = if self.morse {
            morse_to_adfgvx(&raw)
        } else {
            clean_symbols(&raw, ADFGVX_COORDINATES)
        };
        require_symbols(text, "ADFGVX")
    }
}

#[derive(Args, Debug, Clone)]
pub struct TranspositionArgs {
    #[command(flatten)]
    pub input: AdfgvxInput,

    /// Transposition width; every order of this width is tried
    #[arg(short, long, default_value_t = 7)]
    pub width: usize,

    /// Only try the orders listed in this file
    #[arg(long)]
    pub orders: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Where the ranked orders are written
    #[arg(short, long, default_value = "best_transpo_key.txt")]
    pub output: String,

    #[arg(long)]
    pub threads: Option<usize>,

    /// Worker `i` is seeded with `seed + i`
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub anneal: AnnealOverrides,
}

pub fn run(args: TranspositionArgs, quadgrams: &str) -> CfResult<()> {
    let scorer = load_scorer(quadgrams)?;
    let config = args.anneal.resolve(Preset::TranspositionLane)?;
    let ciphertext = args.input.read()?;

    let orders = match &args.orders {
        Some(path) => input::read_orders(path)?,
        None => all_orders(args.width)?,
    };
    if orders.is_empty() {
        return Err(CipherForgeError::Validation(
            "No transposition orders to search".to_string(),
        ));
    }

    let options = CoordinatorOptions::builder()
        .threads(args.threads)
        .seed(args.seed)
        .top_k(args.top)
        .build();
    let ranked = search_transpositions(
        ciphertext.as_bytes(),
        &orders,
        &scorer,
        &config,
        &options,
    )?;

    reports::print_ranked_orders(&ranked, options.top_k);
    ranked.write_orders(&args.output, options.top_k)?;
    info!("💾 Top {} orders written to {}", options.top_k, args.output);

    if let Some(best) = ranked.best() {
        println!("Order: {}", best.order);
        println!("Square: {}", best.square);
        println!("Score: {:.2}", best.score);
        println!("Plaintext: {}", best.plaintext);
    }
    Ok(())
}
