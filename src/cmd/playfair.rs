use super::{load_scorer, require_symbols, CiphertextArgs, LaneArgs};
use crate::reports;
use cipherforge::cipher::{Playfair, SquareKey};
use cipherforge::config::{AnnealOverrides, Preset};
use cipherforge::consts::PLAYFAIR_SIDE;
use cipherforge::error::CfResult;
use cipherforge::input::{clean_letters, merge_j_into_i, truncate_even};
use cipherforge::optimizer::{run_lanes, PlayfairSpace};
use clap::Args;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct PlayfairArgs {
    #[command(flatten)]
    pub ciphertext: CiphertextArgs,

    /// Start every lane from this 25-letter key instead of a random one
    #[arg(long)]
    pub seed_key: Option<SquareKey>,

    #[command(flatten)]
    pub lanes: LaneArgs,

    #[command(flatten)]
    pub anneal: AnnealOverrides,
}

pub fn run(args: PlayfairArgs, quadgrams: &str) -> CfResult<()> {
    let scorer = load_scorer(quadgrams)?;
    let config = args.anneal.resolve(Preset::Playfair)?;

    let letters = merge_j_into_i(&clean_letters(&args.ciphertext.read()?));
    if letters.len() % 2 == 1 {
        warn!("Odd number of letters, dropping the last one");
    }
    let ciphertext = require_symbols(truncate_even(&letters).to_string(), "Playfair")?;

    if let Some(key) = &args.seed_key {
        Playfair::new(key)?;
        info!("Seeding lanes with {}", key);
    }

    let space = PlayfairSpace::new(ciphertext.as_bytes())?;
    info!(
        "🔥 Annealing {} lane(s), {} iterations each",
        args.lanes.lanes, config.max_iterations
    );
    let best = run_lanes(
        &space,
        &scorer,
        &config,
        args.lanes.lanes,
        args.seed_key,
        &args.lanes.options(),
    )?;

    reports::print_square_grid("Playfair key", &best.key, PLAYFAIR_SIDE);
    reports::print_lane_stats(&best.stats);
    println!("Key: {}", best.key);
    println!("Score: {:.2}", best.score);
    println!("Plaintext: {}", best.plaintext);
    Ok(())
}
