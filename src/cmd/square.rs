use super::transposition::AdfgvxInput;
use super::{load_scorer, LaneArgs};
use crate::reports;
use cipherforge::cipher::{SquareKey, TranspositionKey};
use cipherforge::config::{AnnealOverrides, Preset};
use cipherforge::consts::{ADFGVX_ALPHABET, ADFGVX_SIDE};
use cipherforge::error::{CfResult, CipherForgeError};
use cipherforge::input;
use cipherforge::optimizer::{run_lanes, JointKey, JointSpace, SquareSpace};
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SquareArgs {
    #[command(flatten)]
    pub input: AdfgvxInput,

    /// Transposition order, e.g. "4 0 6 2 1 3 5"
    #[arg(long)]
    pub order: Option<TranspositionKey>,

    /// Take the first order of a ranked order file
    #[arg(long, conflicts_with = "order")]
    pub orders_file: Option<String>,

    /// Anneal the order together with the square
    #[arg(long, default_value_t = false)]
    pub joint: bool,

    /// Width of the order in joint mode when no order is given
    #[arg(short, long, default_value_t = 7)]
    pub width: usize,

    /// Start every lane from this 36-symbol square
    #[arg(long)]
    pub seed_key: Option<SquareKey>,

    #[command(flatten)]
    pub lanes: LaneArgs,

    #[command(flatten)]
    pub anneal: AnnealOverrides,
}

impl SquareArgs {
    fn resolve_order(&self) -> CfResult<Option<TranspositionKey>> {
        if let Some(order) = &self.order {
            return Ok(Some(order.clone()));
        }
        match &self.orders_file {
            Some(path) => {
                let first = input::read_orders(path)?.into_iter().next();
                if first.is_none() {
                    return Err(CipherForgeError::Validation(format!(
                        "No orders in '{}'",
                        path
                    )));
                }
                Ok(first)
            }
            None => Ok(None),
        }
    }

    fn seed_square(&self) -> CfResult<Option<SquareKey>> {
        match &self.seed_key {
            Some(key) => {
                let checked = SquareKey::with_len(key.as_bytes(), ADFGVX_ALPHABET.len())?;
                Ok(Some(checked))
            }
            None => Ok(None),
        }
    }
}

pub fn run(args: SquareArgs, quadgrams: &str) -> CfResult<()> {
    let scorer = load_scorer(quadgrams)?;
    let ciphertext = args.input.read()?;
    let order = args.resolve_order()?;
    let seed_square = args.seed_square()?;

    if args.joint {
        let config = args.anneal.resolve(Preset::Joint)?;
        let width = order.as_ref().map_or(args.width, TranspositionKey::width);
        let space = JointSpace::new(ciphertext.as_bytes(), width)?;
        let seed = match (seed_square, order) {
            (Some(square), Some(order)) => Some(JointKey { square, order }),
            _ => None,
        };

        info!("🔥 Joint search, width {}", width);
        let best = run_lanes(
            &space,
            &scorer,
            &config,
            args.lanes.lanes,
            seed,
            &args.lanes.options(),
        )?;

        reports::print_square_grid("ADFGVX square", &best.key.square, ADFGVX_SIDE);
        reports::print_lane_stats(&best.stats);
        println!("Order: {}", best.key.order);
        println!("Square: {}", best.key.square);
        println!("Score: {:.2}", best.score);
        println!("Plaintext: {}", best.plaintext);
        return Ok(());
    }

    let order = order.ok_or_else(|| {
        CipherForgeError::Validation(
            "Give --order or --orders-file, or use --joint to search the order too".to_string(),
        )
    })?;
    let config = args.anneal.resolve(Preset::SquareRefine)?;
    let space = SquareSpace::new(ciphertext.as_bytes(), order)?;

    info!("🔥 Refining square for order [{}]", space.order());
    let best = run_lanes(
        &space,
        &scorer,
        &config,
        args.lanes.lanes,
        seed_square,
        &args.lanes.options(),
    )?;

    reports::print_square_grid("ADFGVX square", &best.key, ADFGVX_SIDE);
    reports::print_lane_stats(&best.stats);
    println!("Order: {}", space.order());
    println!("Square: {}", best.key);
    println!("Score: {:.2}", best.score);
    println!("Plaintext: {}", best.plaintext);
    Ok(())
}
