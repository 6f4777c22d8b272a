use clap::{Parser, Subcommand};
use std::io;
use std::process;
use std::sync::Mutex;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quadgram count file (`QUAD COUNT` per line)
    #[arg(global = true, short, long, default_value = "data/quadgrams.txt")]
    quadgrams: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Anneal a Playfair key
    Playfair(cmd::playfair::PlayfairArgs),
    /// Rank ADFGVX transposition orders by annealing a square under each
    Transposition(cmd::transposition::TranspositionArgs),
    /// Anneal the ADFGVX square for one order, or square and order jointly
    Square(cmd::square::SquareArgs),
    /// Sweep transposition orders for a Vigenère layer and solve it
    Vigenere(cmd::vigenere::VigenereArgs),
    /// Build a quadgram count file from raw text
    Ngrams(cmd::ngrams::NgramsArgs),
    /// List the built-in annealing presets
    Presets,
}

fn main() {
    let cli = Cli::parse();

    // Every log line goes through this one lock.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(Mutex::new(io::stderr()))
        .init();

    let result = match cli.command {
        Commands::Playfair(args) => cmd::playfair::run(args, &cli.quadgrams),
        Commands::Transposition(args) => cmd::transposition::run(args, &cli.quadgrams),
        Commands::Square(args) => cmd::square::run(args, &cli.quadgrams),
        Commands::Vigenere(args) => cmd::vigenere::run(args),
        Commands::Ngrams(args) => cmd::ngrams::run(args),
        Commands::Presets => cmd::presets::run(),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
