use clap::Parser;
use minesweeper_ai::{BoardError, BoardSize, Minesweeper, Outcome, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Play a game of minesweeper, deducing safe moves where possible
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: usize,

    /// Number of mines
    #[arg(long, default_value_t = 8)]
    mines: usize,

    /// Seed for mine placement and guesses (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level, unless overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), BoardError> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = Minesweeper::new(BoardSize::new(cli.height, cli.width), cli.mines, &mut rng)?;
    println!("{game}");

    let mut player = Player::new(game, &mut rng);
    let outcome = player.run();
    let tally = player.tally();
    match outcome {
        Outcome::Won => println!("Won in {} moves ({} guesses)", tally.moves, tally.guesses),
        Outcome::Lost(cell) => println!("Hit a mine at {cell:?} after {} moves", tally.moves),
        Outcome::Stuck => println!("No moves left after {} moves", tally.moves),
    }
    Ok(())
}
