use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use territory_war::{
    combat::RandomDice, controller::GameController, error::{InputError, SetupError}, game::Game,
    game_config::GameConfig, input::Console,
};

/// Turn-based territorial conquest for one terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for missions and dice; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with territories and players, skipping interactive registration.
    #[arg(long)]
    setup: Option<PathBuf>,
}

fn wall_clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_else(|| now.timestamp() as u64)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(wall_clock_seed);
    tracing::info!(seed, "starting game");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    if console.say("=== STRATEGY GAME ===").is_err() {
        return ExitCode::FAILURE;
    }

    let setup: Result<Game, SetupError> = match &args.setup {
        Some(path) => GameConfig::load_from_file(path).and_then(|config| config.to_game(&mut rng)),
        None => Game::setup(&mut console, &mut rng),
    };
    let game = match setup {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("setup failed: {}", e);
            eprintln!("Setup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.setup.is_some() {
        for (index, player) in game.players.iter().enumerate() {
            if console.say(format!("Player {}: {}", index + 1, player)).is_err() {
                return ExitCode::FAILURE;
            }
        }
    }

    let mut controller = GameController::new(game, console, RandomDice::new(rng));
    let outcome = controller.play();

    let (_, mut console) = controller.into_parts();
    match finish(outcome, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("console failure: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Says goodbye after play. Only a failure during play is an error; a
/// farewell that cannot be written is logged.
fn finish<R: io::BufRead, W: io::Write>(
    outcome: Result<Option<usize>, InputError>,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    outcome?;
    if let Err(e) = console.say("\nGame over! Thanks for playing!") {
        tracing::warn!("could not print the farewell: {}", e);
    }
    Ok(())
}
