//! AI-versus-AI self-play.
//!
//! Plays a batch of games between two difficulty levels and prints the
//! aggregate statistics. Set `RUST_LOG=temple_cards=debug` to follow every
//! turn.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use temple_cards::core::{EngineConfig, Player, DEFAULT_SEED};
use temple_cards::{Difficulty, GameEngine};

#[derive(Parser, Debug)]
#[command(name = "selfplay", version, about = "Play AI-versus-AI games and report statistics")]
struct Cli {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 10)]
    games: u32,

    /// Seed for deals and AI tie-breaks
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Player 1 difficulty (easy, medium, hard or 1-3)
    #[arg(long, default_value = "medium")]
    p1: Difficulty,

    /// Player 2 difficulty (easy, medium, hard or 1-3)
    #[arg(long, default_value = "medium")]
    p2: Difficulty,

    /// Abandon a game after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::new().with_seed(cli.seed).with_max_turns(cli.max_turns);
    let mut engine = GameEngine::with_config(config);
    let mut abandoned = 0u32;

    for game in 0..cli.games {
        engine.start_new_game()?;
        while !engine.is_game_over() && !engine.turn_limit_reached() {
            let difficulty = match engine.current_player() {
                Player::One => cli.p1,
                Player::Two => cli.p2,
            };
            engine.play_ai_turn_as(difficulty)?;
        }
        if !engine.is_game_over() {
            abandoned += 1;
            warn!(game, turns = engine.turn_count(), "turn limit reached, game abandoned");
        }
    }

    let stats = engine.game_stats();
    info!(games = stats.games_played, abandoned, "self-play finished");

    println!("games:        {} ({} abandoned)", cli.games, abandoned);
    for player in [Player::One, Player::Two] {
        let difficulty = if player == Player::One { cli.p1 } else { cli.p2 };
        println!(
            "{player} ({difficulty}): {} wins ({:.1}%)",
            stats.wins(player),
            stats.win_rate(player) * 100.0
        );
    }
    println!("avg length:   {:.1} moves", stats.average_game_length);
    for (card, count) in stats.most_used().into_iter().take(5) {
        println!("  {card:<10} {count}");
    }
    Ok(())
}
