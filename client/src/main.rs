mod config;
mod offline;
mod render;
mod state;

use std::time::Duration;

use clap::Parser;
use tictactoe_common::config::Validate;
use tictactoe_common::tictactoe::{Difficulty, Mode, Player};
use tictactoe_common::{log, logger};

use config::{Config, get_config_manager};
use offline::{RunnerSettings, run_tictactoe_game, spawn_stdin_reader};

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Terminal tic-tac-toe against a friend or a minimax bot")]
struct Args {
    /// pvp or bot
    #[arg(long)]
    mode: Option<Mode>,

    /// easy, normal or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Mark the bot plays, x or o
    #[arg(long)]
    bot_player: Option<Player>,

    #[arg(long)]
    bot_delay_ms: Option<u64>,

    /// Seed for the bot's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Config file path; defaults to a file next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.game.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.game.difficulty = difficulty;
        }
        if let Some(bot_player) = self.bot_player {
            config.game.bot_player = bot_player;
        }
        if let Some(delay_ms) = self.bot_delay_ms {
            config.bot.delay_ms = delay_ms;
        }
        if self.use_log_prefix {
            config.use_log_prefix = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    args.apply_to(&mut config);
    config.validate()?;

    let prefix = config.use_log_prefix.then(|| "Client".to_string());
    logger::init_logger(prefix);

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Config saved");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let settings = RunnerSettings {
        game: config.game,
        bot_delay: Duration::from_millis(config.bot.delay_ms),
        seed,
    };

    let mut line_rx = spawn_stdin_reader();
    run_tictactoe_game(settings, &mut line_rx).await;

    log!("Bye");
    Ok(())
}
