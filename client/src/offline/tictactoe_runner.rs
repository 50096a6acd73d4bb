use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Instant, sleep_until};
use tictactoe_common::games::SessionRng;
use tictactoe_common::log;
use tictactoe_common::tictactoe::{GameSession, GameSettings, select_move};

use crate::render::render_session;
use crate::state::{ClientCommand, HELP_TEXT};

pub struct RunnerSettings {
    pub game: GameSettings,
    pub bot_delay: Duration,
    pub seed: u64,
}

pub async fn run_tictactoe_game(
    settings: RunnerSettings,
    line_rx: &mut mpsc::UnboundedReceiver<String>,
) {
    let mut session = GameSession::new(settings.game);
    let rng = Arc::new(Mutex::new(SessionRng::new(settings.seed)));
    let mut bot_deadline: Option<Instant> = None;

    log!("Starting game with seed {}", settings.seed);
    session.reset();
    println!("{}", HELP_TEXT);
    print!("\n{}", render_session(&session));

    loop {
        if session.is_bot_turn() && bot_deadline.is_none() && session.begin_bot_turn().is_ok() {
            bot_deadline = Some(Instant::now() + settings.bot_delay);
        }

        tokio::select! {
            _ = sleep_until(bot_deadline.unwrap_or_else(Instant::now)), if bot_deadline.is_some() => {
                bot_deadline = None;
                play_bot_turn(&mut session, &rng).await;
                print!("\n{}", render_session(&session));
            }
            line = line_rx.recv() => {
                let Some(line) = line else {
                    log!("Input closed, leaving game");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match ClientCommand::parse(&line) {
                    Ok(ClientCommand::Quit) => break,
                    Ok(ClientCommand::Help) => println!("{}", HELP_TEXT),
                    Ok(command) => {
                        if handle_command(&mut session, command) {
                            bot_deadline = None;
                        }
                        print!("\n{}", render_session(&session));
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
}

/// Returns true when the command started a new game.
fn handle_command(session: &mut GameSession, command: ClientCommand) -> bool {
    match command {
        ClientCommand::PlaceMark { index } => {
            if let Err(e) = session.place_mark(index) {
                log!("Ignored move at cell {}: {}", index + 1, e);
            }
            false
        }
        ClientCommand::Reset => {
            session.reset();
            true
        }
        ClientCommand::SetMode(mode) => {
            session.set_mode(mode);
            true
        }
        ClientCommand::SetDifficulty(difficulty) => {
            session.set_difficulty(difficulty);
            true
        }
        ClientCommand::SetBotPlayer(player) => {
            session.set_bot_player(player);
            true
        }
        ClientCommand::Help | ClientCommand::Quit => false,
    }
}

async fn play_bot_turn(session: &mut GameSession, rng: &Arc<Mutex<SessionRng>>) {
    let input = session.bot_input();
    let difficulty = session.settings().difficulty;
    let rng = Arc::clone(rng);

    let calculated_move = tokio::task::spawn_blocking(move || {
        let mut rng = rng.blocking_lock();
        select_move(difficulty, &input, &mut rng)
    })
    .await;

    match calculated_move {
        Ok(Some(index)) => {
            if let Err(e) = session.apply_bot_move(index) {
                log!("Bot failed to place mark at cell {}: {}", index + 1, e);
            }
        }
        Ok(None) => {
            log!("Bot found no legal move");
            session.cancel_bot_turn();
        }
        Err(e) => {
            log!("Bot task failed: {}", e);
            session.cancel_bot_turn();
        }
    }
}
