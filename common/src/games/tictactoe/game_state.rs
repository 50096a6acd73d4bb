use std::fmt;

use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::{BotInput, select_move};
use super::types::{Difficulty, GameOutcome, Mode, MoveError, Player};
use super::win_detector::{WinLine, check_draw, check_win, winning_line};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub bot_player: Player,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: Mode::PlayerVsPlayer,
            difficulty: Difficulty::Easy,
            bot_player: Player::O,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    Move(MoveError),
    GameOver,
    BotTurn,
    BotThinking,
    NotBotTurn,
    NoLegalMoves,
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Move(err) => write!(f, "{}", err),
            SessionError::GameOver => f.write_str("Game is already over"),
            SessionError::BotTurn => f.write_str("It is the bot's turn"),
            SessionError::BotThinking => f.write_str("Bot is still thinking"),
            SessionError::NotBotTurn => f.write_str("It is not the bot's turn"),
            SessionError::NoLegalMoves => f.write_str("No legal moves left"),
        }
    }
}

impl std::error::Error for SessionError {}

/// State of one game as seen by a front end: board, whose turn it is, and
/// the mode/difficulty selections. Any rejected call leaves it untouched.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    settings: GameSettings,
    outcome: GameOutcome,
    bot_thinking: bool,
    last_move: Option<usize>,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            settings,
            outcome: GameOutcome::InProgress,
            bot_thinking: false,
            last_move: None,
        }
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.outcome = GameOutcome::InProgress;
        self.bot_thinking = false;
        self.last_move = None;
        log!(
            "New game: mode={}, difficulty={}, bot plays {}",
            self.settings.mode,
            self.settings.difficulty,
            self.settings.bot_player
        );
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
        self.reset();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        self.reset();
    }

    pub fn set_bot_player(&mut self, bot_player: Player) {
        self.settings.bot_player = bot_player;
        self.reset();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn bot_player(&self) -> Player {
        self.settings.bot_player
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.bot_thinking
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        match self.outcome {
            GameOutcome::Win(_) => winning_line(&self.board).map(|(_, line)| line),
            _ => None,
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        self.settings.mode == Mode::PlayerVsBot
            && self.outcome == GameOutcome::InProgress
            && self.current_player == self.settings.bot_player
    }

    /// Human input. Ignored while the game is over or the bot is to move.
    pub fn place_mark(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        if self.outcome.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if self.bot_thinking {
            return Err(SessionError::BotThinking);
        }
        if self.is_bot_turn() {
            return Err(SessionError::BotTurn);
        }
        self.apply(index)
    }

    /// Marks the bot as busy so human input is rejected until
    /// [`GameSession::play_bot_turn`] runs.
    pub fn begin_bot_turn(&mut self) -> Result<(), SessionError> {
        if self.outcome.is_terminal() {
            return Err(SessionError::GameOver);
        }
        self.bot_thinking = true;
        Ok(())
    }

    pub fn cancel_bot_turn(&mut self) {
        self.bot_thinking = false;
    }

    pub fn bot_input(&self) -> BotInput {
        BotInput::from_session(self)
    }

    /// Applies a move chosen elsewhere (e.g. on a blocking worker) for the bot.
    pub fn apply_bot_move(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        self.bot_thinking = false;
        if self.outcome.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if !self.is_bot_turn() {
            return Err(SessionError::NotBotTurn);
        }
        let outcome = self.apply(index)?;
        log!("Bot ({}) chose cell {}", self.settings.bot_player, index);
        Ok(outcome)
    }

    pub fn play_bot_turn(&mut self, rng: &mut SessionRng) -> Result<usize, SessionError> {
        if self.outcome.is_terminal() {
            self.bot_thinking = false;
            return Err(SessionError::GameOver);
        }
        if !self.is_bot_turn() {
            self.bot_thinking = false;
            return Err(SessionError::NotBotTurn);
        }

        let index = select_move(self.settings.difficulty, &self.bot_input(), rng)
            .ok_or(SessionError::NoLegalMoves)?;
        self.apply_bot_move(index)?;
        Ok(index)
    }

    fn apply(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        let mover = self.current_player;
        self.board = self.board.apply_move(index, mover)?;
        self.last_move = Some(index);

        // the mover's win takes precedence over a full board
        self.outcome = if check_win(&self.board, mover) {
            GameOutcome::Win(mover)
        } else if check_draw(&self.board) {
            GameOutcome::Draw
        } else {
            self.current_player = mover.opponent();
            GameOutcome::InProgress
        };

        match self.outcome {
            GameOutcome::Win(winner) => log!("Player {} wins with cell {}", winner, index),
            GameOutcome::Draw => log!("Draw after cell {}", index),
            GameOutcome::InProgress => {}
        }

        Ok(self.outcome)
    }

    pub fn status_line(&self) -> String {
        match self.outcome {
            GameOutcome::Win(winner) => format!("Player {} wins!", winner),
            GameOutcome::Draw => "Draw!".to_string(),
            GameOutcome::InProgress if self.is_bot_turn() => {
                format!("Bot ({}) is thinking...", self.current_player)
            }
            GameOutcome::InProgress => format!("Player {} to move", self.current_player),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}
