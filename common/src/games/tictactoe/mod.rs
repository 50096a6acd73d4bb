mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, BOARD_WIDTH, Board};
pub use bot_controller::{BotInput, calculate_minimax_move, select_move};
pub use game_state::{GameSession, GameSettings, SessionError};
pub use types::{Difficulty, GameOutcome, Mark, Mode, MoveError, Player};
pub use win_detector::{WIN_LINES, WinLine, check_draw, check_win, outcome, winning_line};
