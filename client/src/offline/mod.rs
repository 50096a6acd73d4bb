mod input;
mod tictactoe_runner;

pub use input::spawn_stdin_reader;
pub use tictactoe_runner::{RunnerSettings, run_tictactoe_game};
