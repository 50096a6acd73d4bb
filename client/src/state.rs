use tictactoe_common::tictactoe::{BOARD_SIZE, Difficulty, Mode, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark { index: usize },
    Reset,
    SetMode(Mode),
    SetDifficulty(Difficulty),
    SetBotPlayer(Player),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9                          place your mark in that cell
  r | reset                    start a new game
  mode <pvp|bot>               switch mode (starts a new game)
  difficulty <easy|normal|hard> switch bot difficulty (starts a new game)
  bot <x|o>                    choose the bot's mark (starts a new game)
  help                         show this text
  q | quit                     exit";

impl ClientCommand {
    /// Cells are entered 1-based, matching the numbers drawn on free cells.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("Empty command".to_string());
        };
        let arg = parts.next();

        if let Ok(cell) = head.parse::<usize>() {
            if cell == 0 || cell > BOARD_SIZE {
                return Err(format!("Cell must be between 1 and {}", BOARD_SIZE));
            }
            return Ok(ClientCommand::PlaceMark { index: cell - 1 });
        }

        let required = |name: &str| {
            arg.ok_or_else(|| format!("'{}' needs an argument, see 'help'", name))
        };

        match head.to_ascii_lowercase().as_str() {
            "r" | "reset" => Ok(ClientCommand::Reset),
            "mode" => Ok(ClientCommand::SetMode(required("mode")?.parse()?)),
            "difficulty" | "dif" => Ok(ClientCommand::SetDifficulty(required("difficulty")?.parse()?)),
            "bot" => Ok(ClientCommand::SetBotPlayer(required("bot")?.parse()?)),
            "h" | "help" | "?" => Ok(ClientCommand::Help),
            "q" | "quit" | "exit" => Ok(ClientCommand::Quit),
            other => Err(format!("Unknown command '{}', type 'help'", other)),
        }
    }
}
