use tictactoe_common::tictactoe::{GameSession, Mode};

pub fn render_session(session: &GameSession) -> String {
    let settings = session.settings();
    let mut out = String::new();

    match settings.mode {
        Mode::PlayerVsPlayer => out.push_str("Mode: player vs player\n"),
        Mode::PlayerVsBot => out.push_str(&format!(
            "Mode: player vs bot ({}, bot plays {})\n",
            settings.difficulty, settings.bot_player
        )),
    }

    out.push('\n');
    out.push_str(&session.board().to_string());
    out.push('\n');

    if let Some(line) = session.winning_line() {
        let cells: Vec<String> = line.iter().map(|index| (index + 1).to_string()).collect();
        out.push_str(&format!("Winning line: {}\n", cells.join("-")));
    }

    out.push_str(&session.status_line());
    if session.outcome().is_terminal() {
        out.push_str(" Type 'r' to play again.");
    }
    out.push('\n');
    out
}
