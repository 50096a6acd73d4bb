use super::board::Board;
use super::types::{GameOutcome, Mark, Player};

pub type WinLine = [usize; 3];

/// Rows, columns, then the two diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn line_owned_by(board: &Board, line: &WinLine, mark: Mark) -> bool {
    let cells = board.cells();
    line.iter().all(|&index| cells[index] == mark)
}

pub fn check_win(board: &Board, player: Player) -> bool {
    let mark = Mark::from(player);
    WIN_LINES.iter().any(|line| line_owned_by(board, line, mark))
}

/// Full board with no completed line.
pub fn check_draw(board: &Board) -> bool {
    board.is_full() && !check_win(board, Player::X) && !check_win(board, Player::O)
}

/// First completed line in [`WIN_LINES`] order, with its owner.
pub fn winning_line(board: &Board) -> Option<(Player, WinLine)> {
    WIN_LINES.iter().find_map(|line| {
        let owner = board.cells()[line[0]].player()?;
        line_owned_by(board, line, Mark::from(owner)).then_some((owner, *line))
    })
}

pub fn outcome(board: &Board) -> GameOutcome {
    if let Some((winner, _)) = winning_line(board) {
        return GameOutcome::Win(winner);
    }
    if board.is_full() {
        return GameOutcome::Draw;
    }
    GameOutcome::InProgress
}
