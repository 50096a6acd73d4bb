use std::fmt;

use super::types::{Mark, MoveError, Player};

pub const BOARD_SIZE: usize = 9;
pub const BOARD_WIDTH: usize = 3;

/// 3x3 grid, cells indexed 0..9 in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Returns the board with `player`'s mark at `index`. `self` is never
    /// modified, so a rejected move leaves the caller's board as it was.
    pub fn apply_move(&self, index: usize, player: Player) -> Result<Board, MoveError> {
        let cell = self.cell(index).ok_or(MoveError::InvalidIndex(index))?;
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied(index));
        }

        let mut next = *self;
        next.cells[index] = Mark::from(player);
        Ok(next)
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell.player() {
                    Some(player) => player.symbol().to_string(),
                    None => (row * BOARD_WIDTH + col + 1).to_string(),
                })
                .collect();
            writeln!(f, " {} | {} | {} ", symbols[0], symbols[1], symbols[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn board_from_str(layout: &str) -> Board {
    let mut cells = [Mark::Empty; BOARD_SIZE];
    let marks = layout.chars().filter(|c| !c.is_whitespace());
    for (index, c) in marks.enumerate().take(BOARD_SIZE) {
        cells[index] = match c {
            'X' | 'x' => Mark::X,
            'O' | 'o' => Mark::O,
            _ => Mark::Empty,
        };
    }
    Board::from_cells(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.legal_moves(), (0..BOARD_SIZE).collect::<Vec<_>>());
    }

    #[test]
    fn test_apply_move_places_mark() {
        let board = Board::new().apply_move(4, Player::X).unwrap();
        assert_eq!(board.cell(4), Some(Mark::X));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_apply_move_on_occupied_cell_fails_and_keeps_board() {
        let board = board_from_str("X.. ... ...");
        let before = board;
        assert_eq!(board.apply_move(0, Player::O), Err(MoveError::CellOccupied(0)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_out_of_bounds_fails() {
        let board = Board::new();
        assert_eq!(board.apply_move(9, Player::X), Err(MoveError::InvalidIndex(9)));
        assert_eq!(board.apply_move(usize::MAX, Player::O), Err(MoveError::InvalidIndex(usize::MAX)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_legal_moves_ascending_and_complementary() {
        let board = board_from_str("X.O .X. O..");
        let moves = board.legal_moves();
        assert_eq!(moves, vec![1, 3, 5, 7, 8]);
        assert_eq!(moves.len() + board.filled_count(), BOARD_SIZE);
    }

    #[test]
    fn test_legal_moves_follow_play() {
        let mut board = Board::new();
        let mut player = Player::X;
        for index in [4, 0, 8, 2, 6] {
            board = board.apply_move(index, player).unwrap();
            player = player.opponent();
            let moves = board.legal_moves();
            assert!(moves.windows(2).all(|w| w[0] < w[1]));
            assert!(moves.iter().all(|&i| board.cell(i) == Some(Mark::Empty)));
            assert_eq!(moves.len() + board.filled_count(), BOARD_SIZE);
        }
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = board_from_str("XOX OXO OXO");
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_display_shows_free_cell_numbers() {
        let board = board_from_str("X.. .O. ...");
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " X | 2 | 3 ");
        assert_eq!(lines[2], " 4 | O | 6 ");
        assert_eq!(lines[4], " 7 | 8 | 9 ");
    }
}
