use crate::games::SessionRng;
use super::board::Board;
use super::game_state::GameSession;
use super::types::{Difficulty, Player};
use super::win_detector::check_win;

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub bot: Player,
}

impl BotInput {
    pub fn new(board: Board, bot: Player) -> Self {
        Self { board, bot }
    }

    pub fn from_session(session: &GameSession) -> Self {
        Self {
            board: *session.board(),
            bot: session.bot_player(),
        }
    }
}

/// Picks the bot's next cell. `None` only when the board has no free cell.
/// Normal flips a fresh coin on every call.
pub fn select_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(&input.board, rng),
        Difficulty::Normal => {
            if rng.random_bool() {
                calculate_minimax_move(input)
            } else {
                calculate_random_move(&input.board, rng)
            }
        }
        Difficulty::Hard => calculate_minimax_move(input),
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&board.legal_moves())
}

/// Exhaustive search; ties go to the lowest index.
pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in input.board.legal_moves() {
        let Ok(child) = input.board.apply_move(index, input.bot) else {
            continue;
        };
        let score = minimax(child, 0, false, input.bot);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}

/// Every child is a fresh copy of `board`, so siblings never see each
/// other's speculative marks.
fn minimax(board: Board, depth: i32, is_maximizing: bool, bot: Player) -> i32 {
    if check_win(&board, bot) {
        return WIN_SCORE - depth;
    }
    if check_win(&board, bot.opponent()) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    let mover = if is_maximizing { bot } else { bot.opponent() };
    let scores = board
        .legal_moves()
        .into_iter()
        .filter_map(|index| board.apply_move(index, mover).ok())
        .map(|child| minimax(child, depth + 1, !is_maximizing, bot));

    if is_maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::board_from_str;
    use crate::games::tictactoe::types::GameOutcome;
    use crate::games::tictactoe::win_detector::{check_draw, outcome};

    fn hard_move(board: Board, bot: Player) -> usize {
        calculate_minimax_move(&BotInput::new(board, bot)).unwrap()
    }

    #[test]
    fn test_empty_board_hard_move_is_first_cell() {
        for _ in 0..2 {
            assert_eq!(hard_move(Board::new(), Player::O), 0);
        }
        assert_eq!(hard_move(Board::new(), Player::X), 0);
    }

    #[test]
    fn test_hard_takes_immediate_win() {
        // O to move, O can finish the middle row at 5
        let board = board_from_str("XX. OO. X..");
        assert_eq!(hard_move(board, Player::O), 5);
    }

    #[test]
    fn test_hard_blocks_immediate_loss() {
        let board = board_from_str("XX. .O. ...");
        assert_eq!(hard_move(board, Player::O), 2);
    }

    #[test]
    fn test_hard_prefers_faster_win() {
        // 2 and 3 both fork into a win two plies later; 8 wins at once
        let board = board_from_str("OX. .OX .X.");
        assert_eq!(hard_move(board, Player::O), 8);
    }

    #[test]
    fn test_hard_answers_corner_opening_with_center() {
        let board = board_from_str("X.. ... ...");
        assert_eq!(hard_move(board, Player::O), 4);
    }

    #[test]
    fn test_minimax_scores_terminal_boards() {
        let o_won = board_from_str("OOO XX. X..");
        assert_eq!(minimax(o_won, 2, true, Player::O), 8);
        assert_eq!(minimax(o_won, 2, true, Player::X), -8);

        let drawn = board_from_str("XOX OXO OXO");
        assert!(check_draw(&drawn));
        assert_eq!(minimax(drawn, 5, false, Player::O), 0);
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let board = board_from_str("X.. .O. ..X");
        let input = BotInput::new(board, Player::O);
        let _ = calculate_minimax_move(&input);
        assert_eq!(input.board, board);
    }

    #[test]
    fn test_no_move_on_full_board() {
        let board = board_from_str("XOX OXO OXO");
        let mut rng = SessionRng::new(1);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(select_move(difficulty, &BotInput::new(board, Player::O), &mut rng), None);
        }
    }

    fn assert_hard_never_loses(board: Board, to_move: Player, bot: Player) {
        match outcome(&board) {
            GameOutcome::Win(winner) => {
                assert_eq!(winner, bot, "bot lost on\n{}", board);
                return;
            }
            GameOutcome::Draw => return,
            GameOutcome::InProgress => {}
        }

        if to_move == bot {
            let index = hard_move(board, bot);
            let next = board.apply_move(index, bot).unwrap();
            assert_hard_never_loses(next, to_move.opponent(), bot);
        } else {
            for index in board.legal_moves() {
                let next = board.apply_move(index, to_move).unwrap();
                assert_hard_never_loses(next, to_move.opponent(), bot);
            }
        }
    }

    #[test]
    fn test_hard_as_o_never_loses_against_any_opponent() {
        assert_hard_never_loses(Board::new(), Player::X, Player::O);
    }

    #[test]
    fn test_hard_as_x_never_loses_against_any_opponent() {
        assert_hard_never_loses(Board::new(), Player::X, Player::X);
    }

    #[test]
    fn test_hard_self_play_is_draw() {
        let mut board = Board::new();
        let mut to_move = Player::X;
        while !outcome(&board).is_terminal() {
            let index = hard_move(board, to_move);
            board = board.apply_move(index, to_move).unwrap();
            to_move = to_move.opponent();
        }
        assert_eq!(outcome(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_easy_is_roughly_uniform() {
        let board = board_from_str("XOX O.X .O.");
        assert_eq!(board.legal_moves(), vec![4, 6, 8]);

        let input = BotInput::new(board, Player::X);
        let mut rng = SessionRng::new(42);
        let mut counts = [0usize; 9];
        for _ in 0..1000 {
            let index = select_move(Difficulty::Easy, &input, &mut rng).unwrap();
            counts[index] += 1;
        }

        for index in [4, 6, 8] {
            assert!(counts[index] > 250 && counts[index] < 420, "counts: {:?}", counts);
        }
        assert_eq!(counts[4] + counts[6] + counts[8], 1000);
    }

    #[test]
    fn test_normal_mixes_optimal_and_random_moves() {
        // X threatens 0-1-2; only the block at 2 is optimal for O
        let board = board_from_str("XX. .O. ...");
        let input = BotInput::new(board, Player::O);
        let mut rng = SessionRng::new(7);

        let mut blocked = 0;
        let mut other = 0;
        for _ in 0..400 {
            match select_move(Difficulty::Normal, &input, &mut rng) {
                Some(2) => blocked += 1,
                Some(index) => {
                    assert!(board.legal_moves().contains(&index));
                    other += 1;
                }
                None => panic!("legal moves exist"),
            }
        }

        // half optimal plus a random sixth of the rest lands on the block
        assert!(blocked > 180 && blocked < 290, "blocked {}", blocked);
        assert!(other > 100, "other {}", other);
    }
}
