use crate::attacks::can_attack;
use crate::board::Board;
use crate::types::*;

/// Is `color`'s king attacked by any enemy piece?
///
/// A board without a king of that color reports check, so a position that
/// lost its king never looks safe.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let king_square = match board.find_king(color) {
        Some(pos) => pos,
        None => return true,
    };
    board
        .pieces(color.other_color())
        .any(|(from, piece)| can_attack(&piece, board, from, king_square))
}

/// Does playing `from -> to` keep the mover's king out of check?
///
/// Panics when `from` is empty.
pub fn is_move_safe(board: &Board, from: Position, to: Position, color: Color) -> bool {
    let simulated = board.simulate_move(from, to);
    !is_king_in_check(&simulated, color)
}
