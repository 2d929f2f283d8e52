use crate::board::Board;
use crate::check::is_king_in_check;
use crate::types::*;

/// Can `king`, standing on `from`, castle by moving to `to`?
///
/// Only called for a two-column king move along its row. Moving the rook and
/// flagging both pieces as moved is left to whoever applies the move.
pub fn can_castle(board: &Board, king: &Piece, from: Position, to: Position) -> bool {
    can_castle_with(board, king, from, to, is_king_in_check)
}

/// [`can_castle`] with the check detector passed in.
pub fn can_castle_with<F>(
    board: &Board,
    king: &Piece,
    from: Position,
    to: Position,
    in_check: F,
) -> bool
where
    F: Fn(&Board, Color) -> bool,
{
    if king.has_moved || from.row != to.row || from.col.abs_diff(to.col) != 2 {
        return false;
    }

    let kingside = to.col > from.col;
    let rook_square = Position::new(from.row, if kingside { 7 } else { 0 });
    match board.piece_at(rook_square) {
        Some(rook)
            if rook.piece_type == PieceType::Rook
                && rook.color == king.color
                && !rook.has_moved => {}
        _ => return false,
    }

    match from.ray_to(&rook_square) {
        Some(between) if between.iter().all(|pos| board.is_empty_at(*pos)) => {}
        _ => return false,
    }

    if in_check(board, king.color) {
        return false;
    }

    // The king may not pass through or land on an attacked square. The walk
    // runs from the first step up to and including the destination.
    let step: i8 = if kingside { 1 } else { -1 };
    (1..=2).all(|i| {
        let transit = match from.offset(0, step * i) {
            Some(pos) => pos,
            None => return false,
        };
        let mut simulated = *board;
        simulated.remove_piece(from);
        simulated.set_piece(transit, *king);
        !in_check(&simulated, king.color)
    })
}
