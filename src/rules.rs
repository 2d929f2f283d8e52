//! Per-piece legality of a single move, ignoring whose turn it is and
//! whether the mover's king ends up in check.
//!
//! Every function here is a total predicate: bad shapes, blocked paths and
//! landing on a friendly piece all answer `false`. En passant and promotion
//! are not part of these rules.

use crate::attacks::{diagonal_ray_clear, is_knight_jump, straight_ray_clear};
use crate::board::Board;
use crate::castling::can_castle;
use crate::types::*;

pub fn is_legal_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    if from == to {
        return false;
    }
    match piece.piece_type {
        PieceType::Pawn => validate_pawn_move(piece, board, from, to),
        PieceType::Knight => validate_knight_move(piece, board, from, to),
        PieceType::Bishop => validate_bishop_move(piece, board, from, to),
        PieceType::Rook => validate_rook_move(piece, board, from, to),
        PieceType::Queen => validate_queen_move(piece, board, from, to),
        PieceType::King => validate_king_move(piece, board, from, to),
    }
}

/// Empty, or held by the other side.
fn can_land_on(piece: &Piece, board: &Board, to: Position) -> bool {
    match board.piece_at(to) {
        Some(target) => target.color != piece.color,
        None => true,
    }
}

fn validate_pawn_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    let direction = piece.color.pawn_direction();
    let d_row = from.row_delta(&to);
    let d_col = from.col_delta(&to);
    let target = board.piece_at(to);

    if d_col == 0 && d_row == direction {
        return target.is_none();
    }

    if d_col == 0 && d_row == 2 * direction && from.row == piece.color.pawn_start_row() {
        let middle = match from.offset(direction, 0) {
            Some(pos) => pos,
            None => return false,
        };
        return board.is_empty_at(middle) && target.is_none();
    }

    if d_col.abs() == 1 && d_row == direction {
        return matches!(target, Some(t) if t.color != piece.color);
    }

    false
}

fn validate_knight_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    is_knight_jump(from, to) && can_land_on(piece, board, to)
}

fn validate_bishop_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    diagonal_ray_clear(board, from, to) && can_land_on(piece, board, to)
}

fn validate_rook_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    straight_ray_clear(board, from, to) && can_land_on(piece, board, to)
}

fn validate_queen_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    (straight_ray_clear(board, from, to) || diagonal_ray_clear(board, from, to))
        && can_land_on(piece, board, to)
}

fn validate_king_move(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    if from.row == to.row && from.col.abs_diff(to.col) == 2 {
        return can_castle(board, piece, from, to);
    }
    from.distance(&to) == 1 && can_land_on(piece, board, to)
}
