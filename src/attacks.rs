//! Geometric reachability: could a piece standing on `from` strike `to`?
//!
//! Turn order and king safety are ignored here. Pawns only attack their two
//! forward diagonals, never the square straight ahead.

use crate::board::Board;
use crate::types::*;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn can_attack(piece: &Piece, board: &Board, from: Position, to: Position) -> bool {
    if from == to {
        return false;
    }
    match piece.piece_type {
        PieceType::Pawn => pawn_attacks(piece.color, from, to),
        PieceType::Knight => is_knight_jump(from, to),
        PieceType::Bishop => diagonal_ray_clear(board, from, to),
        PieceType::Rook => straight_ray_clear(board, from, to),
        PieceType::Queen => {
            straight_ray_clear(board, from, to) || diagonal_ray_clear(board, from, to)
        }
        PieceType::King => from.distance(&to) == 1,
    }
}

fn pawn_attacks(color: Color, from: Position, to: Position) -> bool {
    from.row_delta(&to) == color.pawn_direction() && from.col_delta(&to).abs() == 1
}

pub(crate) fn is_knight_jump(from: Position, to: Position) -> bool {
    let delta = (from.row_delta(&to), from.col_delta(&to));
    KNIGHT_OFFSETS.contains(&delta)
}

pub(crate) fn is_straight_line(from: Position, to: Position) -> bool {
    from != to && (from.row == to.row || from.col == to.col)
}

pub(crate) fn is_diagonal(from: Position, to: Position) -> bool {
    from != to && from.row.abs_diff(to.row) == from.col.abs_diff(to.col)
}

/// True when every square strictly between the two squares is empty.
/// Squares that do not share a line are never clear.
pub(crate) fn path_is_clear(board: &Board, from: Position, to: Position) -> bool {
    match from.ray_to(&to) {
        Some(ray) => ray.into_iter().all(|pos| board.is_empty_at(pos)),
        None => false,
    }
}

pub(crate) fn straight_ray_clear(board: &Board, from: Position, to: Position) -> bool {
    is_straight_line(from, to) && path_is_clear(board, from, to)
}

pub(crate) fn diagonal_ray_clear(board: &Board, from: Position, to: Position) -> bool {
    is_diagonal(from, to) && path_is_clear(board, from, to)
}
