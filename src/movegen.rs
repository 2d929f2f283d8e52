use itertools::iproduct;
use log::debug;
use rayon::prelude::*;

use crate::annotate::{annotate_move, AnnotatedMove};
use crate::board::Board;
use crate::check::is_move_safe;
use crate::rules::is_legal_move;
use crate::types::*;

/// Enumerates legal moves for one side by testing every origin square
/// holding one of its pieces against every destination square.
///
/// At most 64 x 64 pairs are tried per call. Each surviving pair has passed
/// both the per-piece rules and the king safety check.
pub struct MoveGenerator<'a> {
    board: &'a Board,
    color: Color,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board, color: Color) -> Self {
        Self { board, color }
    }

    /// Legal moves in row-major order of origin, then destination.
    pub fn legal_moves(&self) -> Vec<Move> {
        let origins = self.board.pieces(self.color);
        iproduct!(origins, Position::all())
            .filter(|((from, piece), to)| self.is_legal(piece, *from, *to))
            .map(|((from, _), to)| Move::new(from, to))
            .collect()
    }

    /// Legal moves with their tactical annotations, in generation order.
    pub fn collect(&self) -> Vec<AnnotatedMove> {
        let moves = self.legal_moves();
        debug!("{} has {} legal moves", self.color.to_human(), moves.len());
        // order is preserved by the indexed parallel iterator
        moves
            .par_iter()
            .map(|mv| annotate_move(self.board, *mv))
            .collect()
    }

    /// Legal destinations of the piece standing on `from`.
    pub fn destinations(&self, from: Position) -> Vec<Position> {
        match self.board.piece_at(from) {
            Some(piece) if piece.color == self.color => Position::all()
                .filter(|to| self.is_legal(&piece, from, *to))
                .collect(),
            _ => vec![],
        }
    }

    fn is_legal(&self, piece: &Piece, from: Position, to: Position) -> bool {
        is_legal_move(piece, self.board, from, to)
            && is_move_safe(self.board, from, to, self.color)
    }
}

pub fn generate_legal_moves(board: &Board, color: Color) -> Vec<AnnotatedMove> {
    MoveGenerator::new(board, color).collect()
}

pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    MoveGenerator::new(board, color).legal_moves()
}

/// Squares the piece on `from` may legally move to; empty when `from` is
/// empty.
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    match board.piece_at(from) {
        Some(piece) => MoveGenerator::new(board, piece.color).destinations(from),
        None => vec![],
    }
}
