//! Tactical metadata for a legal move, computed on the board after the move.

use itertools::Itertools;
use serde::Serialize;

use crate::attacks::can_attack;
use crate::board::Board;
use crate::check::is_king_in_check;
use crate::rules::is_legal_move;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotatedMove {
    pub from: Position,
    pub to: Position,
    pub piece_type: PieceType,
    pub is_capture: bool,
    pub captured: Option<PieceType>,
    pub is_hanging_after_move: bool,
    pub attackers_after_move: usize,
    pub gives_check: bool,
}

impl AnnotatedMove {
    pub fn to_move(&self) -> Move {
        Move::new(self.from, self.to)
    }

    pub fn to_human(&self) -> String {
        let mut tags = Vec::new();
        if let Some(captured) = self.captured {
            tags.push(format!("takes {}", captured.to_human()));
        }
        if self.gives_check {
            tags.push("check".to_string());
        }
        if self.is_hanging_after_move {
            tags.push("hanging".to_string());
        }
        if self.attackers_after_move > 0 {
            tags.push(format!("{} attacker(s)", self.attackers_after_move));
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        format!(
            "{} {}{}",
            self.piece_type.to_human(),
            self.to_move().to_algebraic(),
            tags
        )
    }
}

/// Annotate a move that is already known to be legal.
///
/// Panics when `mv.from` is empty.
pub fn annotate_move(board: &Board, mv: Move) -> AnnotatedMove {
    let piece = board
        .piece_at(mv.from)
        .unwrap_or_else(|| panic!("no piece on {} to annotate", mv.from));
    let color = piece.color;
    let captured = board
        .piece_at(mv.to)
        .filter(|target| target.color != color)
        .map(|target| target.piece_type);
    let after = board.simulate_move(mv.from, mv.to);

    AnnotatedMove {
        from: mv.from,
        to: mv.to,
        piece_type: piece.piece_type,
        is_capture: captured.is_some(),
        captured,
        is_hanging_after_move: is_hanging(&after, mv.to, color),
        attackers_after_move: count_attackers(&after, mv.to, color),
        gives_check: is_king_in_check(&after, color.other_color()),
    }
}

/// Number of enemy pieces (enemies of `color`) that could legally move
/// onto `square`.
pub fn count_attackers(board: &Board, square: Position, color: Color) -> usize {
    board
        .pieces(color.other_color())
        .filter(|(from, piece)| is_legal_move(piece, board, *from, square))
        .count()
}

/// Exchange values of the enemy pieces that could capture on `square`,
/// cheapest first.
fn attacker_values(board: &Board, square: Position, color: Color) -> Vec<i32> {
    board
        .pieces(color.other_color())
        .filter(|(from, piece)| is_legal_move(piece, board, *from, square))
        .map(|(_, piece)| piece.piece_type.exchange_value())
        .sorted()
        .collect()
}

/// Exchange values of the `color` pieces guarding `square`, cheapest first.
///
/// Defence is geometric: a piece covers a friendly square it could attack,
/// even though it may not move onto it right now.
fn defender_values(board: &Board, square: Position, color: Color) -> Vec<i32> {
    board
        .pieces(color)
        .filter(|(from, _)| *from != square)
        .filter(|(from, piece)| can_attack(piece, board, *from, square))
        .map(|(_, piece)| piece.piece_type.exchange_value())
        .sorted()
        .collect()
}

/// Is the `color` piece on `square` left hanging?
///
/// A simplified exchange estimate, not a full static exchange evaluation:
/// starting from the value of the piece on the square, each round subtracts
/// the cheapest remaining attacker and adds back the cheapest remaining
/// defender, and the piece hangs as soon as the running total drops below
/// zero. Reveal order, x-rays and pins are ignored.
pub fn is_hanging(board: &Board, square: Position, color: Color) -> bool {
    let piece = match board.piece_at(square) {
        Some(piece) => piece,
        None => return false,
    };

    let attackers = attacker_values(board, square, color);
    if attackers.is_empty() {
        return false;
    }
    let defenders = defender_values(board, square, color);

    let mut material = piece.piece_type.exchange_value();
    for (i, attacker) in attackers.iter().enumerate() {
        material -= attacker;
        if let Some(defender) = defenders.get(i) {
            material += defender;
        }
        if material < 0 {
            return true;
        }
    }
    false
}
