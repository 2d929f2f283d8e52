//! Candidate selection - staged picking of the moves offered to the move
//! chooser.
//!
//! Stages, in priority order:
//! 1. Checks. When any move gives check, only checks are offered.
//! 2. Safe captures (captures that do not leave the piece hanging).
//! 3. Safe quiet moves.
//! 4. Everything else, so a short list still gets filled.
//!
//! Within a stage moves keep the generator's row-major order. Nothing is
//! scored or shuffled here.

use crate::annotate::AnnotatedMove;

pub const MAX_CANDIDATES: usize = 10;

/// Selection stages, walked in declaration order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Stage {
    Checks,
    SafeCaptures,
    SafeQuiets,
    Fallback,
    Done,
}

impl Stage {
    fn admits(&self, mv: &AnnotatedMove) -> bool {
        match self {
            Stage::Checks => mv.gives_check,
            Stage::SafeCaptures => mv.is_capture && !mv.is_hanging_after_move,
            Stage::SafeQuiets => !mv.is_capture && !mv.is_hanging_after_move,
            // the safe stages already yielded every non-hanging move
            Stage::Fallback => mv.is_hanging_after_move,
            Stage::Done => false,
        }
    }

    fn next(&self) -> Stage {
        match self {
            Stage::Checks => Stage::Done,
            Stage::SafeCaptures => Stage::SafeQuiets,
            Stage::SafeQuiets => Stage::Fallback,
            Stage::Fallback | Stage::Done => Stage::Done,
        }
    }
}

/// Walks an annotated move list stage by stage, yielding each move at most
/// once.
pub struct MovePicker<'a> {
    moves: &'a [AnnotatedMove],
    stage: Stage,
    current_idx: usize,
}

impl<'a> MovePicker<'a> {
    pub fn new(moves: &'a [AnnotatedMove]) -> Self {
        let stage = if moves.iter().any(|m| m.gives_check) {
            Stage::Checks
        } else {
            Stage::SafeCaptures
        };
        Self {
            moves,
            stage,
            current_idx: 0,
        }
    }
}

impl<'a> Iterator for MovePicker<'a> {
    type Item = &'a AnnotatedMove;

    fn next(&mut self) -> Option<&'a AnnotatedMove> {
        while self.stage != Stage::Done {
            while let Some(mv) = self.moves.get(self.current_idx) {
                self.current_idx += 1;
                if self.stage.admits(mv) {
                    return Some(mv);
                }
            }
            self.stage = self.stage.next();
            self.current_idx = 0;
        }
        None
    }
}

/// At most [`MAX_CANDIDATES`] moves, picked stage by stage.
pub fn select_candidates(moves: &[AnnotatedMove]) -> Vec<AnnotatedMove> {
    MovePicker::new(moves)
        .take(MAX_CANDIDATES)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::movegen::generate_legal_moves;
    use crate::types::*;
    use pretty_assertions::assert_eq;

    /// A synthetic move whose origin encodes its index in the list.
    fn mv(index: u8, capture: bool, hanging: bool, check: bool) -> AnnotatedMove {
        AnnotatedMove {
            from: Position::new(index / 8, index % 8),
            to: Position::new(0, 0),
            piece_type: PieceType::Knight,
            is_capture: capture,
            captured: if capture { Some(PieceType::Pawn) } else { None },
            is_hanging_after_move: hanging,
            attackers_after_move: usize::from(hanging),
            gives_check: check,
        }
    }

    fn indices(moves: &[AnnotatedMove]) -> Vec<u8> {
        moves.iter().map(|m| m.from.row * 8 + m.from.col).collect()
    }

    #[test]
    fn empty_list_gives_no_candidates() {
        assert!(select_candidates(&[]).is_empty());
    }

    #[test]
    fn checks_crowd_out_everything_else() {
        let moves = vec![
            mv(0, true, false, false),
            mv(1, false, false, true),
            mv(2, false, false, false),
            mv(3, true, true, true),
        ];
        assert_eq!(indices(&select_candidates(&moves)), vec![1, 3]);
    }

    #[test]
    fn checks_are_truncated() {
        let moves: Vec<AnnotatedMove> = (0..15).map(|i| mv(i, false, false, true)).collect();
        assert_eq!(
            indices(&select_candidates(&moves)),
            (0..10).collect::<Vec<u8>>()
        );
    }

    #[test]
    fn safe_captures_then_safe_quiets_then_the_rest() {
        let moves = vec![
            mv(0, false, false, false),
            mv(1, true, true, false),
            mv(2, true, false, false),
            mv(3, false, true, false),
            mv(4, false, false, false),
            mv(5, true, false, false),
        ];
        assert_eq!(indices(&select_candidates(&moves)), vec![2, 5, 0, 4, 1, 3]);
    }

    #[test]
    fn fallback_not_reached_when_safe_moves_fill_the_list() {
        let mut moves: Vec<AnnotatedMove> = vec![mv(0, true, true, false)];
        moves.extend((1..12).map(|i| mv(i, false, false, false)));
        let picked = select_candidates(&moves);
        assert_eq!(picked.len(), MAX_CANDIDATES);
        assert_eq!(indices(&picked), (1..11).collect::<Vec<u8>>());
    }

    #[test]
    fn no_duplicates() {
        let moves: Vec<AnnotatedMove> = (0..6)
            .map(|i| mv(i, i % 2 == 0, i % 3 == 0, false))
            .collect();
        let mut picked = indices(&select_candidates(&moves));
        assert_eq!(picked.len(), 6);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 6);
    }

    #[test]
    fn only_checks_from_a_real_position() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let moves = generate_legal_moves(&board, Color::White);
        let picked = select_candidates(&moves);
        assert!(!picked.is_empty());
        assert!(picked.len() <= MAX_CANDIDATES);
        assert!(picked.iter().all(|m| m.gives_check));
    }

    #[test]
    fn starting_position_offers_ten_quiet_moves() {
        let moves = generate_legal_moves(&Board::new(), Color::White);
        let picked = select_candidates(&moves);
        assert_eq!(picked, moves[..10].to_vec());
    }
}
