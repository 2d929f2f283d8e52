use chrono::prelude::*;
use log::{debug, info, warn};

use crate::annotate::AnnotatedMove;
use crate::board::Board;
use crate::check::is_move_safe;
use crate::chooser::{ChoiceRequest, MoveChooser};
use crate::error::{FenError, GameError, Rejection};
use crate::evaluate::{summarize, PositionSummary};
use crate::fen::{parse_fen, STARTING_POSITION_FEN};
use crate::movegen::generate_legal_moves;
use crate::movepicker::select_candidates;
use crate::rules::is_legal_move;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// How many answers the chooser gets per turn before the top candidate
    /// is played instead.
    pub max_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub explanation: String,
    pub attempts: usize,
    pub fallback: bool,
}

/// A game session: owns the live board and is the only place it changes.
pub struct Game {
    board: Board,
    side_to_move: Color,
    start_color: Color,
    last_move: Option<Move>,
    moves: Vec<Move>,
    captured: Vec<Piece>,
    thought_history: Vec<String>,
    config: GameConfig,
    start_fen: String,
    game_start_time: DateTime<Local>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_board(Board::new(), Color::White, config, STARTING_POSITION_FEN)
    }

    pub fn from_fen(fen: &str, config: GameConfig) -> Result<Self, FenError> {
        let setup = parse_fen(fen)?;
        Ok(Self::from_board(setup.board, setup.side_to_move, config, fen))
    }

    fn from_board(board: Board, side_to_move: Color, config: GameConfig, fen: &str) -> Self {
        Self {
            board,
            side_to_move,
            start_color: side_to_move,
            last_move: None,
            moves: Vec::new(),
            captured: Vec::new(),
            thought_history: Vec::new(),
            config,
            start_fen: fen.to_string(),
            game_start_time: Local::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn thought_history(&self) -> &[String] {
        &self.thought_history
    }

    pub fn summary(&self) -> PositionSummary {
        summarize(&self.board, self.side_to_move)
    }

    pub fn legal_moves(&self) -> Vec<AnnotatedMove> {
        generate_legal_moves(&self.board, self.side_to_move)
    }

    /// Re-checks a proposed move against the live board.
    pub fn validate_move(&self, mv: Move) -> Result<(), Rejection> {
        if !mv.from.is_on_board() || !mv.to.is_on_board() {
            return Err(Rejection::OffBoard);
        }
        let piece = self.board.piece_at(mv.from).ok_or(Rejection::NoPiece)?;
        if mv.from == mv.to {
            return Err(Rejection::SameSquare);
        }
        if piece.color != self.side_to_move {
            return Err(Rejection::WrongSide);
        }
        if matches!(self.board.piece_at(mv.to), Some(target) if target.color == piece.color) {
            return Err(Rejection::OwnPieceCaptured);
        }
        if !is_legal_move(&piece, &self.board, mv.from, mv.to) {
            return Err(Rejection::IllegalShape);
        }
        if !is_move_safe(&self.board, mv.from, mv.to, piece.color) {
            return Err(Rejection::LeavesKingInCheck);
        }
        Ok(())
    }

    /// Validates and plays a move, returning the captured piece if any.
    pub fn apply_move(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        self.validate_move(mv)
            .map_err(|reason| GameError::Rejected { mv, reason })?;
        self.execute_move(mv)
    }

    fn execute_move(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        let piece = self.board.remove_piece(mv.from).ok_or(GameError::Rejected {
            mv,
            reason: Rejection::NoPiece,
        })?;

        if mv.is_castle_shape(&piece) {
            let kingside = mv.to.col > mv.from.col;
            let rook_from = Position::new(mv.from.row, if kingside { 7 } else { 0 });
            let rook_to = Position::new(
                mv.from.row,
                if kingside { mv.to.col - 1 } else { mv.to.col + 1 },
            );
            if let Some(rook) = self.board.remove_piece(rook_from) {
                self.board.set_piece(rook_to, rook.moved());
            }
        }

        let captured = self.board.remove_piece(mv.to);
        self.board.set_piece(mv.to, piece.moved());
        if let Some(taken) = captured {
            debug!(
                "{} {} takes {} {} on {}",
                piece.color,
                piece.piece_type.to_human(),
                taken.color,
                taken.piece_type.to_human(),
                mv.to
            );
            self.captured.push(taken);
        }

        self.moves.push(mv);
        self.last_move = Some(mv);
        self.side_to_move = self.side_to_move.other_color();
        Ok(captured)
    }

    /// Lets `chooser` pick a move for the side to move and plays it.
    ///
    /// Every rejected answer is noted in the thought history so the chooser
    /// can see why on its next attempt. After `max_attempts` failed answers
    /// the top candidate is played.
    pub fn play_turn<C>(&mut self, chooser: &mut C) -> Result<TurnOutcome, GameError>
    where
        C: MoveChooser + ?Sized,
    {
        let color = self.side_to_move;
        let moves = self.legal_moves();
        let candidates = select_candidates(&moves);
        let top = match candidates.first() {
            Some(top) => *top,
            None => {
                warn!("{color} has no legal moves");
                return Err(GameError::NoLegalMoves(color));
            }
        };
        let summary = self.summary();
        let last_move = self.last_move.map(|m| m.to_coordinates());

        for attempt in 1..=self.config.max_attempts {
            let choice = chooser.choose(&ChoiceRequest {
                board: &self.board,
                color,
                candidates: &candidates,
                summary: &summary,
                last_move: last_move.as_deref(),
                history: &self.thought_history,
            });
            let Some(choice) = choice else {
                debug!("attempt {attempt}: chooser gave no readable move");
                self.thought_history
                    .push("Invalid answer: no move could be read from it.".to_string());
                continue;
            };
            match self.validate_move(choice.mv) {
                Ok(()) => {
                    let captured = self.execute_move(choice.mv)?;
                    self.thought_history.push(choice.explanation.clone());
                    return Ok(TurnOutcome {
                        mv: choice.mv,
                        captured,
                        explanation: choice.explanation,
                        attempts: attempt,
                        fallback: false,
                    });
                }
                Err(reason) => {
                    debug!("attempt {attempt}: rejected {}: {reason}", choice.mv.to_coordinates());
                    self.thought_history.push(reason.to_string());
                }
            }
        }

        warn!(
            "no usable answer after {} attempts, playing top candidate {}",
            self.config.max_attempts,
            top.to_human()
        );
        let mv = top.to_move();
        let explanation = format!("Fell back to the top candidate, {}.", top.to_human());
        let captured = self.execute_move(mv)?;
        self.thought_history.push(explanation.clone());
        Ok(TurnOutcome {
            mv,
            captured,
            explanation,
            attempts: self.config.max_attempts,
            fallback: true,
        })
    }

    /// Plays up to `max_plies` turns, stopping early when the side to move
    /// has no legal moves.
    pub fn play<C>(&mut self, max_plies: usize, white: &mut C, black: &mut C) -> Vec<TurnOutcome>
    where
        C: MoveChooser + ?Sized,
    {
        let mut outcomes = Vec::new();
        for _ in 0..max_plies {
            let chooser = match self.side_to_move {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            match self.play_turn(chooser) {
                Ok(outcome) => {
                    info!(
                        "move {}: {} {}",
                        self.moves.len(),
                        self.side_to_move.other_color(),
                        outcome.mv
                    );
                    outcomes.push(outcome);
                }
                Err(e) => {
                    info!("game stopped: {e}");
                    break;
                }
            }
        }
        outcomes
    }

    /// Move list in long algebraic notation with a small dated header.
    pub fn to_transcript(&self) -> String {
        let mut transcript = String::new();
        transcript.push_str("[Event \"chess_rules game\"]\n");
        transcript.push_str(&format!(
            "[Date \"{}\"]\n",
            self.game_start_time.format("%Y.%m.%d")
        ));
        if self.start_fen != STARTING_POSITION_FEN {
            transcript.push_str(&format!("[FEN \"{}\"]\n", self.start_fen));
        }
        transcript.push('\n');

        let offset = match self.start_color {
            Color::White => 0,
            Color::Black => 1,
        };
        let mut tokens = Vec::new();
        for (i, m) in self.moves.iter().enumerate() {
            let ply = i + offset;
            if ply % 2 == 0 {
                tokens.push(format!("{}.", ply / 2 + 1));
            } else if i == 0 {
                tokens.push(format!("{}...", ply / 2 + 1));
            }
            tokens.push(m.to_algebraic());
        }
        transcript.push_str(&tokens.join(" "));
        transcript
    }
}
