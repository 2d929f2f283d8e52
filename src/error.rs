use thiserror::Error;

use crate::types::{Color, Move};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files instead of 8")]
    RankWidth { rank: usize, files: usize },
    #[error("unrecognized piece character `{0}`")]
    UnknownPiece(char),
    #[error("unrecognized side to move `{0}`")]
    UnknownColor(String),
    #[error("unrecognized castling availability `{0}`")]
    UnknownCastling(char),
}

/// Why the session refused a proposed move.
///
/// The messages are written in the chooser's voice because they are appended
/// to the thought history it sees on the next attempt.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid move: the coordinates are off the board.")]
    OffBoard,
    #[error("Invalid move: the selected piece does not exist.")]
    NoPiece,
    #[error("Invalid move: from and to squares are the same.")]
    SameSquare,
    #[error("Invalid move: that piece belongs to the other side.")]
    WrongSide,
    #[error("Invalid move: I tried to capture my own piece.")]
    OwnPieceCaptured,
    #[error("Invalid move: this move is illegal according to chess rules.")]
    IllegalShape,
    #[error("Invalid move: this move would leave my king in check.")]
    LeavesKingInCheck,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
    #[error("move {mv} rejected: {reason}")]
    Rejected { mv: Move, reason: Rejection },
}
