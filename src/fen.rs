//! Board snapshots from FEN strings.
//!
//! Only the fields the rules layer has a use for are interpreted: piece
//! placement, side to move, and castling availability (which decides the
//! `has_moved` flags of kings and rooks). En passant target and move
//! clocks are accepted and ignored.

use crate::board::Board;
use crate::error::FenError;
use crate::types::*;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A board plus the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setup {
    pub board: Board,
    pub side_to_move: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingRights {
    fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    fn parse(field: &str) -> Result<Self, FenError> {
        let mut rights = Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        };
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                other => return Err(FenError::UnknownCastling(other)),
            }
        }
        Ok(rights)
    }

    fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Whether a piece standing on `pos` keeps its unmoved status.
    fn keeps_unmoved(&self, piece: &Piece, pos: Position) -> bool {
        let home_row = piece.color.back_row();
        match piece.piece_type {
            PieceType::Pawn => pos.row == piece.color.pawn_start_row(),
            PieceType::King => {
                pos == Position::new(home_row, 4)
                    && (self.kingside(piece.color) || self.queenside(piece.color))
            }
            PieceType::Rook if pos == Position::new(home_row, 7) => self.kingside(piece.color),
            PieceType::Rook if pos == Position::new(home_row, 0) => self.queenside(piece.color),
            PieceType::Rook => false,
            _ => true,
        }
    }
}

pub fn parse_fen(fen: &str) -> Result<Setup, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::Empty)?;

    let side_to_move = match fields.next() {
        Some(field) => {
            let mut chars = field.chars();
            match (chars.next().and_then(Color::from_char), chars.next()) {
                (Some(color), None) => color,
                _ => return Err(FenError::UnknownColor(field.to_string())),
            }
        }
        None => Color::White,
    };

    let rights = match fields.next() {
        Some(field) => CastlingRights::parse(field)?,
        None => CastlingRights::all(),
    };

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                continue;
            }
            let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
            if col >= 8 {
                return Err(FenError::RankWidth {
                    rank: 8 - row,
                    files: col + 1,
                });
            }
            let pos = Position::new(row as u8, col as u8);
            let piece = if rights.keeps_unmoved(&piece, pos) {
                piece
            } else {
                piece.moved()
            };
            board.set_piece(pos, piece);
            col += 1;
        }
        if col != 8 {
            return Err(FenError::RankWidth {
                rank: 8 - row,
                files: col,
            });
        }
    }

    Ok(Setup {
        board,
        side_to_move,
    })
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        parse_fen(fen).map(|setup| setup.board)
    }
}
