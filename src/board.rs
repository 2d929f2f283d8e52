use std::ops::Index;

use crate::types::*;

const BACK_ROW: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8x8 grid of squares, row-major, each holding at most one piece.
///
/// The board is a plain value: every simulation works on a copy and the
/// original is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    fn index(&self, pos: Position) -> &Option<Piece> {
        &self.squares[pos.row as usize][pos.col as usize]
    }
}

impl Board {
    /// Standard starting position, nothing moved yet.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (col, piece_type) in BACK_ROW.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                board.set_piece(
                    Position::new(color.back_row(), col),
                    Piece::new(*piece_type, color),
                );
                board.set_piece(
                    Position::new(color.pawn_start_row(), col),
                    Piece::new(PieceType::Pawn, color),
                );
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self[pos]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self[pos].is_none()
    }

    pub fn set_piece(&mut self, pos: Position, piece: Piece) {
        self.squares[pos.row as usize][pos.col as usize] = Some(piece);
    }

    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize].take()
    }

    /// Every piece of `color` with its square, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Every occupied square, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self[pos].map(|piece| (pos, piece)))
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// A copy of the board with the occupant of `from` moved onto `to`.
    ///
    /// Whatever stood on `to` is overwritten. Only the moving piece is
    /// relocated, so a castling king travels without its rook.
    pub fn simulate_move(&self, from: Position, to: Position) -> Board {
        let mut board = *self;
        let piece = board
            .remove_piece(from)
            .unwrap_or_else(|| panic!("cannot simulate a move from empty square {from}"));
        board.set_piece(to, piece);
        board
    }

    /// Piece placement field of a FEN string.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::new();
        for row in 0..8u8 {
            let mut empty = 0;
            for col in 0..8u8 {
                match self[Position::new(row, col)] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }
        fen
    }

    /// Character grid with row indices and file letters, the text form the
    /// move chooser receives. Uppercase is white, `.` is an empty square.
    pub fn to_coordinate_grid(&self) -> String {
        let mut output = String::from("    0 1 2 3 4 5 6 7\n    a b c d e f g h\n");
        for row in 0..8u8 {
            output.push_str(&format!("{row} | "));
            for col in 0..8u8 {
                match self[Position::new(row, col)] {
                    Some(piece) => output.push(piece.to_char()),
                    None => output.push('.'),
                }
                output.push(' ');
            }
            output.push('\n');
        }
        output
    }

    pub fn draw_board(&self) -> String {
        let mut output = String::new();
        for row in 0..8u8 {
            output.push_str(&format!("{} ", 8 - row));
            for col in 0..8u8 {
                let pos = Position::new(row, col);
                match self[pos] {
                    Some(piece) => output.push_str(piece.to_symbol()),
                    None if pos.is_light_square() => output.push('·'),
                    None => output.push(' '),
                }
                output.push(' ');
            }
            output.push('\n');
        }
        output.push_str("  a b c d e f g h\n");
        output
    }

    pub fn draw_to_terminal(&self) {
        print!("{}", self.draw_board());
    }
}
