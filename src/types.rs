use itertools::iproduct;
use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn from_case(c: char) -> Color {
        if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn other_color(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step. White advances toward row 0.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn back_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    /// Value used by the exchange heuristic. The king is priced high so that
    /// it never counts as a cheap attacker or defender.
    pub fn exchange_value(&self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 100,
        }
    }

    /// Value used when counting material on the board.
    pub fn material_value(&self) -> i32 {
        match self {
            PieceType::King => 0,
            other => other.exchange_value(),
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// A square on the board. Row 0 is black's back rank, row 7 white's.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Panics when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Position {
        assert!(
            row < 8 && col < 8,
            "position ({row}, {col}) is off the board"
        );
        Position { row, col }
    }

    pub fn try_new(row: i8, col: i8) -> Option<Position> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// False only for a position built directly from out-of-range fields.
    pub fn is_on_board(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        Position::try_new(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// All 64 squares, row-major with columns ascending.
    pub fn all() -> impl Iterator<Item = Position> + Clone {
        iproduct!(0..8u8, 0..8u8).map(|(row, col)| Position { row, col })
    }

    pub fn from_algebraic(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return None;
        }
        let col = file_char as u8 - b'a';
        let rank = rank_char as u8 - b'0';
        Some(Position { row: 8 - rank, col })
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.col) as char, 8 - self.row)
    }

    /// Square parity, derived from the coordinates.
    pub fn is_light_square(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    pub fn row_delta(&self, other: &Position) -> i8 {
        other.row as i8 - self.row as i8
    }

    pub fn col_delta(&self, other: &Position) -> i8 {
        other.col as i8 - self.col as i8
    }

    /// Chebyshev distance between two squares.
    pub fn distance(&self, other: &Position) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Squares strictly between self and other, walking from self.
    ///
    /// None unless the two squares share a row, a column or a diagonal.
    pub fn ray_to(&self, other: &Position) -> Option<Vec<Position>> {
        if self == other {
            return None;
        }
        let d_row = self.row_delta(other);
        let d_col = self.col_delta(other);
        if d_row != 0 && d_col != 0 && d_row.abs() != d_col.abs() {
            return None;
        }
        let (step_row, step_col) = (d_row.signum(), d_col.signum());
        let steps = d_row.abs().max(d_col.abs());
        Some(
            (1..steps)
                .filter_map(|i| self.offset(step_row * i, step_col * i))
                .collect(),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece {
            piece_type,
            color,
            has_moved: false,
        }
    }

    /// Piece from its FEN letter: uppercase is white, lowercase black.
    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_char(c)?;
        Some(Piece::new(piece_type, Color::from_case(c)))
    }

    pub fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn to_symbol(&self) -> &str {
        match (self.color, self.piece_type) {
            (Color::White, PieceType::Pawn) => "♙",
            (Color::White, PieceType::Knight) => "♘",
            (Color::White, PieceType::Bishop) => "♗",
            (Color::White, PieceType::Rook) => "♖",
            (Color::White, PieceType::Queen) => "♕",
            (Color::White, PieceType::King) => "♔",
            (Color::Black, PieceType::Pawn) => "♟",
            (Color::Black, PieceType::Knight) => "♞",
            (Color::Black, PieceType::Bishop) => "♝",
            (Color::Black, PieceType::Rook) => "♜",
            (Color::Black, PieceType::Queen) => "♛",
            (Color::Black, PieceType::King) => "♚",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Long algebraic form, e.g. `e2e4`.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let from = Position::from_algebraic(s.get(0..2)?)?;
        let to = Position::from_algebraic(s.get(2..)?)?;
        Some(Self { from, to })
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.from.to_algebraic(), self.to.to_algebraic())
    }

    /// Row/column notation handed to the move chooser, e.g. `6,4->4,4`.
    pub fn to_coordinates(&self) -> String {
        format!(
            "{},{}->{},{}",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }

    /// A king moving two columns along its row.
    pub fn is_castle_shape(&self, piece: &Piece) -> bool {
        piece.piece_type == PieceType::King
            && self.from.row == self.to.row
            && self.from.col.abs_diff(self.to.col) == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_from_char() {
        assert_eq!(Color::from_char('w'), Some(Color::White));
        assert_eq!(Color::from_char('b'), Some(Color::Black));
        assert_eq!(Color::from_char('x'), None);
    }

    #[test]
    fn test_other_color() {
        assert_eq!(Color::White.other_color(), Color::Black);
        assert_eq!(Color::Black.other_color(), Color::White);
    }

    #[test]
    fn test_piece_type_from_char() {
        assert_eq!(PieceType::from_char('p'), Some(PieceType::Pawn));
        assert_eq!(PieceType::from_char('N'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_char('b'), Some(PieceType::Bishop));
        assert_eq!(PieceType::from_char('R'), Some(PieceType::Rook));
        assert_eq!(PieceType::from_char('q'), Some(PieceType::Queen));
        assert_eq!(PieceType::from_char('K'), Some(PieceType::King));
        assert_eq!(PieceType::from_char('z'), None);
    }

    #[test]
    fn test_is_sliding() {
        assert!(PieceType::Rook.is_sliding());
        assert!(PieceType::Bishop.is_sliding());
        assert!(PieceType::Queen.is_sliding());
        assert!(!PieceType::Pawn.is_sliding());
        assert!(!PieceType::Knight.is_sliding());
        assert!(!PieceType::King.is_sliding());
    }

    #[test]
    fn test_position_algebraic() {
        assert_eq!(Position::from_algebraic("a8"), Some(Position::new(0, 0)));
        assert_eq!(Position::from_algebraic("e1"), Some(Position::new(7, 4)));
        assert_eq!(Position::from_algebraic("h1"), Some(Position::new(7, 7)));
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("e9"), None);
        assert_eq!(Position::from_algebraic("e10"), None);
        assert_eq!(Position::new(6, 4).to_algebraic(), "e2");
    }

    #[test]
    #[should_panic]
    fn test_position_off_board_panics() {
        Position::new(8, 0);
    }

    #[test]
    fn test_square_parity() {
        assert!(Position::new(0, 0).is_light_square());
        assert!(!Position::new(0, 1).is_light_square());
        assert!(Position::new(7, 7).is_light_square());
    }

    #[test]
    fn test_all_positions_row_major() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[8], Position::new(1, 0));
        assert_eq!(all[63], Position::new(7, 7));
    }

    #[test]
    fn test_ray_to() {
        let a1 = Position::new(7, 0);
        assert_eq!(
            a1.ray_to(&Position::new(7, 3)),
            Some(vec![Position::new(7, 1), Position::new(7, 2)])
        );
        assert_eq!(
            Position::new(7, 3).ray_to(&a1),
            Some(vec![Position::new(7, 2), Position::new(7, 1)])
        );
        assert_eq!(
            a1.ray_to(&Position::new(4, 3)),
            Some(vec![Position::new(6, 1), Position::new(5, 2)])
        );
        assert_eq!(a1.ray_to(&Position::new(6, 0)), Some(vec![]));
        assert_eq!(a1.ray_to(&Position::new(5, 1)), None);
        assert_eq!(a1.ray_to(&a1), None);
    }

    #[test]
    fn test_move_notation() {
        let m = Move::from_algebraic("e2e4").unwrap();
        assert_eq!(m, Move::new(Position::new(6, 4), Position::new(4, 4)));
        assert_eq!(m.to_coordinates(), "6,4->4,4");
        assert_eq!(m.to_string(), "e2e4");
        assert_eq!(Move::from_algebraic("e2"), None);
    }

    #[test]
    fn test_piece_chars() {
        let p = Piece::from_char('q').unwrap();
        assert_eq!(p.color, Color::Black);
        assert_eq!(p.piece_type, PieceType::Queen);
        assert!(!p.has_moved);
        assert_eq!(p.to_char(), 'q');
        assert_eq!(Piece::new(PieceType::Knight, Color::White).to_char(), 'N');
    }
}
