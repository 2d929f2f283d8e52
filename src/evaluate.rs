//! Descriptive position summary handed to the move chooser alongside the
//! candidates. Nothing in here ranks or filters moves.
//!
//! Every numeric term is white-relative: positive favors white.

use std::fmt;

use itertools::iproduct;
use serde::Serialize;

use crate::board::Board;
use crate::check::is_king_in_check;
use crate::types::*;

const CENTER_SQUARES: [(u8, u8); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];
const CENTER_WEIGHT: f64 = 1.2;
const THREAT_WEIGHT: f64 = 0.15;
const THREAT_RADIUS: i8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Material {
    pub white: i32,
    pub black: i32,
}

impl Material {
    pub fn diff(&self) -> i32 {
        (self.white - self.black).abs()
    }

    /// The side ahead on material, if any.
    pub fn advantage(&self) -> Option<Color> {
        match self.white.cmp(&self.black) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn for_color(&self, color: Color) -> i32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GamePhase::Opening => "opening",
            GamePhase::Middlegame => "middlegame",
            GamePhase::Endgame => "endgame",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KingSafety {
    Safe,
    Exposed,
    Danger,
}

impl KingSafety {
    fn penalty(&self) -> f64 {
        match self {
            KingSafety::Safe => 0.0,
            KingSafety::Exposed => -1.5,
            KingSafety::Danger => -4.0,
        }
    }
}

impl fmt::Display for KingSafety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KingSafety::Safe => "safe",
            KingSafety::Exposed => "exposed",
            KingSafety::Danger => "in danger",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSummary {
    pub phase: GamePhase,
    pub material: Material,
    pub white_king: KingSafety,
    pub black_king: KingSafety,
    pub center_control: f64,
    pub piece_activity: f64,
    pub threats: f64,
    /// Weighted sum of the terms above.
    pub score: f64,
    pub in_check: bool,
}

impl PositionSummary {
    pub fn king(&self, color: Color) -> KingSafety {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Plain-language lines describing the position from `color`'s side.
    pub fn describe(&self, color: Color) -> Vec<String> {
        let opponent = color.other_color();
        let relative = |value: f64| match color {
            Color::White => value,
            Color::Black => -value,
        };

        let mut lines = vec![
            format!("You are playing as {color}. Your opponent is {opponent}."),
            format!("Game phase: {}.", self.phase),
        ];

        lines.push(match self.material.advantage() {
            None => "Material is equal.".to_string(),
            Some(side) if side == color => format!(
                "You have a material advantage of {} points.",
                self.material.diff()
            ),
            Some(_) => format!("You are down {} material points.", self.material.diff()),
        });

        lines.push(format!(
            "Your king is {}. Opponent king is {}.",
            self.king(color),
            self.king(opponent)
        ));

        let center = relative(self.center_control);
        lines.push(
            if center > 0.5 {
                "You control the center."
            } else if center < -0.5 {
                "Your opponent controls the center."
            } else {
                "Center control is balanced."
            }
            .to_string(),
        );

        let activity = relative(self.piece_activity);
        if activity > 0.5 {
            lines.push("Your pieces are more active.".to_string());
        } else if activity < -0.5 {
            lines.push("Opponent pieces are more active.".to_string());
        }

        let threats = relative(self.threats);
        if threats > 1.0 {
            lines.push("You have strong tactical threats.".to_string());
        } else if threats < -1.0 {
            lines.push("Opponent has dangerous threats.".to_string());
        }

        let score = relative(self.score);
        lines.push(
            if score > 2.0 {
                "Position is clearly better for you."
            } else if score < -2.0 {
                "Position is dangerous and requires defense."
            } else {
                "Position is roughly equal."
            }
            .to_string(),
        );
        lines
    }
}

fn sign(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

pub fn evaluate_material(board: &Board) -> Material {
    let mut material = Material { white: 0, black: 0 };
    for (_, piece) in board.occupied() {
        let value = piece.piece_type.material_value();
        match piece.color {
            Color::White => material.white += value,
            Color::Black => material.black += value,
        }
    }
    material
}

pub fn game_phase(board: &Board) -> GamePhase {
    let mut queens = 0;
    let mut pieces = 0;
    for (_, piece) in board.occupied() {
        match piece.piece_type {
            PieceType::Queen => queens += 1,
            PieceType::Rook | PieceType::Bishop | PieceType::Knight => pieces += 1,
            _ => {}
        }
    }
    if queens == 0 || pieces <= 4 {
        GamePhase::Endgame
    } else if pieces >= 10 {
        GamePhase::Opening
    } else {
        GamePhase::Middlegame
    }
}

/// Rough shelter score for `color`'s king: centralization and nearby enemy
/// pieces count against it, pawns directly in front count for it.
pub fn king_safety(board: &Board, color: Color) -> KingSafety {
    let king = match board.find_king(color) {
        Some(pos) => pos,
        None => return KingSafety::Danger,
    };

    let mut score = 0;
    if (2..=5).contains(&king.row) && (2..=5).contains(&king.col) {
        score += 2;
    }

    for d_col in -1..=1 {
        let shield = king
            .offset(color.pawn_direction(), d_col)
            .and_then(|pos| board.piece_at(pos));
        if matches!(shield, Some(p) if p.piece_type == PieceType::Pawn && p.color == color) {
            score -= 1;
        }
    }

    score += board
        .pieces(color.other_color())
        .filter(|(pos, piece)| piece.piece_type != PieceType::King && pos.distance(&king) <= 2)
        .count() as i32;

    match score {
        s if s >= 4 => KingSafety::Danger,
        s if s >= 2 => KingSafety::Exposed,
        _ => KingSafety::Safe,
    }
}

/// Occupation of d4, e4, d5 and e5, weighted by piece type. Rooks and kings
/// do not count.
pub fn center_control(board: &Board) -> f64 {
    CENTER_SQUARES
        .iter()
        .filter_map(|&(row, col)| board.piece_at(Position::new(row, col)))
        .map(|piece| {
            let value = match piece.piece_type {
                PieceType::Pawn => 2.0,
                PieceType::Knight => 1.5,
                PieceType::Bishop => 1.0,
                PieceType::Queen => 0.5,
                PieceType::Rook | PieceType::King => 0.0,
            };
            value * sign(piece.color)
        })
        .sum()
}

/// Development of minor pieces, rooks off the back rank or on files with no
/// friendly piece ahead, and queens still at home.
pub fn piece_activity(board: &Board) -> f64 {
    let mut score = 0.0;
    for (pos, piece) in board.occupied() {
        let s = sign(piece.color);
        let at_home = pos.row == piece.color.back_row();
        match piece.piece_type {
            PieceType::Knight | PieceType::Bishop => {
                score += if at_home { -0.3 * s } else { 0.5 * s };
            }
            PieceType::Rook => {
                if !at_home {
                    score += 0.7 * s;
                }
                if is_file_open_ahead(board, pos, piece.color) {
                    score += 0.4 * s;
                }
            }
            PieceType::Queen if at_home => score -= 0.2 * s,
            _ => {}
        }
    }
    score
}

/// No `color` piece on `pos`'s file between it and the far edge.
fn is_file_open_ahead(board: &Board, pos: Position, color: Color) -> bool {
    let mut square = pos.offset(color.pawn_direction(), 0);
    while let Some(current) = square {
        if matches!(board.piece_at(current), Some(p) if p.color == color) {
            return false;
        }
        square = current.offset(color.pawn_direction(), 0);
    }
    true
}

/// Enemy pieces within two squares of each piece, weighted by the exchange
/// value of the target. Kings are worth nothing as targets.
pub fn threats(board: &Board) -> f64 {
    let mut score = 0.0;
    for (pos, piece) in board.occupied() {
        let nearby = iproduct!(-THREAT_RADIUS..=THREAT_RADIUS, -THREAT_RADIUS..=THREAT_RADIUS)
            .filter(|&offset| offset != (0, 0))
            .filter_map(|(d_row, d_col)| pos.offset(d_row, d_col))
            .filter_map(|square| board.piece_at(square))
            .filter(|target| target.color != piece.color);
        for target in nearby {
            let value = match target.piece_type {
                PieceType::King => 0,
                other => other.exchange_value(),
            };
            score += THREAT_WEIGHT * f64::from(value) * sign(piece.color);
        }
    }
    score
}

pub fn summarize(board: &Board, side_to_move: Color) -> PositionSummary {
    let phase = game_phase(board);
    let material = evaluate_material(board);
    let white_king = king_safety(board, Color::White);
    let black_king = king_safety(board, Color::Black);
    let center_control = center_control(board);
    let piece_activity = piece_activity(board);
    let threats = threats(board);

    let mut score = f64::from(material.white - material.black);
    if phase != GamePhase::Endgame {
        score += center_control * CENTER_WEIGHT;
    }
    score += white_king.penalty() - black_king.penalty();
    score += piece_activity + threats;

    PositionSummary {
        phase,
        material,
        white_king,
        black_king,
        center_control,
        piece_activity,
        threats,
        score,
        in_check: is_king_in_check(board, side_to_move),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_starting_position_is_equal() {
        let material = evaluate_material(&Board::new());
        assert_eq!(material, Material { white: 39, black: 39 });
        assert_eq!(material.diff(), 0);
        assert_eq!(material.advantage(), None);
    }

    #[test]
    fn test_material_advantage() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let material = evaluate_material(&board);
        assert_eq!(material.advantage(), Some(Color::White));
        assert_eq!(material.diff(), 5);
        assert_eq!(material.for_color(Color::Black), 0);
    }

    #[test]
    fn test_game_phase() {
        assert_eq!(game_phase(&Board::new()), GamePhase::Opening);
        let no_queens = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR").unwrap();
        assert_eq!(game_phase(&no_queens), GamePhase::Endgame);
        let middlegame = Board::from_fen("r2qk2r/ppp2ppp/2n5/8/8/2N5/PPP2PPP/R2QK2R").unwrap();
        assert_eq!(game_phase(&middlegame), GamePhase::Middlegame);
    }

    #[test]
    fn test_king_safety() {
        let board = Board::new();
        assert_eq!(king_safety(&board, Color::White), KingSafety::Safe);
        assert_eq!(king_safety(&board, Color::Black), KingSafety::Safe);

        // central king with enemy pieces close by
        let board = Board::from_fen("4k3/8/8/2nq4/3K4/8/8/8").unwrap();
        assert_eq!(king_safety(&board, Color::White), KingSafety::Danger);

        let board = Board::from_fen("4k3/8/8/8/8/8/8/8").unwrap();
        assert_eq!(king_safety(&board, Color::White), KingSafety::Danger);
    }

    #[test]
    fn test_center_control() {
        assert_close(center_control(&Board::new()), 0.0);
        // black bishop on d5, white pawn d4 and knight e4
        let board = Board::from_fen("4k3/8/8/3b4/3PN3/8/8/4K3").unwrap();
        assert_close(center_control(&board), 2.5);
        // rooks and kings on the center squares are ignored
        let board = Board::from_fen("8/8/8/3rk3/3RK3/8/8/8").unwrap();
        assert_close(center_control(&board), 0.0);
    }

    #[test]
    fn test_piece_activity() {
        assert_close(piece_activity(&Board::new()), 0.0);
        // rook on an empty a-file, developed knight
        let board = Board::from_fen("4k3/8/8/8/8/2N5/8/R3K3").unwrap();
        assert_close(piece_activity(&board), 0.9);
        // rook behind its own pawn gets nothing, a lifted rook gets 0.7
        let board = Board::from_fen("4k3/8/8/8/8/P7/R7/4K3").unwrap();
        assert_close(piece_activity(&board), 0.7);
        // queen at home
        let board = Board::from_fen("3qk3/8/8/8/8/8/8/4K3").unwrap();
        assert_close(piece_activity(&board), 0.2);
    }

    #[test]
    fn test_threats() {
        assert_close(threats(&Board::new()), 0.0);
        // knight eyes the rook (0.15 * 5), the rook eyes the knight (0.15 * 3)
        let board = Board::from_fen("7k/8/5r2/8/4N3/8/8/K7").unwrap();
        assert_close(threats(&board), 0.3);
        // kings are never worth anything as targets
        let board = Board::from_fen("8/8/8/3k4/3K4/8/8/8").unwrap();
        assert_close(threats(&board), 0.0);
    }

    #[test]
    fn test_score_combines_terms() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let summary = summarize(&board, Color::White);
        assert_eq!(summary.phase, GamePhase::Endgame);
        assert_close(summary.piece_activity, 0.4);
        assert_close(summary.score, 5.4);

        // exposed white king costs 1.5
        let board = Board::from_fen("4k3/8/8/8/3K4/8/8/8 w - - 0 1").unwrap();
        let summary = summarize(&board, Color::White);
        assert_eq!(summary.white_king, KingSafety::Exposed);
        assert_close(summary.score, -1.5);
    }

    #[test]
    fn test_summary_reports_check() {
        let board = Board::from_fen("4r3/8/8/8/8/8/8/k3K3").unwrap();
        let summary = summarize(&board, Color::White);
        assert!(summary.in_check);
        assert_eq!(summary.phase, GamePhase::Endgame);
    }

    #[test]
    fn test_describe_starting_position() {
        let summary = summarize(&Board::new(), Color::White);
        assert_eq!(
            summary.describe(Color::White),
            vec![
                "You are playing as white. Your opponent is black.",
                "Game phase: opening.",
                "Material is equal.",
                "Your king is safe. Opponent king is safe.",
                "Center control is balanced.",
                "Position is roughly equal.",
            ]
        );
    }

    #[test]
    fn test_describe_is_side_relative() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let summary = summarize(&board, Color::White);

        let white = summary.describe(Color::White);
        assert!(white.contains(&"You have a material advantage of 5 points.".to_string()));
        assert!(white.contains(&"Position is clearly better for you.".to_string()));

        let black = summary.describe(Color::Black);
        assert_eq!(black[0], "You are playing as black. Your opponent is white.");
        assert!(black.contains(&"You are down 5 material points.".to_string()));
        assert!(black.contains(&"Position is dangerous and requires defense.".to_string()));
    }
}
