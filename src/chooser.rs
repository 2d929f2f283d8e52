use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::annotate::AnnotatedMove;
use crate::board::Board;
use crate::evaluate::PositionSummary;
use crate::types::{Color, Move};

/// Everything a move chooser gets to see before picking a move.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceRequest<'a> {
    pub board: &'a Board,
    pub color: Color,
    pub candidates: &'a [AnnotatedMove],
    pub summary: &'a PositionSummary,
    /// The previous move in `r,c->r,c` notation.
    pub last_move: Option<&'a str>,
    /// Free-text notes from earlier turns, passed through untouched.
    pub history: &'a [String],
}

impl ChoiceRequest<'_> {
    /// Position description from the chooser's side, ending with the
    /// previous move when there is one.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = self.summary.describe(self.color);
        if let Some(last_move) = self.last_move {
            lines.push(format!("Last move played: {last_move}."));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub mv: Move,
    pub explanation: String,
}

/// Picks a move for the side to move. The answer is untrusted: the game
/// re-validates it before applying anything.
pub trait MoveChooser {
    /// `None` stands for an answer that could not be read as a move.
    fn choose(&mut self, request: &ChoiceRequest<'_>) -> Option<Choice>;
}

/// Always takes the top candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl MoveChooser for FirstCandidate {
    fn choose(&mut self, request: &ChoiceRequest<'_>) -> Option<Choice> {
        request.candidates.first().map(|candidate| Choice {
            mv: candidate.to_move(),
            explanation: format!("Played the top candidate, {}.", candidate.to_human()),
        })
    }
}

/// Picks uniformly among the candidates.
#[derive(Debug)]
pub struct RandomCandidate {
    rng: StdRng,
}

impl RandomCandidate {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCandidate {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveChooser for RandomCandidate {
    fn choose(&mut self, request: &ChoiceRequest<'_>) -> Option<Choice> {
        request.candidates.choose(&mut self.rng).map(|candidate| Choice {
            mv: candidate.to_move(),
            explanation: format!("Picked {} at random.", candidate.to_human()),
        })
    }
}
