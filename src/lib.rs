pub mod types;
pub mod error;
pub mod board;
pub mod fen;
pub mod attacks;
pub mod rules;
pub mod castling;
pub mod check;
pub mod movegen;
pub mod annotate;
pub mod movepicker;
pub mod evaluate;
pub mod chooser;
pub mod game;
