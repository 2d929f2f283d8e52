//! Command line front end.
//!
//! Usage: chess_rules analyze --fen "<fen>" [--all] [--json]
//!        chess_rules play --plies 40 --seed 7

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use log::{info, LevelFilter};
use serde::Serialize;

use chess_rules::annotate::AnnotatedMove;
use chess_rules::chooser::RandomCandidate;
use chess_rules::evaluate::{summarize, PositionSummary};
use chess_rules::fen::{parse_fen, STARTING_POSITION_FEN};
use chess_rules::game::{Game, GameConfig};
use chess_rules::movegen::generate_legal_moves;
use chess_rules::movepicker::select_candidates;
use chess_rules::types::Color;

#[derive(Parser, Debug)]
#[command(name = "chess_rules")]
#[command(about = "Chess move legality, tactical annotation and candidate selection")]
struct Args {
    /// Log debug output (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List legal moves and candidates for a position
    Analyze {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        /// Side to analyze (`w` or `b`), defaults to the side to move
        #[arg(long)]
        color: Option<char>,

        /// Print every legal move, not only the candidates
        #[arg(long)]
        all: bool,

        #[arg(long)]
        json: bool,
    },
    /// Self-play with random candidate choosers on both sides
    Play {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,

        #[arg(long, default_value_t = 40)]
        plies: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = GameConfig::default().max_attempts)]
        max_attempts: usize,
    },
}

#[derive(Serialize)]
struct Analysis<'a> {
    fen: &'a str,
    color: Color,
    summary: PositionSummary,
    moves: Vec<AnnotatedMove>,
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if debug { LevelFilter::Debug } else { LevelFilter::Info });
    builder.parse_default_env();
    builder.target(env_logger::Target::Stderr).init();
}

fn analyze(fen: &str, color: Option<char>, all: bool, json: bool) -> Result<()> {
    let setup = parse_fen(fen)?;
    let color = match color {
        Some(c) => Color::from_char(c)
            .ok_or_else(|| eyre!("color must be `w` or `b`, got `{c}`"))?,
        None => setup.side_to_move,
    };

    let legal = generate_legal_moves(&setup.board, color);
    let moves = if all { legal } else { select_candidates(&legal) };
    let summary = summarize(&setup.board, color);

    if json {
        let analysis = Analysis { fen, color, summary, moves };
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{}", setup.board.to_coordinate_grid());
    println!("{}", summary.describe(color).join(" "));
    let check = if summary.in_check { ", in check" } else { "" };
    println!("score {:+.2}{check}", summary.score);
    println!();
    for (i, mv) in moves.iter().enumerate() {
        println!("{:>3}. {}", i + 1, mv.to_human());
    }
    Ok(())
}

fn play(fen: &str, plies: usize, seed: Option<u64>, max_attempts: usize) -> Result<()> {
    let mut game = Game::from_fen(fen, GameConfig { max_attempts })?;
    let (mut white, mut black) = match seed {
        Some(seed) => (
            RandomCandidate::seeded(seed),
            RandomCandidate::seeded(seed.wrapping_add(1)),
        ),
        None => (RandomCandidate::new(), RandomCandidate::new()),
    };

    let outcomes = game.play(plies, &mut white, &mut black);
    info!("{} plies played", outcomes.len());
    for (i, outcome) in outcomes.iter().enumerate() {
        println!("{:>3}. {} {}", i + 1, outcome.mv, outcome.explanation);
    }

    game.board().draw_to_terminal();
    println!("{}", game.to_transcript());
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.debug);

    match args.command {
        Command::Analyze { fen, color, all, json } => analyze(&fen, color, all, json),
        Command::Play { fen, plies, seed, max_attempts } => play(&fen, plies, seed, max_attempts),
    }
}
