use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chess_rules::annotate::annotate_move;
use chess_rules::board::Board;
use chess_rules::check::is_king_in_check;
use chess_rules::movegen::{generate_legal_moves, legal_moves};
use chess_rules::movepicker::select_candidates;
use chess_rules::types::{Color, Move};

const SEB_FEN: &str = "r3k2r/p1ppqpb1/Bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R3K2R b KQkq - 0 1";

pub fn bench_legal_moves_from_start(c: &mut Criterion) {
    let bo = Board::new();
    c.bench_function("legal moves from start", |b| {
        b.iter(|| legal_moves(black_box(&bo), black_box(Color::White)))
    });
}

pub fn bench_legal_moves_from_seb(c: &mut Criterion) {
    let bo = Board::from_fen(SEB_FEN).unwrap();
    c.bench_function("legal moves from seb", |b| {
        b.iter(|| legal_moves(black_box(&bo), black_box(Color::Black)))
    });
}

pub fn bench_annotated_moves_from_seb(c: &mut Criterion) {
    let bo = Board::from_fen(SEB_FEN).unwrap();
    c.bench_function("annotated moves from seb", |b| {
        b.iter(|| generate_legal_moves(black_box(&bo), black_box(Color::Black)))
    });
}

pub fn bench_annotate_single_capture(c: &mut Criterion) {
    let bo = Board::from_fen(SEB_FEN).unwrap();
    let mv = Move::from_algebraic("b6a4").unwrap();
    c.bench_function("annotate one move", |b| {
        b.iter(|| annotate_move(black_box(&bo), black_box(mv)))
    });
}

pub fn bench_is_king_in_check(c: &mut Criterion) {
    let bo = Board::from_fen(SEB_FEN).unwrap();
    c.bench_function("king in check from seb", |b| {
        b.iter(|| is_king_in_check(black_box(&bo), black_box(Color::White)))
    });
}

pub fn bench_select_candidates(c: &mut Criterion) {
    let bo = Board::from_fen(SEB_FEN).unwrap();
    let moves = generate_legal_moves(&bo, Color::Black);
    c.bench_function("select candidates from seb", |b| {
        b.iter(|| select_candidates(black_box(&moves)))
    });
}

criterion_group!(
    benches,
    bench_legal_moves_from_start,
    bench_legal_moves_from_seb,
    bench_annotated_moves_from_seb,
    bench_annotate_single_capture,
    bench_is_king_in_check,
    bench_select_candidates,
);
criterion_main!(benches);
