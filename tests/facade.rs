use knightwatch::board::{notation, Position};
use knightwatch::book::OpeningBook;
use knightwatch::{Difficulty, Engine, EngineConfig, MoveSource};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn engine(seed: u64) -> Engine {
    Engine::new(EngineConfig { seed: Some(seed), ..Default::default() })
}

fn assert_legal(fen: &str, uci: &str) {
    let p = Position::from_fen(fen).unwrap();
    assert!(notation::uci_to_move(p.board(), uci).is_ok(), "{uci} is not legal in {fen}");
}

#[test]
fn start_position_comes_from_the_book() {
    let mut e = engine(1);
    let bm = e.best_move(START, Difficulty::Easy).expect("a move");
    assert_eq!(bm.source, MoveSource::Book);
    assert!(["e2e4", "d2d4", "g1f3", "c2c4"].contains(&bm.bestmove.as_str()), "got {}", bm.bestmove);
}

#[test]
fn disabled_book_goes_to_the_worker() {
    let mut e = Engine::new(EngineConfig { seed: Some(2), use_book: false, ..Default::default() });
    let bm = e.best_move(START, Difficulty::Easy).expect("a move");
    assert_eq!(bm.source, MoveSource::Worker);
    assert_legal(START, &bm.bestmove);
}

#[test]
fn only_legal_move_is_returned_at_every_tier() {
    let fen = "k7/8/8/8/8/8/6r1/7K w - - 0 1";
    let mut e = engine(3);
    for d in Difficulty::ALL {
        let bm = e.best_move(fen, d).expect("a move");
        assert_eq!(bm.bestmove, "h1g2", "{d}");
    }
}

#[test]
fn checkmated_side_gets_none() {
    let mut e = engine(4);
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    for d in Difficulty::ALL { assert_eq!(e.best_move(fen, d), None); }
}

#[test]
fn stalemated_side_gets_none() {
    let mut e = engine(5);
    assert_eq!(e.best_move("k7/8/1Q6/8/8/8/8/7K b - - 0 1", Difficulty::Medium), None);
}

#[test]
fn hard_and_master_take_the_free_queen() {
    let fen = "k7/8/8/8/8/8/3qQ3/7K w - - 0 1";
    for d in [Difficulty::Hard, Difficulty::Master] {
        let mut e = engine(6);
        let bm = e.best_move(fen, d).expect("a move");
        assert_eq!(bm.bestmove, "e2d2", "{d}");
        assert_eq!(bm.source, MoveSource::Worker);
    }
}

#[test]
fn moves_are_legal_across_positions() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R b KQkq - 0 3",
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "8/4P3/8/8/8/8/k7/4K3 w - - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
    ];
    let mut e = engine(7);
    for fen in fens {
        let bm = e.best_move(fen, Difficulty::Medium).expect("a move");
        assert_legal(fen, &bm.bestmove);
    }
}

#[test]
fn book_move_that_cannot_be_played_falls_through() {
    let json = r#"[{ "fenPrefix": "k7/8/8/8/8/8/3qQ3/7K w", "moves": [{ "san": "Nf3", "weight": 1 }] }]"#;
    let book = OpeningBook::from_json(json).unwrap();
    let mut e = Engine::with_book(EngineConfig { seed: Some(8), ..Default::default() }, book);
    let bm = e.best_move("k7/8/8/8/8/8/3qQ3/7K w - - 0 1", Difficulty::Medium).expect("a move");
    assert_ne!(bm.source, MoveSource::Book);
    assert_legal("k7/8/8/8/8/8/3qQ3/7K w - - 0 1", &bm.bestmove);
}

#[test]
fn engine_can_be_reused_for_a_sequence_of_moves() {
    let mut e = Engine::new(EngineConfig { seed: Some(9), use_book: false, ..Default::default() });
    let mut pos = Position::startpos();
    for _ in 0..4 {
        let fen = pos.fen();
        let bm = e.best_move(&fen, Difficulty::Easy).expect("a move");
        let m = pos.legal_moves().into_iter().find(|m| pos.uci(m) == bm.bestmove).expect("legal");
        pos = pos.play(&m);
    }
}

#[test]
fn local_fallback_answers_without_the_worker() {
    let mut e = Engine::new(EngineConfig { seed: Some(10), use_worker: false, ..Default::default() });
    for d in Difficulty::ALL {
        let bm = e.best_move("k7/8/8/8/8/8/6r1/7K w - - 0 1", d).expect("a move");
        assert_eq!(bm.bestmove, "h1g2", "{d}");
        assert_eq!(bm.source, MoveSource::Fallback);
    }
    let bm = e.best_move("k7/8/8/8/8/8/3qQ3/7K w - - 0 1", Difficulty::Easy).expect("a move");
    assert_eq!(bm, knightwatch::BestMove { bestmove: "e2d2".into(), source: MoveSource::Fallback });
}

#[test]
fn random_stage_still_returns_a_legal_move() {
    let config = EngineConfig {
        seed: Some(11),
        use_book: false,
        use_worker: false,
        use_fallback_search: false,
        ..Default::default()
    };
    let mut e = Engine::new(config);
    for fen in [START, "k7/8/8/8/8/8/6r1/7K w - - 0 1", "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"] {
        let bm = e.best_move(fen, Difficulty::Master).expect("a move");
        assert_eq!(bm.source, MoveSource::Random);
        assert_legal(fen, &bm.bestmove);
    }
    let mated = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    assert_eq!(e.best_move(mated, Difficulty::Easy), None);
}
