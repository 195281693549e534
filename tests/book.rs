use knightwatch::book::{normalize_weights, pick_book_move, BookMove, OpeningBook};
use knightwatch::board::{notation, Position};
use knightwatch::Difficulty;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn builtin_weights_normalise_to_one() {
    let raw = include_str!("../data/opening_book.json");
    let entries: Vec<knightwatch::book::BookEntry> = serde_json::from_str(raw).unwrap();
    for e in &entries {
        let norm = normalize_weights(&e.moves);
        let sum: f64 = norm.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9, "{}: weights sum to {sum}", e.fen_prefix);
        assert!(norm.windows(2).all(|w| w[0].1 >= w[1].1), "not heaviest first");
    }
}

#[test]
fn all_zero_weights_fall_back_to_uniform() {
    let moves = vec![BookMove { san: "e4".into(), weight: 0.0 }, BookMove { san: "d4".into(), weight: -1.0 }];
    let norm = normalize_weights(&moves);
    assert_eq!(norm.len(), 2);
    assert!(norm.iter().all(|(_, w)| (*w - 0.5).abs() < 1e-12));
}

#[test]
fn every_builtin_book_move_is_legal() {
    let raw = include_str!("../data/opening_book.json");
    let entries: Vec<knightwatch::book::BookEntry> = serde_json::from_str(raw).unwrap();
    for e in &entries {
        // complete the prefix with castling/en passant/counters of a fresh game
        let fen = format!("{} KQkq - 0 1", e.fen_prefix);
        let p = Position::from_fen(&fen).unwrap_or_else(|err| panic!("{}: {err}", e.fen_prefix));
        for m in &e.moves {
            assert!(notation::san_to_uci(p.board(), &m.san).is_ok(), "{} not legal after {}", m.san, e.fen_prefix);
        }
    }
}

#[test]
fn start_position_samples_known_first_moves() {
    let book = OpeningBook::builtin();
    let mut rng = SmallRng::seed_from_u64(99);
    for d in Difficulty::ALL {
        for _ in 0..50 {
            let san = book.book_move(START, d, &mut rng).expect("start position is in the book");
            assert!(["e4", "d4", "Nf3", "c4"].contains(&san.as_str()), "unexpected {san}");
        }
    }
}

#[test]
fn easy_bias_favours_main_line_more_than_master() {
    let moves = vec![
        BookMove { san: "e4".into(), weight: 40.0 },
        BookMove { san: "d4".into(), weight: 35.0 },
        BookMove { san: "Nf3".into(), weight: 15.0 },
        BookMove { san: "c4".into(), weight: 10.0 },
    ];
    let count_main = |bias: f64| {
        let mut rng = SmallRng::seed_from_u64(5);
        (0..4000).filter(|_| pick_book_move(&moves, bias, &mut rng) == Some("e4")).count()
    };
    assert!(count_main(Difficulty::Easy.book_bias()) > count_main(Difficulty::Master.book_bias()));
}

#[test]
fn missing_book_file_degrades_to_builtin() {
    let book = OpeningBook::load_or_builtin(Some(std::path::Path::new("/nonexistent/book.json")));
    assert_eq!(book.len(), OpeningBook::builtin().len());
}
