use piego::board::{Board, GoBoard, Vertex};
use piego::search::{CancelToken, RolloutSearch, SearchEngine, SearchParams};
use piego::time::TimeManager;

#[test]
fn evaluate_covers_every_vertex_and_sums_to_one() {
    let mut b = GoBoard::new(5);
    let c3 = b.parse_vertex("C3").unwrap();
    b.play(c3, false).unwrap();
    let mut s = RolloutSearch::new(1);
    let p = s.evaluate(&b);
    assert_eq!(p.probs.len(), 26);
    assert_eq!(p.probs[c3.index(5)], 0.0);
    assert!(p.probs[Vertex::Pass.index(5)] > 0.0);
    let total: f32 = p.probs.iter().sum();
    assert!((total - 1.0).abs() < 1e-4);
    assert!(s.evaluated() > 0);
}

#[test]
fn search_returns_legal_move_and_spends_clock() {
    let b = GoBoard::new(5);
    let mut s = RolloutSearch::new(2);
    let mut clock = TimeManager::new(10.0, 1.0);
    let cancel = CancelToken::new();
    cancel.cancel();
    let params = SearchParams { fixed_time: 0.05, ponder: false, clean: false };
    let r = s.search(&b, params, &mut clock, &cancel);
    assert!((0.0..=1.0).contains(&r.win_rate));
    assert!(r.bestmove == Vertex::Pass || b.candidates().contains(&r.bestmove));
    assert!(clock.left_time < 10.0);
    assert!(!cancel.is_cancelled(), "search should reset the token when it starts");
}

#[test]
fn clean_search_does_not_pass_while_moves_remain() {
    let b = GoBoard::new(5);
    let mut s = RolloutSearch::new(4);
    let mut clock = TimeManager::default();
    let params = SearchParams { fixed_time: 0.02, ponder: false, clean: true };
    let r = s.search(&b, params, &mut clock, &CancelToken::new());
    assert_ne!(r.bestmove, Vertex::Pass);
}

#[test]
fn ponder_stops_on_cancel_and_keeps_clock() {
    let b = GoBoard::new(3);
    let mut s = RolloutSearch::new(5);
    let mut clock = TimeManager::new(30.0, 1.0);
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(50));
        remote.cancel();
    });
    let params = SearchParams { fixed_time: 0.0, ponder: true, clean: false };
    let _ = s.search(&b, params, &mut clock, &cancel);
    stopper.join().unwrap();
    assert_eq!(clock.left_time, 30.0);
}
