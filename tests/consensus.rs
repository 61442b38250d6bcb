use piego::board::{Board, BoardError, Color, GoBoard, Vertex};
use piego::consensus::{adjudicate, consensus_score, majority, sample_scores, GameResult, TRIALS};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Board whose rollouts hand out scores from a fixed table, one per rollout.
#[derive(Clone)]
struct TableBoard {
    outcomes: Arc<Vec<i32>>,
    next: Arc<AtomicUsize>,
    copies: Arc<AtomicUsize>,
    score: i32,
    history: Vec<Vertex>,
}

impl TableBoard {
    fn new(outcomes: Vec<i32>) -> Self {
        Self {
            outcomes: Arc::new(outcomes),
            next: Arc::new(AtomicUsize::new(0)),
            copies: Arc::new(AtomicUsize::new(0)),
            score: 0,
            history: Vec::new(),
        }
    }
}

impl Board for TableBoard {
    fn size(&self) -> usize { 9 }
    fn to_move(&self) -> Color { Color::Black }
    fn clear(&mut self) { self.history.clear(); }
    fn play(&mut self, v: Vertex, _restrict_eye_fill: bool) -> Result<(), BoardError> { self.history.push(v); Ok(()) }
    fn copy_into(&self, other: &mut Self) {
        self.copies.fetch_add(1, Ordering::SeqCst);
        other.clone_from(self);
    }
    fn candidates(&self) -> Vec<Vertex> { Vec::new() }
    fn random_play(&mut self, _rng: &mut SmallRng) -> Vertex { Vertex::Pass }
    fn rollout(&mut self, _rng: &mut SmallRng, _render: bool) {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.score = self.outcomes[i % self.outcomes.len()];
    }
    fn score(&self) -> i32 { self.score }
    fn render(&self) -> String { String::new() }
    fn history(&self) -> &[Vertex] { &self.history }
}

fn shuffled(groups: &[(i32, usize)]) -> Vec<i32> {
    let mut v: Vec<i32> = groups.iter().flat_map(|&(s, n)| std::iter::repeat(s).take(n)).collect();
    v.shuffle(&mut SmallRng::seed_from_u64(11));
    v
}

#[test]
fn modal_score_wins_over_average() {
    let board = TableBoard::new(shuffled(&[(3, 140), (-2, 80), (0, 36)]));
    assert_eq!(consensus_score(&board, 1), 3);
    assert_eq!(board.next.load(Ordering::SeqCst), TRIALS);
}

#[test]
fn reports_black_margin_with_one_decimal() {
    let board = TableBoard::new(shuffled(&[(3, 140), (-2, 80), (0, 36)]));
    assert_eq!(adjudicate(&board, 1).to_string(), "B+3.0");
}

#[test]
fn white_majority_and_draw() {
    let white = TableBoard::new(shuffled(&[(-2, 200), (5, 56)]));
    assert_eq!(adjudicate(&white, 0), GameResult::Win { winner: Color::White, margin: 2 });
    assert_eq!(adjudicate(&white, 0).to_string(), "W+2.0");
    let drawn = TableBoard::new(shuffled(&[(0, 129), (1, 127)]));
    assert_eq!(adjudicate(&drawn, 0).to_string(), "Draw");
}

#[test]
fn every_trial_works_on_its_own_copy() {
    let board = TableBoard::new(vec![4; 16]);
    let scores = sample_scores(&board, TRIALS, 9);
    assert_eq!(scores.len(), TRIALS);
    assert_eq!(board.copies.load(Ordering::SeqCst), TRIALS);
    // The source position is never rolled out itself.
    assert_eq!(board.score(), 0);
}

#[test]
fn tie_break_returns_one_of_the_tied_values() {
    // Equal counts have no defined winner; only membership is guaranteed.
    let board = TableBoard::new(shuffled(&[(5, 128), (-5, 128)]));
    let s = consensus_score(&board, 0);
    assert!(s == 5 || s == -5, "unexpected consensus {}", s);
    assert!(matches!(majority(&[1, 2, 2, 1]), Some(1) | Some(2)));
}

#[test]
fn go_board_consensus_is_deterministic_and_leaves_board_untouched() {
    let mut board = GoBoard::new(5);
    for m in ["C3", "B2", "D4"] {
        let v = board.parse_vertex(m).unwrap();
        board.play(v, false).unwrap();
    }
    let before = board.clone();
    let a = consensus_score(&board, 42);
    let b = consensus_score(&board, 42);
    assert_eq!(a, b);
    assert_eq!(board, before);
}

#[test]
fn rollouts_of_an_empty_board_finish() {
    let board = GoBoard::new(5);
    let scores = sample_scores(&board, 16, 5);
    // 25 points minus komi 7 bounds any area score.
    assert!(scores.iter().all(|s| s.abs() <= 25 + 7));
}
