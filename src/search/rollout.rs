use super::{CancelToken, Policy, SearchEngine, SearchParams, SearchResult};
use crate::board::{Board, Color, Vertex};
use crate::time::TimeManager;
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

const EVAL_ROLLOUTS: usize = 8;
const ROLLOUTS_PER_ROUND: usize = 4;
const MAX_ROUNDS: usize = 4096;

/// Flat Monte Carlo search: every candidate is scored by the fraction of
/// random playouts the side to move wins after playing it.
pub struct RolloutSearch {
    seed: u64,
    calls: u64,
    evaluated: u64,
}

impl RolloutSearch {
    pub fn new(seed: u64) -> Self { Self { seed, calls: 0, evaluated: 0 } }

    /// Total playouts run since the last `clear`.
    pub fn evaluated(&self) -> u64 { self.evaluated }

    fn next_seed(&mut self) -> u64 {
        self.calls += 1;
        self.seed ^ self.calls.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

fn outcome(score: i32, mover: Color) -> f32 {
    let black = match score.signum() { 1 => 1.0, -1 => 0.0, _ => 0.5 };
    if mover == Color::Black { black } else { 1.0 - black }
}

fn playout_wins<B: Board>(board: &B, mv: Vertex, mover: Color, seed: u64, n: usize) -> f32 {
    let mut child = board.clone();
    if child.play(mv, false).is_err() { return 0.0; }
    let mut scratch = child.clone();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut wins = 0.0;
    for _ in 0..n {
        child.copy_into(&mut scratch);
        scratch.rollout(&mut rng, false);
        wins += outcome(scratch.score(), mover);
    }
    wins
}

fn candidate_moves<B: Board>(board: &B, clean: bool) -> Vec<Vertex> {
    let mut moves = board.candidates();
    if !clean || moves.is_empty() { moves.push(Vertex::Pass); }
    moves
}

impl<B: Board> SearchEngine<B> for RolloutSearch {
    fn clear(&mut self) {
        self.calls = 0;
        self.evaluated = 0;
    }

    fn evaluate(&mut self, board: &B) -> Policy {
        let size = board.size();
        let mover = board.to_move();
        let seed = self.next_seed();
        let moves = candidate_moves(board, false);
        let wins: Vec<f32> = moves
            .par_iter()
            .enumerate()
            .map(|(i, &mv)| playout_wins(board, mv, mover, seed.wrapping_add(i as u64), EVAL_ROLLOUTS))
            .collect();
        self.evaluated += (moves.len() * EVAL_ROLLOUTS) as u64;

        let mut probs = vec![0.0f32; board.intersections() + 1];
        for (mv, w) in moves.iter().zip(&wins) { probs[mv.index(size)] = w + 1.0; }
        let total: f32 = probs.iter().sum();
        if total > 0.0 { for p in &mut probs { *p /= total; } }
        Policy::new(probs)
    }

    fn search(&mut self, board: &B, params: SearchParams, clock: &mut TimeManager, cancel: &CancelToken) -> SearchResult {
        let start = Instant::now();
        cancel.reset();
        let budget = if params.fixed_time > 0.0 { params.fixed_time } else { clock.think_time(board.move_count()) };
        let mover = board.to_move();
        let moves = candidate_moves(board, params.clean);
        let seed = self.next_seed();

        let mut wins = vec![0.0f32; moves.len()];
        let mut visits = 0usize;
        let mut rounds = 0usize;
        while rounds < MAX_ROUNDS {
            let round_seed = seed ^ ((rounds as u64) << 32);
            let batch: Vec<f32> = moves
                .par_iter()
                .enumerate()
                .map(|(i, &mv)| playout_wins(board, mv, mover, round_seed.wrapping_add(i as u64), ROLLOUTS_PER_ROUND))
                .collect();
            for (w, b) in wins.iter_mut().zip(batch) { *w += b; }
            visits += ROLLOUTS_PER_ROUND;
            rounds += 1;
            if cancel.is_cancelled() { break; }
            if !params.ponder && start.elapsed().as_secs_f64() >= budget { break; }
        }
        self.evaluated += (rounds * ROLLOUTS_PER_ROUND * moves.len()) as u64;

        let mut best = 0;
        for i in 1..moves.len() {
            if wins[i] > wins[best] { best = i; }
        }
        let win_rate = wins[best] / visits.max(1) as f32;

        if !params.ponder {
            clock.consume(start.elapsed().as_secs_f64());
            debug!(
                "move count={}: left time={:.1}[sec] evaluated={} rounds={} win rate={:.3}",
                board.move_count(), clock.left_time, self.evaluated, rounds, win_rate
            );
        }
        SearchResult { bestmove: moves[best], win_rate }
    }
}
