pub mod rollout;

use crate::board::{Board, Vertex};
use crate::time::TimeManager;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use rollout::RolloutSearch;

/// Cooperative stop request. The GTP loop raises it before every command;
/// searches poll it and reset it when they start thinking.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }
    pub fn reset(&self) { self.0.store(false, Ordering::Relaxed); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchParams {
    /// Seconds to think; 0 derives the budget from the clock.
    pub fixed_time: f64,
    pub ponder: bool,
    /// Avoid passing while a candidate move remains.
    pub clean: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub bestmove: Vertex,
    pub win_rate: f32,
}

/// Move probabilities indexed by `Vertex::index`, pass in the last slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub probs: Vec<f32>,
}

impl Policy {
    pub fn new(probs: Vec<f32>) -> Self { Self { probs } }

    /// Index of the highest probability; the lowest index wins ties.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.probs.iter().enumerate() {
            if p > self.probs[best] { best = i; }
        }
        best
    }

    pub fn best_vertex(&self, size: usize) -> Vertex { Vertex::from_index(self.argmax(), size) }
}

/// Search collaborator used by `genmove` and self-play.
pub trait SearchEngine<B: Board> {
    fn clear(&mut self);
    fn evaluate(&mut self, board: &B) -> Policy;
    fn search(&mut self, board: &B, params: SearchParams, clock: &mut TimeManager, cancel: &CancelToken) -> SearchResult;
}
