use crate::board::{Board, Color};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;

/// Rollouts used to adjudicate a finished game.
pub const TRIALS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Draw,
    Win { winner: Color, margin: i32 },
}

impl GameResult {
    /// Positive scores favour Black.
    pub fn from_score(score: i32) -> Self {
        match score {
            0 => GameResult::Draw,
            s if s > 0 => GameResult::Win { winner: Color::Black, margin: s },
            s => GameResult::Win { winner: Color::White, margin: -s },
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Draw => write!(f, "Draw"),
            GameResult::Win { winner, margin } => write!(f, "{}+{:.1}", winner, *margin as f64),
        }
    }
}

/// Most frequent value in `samples`. When several values share the top count
/// the largest of them is returned; callers must not rely on that choice.
pub fn majority(samples: &[i32]) -> Option<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &s in samples { *counts.entry(s).or_insert(0) += 1; }
    counts.into_iter().max_by_key(|&(_, n)| n).map(|(score, _)| score)
}

/// Runs `trials` independent rollouts of `board`, each on its own copy, and
/// returns their scores. Trial `i` is seeded with `seed + i`, so the multiset
/// of results does not depend on how rayon schedules the work.
pub fn sample_scores<B: Board>(board: &B, trials: usize, seed: u64) -> Vec<i32> {
    (0..trials)
        .into_par_iter()
        .map_init(
            || board.clone(),
            |scratch, i| {
                board.copy_into(scratch);
                let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
                scratch.rollout(&mut rng, false);
                scratch.score()
            },
        )
        .collect()
}

/// Majority score over `TRIALS` rollouts.
pub fn consensus_score<B: Board>(board: &B, seed: u64) -> i32 {
    majority(&sample_scores(board, TRIALS, seed)).unwrap_or(0)
}

pub fn adjudicate<B: Board>(board: &B, seed: u64) -> GameResult {
    GameResult::from_score(consensus_score(board, seed))
}
