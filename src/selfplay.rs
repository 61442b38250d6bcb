use crate::board::{Board, Vertex};
use crate::config::LaunchConfig;
use crate::consensus::{consensus_score, GameResult};
use crate::search::{CancelToken, SearchEngine, SearchParams};
use crate::time::TimeManager;
use anyhow::{anyhow, Result};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

/// How self-play picks each move; fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePolicy {
    Random,
    Quick,
    Search { clean: bool },
}

impl MovePolicy {
    pub fn from_config(cfg: &LaunchConfig) -> Self {
        if cfg.random {
            MovePolicy::Random
        } else if cfg.quick {
            MovePolicy::Quick
        } else {
            MovePolicy::Search { clean: cfg.clean }
        }
    }

    pub fn needs_engine(self) -> bool { self != MovePolicy::Random }
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub policy: MovePolicy,
    pub seed: u64,
    pub clock: TimeManager,
}

impl SelfPlayParams {
    pub fn from_config(cfg: &LaunchConfig, seed: u64) -> Self {
        Self { policy: MovePolicy::from_config(cfg), seed, clock: TimeManager::new(cfg.main_time, cfg.byoyomi) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub score: i32,
    pub result: String,
}

/// Plays until the move count reaches twice the number of intersections or
/// the last two moves are both passes. The board is rendered to stderr after
/// every move.
pub fn play_game<B: Board, S: SearchEngine<B>>(board: &mut B, mut engine: Option<&mut S>, params: &SelfPlayParams) -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut clock = params.clock;
    let cancel = CancelToken::new();
    let limit = 2 * board.intersections();
    while board.move_count() < limit {
        let prev = board.prev_move();
        let mv = match params.policy {
            MovePolicy::Random => board.random_play(&mut rng),
            MovePolicy::Quick => {
                let e = engine.as_deref_mut().ok_or_else(|| anyhow!("quick self-play needs a search engine"))?;
                let mv = e.evaluate(board).best_vertex(board.size());
                board.play(mv, false)?;
                mv
            }
            MovePolicy::Search { clean } => {
                let e = engine.as_deref_mut().ok_or_else(|| anyhow!("self-play search needs a search engine"))?;
                let sp = SearchParams { fixed_time: 0.0, ponder: false, clean };
                let mv = e.search(board, sp, &mut clock, &cancel).bestmove;
                board.play(mv, false)?;
                mv
            }
        };
        debug!("ply {}: {}", board.move_count(), board.vertex_to_string(mv));
        eprintln!("{}", board.render());
        if prev == Some(Vertex::Pass) && mv == Vertex::Pass { break; }
    }
    Ok(())
}

/// Plays one game and adjudicates the final position by rollout majority.
pub fn run<B: Board, S: SearchEngine<B>>(board: &mut B, engine: Option<&mut S>, params: &SelfPlayParams) -> Result<GameRecord> {
    info!("self-play: policy={:?} seed={}", params.policy, params.seed);
    play_game(board, engine, params)?;
    let score = consensus_score(board, params.seed);
    let result = GameResult::from_score(score);
    info!("self-play finished after {} moves: {}", board.move_count(), result);
    let moves = board.history().iter().map(|&v| board.vertex_to_string(v)).collect();
    Ok(GameRecord { moves, score, result: result.to_string() })
}
