use anyhow::Result;
use clap::Parser;
use log::info;
use piego::board::go::{GoBoard, DEFAULT_BOARD_SIZE};
use piego::config::{LaunchConfig, LaunchMode};
use piego::gtp::GtpEngine;
use piego::search::RolloutSearch;
use piego::selfplay::{self, SelfPlayParams};

#[derive(Parser, Debug)]
#[command(author, version, about = "Go engine speaking GTP on stdin/stdout", long_about = None)]
struct Args {
    /// Launch options, matched by substring: self, learn, quick, random, clean,
    /// main_time=<sec>, byoyomi=<sec>, cpu, seed=<n>
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = LaunchConfig::from_tokens(&args.options)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let mode = cfg.mode;
    info!("launch mode {:?}, seed {}", mode, seed);
    if cfg.use_gpu {
        info!("GPU requested; evaluation runs on the CPU in this build");
    } else {
        info!("Using CPU device");
    }

    match mode {
        LaunchMode::Gtp => {
            let mut engine = GtpEngine::new(GoBoard::new(DEFAULT_BOARD_SIZE), RolloutSearch::new(seed), cfg);
            engine.run_stdio()?;
        }
        LaunchMode::SelfPlay => {
            let params = SelfPlayParams::from_config(&cfg, seed);
            let mut board = GoBoard::new(DEFAULT_BOARD_SIZE);
            let mut search = params.policy.needs_engine().then(|| RolloutSearch::new(seed));
            let record = selfplay::run(&mut board, search.as_mut(), &params)?;
            eprintln!("result: {}", record.result);
            println!("{}", serde_json::to_string(&record)?);
        }
        LaunchMode::Learn => anyhow::bail!("supervised training is not supported by this engine"),
    }
    Ok(())
}
