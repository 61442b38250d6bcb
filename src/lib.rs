// GTP engine core: protocol loop, self-play and rollout adjudication
pub mod board;
pub mod config;
pub mod consensus;
pub mod gtp;
pub mod search;
pub mod selfplay;
pub mod time;
