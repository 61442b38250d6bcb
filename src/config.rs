use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LaunchMode {
    #[default]
    Gtp,
    SelfPlay,
    Learn,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value in launch option '{0}'")]
    InvalidValue(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    pub mode: LaunchMode,
    pub main_time: f64,
    pub byoyomi: f64,
    /// Play the policy argmax instead of searching.
    pub quick: bool,
    /// Self-play with uniformly random legal moves.
    pub random: bool,
    /// Search avoids passing while moves remain.
    pub clean: bool,
    pub use_gpu: bool,
    pub seed: Option<u64>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            mode: LaunchMode::Gtp,
            main_time: 0.0,
            byoyomi: 5.0,
            quick: false,
            random: false,
            clean: false,
            use_gpu: true,
            seed: None,
        }
    }
}

fn value_after_eq(token: &str) -> &str {
    match token.find('=') { Some(i) => &token[i + 1..], None => token }
}

fn parse_value<T: std::str::FromStr>(token: &str) -> Result<T, ConfigError> {
    value_after_eq(token).trim().parse().map_err(|_| ConfigError::InvalidValue(token.to_string()))
}

impl LaunchConfig {
    /// Interprets launch tokens by substring containment. Each token is checked
    /// against the keys in a fixed order and the first key it contains wins, so
    /// `--self`, `self` and `selfplay` all select self-play. Unmatched tokens are ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        for tok in tokens {
            let t = tok.as_ref();
            if t.contains("self") {
                cfg.mode = LaunchMode::SelfPlay;
            } else if t.contains("learn") {
                cfg.mode = LaunchMode::Learn;
            } else if t.contains("quick") {
                cfg.quick = true;
            } else if t.contains("random") {
                cfg.random = true;
            } else if t.contains("clean") {
                cfg.clean = true;
            } else if t.contains("main_time") {
                cfg.main_time = parse_value(t)?;
            } else if t.contains("byoyomi") {
                cfg.byoyomi = parse_value(t)?;
            } else if t.contains("cpu") {
                cfg.use_gpu = false;
            } else if t.contains("seed") {
                cfg.seed = Some(parse_value(t)?);
            }
        }
        Ok(cfg)
    }
}
