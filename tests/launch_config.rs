use piego::config::{LaunchConfig, LaunchMode};

#[test]
fn defaults() {
    let cfg = LaunchConfig::from_tokens(Vec::<String>::new()).unwrap();
    assert_eq!(cfg, LaunchConfig::default());
    assert_eq!(cfg.mode, LaunchMode::Gtp);
    assert_eq!(cfg.byoyomi, 5.0);
    assert!(cfg.use_gpu);
}

#[test]
fn flags_match_by_substring() {
    let cfg = LaunchConfig::from_tokens(["--self", "--random", "--clean", "--cpu"]).unwrap();
    assert_eq!(cfg.mode, LaunchMode::SelfPlay);
    assert!(cfg.random && cfg.clean && !cfg.quick);
    assert!(!cfg.use_gpu);
    assert_eq!(LaunchConfig::from_tokens(["learning"]).unwrap().mode, LaunchMode::Learn);
}

#[test]
fn key_value_options() {
    let cfg = LaunchConfig::from_tokens(["--main_time=300", "byoyomi=2.5", "seed=42", "--quick"]).unwrap();
    assert_eq!(cfg.main_time, 300.0);
    assert_eq!(cfg.byoyomi, 2.5);
    assert_eq!(cfg.seed, Some(42));
    assert!(cfg.quick);
}

#[test]
fn first_matching_key_claims_the_token() {
    // "selfquick" contains both keys; only self-play is applied.
    let cfg = LaunchConfig::from_tokens(["selfquick"]).unwrap();
    assert_eq!(cfg.mode, LaunchMode::SelfPlay);
    assert!(!cfg.quick);
}

#[test]
fn unknown_tokens_are_ignored_and_bad_numbers_rejected() {
    assert_eq!(LaunchConfig::from_tokens(["--verbose", "gpu"]).unwrap(), LaunchConfig::default());
    assert!(LaunchConfig::from_tokens(["main_time=abc"]).is_err());
}
