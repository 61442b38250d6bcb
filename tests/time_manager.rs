use piego::time::TimeManager;

#[test]
fn without_main_time_spends_byoyomi() {
    let t = TimeManager::new(0.0, 5.0);
    assert_eq!(t.think_time(0), 5.0);
    assert_eq!(TimeManager::new(0.0, 0.2).think_time(0), 1.0);
}

#[test]
fn main_time_is_spread_over_remaining_moves() {
    let t = TimeManager::new(300.0, 15.0);
    assert_eq!(t.think_time(0), 300.0 / 105.0);
    assert_eq!(t.think_time(80), 300.0 / 55.0);
}

#[test]
fn low_clock_falls_back_to_byoyomi() {
    let mut t = TimeManager::new(300.0, 15.0);
    t.set_left_time(20.0);
    assert_eq!(t.think_time(10), 15.0);
}

#[test]
fn time_settings_reset_left_time_and_consume_floors_at_zero() {
    let mut t = TimeManager::default();
    t.set_time_settings(60.0, 10.0);
    assert_eq!(t.left_time, 60.0);
    t.consume(12.5);
    assert_eq!(t.left_time, 47.5);
    t.consume(100.0);
    assert_eq!(t.left_time, 0.0);
}
