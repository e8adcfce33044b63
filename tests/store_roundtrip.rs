use klondike::config::Paths;
use klondike::prefs::Preferences;
use klondike::results::Leaderboard;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn preferences_save_and_load_roundtrip() {
    let td = tempfile::tempdir().expect("tmpdir");
    let paths = Paths::under(td.path());

    assert_eq!(Preferences::load(&paths.prefs_file), Preferences::default());

    let prefs = Preferences {
        timer_enabled: false,
        move_tracking_enabled: true,
        ask_again: false,
    };
    prefs.save(&paths.prefs_file).expect("save");
    assert_eq!(Preferences::load(&paths.prefs_file), prefs);

    let data = fs::read_to_string(&paths.prefs_file).expect("read file");
    assert!(data.contains("\"timerEnabled\": false"));
}

#[test]
fn corrupt_preferences_fall_back_to_defaults() {
    let td = tempfile::tempdir().expect("tmpdir");
    let paths = Paths::under(td.path());
    fs::create_dir_all(&paths.cfg_dir).unwrap();

    fs::write(&paths.prefs_file, "{{{").unwrap();
    assert_eq!(Preferences::load(&paths.prefs_file), Preferences::default());

    fs::write(&paths.prefs_file, r#"{"askAgain": false, "timerEnabled": 1}"#).unwrap();
    let prefs = Preferences::load(&paths.prefs_file);
    assert!(!prefs.ask_again);
    assert!(prefs.timer_enabled);
}

#[test]
fn leaderboard_save_and_load_roundtrip() {
    let td = tempfile::tempdir().expect("tmpdir");
    let paths = Paths::under(td.path());

    let mut board = Leaderboard::load(&paths.results_file);
    assert!(board.results().is_empty());
    board.add_result_at(95, 130, 1_700_000_000_000);
    board.add_result_at(80, 150, 1_700_000_100_000);
    board.save(&paths.results_file).expect("save");

    let loaded = Leaderboard::load(&paths.results_file);
    assert_eq!(loaded, board);
    assert_eq!(loaded.best_times()[0].elapsed_seconds, 80);
    assert_eq!(loaded.best_moves()[0].moves, 130);
}

#[test]
fn non_array_results_load_as_empty() {
    let td = tempfile::tempdir().expect("tmpdir");
    let paths = Paths::under(td.path());
    fs::create_dir_all(&paths.cfg_dir).unwrap();
    fs::write(&paths.results_file, r#"{"elapsedSeconds": 3}"#).unwrap();
    assert!(Leaderboard::load(&paths.results_file).results().is_empty());
}
