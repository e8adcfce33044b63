//! Completed-game leaderboard.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{load_json, save_atomic};

pub use crate::timer::format_elapsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaythroughResult {
    pub elapsed_seconds: u64,
    pub moves: u32,
    /// Unix epoch milliseconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    results: Vec<PlaythroughResult>,
}

impl Leaderboard {
    pub fn new(results: Vec<PlaythroughResult>) -> Self {
        Self { results }
    }

    /// A file that is missing or not a JSON array of results loads as empty.
    pub fn load(path: &Path) -> Self {
        Self::new(load_json(path).unwrap_or_default())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_atomic(&self.results, path)
    }

    pub fn add_result(&mut self, elapsed_seconds: u64, moves: u32) -> PlaythroughResult {
        self.add_result_at(elapsed_seconds, moves, now_millis())
    }

    pub fn add_result_at(
        &mut self,
        elapsed_seconds: u64,
        moves: u32,
        timestamp: u64,
    ) -> PlaythroughResult {
        let result = PlaythroughResult {
            elapsed_seconds,
            moves,
            timestamp,
        };
        self.results.push(result);
        result
    }

    pub fn results(&self) -> &[PlaythroughResult] {
        &self.results
    }

    pub fn best_times(&self) -> Vec<PlaythroughResult> {
        let mut sorted = self.results.clone();
        sorted.sort_by_key(|r| r.elapsed_seconds);
        sorted
    }

    pub fn best_moves(&self) -> Vec<PlaythroughResult> {
        let mut sorted = self.results.clone();
        sorted.sort_by_key(|r| r.moves);
        sorted
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Leaderboard {
        let mut board = Leaderboard::default();
        board.add_result_at(300, 90, 1);
        board.add_result_at(120, 140, 2);
        board.add_result_at(300, 80, 3);
        board.add_result_at(200, 90, 4);
        board
    }

    #[test]
    fn best_times_are_stable() {
        let order: Vec<u64> = board().best_times().iter().map(|r| r.timestamp).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn best_moves_are_stable() {
        let order: Vec<u64> = board().best_moves().iter().map(|r| r.timestamp).collect();
        assert_eq!(order, vec![3, 1, 4, 2]);
    }

    #[test]
    fn add_result_stamps_current_time() {
        let mut board = Leaderboard::default();
        let result = board.add_result(42, 7);
        assert!(result.timestamp > 0);
        assert_eq!(board.results(), &[result]);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&board().results()[0]).unwrap();
        assert_eq!(json, r#"{"elapsedSeconds":300,"moves":90,"timestamp":1}"#);
    }
}
