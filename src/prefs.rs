//! Player preferences. The rule engine only ever sees the resulting booleans.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::config::{load_json, save_atomic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub timer_enabled: bool,
    pub move_tracking_enabled: bool,
    /// Confirm before abandoning a game in progress.
    pub ask_again: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timer_enabled: true,
            move_tracking_enabled: true,
            ask_again: true,
        }
    }
}

impl Preferences {
    /// Each key is read on its own; anything missing or not a boolean keeps its default.
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, fallback: bool| {
            value
                .get(key)
                .and_then(Value::as_bool)
                .unwrap_or(fallback)
        };
        Self {
            timer_enabled: flag("timerEnabled", defaults.timer_enabled),
            move_tracking_enabled: flag("moveTrackingEnabled", defaults.move_tracking_enabled),
            ask_again: flag("askAgain", defaults.ask_again),
        }
    }

    pub fn load(path: &Path) -> Self {
        load_json::<Value>(path)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_atomic(self, path)
    }
}
