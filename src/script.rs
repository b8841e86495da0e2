//! Timed key events for offline rendering.
//!
//! Text form: `key@seconds` items separated by commas or whitespace, e.g. `q@0 s@0.3,r@1.25`.
//! A bare `key` fires at `0`. JSON form: `{"events":[{"key":"q","at":0.0}]}`.

use crate::effects::dispatch::KeyBinding;
use crate::foundation::error::{FxError, FxResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// One key press at a point on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key identifier passed to the dispatcher.
    pub key: String,
    /// Seconds from the start of the timeline.
    pub at: f64,
}

/// Key events sorted by time. Events sharing a time keep their written order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KeyScript {
    events: Vec<KeyEvent>,
}

impl KeyScript {
    /// Validate and sort `events`.
    pub fn new(mut events: Vec<KeyEvent>) -> FxResult<Self> {
        for ev in &events {
            if ev.key.is_empty() {
                return Err(FxError::validation("key script event has an empty key"));
            }
            if !ev.at.is_finite() || ev.at < 0.0 {
                return Err(FxError::validation(format!(
                    "key script event '{}' has invalid time {}",
                    ev.key, ev.at
                )));
            }
        }
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { events })
    }

    /// Parse the text form.
    pub fn parse(text: &str) -> FxResult<Self> {
        let mut events = Vec::new();
        for item in text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
        {
            let (key, at) = match item.split_once('@') {
                Some((key, at)) => {
                    let at = at.parse::<f64>().map_err(|e| {
                        FxError::validation(format!("invalid time in key event '{item}': {e}"))
                    })?;
                    (key, at)
                }
                None => (item, 0.0),
            };
            events.push(KeyEvent {
                key: key.to_string(),
                at,
            });
        }
        Self::new(events)
    }

    /// Parse the JSON form.
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Repr {
            events: Vec<KeyEvent>,
        }
        let repr: Repr = serde_json::from_str(s)
            .map_err(|e| FxError::serde(format!("parse key script JSON: {e}")))?;
        Self::new(repr.events)
    }

    /// Load a script file: JSON when the extension is `.json`, the text form otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FxError::validation(format!("read key script '{}': {e}", path.display()))
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&text)
        } else {
            Self::parse(&text)
        }
    }

    /// Events in firing order.
    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// Whether the script has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last event, or `0` for an empty script.
    pub fn last_secs(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.at)
    }

    /// Keys the dispatcher will ignore, in order of appearance, without duplicates.
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for ev in &self.events {
            if KeyBinding::from_key(&ev.key).is_none() && !out.contains(&ev.key.as_str()) {
                out.push(&ev.key);
            }
        }
        out
    }
}

impl FromStr for KeyScript {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
