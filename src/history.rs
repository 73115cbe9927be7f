//! Recent spin log
//!
//! Callers keep this alongside the engine to show the latest results; the
//! durable record belongs to whatever store the host persists spins in.

use serde::{Deserialize, Serialize};

use crate::consts::HISTORY_LEN;
use crate::wheel::WheelOption;

/// One completed spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub option: WheelOption,
    /// Position of the option in the list the spin resolved against
    pub index: usize,
    /// Cumulative rotation the wheel stopped at (degrees)
    pub rotation_degrees: f64,
    /// Unix timestamp (ms) supplied by the host
    pub timestamp: f64,
}

/// Most recent spins, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SpinHistory {
    pub entries: Vec<SpinRecord>,
}

impl SpinHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a spin, dropping the oldest beyond the limit
    pub fn record(&mut self, record: SpinRecord) {
        self.entries.insert(0, record);
        self.entries.truncate(HISTORY_LEN);
    }

    pub fn latest(&self) -> Option<&SpinRecord> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// How often each option came up, most frequent first (ties keep first-seen order)
    pub fn tally(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(text, _)| *text == entry.option.text) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.option.text.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Find a result among stored options by its label
///
/// Results carry no storage ids, so the label is the only key; the first
/// option with that text wins.
pub fn match_option(options: &[WheelOption], selected: &WheelOption) -> Option<usize> {
    options.iter().position(|o| o.text == selected.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, ts: f64) -> SpinRecord {
        SpinRecord {
            option: WheelOption::new(text),
            index: 0,
            rotation_degrees: 1080.0,
            timestamp: ts,
        }
    }

    #[test]
    fn test_newest_first_and_bounded() {
        let mut history = SpinHistory::new();
        for i in 0..15 {
            history.record(record(&format!("opt{i}"), i as f64));
        }
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(history.latest().map(|r| r.option.text.as_str()), Some("opt14"));
        assert_eq!(history.entries.last().map(|r| r.option.text.as_str()), Some("opt5"));
    }

    #[test]
    fn test_tally() {
        let mut history = SpinHistory::new();
        for text in ["A", "B", "A", "C", "B", "A"] {
            history.record(record(text, 0.0));
        }
        assert_eq!(
            history.tally(),
            vec![("A".to_string(), 3), ("B".to_string(), 2), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_match_option_by_text() {
        let options: Vec<WheelOption> = ["Pizza", "Sushi", "Pizza"]
            .into_iter()
            .map(WheelOption::from)
            .collect();
        let selected = WheelOption::new("Pizza").with_penalty("Pay the bill");
        assert_eq!(match_option(&options, &selected), Some(0));
        assert_eq!(match_option(&options, &WheelOption::new("Tacos")), None);
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let mut history = SpinHistory::new();
        history.record(record("A", 1.0));
        history.record(record("B", 2.0));
        let json = serde_json::to_string(&history).unwrap();
        let back: SpinHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, history.entries);
    }
}
