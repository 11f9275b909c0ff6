use {
    chrono::Utc,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

use crate::error::EngineError;

/// Hydration multiplier applied to plain water.
pub const WATER_MULTIPLIER: f64 = 1.0;
/// Tea counts 90% toward the daily goal.
pub const TEA_MULTIPLIER: f64 = 0.9;
/// Coffee counts 80% toward the daily goal.
pub const COFFEE_MULTIPLIER: f64 = 0.8;

/// Returns the built-in hydration multiplier for well-known drink kinds,
/// or `None` for user-defined kinds (which carry their own multiplier).
pub fn builtin_multiplier(kind: &str) -> Option<f64> {
    match kind {
        "water" => Some(WATER_MULTIPLIER),
        "tea" => Some(TEA_MULTIPLIER),
        "coffee" => Some(COFFEE_MULTIPLIER),
        _ => None,
    }
}

/// A single logged drink. Immutable once created; a period reset drops
/// the whole log rather than editing individual entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DrinkEntry {
    /// Opaque unique id for history display
    pub id: Uuid,

    /// Amount drank in milliliters, as poured
    pub raw_amount: f64,

    /// Category tag ("water", "tea", "coffee" or a user-defined label)
    pub kind: String,

    /// Fraction of `raw_amount` that counts toward the goal, in (0, 1]
    pub multiplier: f64,

    /// Unix timestamp of when the drink was recorded
    pub timestamp: i64,
}

impl DrinkEntry {
    pub fn new(raw_amount: f64, kind: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_amount,
            kind: kind.into(),
            multiplier,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// The amount counted toward the daily goal.
    pub fn effective_amount(&self) -> f64 {
        self.raw_amount * self.multiplier
    }
}

/// The current tracking period: goal, drink log and running intake.
///
/// `entries` is kept most-recent-first. `current_intake` is the running
/// sum of effective amounts in log order, so it is bit-for-bit equal to
/// re-summing the log front to back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyState {
    pub goal: f64,
    pub entries: Vec<DrinkEntry>,
    pub current_intake: f64,
}

impl DailyState {
    pub fn new(goal: f64) -> Self {
        Self {
            goal,
            entries: Vec::new(),
            current_intake: 0.0,
        }
    }

    /// Appends a drink to the log and returns the created entry.
    ///
    /// Rejects non-positive amounts and multipliers outside (0, 1]
    /// without touching any state.
    pub fn log_drink(
        &mut self,
        raw_amount: f64,
        kind: impl Into<String>,
        multiplier: f64,
    ) -> Result<DrinkEntry, EngineError> {
        if !(raw_amount > 0.0) || !(multiplier > 0.0 && multiplier <= 1.0) {
            return Err(EngineError::InvalidAmount);
        }

        let entry = DrinkEntry::new(raw_amount, kind, multiplier);
        self.current_intake += entry.effective_amount();
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Clears the log and intake for a new period. The goal is kept.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.current_intake = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_accumulates_effective_amounts() {
        let mut state = DailyState::new(2000.0);
        state.log_drink(250.0, "water", 1.0).unwrap();
        state.log_drink(250.0, "coffee", 0.8).unwrap();

        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.current_intake, 450.0);
        // most-recent-first ordering
        assert_eq!(state.entries[0].kind, "coffee");
    }

    #[test]
    fn intake_matches_log_sum_exactly() {
        let mut state = DailyState::new(2000.0);
        let amounts = [330.0, 250.0, 125.5, 700.0, 40.25];
        for (i, amount) in amounts.iter().enumerate() {
            let mult = [1.0, 0.9, 0.8][i % 3];
            state.log_drink(*amount, "water", mult).unwrap();
        }

        // entries are most-recent-first; summing back to front replays
        // the accumulation order, so equality is exact, not approximate
        let replayed: f64 = state
            .entries
            .iter()
            .rev()
            .fold(0.0, |acc, e| acc + e.effective_amount());
        assert_eq!(state.current_intake, replayed);
    }

    #[test]
    fn invalid_drinks_are_rejected_without_state_change() {
        let mut state = DailyState::new(2000.0);
        assert_eq!(
            state.log_drink(0.0, "water", 1.0),
            Err(EngineError::InvalidAmount)
        );
        assert_eq!(
            state.log_drink(-250.0, "water", 1.0),
            Err(EngineError::InvalidAmount)
        );
        assert_eq!(
            state.log_drink(250.0, "soda", 1.5),
            Err(EngineError::InvalidAmount)
        );
        assert_eq!(
            state.log_drink(250.0, "soda", 0.0),
            Err(EngineError::InvalidAmount)
        );
        assert!(state.entries.is_empty());
        assert_eq!(state.current_intake, 0.0);
    }

    #[test]
    fn reset_keeps_goal() {
        let mut state = DailyState::new(2500.0);
        state.log_drink(500.0, "water", 1.0).unwrap();
        state.reset();

        assert_eq!(state.goal, 2500.0);
        assert!(state.entries.is_empty());
        assert_eq!(state.current_intake, 0.0);
    }

    #[test]
    fn builtin_multipliers() {
        assert_eq!(builtin_multiplier("water"), Some(1.0));
        assert_eq!(builtin_multiplier("tea"), Some(0.9));
        assert_eq!(builtin_multiplier("coffee"), Some(0.8));
        assert_eq!(builtin_multiplier("smoothie"), None);
    }
}
