use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Coins earned per full 100ml logged.
pub const COINS_PER_100_ML: u64 = 1;
/// One-time bonus for crossing the daily goal within a period.
pub const GOAL_BONUS_COINS: u64 = 10;

/// The aqua-coin balance. Non-negative by construction; a debit that
/// would overdraw fails and leaves the balance untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CoinBalance(u64);

impl CoinBalance {
    pub fn new(coins: u64) -> Self {
        Self(coins)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Adds coins to the balance. Always succeeds.
    pub fn credit(&mut self, amount: u64) {
        self.0 = self.0.saturating_add(amount);
    }

    /// Removes coins from the balance, or fails with `InsufficientFunds`
    /// if the balance doesn't cover the amount.
    pub fn debit(&mut self, amount: u64) -> Result<(), EngineError> {
        if amount > self.0 {
            return Err(EngineError::InsufficientFunds {
                cost: amount,
                balance: self.0,
            });
        }
        self.0 -= amount;
        Ok(())
    }
}

/// Coins earned for logging `raw_amount` milliliters.
pub fn coins_for_drink(raw_amount: f64) -> u64 {
    (raw_amount / 100.0).floor() as u64 * COINS_PER_100_ML
}
