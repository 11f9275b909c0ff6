use serde::{Deserialize, Serialize};

use crate::currency::CoinBalance;
use crate::progress::DEFAULT_GOAL_ML;
use crate::rewards::{Stats, UnlockRecord};
use crate::shop::UnlockStore;
use crate::structs::drink_entry::DailyState;

/// Presentation settings carried through the same persistence gateway
/// as the rest of the profile. The core never reads these.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub dark_mode: bool,
}

/// The full persisted user state: one profile per install.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub daily: DailyState,
    pub coins: CoinBalance,
    pub unlocked_achievements: Vec<UnlockRecord>,
    pub shop: UnlockStore,
    /// Number of completed tracking periods, bumped on each reset
    pub periods_tracked: u64,
    /// Effective intake across all periods, in milliliters
    pub lifetime_intake: f64,
    pub display_preferences: DisplayPreferences,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            daily: DailyState::new(DEFAULT_GOAL_ML),
            coins: CoinBalance::default(),
            unlocked_achievements: Vec::new(),
            shop: UnlockStore::default(),
            periods_tracked: 0,
            lifetime_intake: 0.0,
            display_preferences: DisplayPreferences::default(),
        }
    }
}

impl Profile {
    /// The stats snapshot achievement predicates evaluate against.
    pub fn stats(&self) -> Stats {
        Stats {
            current_intake: self.daily.current_intake,
            goal: self.daily.goal,
            lifetime_intake: self.lifetime_intake,
            coins: self.coins.get(),
            periods_tracked: self.periods_tracked,
        }
    }
}
