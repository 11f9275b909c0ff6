use tracing::trace;

use crate::currency::{coins_for_drink, GOAL_BONUS_COINS};
use crate::error::EngineError;
use crate::progress::{compute_progress, Progress, MIN_GOAL_ML};
use crate::rewards::{reconcile_achievements, UnlockEvent};
use crate::storage::{load_profile, save_profile, KvStore};
use crate::structs::drink_entry::{builtin_multiplier, DrinkEntry, WATER_MULTIPLIER};
use crate::structs::profile::{DisplayPreferences, Profile};

/// Everything the UI needs to render the result of one logged drink:
/// the new entry, updated totals, and any rewards to toast about.
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkOutcome {
    pub entry: DrinkEntry,
    pub cumulative_intake: f64,
    pub progress: Progress,
    /// True exactly when this drink crossed the daily goal
    pub goal_just_met: bool,
    pub unlock_events: Vec<UnlockEvent>,
    /// All coins earned by this call: per-ml earn, goal bonus and
    /// achievement rewards combined
    pub coins_granted: u64,
}

/// The progression engine. Owns the profile exclusively and writes it
/// through to the store after every mutation; single-writer, no locks.
///
/// The UI layer calls these methods from its event loop and renders from
/// [`Engine::snapshot`].
pub struct Engine<S: KvStore> {
    profile: Profile,
    store: S,
}

impl<S: KvStore> Engine<S> {
    /// Loads the profile from the store (read-through, once) and takes
    /// ownership of the store for subsequent write-through.
    pub fn new(store: S) -> Self {
        let profile = load_profile(&store);
        Self { profile, store }
    }

    /// Logs a drink and runs the whole progression pipeline: ledger
    /// append, progress recompute, coin earn, goal-bonus detection and
    /// achievement reconciliation, then persists.
    ///
    /// `multiplier` may be omitted for the built-in kinds ("water",
    /// "tea", "coffee"); unknown kinds without an explicit multiplier
    /// count fully, like water.
    pub fn log_drink(
        &mut self,
        raw_amount: f64,
        kind: &str,
        multiplier: Option<f64>,
    ) -> Result<DrinkOutcome, EngineError> {
        let multiplier = multiplier
            .or_else(|| builtin_multiplier(kind))
            .unwrap_or(WATER_MULTIPLIER);

        let prev_intake = self.profile.daily.current_intake;
        let entry = self.profile.daily.log_drink(raw_amount, kind, multiplier)?;
        self.profile.lifetime_intake += entry.effective_amount();

        let goal = self.profile.daily.goal;
        let new_intake = self.profile.daily.current_intake;
        let goal_just_met = prev_intake < goal && new_intake >= goal;

        // credit the drink earn and goal bonus before reconciling, so
        // balance-based achievement predicates see the new balance
        let mut coins_granted = coins_for_drink(raw_amount);
        if goal_just_met {
            coins_granted += GOAL_BONUS_COINS;
        }
        self.profile.coins.credit(coins_granted);

        let unlock_events = self.reconcile();
        coins_granted += unlock_events.iter().map(|e| e.coin_reward).sum::<u64>();

        let progress = compute_progress(new_intake, goal)?;
        trace!(
            amount = raw_amount,
            kind,
            intake = new_intake,
            coins = coins_granted,
            "drink logged"
        );

        save_profile(&mut self.store, &self.profile);
        Ok(DrinkOutcome {
            entry,
            cumulative_intake: new_intake,
            progress,
            goal_just_met,
            unlock_events,
            coins_granted,
        })
    }

    /// Changes the daily goal. Goals below 500ml are rejected. A lowered
    /// goal may newly satisfy percentage achievements, so the catalog is
    /// reconciled; unlocks never revert when the goal is raised.
    pub fn set_goal(&mut self, new_goal: f64) -> Result<Vec<UnlockEvent>, EngineError> {
        // negated comparison so NaN is rejected too
        if !(new_goal >= MIN_GOAL_ML) {
            return Err(EngineError::InvalidGoal {
                minimum: MIN_GOAL_ML,
            });
        }

        self.profile.daily.goal = new_goal;
        let events = self.reconcile();
        save_profile(&mut self.store, &self.profile);
        Ok(events)
    }

    /// Starts a new tracking period: the drink log and intake are
    /// cleared, the goal kept, and the period counter bumped. Period
    /// achievements unlock here too; observers pick them up from the
    /// next snapshot.
    pub fn reset_period(&mut self) {
        self.profile.daily.reset();
        self.profile.periods_tracked += 1;
        trace!(periods = self.profile.periods_tracked, "period reset");
        self.reconcile();
        save_profile(&mut self.store, &self.profile);
    }

    /// Buys a shop item for `cost` coins. Debit and unlock happen
    /// atomically; on failure neither does.
    pub fn purchase(&mut self, item_id: &str, cost: u64) -> Result<Vec<UnlockEvent>, EngineError> {
        self.profile
            .shop
            .purchase(&mut self.profile.coins, item_id, cost)?;

        // balance changed; achievements are reconciled after every
        // currency mutation
        let events = self.reconcile();
        save_profile(&mut self.store, &self.profile);
        Ok(events)
    }

    /// Makes a purchased theme (or the default) the active selection.
    pub fn activate(&mut self, item_id: &str) -> Result<(), EngineError> {
        self.profile.shop.activate(item_id)?;
        save_profile(&mut self.store, &self.profile);
        Ok(())
    }

    /// Stores presentation settings; the core never interprets them.
    pub fn set_display_preferences(&mut self, prefs: DisplayPreferences) {
        self.profile.display_preferences = prefs;
        save_profile(&mut self.store, &self.profile);
    }

    /// Current progress toward the daily goal.
    pub fn progress(&self) -> Result<Progress, EngineError> {
        compute_progress(self.profile.daily.current_intake, self.profile.daily.goal)
    }

    /// The full current state, for initial render and inspection.
    pub fn snapshot(&self) -> &Profile {
        &self.profile
    }

    fn reconcile(&mut self) -> Vec<UnlockEvent> {
        let stats = self.profile.stats();
        let events = reconcile_achievements(&stats, &mut self.profile.unlocked_achievements);
        let reward_total: u64 = events.iter().map(|e| e.coin_reward).sum();
        if reward_total > 0 {
            self.profile.coins.credit(reward_total);
        }
        events
    }
}
