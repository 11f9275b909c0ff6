use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Snapshot of the tracked stats that achievement predicates may read.
/// Built fresh for every reconciliation pass, so evaluation is
/// deterministic for a given profile state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub current_intake: f64,
    pub goal: f64,
    pub lifetime_intake: f64,
    pub coins: u64,
    pub periods_tracked: u64,
}

/// The fixed achievement catalog.
///
/// A closed enum keeps predicates unrepresentable-if-malformed: there is
/// no way to reference a stat that doesn't exist. Presentation attributes
/// (icons, colors) live with the UI, keyed by [`Achievement::id`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    /// Log any drink this period
    FirstDrop,
    /// Reach 25% of the daily goal
    QuarterGoal,
    /// Reach 50% of the daily goal
    HalfGoal,
    /// Meet the daily goal
    DailyGoal,
    /// Drink 10 litres lifetime
    HydrationHero,
    /// Complete seven tracking periods
    DedicatedTracker,
    /// Hold 1,000 aqua coins at once
    AquaTycoon,
}

impl Achievement {
    /// All achievements, for iteration.
    pub const ALL: &'static [Achievement] = &[
        Achievement::FirstDrop,
        Achievement::QuarterGoal,
        Achievement::HalfGoal,
        Achievement::DailyGoal,
        Achievement::HydrationHero,
        Achievement::DedicatedTracker,
        Achievement::AquaTycoon,
    ];

    /// Stable slug used in persistence and by UI lookup tables.
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstDrop => "first-drop",
            Achievement::QuarterGoal => "quarter-goal",
            Achievement::HalfGoal => "half-goal",
            Achievement::DailyGoal => "daily-goal",
            Achievement::HydrationHero => "hydration-hero",
            Achievement::DedicatedTracker => "dedicated-tracker",
            Achievement::AquaTycoon => "aqua-tycoon",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstDrop => "First Drop",
            Achievement::QuarterGoal => "Getting Started",
            Achievement::HalfGoal => "Halfway Hero",
            Achievement::DailyGoal => "Goal Crusher",
            Achievement::HydrationHero => "Hydration Hero",
            Achievement::DedicatedTracker => "Dedicated Tracker",
            Achievement::AquaTycoon => "Aqua Tycoon",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstDrop => "Log your first drink",
            Achievement::QuarterGoal => "Reach 25% of daily goal",
            Achievement::HalfGoal => "Reach 50% of daily goal",
            Achievement::DailyGoal => "Complete daily goal",
            Achievement::HydrationHero => "Drink 10L in total",
            Achievement::DedicatedTracker => "Track a full week",
            Achievement::AquaTycoon => "Save up 1,000 aqua coins",
        }
    }

    /// Coins granted when this achievement unlocks.
    pub fn coin_reward(self) -> u64 {
        match self {
            Achievement::FirstDrop => 75,
            Achievement::QuarterGoal => 100,
            Achievement::HalfGoal => 150,
            Achievement::DailyGoal => 250,
            Achievement::HydrationHero => 500,
            Achievement::DedicatedTracker => 300,
            Achievement::AquaTycoon => 1500,
        }
    }

    /// Whether the stats satisfy this achievement's predicate. Pure.
    pub fn is_satisfied(self, stats: &Stats) -> bool {
        match self {
            Achievement::FirstDrop => stats.current_intake > 0.0,
            Achievement::QuarterGoal => stats.current_intake >= stats.goal * 0.25,
            Achievement::HalfGoal => stats.current_intake >= stats.goal * 0.5,
            Achievement::DailyGoal => stats.current_intake >= stats.goal,
            Achievement::HydrationHero => stats.lifetime_intake >= 10_000.0,
            Achievement::DedicatedTracker => stats.periods_tracked >= 7,
            Achievement::AquaTycoon => stats.coins >= 1_000,
        }
    }
}

/// Record of a Locked -> Unlocked transition. One per achievement,
/// forever; unlocks never revert even if the predicate later turns
/// false (e.g. the goal is raised after being met).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnlockRecord {
    pub achievement: Achievement,
    pub unlocked_at: i64,
}

/// Unlock notification for observers (toasts, history).
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockEvent {
    pub achievement: Achievement,
    pub coin_reward: u64,
}

pub fn is_unlocked(unlocked: &[UnlockRecord], achievement: Achievement) -> bool {
    unlocked.iter().any(|r| r.achievement == achievement)
}

/// Walks the catalog, unlocking every locked achievement whose predicate
/// holds for `stats`. Appends an [`UnlockRecord`] per new unlock and
/// returns the events; the summed reward is credited by the caller.
///
/// Idempotent per id: re-running with the same stats grants nothing new.
/// Coin rewards granted by this pass are not fed back into `stats`; the
/// next mutating operation reconciles against the updated balance.
pub fn reconcile_achievements(stats: &Stats, unlocked: &mut Vec<UnlockRecord>) -> Vec<UnlockEvent> {
    let now = Utc::now().timestamp();
    let mut events = Vec::new();

    for &achievement in Achievement::ALL {
        if is_unlocked(unlocked, achievement) {
            continue;
        }
        if achievement.is_satisfied(stats) {
            trace!(id = achievement.id(), "achievement unlocked");
            unlocked.push(UnlockRecord {
                achievement,
                unlocked_at: now,
            });
            events.push(UnlockEvent {
                achievement,
                coin_reward: achievement.coin_reward(),
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(current_intake: f64, goal: f64) -> Stats {
        Stats {
            current_intake,
            goal,
            lifetime_intake: current_intake,
            coins: 0,
            periods_tracked: 0,
        }
    }

    #[test]
    fn unlocks_fire_once() {
        let mut unlocked = Vec::new();

        let events = reconcile_achievements(&stats(250.0, 2000.0), &mut unlocked);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].achievement, Achievement::FirstDrop);
        assert_eq!(events[0].coin_reward, 75);

        // same snapshot again: nothing new
        let events = reconcile_achievements(&stats(250.0, 2000.0), &mut unlocked);
        assert!(events.is_empty());
        assert_eq!(unlocked.len(), 1);
    }

    #[test]
    fn repeated_satisfaction_never_regrants() {
        let mut unlocked = Vec::new();
        for i in 1..=10 {
            reconcile_achievements(&stats(i as f64 * 50.0, 2000.0), &mut unlocked);
        }
        let first_drops = unlocked
            .iter()
            .filter(|r| r.achievement == Achievement::FirstDrop)
            .count();
        assert_eq!(first_drops, 1);
    }

    #[test]
    fn multiple_thresholds_unlock_in_one_pass() {
        let mut unlocked = Vec::new();
        let events = reconcile_achievements(&stats(2000.0, 2000.0), &mut unlocked);

        let ids: Vec<_> = events.iter().map(|e| e.achievement).collect();
        assert!(ids.contains(&Achievement::FirstDrop));
        assert!(ids.contains(&Achievement::QuarterGoal));
        assert!(ids.contains(&Achievement::HalfGoal));
        assert!(ids.contains(&Achievement::DailyGoal));
    }

    #[test]
    fn unlocked_is_terminal_when_predicate_turns_false() {
        let mut unlocked = Vec::new();
        reconcile_achievements(&stats(2000.0, 2000.0), &mut unlocked);
        assert!(is_unlocked(&unlocked, Achievement::DailyGoal));

        // goal raised afterwards; predicate now false, unlock stays
        let events = reconcile_achievements(&stats(2000.0, 4000.0), &mut unlocked);
        assert!(events.is_empty());
        assert!(is_unlocked(&unlocked, Achievement::DailyGoal));
    }

    #[test]
    fn coin_predicate_reads_balance() {
        let mut unlocked = Vec::new();
        let rich = Stats {
            coins: 1_200,
            ..stats(0.0, 2000.0)
        };
        let events = reconcile_achievements(&rich, &mut unlocked);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].achievement, Achievement::AquaTycoon);
    }
}
