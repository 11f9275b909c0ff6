use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Lowest accepted daily goal, matching the goal-setting UI's floor.
pub const MIN_GOAL_ML: f64 = 500.0;
/// Daily goal used until the user picks one.
pub const DEFAULT_GOAL_ML: f64 = 2000.0;

/// Progress toward the daily goal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Percent of goal reached, clamped to 100
    pub percentage: f64,
    /// Whether effective intake has reached the goal
    pub is_goal_met: bool,
}

/// Derives progress from effective intake and the daily goal.
///
/// The goal must be positive; callers go through [`crate::Engine::set_goal`],
/// which enforces the 500ml minimum, so a non-positive goal here is a
/// caller bug and reported as `InvalidGoal` rather than dividing by zero.
pub fn compute_progress(current_intake: f64, goal: f64) -> Result<Progress, EngineError> {
    if !(goal > 0.0) {
        return Err(EngineError::InvalidGoal {
            minimum: MIN_GOAL_ML,
        });
    }

    Ok(Progress {
        percentage: (current_intake / goal * 100.0).min(100.0),
        is_goal_met: current_intake >= goal,
    })
}
