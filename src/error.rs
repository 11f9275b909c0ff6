use thiserror::Error;

/// Business-rule failures surfaced to the caller. All engine operations
/// return these explicitly; none of them are fatal and none panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A drink was logged with a non-positive amount or a hydration
    /// multiplier outside (0, 1].
    #[error("drink amount must be positive and multiplier within (0, 1]")]
    InvalidAmount,

    /// A daily goal below the supported minimum was requested.
    #[error("daily goal must be at least {minimum}ml")]
    InvalidGoal { minimum: f64 },

    /// A purchase costs more than the current aqua-coin balance.
    #[error("not enough aqua coins: need {cost}, have {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },

    /// The shop item is already owned.
    #[error("item `{0}` is already unlocked")]
    AlreadyUnlocked(String),

    /// Tried to activate a theme that hasn't been purchased.
    #[error("item `{0}` is not unlocked")]
    NotUnlocked(String),
}
