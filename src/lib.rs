//! Hydration tracking engine: a drink ledger, daily-goal progress,
//! achievement rewards and an aqua-coin shop, persisted through a
//! string-keyed slot store.
//!
//! The crate is UI-agnostic. A frontend dispatches mutations through
//! [`Engine`] and renders from [`Engine::snapshot`]; every mutation is
//! written through to the backing [`storage::KvStore`].

pub mod currency;
pub mod engine;
pub mod error;
pub mod progress;
pub mod rewards;
pub mod shop;
pub mod storage;
pub mod structs;

pub use engine::{DrinkOutcome, Engine};
pub use error::EngineError;
pub use progress::{compute_progress, Progress, DEFAULT_GOAL_ML, MIN_GOAL_ML};
pub use rewards::{Achievement, Stats, UnlockEvent, UnlockRecord};
pub use shop::{default_catalog, CatalogItem, UnlockStore, DEFAULT_THEME_ID};
pub use storage::{FileStore, KvStore, MemoryStore};
pub use structs::drink_entry::{DailyState, DrinkEntry};
pub use structs::profile::{DisplayPreferences, Profile};
