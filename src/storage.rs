use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::currency::CoinBalance;
use crate::progress::DEFAULT_GOAL_ML;
use crate::shop::DEFAULT_THEME_ID;
use crate::structs::profile::Profile;

/// Slot keys in the durable store. Each profile field is serialized
/// independently under its own key so one corrupt slot never takes the
/// rest of the profile down with it.
pub mod slots {
    pub const GOAL: &str = "goal";
    pub const CURRENT_INTAKE: &str = "currentIntake";
    pub const DRINK_LOG: &str = "drinkLog";
    pub const CURRENCY_BALANCE: &str = "currencyBalance";
    pub const UNLOCKED_ACHIEVEMENTS: &str = "unlockedAchievements";
    pub const UNLOCKED_CATALOG_ITEMS: &str = "unlockedCatalogItems";
    pub const ACTIVE_SELECTION: &str = "activeSelection";
    pub const PERIODS_TRACKED: &str = "periodsTracked";
    pub const LIFETIME_INTAKE: &str = "lifetimeIntake";
    pub const DISPLAY_PREFERENCES: &str = "displayPreferences";
}

/// String-keyed slot store. The engine writes through after every
/// mutation and reads once at startup; implementations are synchronous
/// and local to the process.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Fire-and-forget: implementations log write failures instead of
    /// returning them.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.slots.insert(key.to_string(), value);
    }
}

/// Durable store backed by a single JSON object file (slot name -> slot
/// value) in the platform data directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in the platform data directory, creating the
    /// directory if needed.
    pub fn open() -> io::Result<Self> {
        let dirs = ProjectDirs::from("io", "hydro", "hydro-tracker")
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory available"))?;
        std::fs::create_dir_all(dirs.data_dir())?;
        Ok(Self::open_at(dirs.data_dir().join("slots.json")))
    }

    /// Opens the store at an explicit path. An unreadable or corrupt
    /// file starts empty; the profile loader fills in defaults.
    pub fn open_at(path: PathBuf) -> Self {
        let slots = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "slot file corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "slot file unreadable, starting empty");
                BTreeMap::new()
            }
        };

        Self { path, slots }
    }

    fn flush(&self) {
        let raw = match serde_json::to_string_pretty(&self.slots) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "unable to serialize slot file");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), error = %e, "unable to write slot file");
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.slots.insert(key.to_string(), value);
        self.flush();
    }
}

/// Parses a decimal-text slot, falling back to `default` when the slot
/// is missing or corrupt. Corruption is recovered, never surfaced.
fn number_slot<T: std::str::FromStr>(store: &impl KvStore, key: &str, default: T) -> T {
    match store.get(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, raw = %raw, "corrupt numeric slot, using default");
                default
            }
        },
        None => default,
    }
}

/// Parses a JSON-encoded slot (lists, structs), falling back on
/// missing or corrupt data.
fn json_slot<T: DeserializeOwned>(store: &impl KvStore, key: &str, default: T) -> T {
    match store.get(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "corrupt slot, using default");
                default
            }
        },
        None => default,
    }
}

fn set_json<T: Serialize>(store: &mut impl KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, raw),
        Err(e) => warn!(key, error = %e, "unable to serialize slot"),
    }
}

/// Reads the whole profile, slot by slot. Every field falls back to its
/// documented default independently, so the app always boots into a
/// usable state no matter what the store contains.
pub fn load_profile(store: &impl KvStore) -> Profile {
    let mut profile = Profile::default();

    let goal = number_slot(store, slots::GOAL, DEFAULT_GOAL_ML);
    if goal > 0.0 {
        profile.daily.goal = goal;
    } else {
        warn!(goal, "non-positive stored goal, using default");
    }

    profile.daily.current_intake = number_slot::<f64>(store, slots::CURRENT_INTAKE, 0.0).max(0.0);
    profile.daily.entries = json_slot(store, slots::DRINK_LOG, Vec::new());

    // stored balances may predate the unsigned representation; clamp
    // anything negative to zero rather than refuse to load
    let balance: i64 = number_slot(store, slots::CURRENCY_BALANCE, 0);
    profile.coins = CoinBalance::new(balance.max(0) as u64);

    profile.unlocked_achievements = json_slot(store, slots::UNLOCKED_ACHIEVEMENTS, Vec::new());
    profile.shop.unlocked = json_slot(store, slots::UNLOCKED_CATALOG_ITEMS, BTreeMap::new());

    let selection = store
        .get(slots::ACTIVE_SELECTION)
        .unwrap_or_else(|| DEFAULT_THEME_ID.to_string());
    if profile.shop.is_unlocked(&selection) {
        profile.shop.active_theme = selection;
    } else {
        warn!(selection = %selection, "active theme not in unlock set, using default");
    }

    profile.periods_tracked = number_slot(store, slots::PERIODS_TRACKED, 0);
    profile.lifetime_intake = number_slot::<f64>(store, slots::LIFETIME_INTAKE, 0.0).max(0.0);
    profile.display_preferences = json_slot(store, slots::DISPLAY_PREFERENCES, Default::default());

    profile
}

/// Writes every profile field to its slot. Numeric slots are decimal
/// text, everything else JSON.
pub fn save_profile(store: &mut impl KvStore, profile: &Profile) {
    store.set(slots::GOAL, profile.daily.goal.to_string());
    store.set(
        slots::CURRENT_INTAKE,
        profile.daily.current_intake.to_string(),
    );
    set_json(store, slots::DRINK_LOG, &profile.daily.entries);
    store.set(slots::CURRENCY_BALANCE, profile.coins.get().to_string());
    set_json(
        store,
        slots::UNLOCKED_ACHIEVEMENTS,
        &profile.unlocked_achievements,
    );
    set_json(
        store,
        slots::UNLOCKED_CATALOG_ITEMS,
        &profile.shop.unlocked,
    );
    store.set(slots::ACTIVE_SELECTION, profile.shop.active_theme.clone());
    store.set(slots::PERIODS_TRACKED, profile.periods_tracked.to_string());
    store.set(slots::LIFETIME_INTAKE, profile.lifetime_intake.to_string());
    set_json(
        store,
        slots::DISPLAY_PREFERENCES,
        &profile.display_preferences,
    );
}
