use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::currency::CoinBalance;
use crate::error::EngineError;

/// The built-in theme, always implicitly unlocked.
pub const DEFAULT_THEME_ID: &str = "default";

/// A purchasable shop entry. Prices are configuration shipped with the
/// app, not engine logic; the engine only ever sees (id, cost) pairs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub cost: u64,
}

impl CatalogItem {
    fn new(id: &str, name: &str, cost: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }
}

/// The stock shop catalog: premium themes and feature unlocks.
pub fn default_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("ocean", "Ocean Depths", 1200),
        CatalogItem::new("forest", "Mystic Forest", 1500),
        CatalogItem::new("sunset", "Golden Sunset", 1875),
        CatalogItem::new("aurora", "Aurora Borealis", 2250),
        CatalogItem::new("tokyo-skyline", "Tokyo Nights", 2100),
        CatalogItem::new("premium-badges", "Elite Badges", 2250),
        CatalogItem::new("analytics-pro", "Hydration Analytics Pro", 2700),
    ]
}

/// Owned themes and features, plus the active theme selection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnlockStore {
    /// Owned catalog item id -> unix timestamp of purchase
    pub unlocked: BTreeMap<String, i64>,
    /// Always the default id or a member of `unlocked`
    pub active_theme: String,
}

impl Default for UnlockStore {
    fn default() -> Self {
        Self {
            unlocked: BTreeMap::new(),
            active_theme: DEFAULT_THEME_ID.to_string(),
        }
    }
}

impl UnlockStore {
    pub fn is_unlocked(&self, item_id: &str) -> bool {
        item_id == DEFAULT_THEME_ID || self.unlocked.contains_key(item_id)
    }

    /// Buys an item: debits the balance and records the unlock, both or
    /// neither. A failed debit leaves the unlock set untouched.
    pub fn purchase(
        &mut self,
        balance: &mut CoinBalance,
        item_id: &str,
        cost: u64,
    ) -> Result<(), EngineError> {
        if self.is_unlocked(item_id) {
            return Err(EngineError::AlreadyUnlocked(item_id.to_string()));
        }

        balance.debit(cost)?;
        self.unlocked
            .insert(item_id.to_string(), Utc::now().timestamp());
        trace!(item_id, cost, "shop item purchased");
        Ok(())
    }

    /// Makes an owned theme the active selection.
    pub fn activate(&mut self, item_id: &str) -> Result<(), EngineError> {
        if !self.is_unlocked(item_id) {
            return Err(EngineError::NotUnlocked(item_id.to_string()));
        }
        self.active_theme = item_id.to_string();
        Ok(())
    }
}
