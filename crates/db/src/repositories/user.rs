//! Typed accessors over the key-value store. Every accessor logs and swallows
//! storage failures: reads degrade to "nothing stored" and writes report
//! whether they were persisted.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use coordi_core::domain::outfit::{History, Outfit};
use coordi_core::domain::profile::{UserPreferences, UserProfile};

use super::{
    KeyValueStore, OUTFIT_HISTORY_KEY, USER_PREFERENCES_KEY, USER_PROFILE_KEY,
};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn user_profile(&self) -> Option<UserProfile> {
        self.read(USER_PROFILE_KEY).await
    }

    pub async fn save_user_profile(&self, profile: &UserProfile) -> bool {
        self.write(USER_PROFILE_KEY, profile).await
    }

    pub async fn user_preferences(&self) -> Option<UserPreferences> {
        self.read(USER_PREFERENCES_KEY).await
    }

    pub async fn save_user_preferences(&self, preferences: &UserPreferences) -> bool {
        self.write(USER_PREFERENCES_KEY, preferences).await
    }

    /// Newest first, at most 50 entries. Entries that no longer decode are
    /// skipped so the rest survive the next save.
    pub async fn outfit_history(&self) -> History {
        let Some(entries) = self.read::<Vec<Value>>(OUTFIT_HISTORY_KEY).await else {
            return History::default();
        };

        let outfits = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Outfit>(entry) {
                Ok(outfit) => Some(outfit),
                Err(error) => {
                    warn!(
                        event_name = "storage.decode.skipped",
                        key = OUTFIT_HISTORY_KEY,
                        index,
                        error = %error,
                        "dropping malformed history entry"
                    );
                    None
                }
            })
            .collect();
        History::new(outfits)
    }

    /// Prepends `outfit` to the stored history and truncates it.
    pub async fn save_outfit_history(&self, outfit: Outfit) -> bool {
        let mut history = self.outfit_history().await;
        history.record(outfit);
        self.write(OUTFIT_HISTORY_KEY, &history).await
    }

    pub async fn clear_all_user_data(&self) -> bool {
        let mut cleared = true;
        for key in [USER_PROFILE_KEY, USER_PREFERENCES_KEY, OUTFIT_HISTORY_KEY] {
            if let Err(error) = self.store.remove(key).await {
                warn!(event_name = "storage.remove.failed", key, error = %error, "could not remove stored value");
                cleared = false;
            }
        }
        cleared
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.store.get(key).await {
            Ok(value) => value?,
            Err(error) => {
                warn!(event_name = "storage.read.failed", key, error = %error, "could not read stored value");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(event_name = "storage.decode.failed", key, error = %error, "ignoring malformed stored value");
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!(event_name = "storage.write.failed", key, error = %error, "could not encode value");
                return false;
            }
        };

        match self.store.set(key, encoded).await {
            Ok(()) => true,
            Err(error) => {
                warn!(event_name = "storage.write.failed", key, error = %error, "could not persist value");
                false
            }
        }
    }
}
