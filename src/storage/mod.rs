//! Storage module for persisting rule configurations
//!
//! This module defines the boundary to the key/value store the host keeps
//! configurations in, including:
//! - The well-known keys each schema generation was written under
//! - Loading whichever generation is present and migrating it
//! - Saving only the canonical generation and clearing the legacy keys

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{ConfigStore, StoreError, StoreResult};

use crate::rules::{fingerprint_value, Configuration, IdGenerator, Migrator};

/// Key of the legacy flat rule array
pub const LEGACY_RULES_KEY: &str = "urlPatterns";

/// Key of the intermediate `{"ruleGroups": [...]}` configuration
pub const GROUPED_CONFIG_KEY: &str = "ruleConfig";

/// Key of the canonical `{"promptGroups": [...]}` configuration
pub const CANONICAL_CONFIG_KEY: &str = "promptConfig";

/// Keys in the order they are consulted when loading (newest first)
pub const LOAD_ORDER: [&str; 3] = [CANONICAL_CONFIG_KEY, GROUPED_CONFIG_KEY, LEGACY_RULES_KEY];

/// Loads the configuration from a store, migrating older shapes
///
/// The first key in [`LOAD_ORDER`] holding a non-null value is used. An empty
/// store gives the first-run configuration, and so does a store that cannot
/// be read (the failure is logged).
pub fn load_configuration<S, G>(store: &S, migrator: &mut Migrator<G>) -> Configuration
where
    S: ConfigStore + ?Sized,
    G: IdGenerator,
{
    for key in LOAD_ORDER {
        match store.get(key) {
            Ok(Some(value)) if !value.is_null() => {
                tracing::debug!("Loading configuration from key '{}'", key);
                return migrator.load(Some(&value));
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Failed to read configuration key '{}': {}", key, e);
                return migrator.first_run();
            }
        }
    }

    tracing::debug!("No stored configuration; using first-run defaults");
    migrator.first_run()
}

/// Writes the configuration under the canonical key and clears legacy keys
pub fn save_configuration<S>(store: &mut S, config: &Configuration) -> StoreResult<()>
where
    S: ConfigStore + ?Sized,
{
    store.set(CANONICAL_CONFIG_KEY, config.to_value()?)?;
    store.remove(GROUPED_CONFIG_KEY)?;
    store.remove(LEGACY_RULES_KEY)?;
    Ok(())
}

/// Saves the configuration unless the store already holds exactly it
///
/// Returns `true` if the store was written. Suited to saving after every
/// edit: unchanged configurations cost one read.
pub fn save_if_changed<S>(store: &mut S, config: &Configuration) -> StoreResult<bool>
where
    S: ConfigStore + ?Sized,
{
    let unchanged = match store.get(CANONICAL_CONFIG_KEY)? {
        Some(stored) => fingerprint_value(&stored) == config.fingerprint(),
        None => false,
    };
    let legacy_present = store.get(GROUPED_CONFIG_KEY)?.is_some()
        || store.get(LEGACY_RULES_KEY)?.is_some();

    if unchanged && !legacy_present {
        tracing::debug!("Configuration unchanged; skipping save");
        return Ok(false);
    }

    save_configuration(store, config)?;
    Ok(true)
}
