//! Persisted record load/save
//!
//! Loads the machine configuration and last-run timestamp from flash,
//! falling back to compiled defaults with a warning - a missing or
//! corrupt record never stops the machine from booting.

use defmt::*;

use thlibo_core::config::persist::{MAX_CONFIG_BYTES, MAX_TIMESTAMP_BYTES};
use thlibo_core::config::{MachineConfig, StoredTimestamp};

use crate::flash::{FlashError, FlashStore, StorageKey};

/// Record persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization or version check failed
    Decode,
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

/// Load the machine configuration, or compiled defaults
pub async fn load_machine_config(store: &mut FlashStore<'_>) -> MachineConfig {
    match load_config_inner(store).await {
        Ok(config) => {
            info!("Loaded machine config from flash");
            config
        }
        Err(PersistError::Flash(FlashError::NotFound)) => {
            debug!("No stored config, using defaults");
            MachineConfig::current()
        }
        Err(e) => {
            warn!("Failed to load config: {:?}, using defaults", e);
            MachineConfig::current()
        }
    }
}

async fn load_config_inner(store: &mut FlashStore<'_>) -> Result<MachineConfig, PersistError> {
    let mut buffer = [0u8; MAX_CONFIG_BYTES];
    let len = store.read(StorageKey::MachineConfig, &mut buffer).await?;
    MachineConfig::from_bytes(&buffer[..len]).map_err(|_| PersistError::Decode)
}

/// Load the last-run timestamp from the previous session, if any
pub async fn load_last_run(store: &mut FlashStore<'_>) -> Option<u64> {
    let mut buffer = [0u8; MAX_TIMESTAMP_BYTES];
    let len = match store.read(StorageKey::LastRun, &mut buffer).await {
        Ok(len) => len,
        Err(FlashError::NotFound) => {
            debug!("No stored last-run timestamp");
            return None;
        }
        Err(e) => {
            warn!("Failed to read last-run timestamp: {:?}", e);
            return None;
        }
    };
    match StoredTimestamp::from_bytes(&buffer[..len]) {
        Ok(record) => Some(record.last_run_secs),
        Err(_) => {
            warn!("Corrupt last-run timestamp record");
            None
        }
    }
}

/// Save the last-run timestamp
pub async fn save_last_run(store: &mut FlashStore<'_>, last_run_secs: u64) {
    let record = StoredTimestamp::new(last_run_secs);
    let mut buffer = [0u8; MAX_TIMESTAMP_BYTES];
    match record.to_bytes(&mut buffer) {
        Ok(bytes) => {
            if let Err(e) = store.write(StorageKey::LastRun, bytes).await {
                warn!("Failed to save last-run timestamp: {:?}", e);
            } else {
                debug!("Last-run timestamp saved ({}s)", last_run_secs);
            }
        }
        Err(_) => warn!("Failed to encode last-run timestamp"),
    }
}
