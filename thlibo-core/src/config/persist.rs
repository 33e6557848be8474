//! Persisted records
//!
//! The last-run timestamp and the machine configuration are stored as
//! postcard binary records in flash. The timestamp record replaces the
//! original machine's ad-hoc `time.ini` file: the elapsed time since the
//! last completed cycle feeds the pressure pre-charge curve across power
//! cycles.

use super::types::MachineConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum serialized size of a [`StoredTimestamp`]
pub const MAX_TIMESTAMP_BYTES: usize = 16;

/// Maximum serialized size of a [`MachineConfig`]
pub const MAX_CONFIG_BYTES: usize = 128;

/// Persisted last-completed-run timestamp
///
/// `last_run_secs` is in the persistence clock domain (wall seconds on
/// the reference machine); the firmware converts to its monotonic domain
/// at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoredTimestamp {
    /// Record format version
    pub version: u8,
    /// Seconds since the persistence clock origin
    pub last_run_secs: u64,
}

impl StoredTimestamp {
    /// Current record format version
    pub const VERSION: u8 = 1;

    /// Create a record at the current version
    pub fn new(last_run_secs: u64) -> Self {
        Self {
            version: Self::VERSION,
            last_run_secs,
        }
    }

    /// Check the record version after deserialization
    pub fn is_valid(&self) -> bool {
        self.version == Self::VERSION
    }
}

#[cfg(feature = "serde")]
impl StoredTimestamp {
    /// Serialize into `buf`, returning the written prefix
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], postcard::Error> {
        postcard::to_slice(self, buf).map(|s| &*s)
    }

    /// Deserialize and version-check a record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        let record: Self = postcard::from_bytes(bytes)?;
        if !record.is_valid() {
            return Err(postcard::Error::DeserializeBadEncoding);
        }
        Ok(record)
    }
}

#[cfg(feature = "serde")]
impl MachineConfig {
    /// Serialize into `buf`, returning the written prefix
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], postcard::Error> {
        postcard::to_slice(self, buf).map(|s| &*s)
    }

    /// Deserialize and version-check a record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        let config: Self = postcard::from_bytes(bytes)?;
        if !config.is_valid() {
            return Err(postcard::Error::DeserializeBadEncoding);
        }
        Ok(config)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        let record = StoredTimestamp::new(123_456);
        let mut buf = [0u8; MAX_TIMESTAMP_BYTES];
        let bytes = record.to_bytes(&mut buf).unwrap();
        assert_eq!(StoredTimestamp::from_bytes(bytes).unwrap(), record);
    }

    #[test]
    fn test_config_round_trip() {
        let config = MachineConfig::current();
        let mut buf = [0u8; MAX_CONFIG_BYTES];
        let bytes = config.to_bytes(&mut buf).unwrap();
        assert_eq!(MachineConfig::from_bytes(bytes).unwrap(), config);
    }

    #[test]
    fn test_bad_version_rejected() {
        let record = StoredTimestamp {
            version: 0,
            last_run_secs: 1,
        };
        let mut buf = [0u8; MAX_TIMESTAMP_BYTES];
        let bytes = record.to_bytes(&mut buf).unwrap();
        assert!(StoredTimestamp::from_bytes(bytes).is_err());
    }
}
