use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{BlockInfo, Timestamp};

/// Duration is an amount of time, measured in seconds
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
pub struct Duration(u64);

impl Duration {
    pub fn new(secs: u64) -> Duration {
        Duration(secs)
    }

    pub fn after(&self, block: &BlockInfo) -> Expiration {
        self.after_time(block.time)
    }

    pub fn after_time(&self, timestamp: Timestamp) -> Expiration {
        Expiration::at_timestamp(timestamp.plus_seconds(self.0))
    }

    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// A point in time after which something becomes possible. Granularity is
/// one second; sub-second parts of a block time are ignored for elapsed math.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
pub struct Expiration(Timestamp);

impl Expiration {
    pub fn at_timestamp(timestamp: Timestamp) -> Self {
        Self(timestamp)
    }

    pub fn at_seconds(secs: u64) -> Self {
        Self(Timestamp::from_seconds(secs))
    }

    pub fn is_expired(&self, block: &BlockInfo) -> bool {
        self.is_expired_time(block.time)
    }

    pub fn is_expired_time(&self, timestamp: Timestamp) -> bool {
        timestamp >= self.0
    }

    /// Whole seconds since this point, saturating at zero before it
    pub fn elapsed(&self, block: &BlockInfo) -> u64 {
        block.time.seconds().saturating_sub(self.0.seconds())
    }

    pub fn plus_duration(&self, duration: Duration) -> Expiration {
        Self(self.0.plus_seconds(duration.seconds()))
    }

    pub fn time(&self) -> Timestamp {
        self.0
    }
}

impl From<Expiration> for Timestamp {
    fn from(expiration: Expiration) -> Timestamp {
        expiration.0
    }
}
