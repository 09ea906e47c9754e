//! Error types for availability-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::store::{AccountId, StoreError};

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Invalid window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid participant id: '{0}'")]
    InvalidParticipant(String),

    /// The event store could not return events for one participant.
    #[error("Failed to retrieve events for account {account_id}: {source}")]
    Retrieval {
        account_id: AccountId,
        #[source]
        source: StoreError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
