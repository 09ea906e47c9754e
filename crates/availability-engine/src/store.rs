//! The event store collaborator.
//!
//! The engine only needs a read-only lookup of one account's events. Storage
//! itself lives outside this crate; [`InMemoryEventStore`] backs the CLI and
//! the tests.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{AvailabilityError, Result};
use crate::format::parse_datetime;

/// Identifier of an account taking part in an availability query.
pub type AccountId = i64;

/// A stored event occupying `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("event store unavailable for account {0}")]
    Unavailable(AccountId),

    #[error("{0}")]
    Backend(String),
}

/// Read-only access to each account's events.
pub trait EventStore {
    fn events_by_account(
        &self,
        account_id: AccountId,
    ) -> std::result::Result<Vec<Event>, StoreError>;
}

impl<S: EventStore + ?Sized> EventStore for &S {
    fn events_by_account(
        &self,
        account_id: AccountId,
    ) -> std::result::Result<Vec<Event>, StoreError> {
        (**self).events_by_account(account_id)
    }
}

/// Events held in memory, keyed by account.
///
/// Accounts with no entry have no events. Accounts marked unavailable fail
/// every lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: HashMap<AccountId, Vec<Event>>,
    unavailable: BTreeSet<AccountId>,
}

#[derive(Deserialize)]
struct EventInput {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct StoreInput {
    #[serde(default)]
    accounts: HashMap<String, Vec<EventInput>>,
    #[serde(default)]
    unavailable: Vec<AccountId>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account_id: AccountId, event: Event) {
        self.events.entry(account_id).or_default().push(event);
    }

    /// Make every lookup for `account_id` fail.
    pub fn mark_unavailable(&mut self, account_id: AccountId) {
        self.unavailable.insert(account_id);
    }

    /// Load a store from JSON.
    ///
    /// ```json
    /// {
    ///   "accounts": { "1": [{ "start": "2026-03-02T10:00", "end": "2026-03-02T11:00" }] },
    ///   "unavailable": [4]
    /// }
    /// ```
    ///
    /// Datetimes use the request formats of [`crate::format::parse_datetime`],
    /// read in `tz`.
    pub fn from_json(json: &str, tz: Tz) -> Result<Self> {
        let input: StoreInput = serde_json::from_str(json)
            .map_err(|e| AvailabilityError::Config(format!("Invalid events JSON: {}", e)))?;

        let mut store = Self::new();
        for (key, events) in input.accounts {
            let account_id: AccountId = key
                .trim()
                .parse()
                .map_err(|_| AvailabilityError::InvalidParticipant(key.clone()))?;
            // Accounts listed without events still exist.
            store.events.entry(account_id).or_default();
            for ev in events {
                store.insert(
                    account_id,
                    Event {
                        start: parse_datetime(&ev.start, tz)?,
                        end: parse_datetime(&ev.end, tz)?,
                    },
                );
            }
        }
        for account_id in input.unavailable {
            store.mark_unavailable(account_id);
        }
        Ok(store)
    }
}

impl EventStore for InMemoryEventStore {
    fn events_by_account(
        &self,
        account_id: AccountId,
    ) -> std::result::Result<Vec<Event>, StoreError> {
        if self.unavailable.contains(&account_id) {
            return Err(StoreError::Unavailable(account_id));
        }
        Ok(self.events.get(&account_id).cloned().unwrap_or_default())
    }
}
