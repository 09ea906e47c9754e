//! Shared availability across several participants.
//!
//! Every participant's events are fetched from the event store, clipped to the
//! window and merged into one busy timeline. Free slots are the gaps left in
//! the window, i.e. the times at which *all* participants are free.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::collector::collect_busy_intervals;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::freebusy::{self, FreeSlot};
use crate::interval::{Interval, Window};
use crate::participants::ParticipantSet;
use crate::store::{AccountId, EventStore};

/// Result of one shared availability computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedAvailability {
    /// The analysis window start.
    pub window_start: DateTime<Utc>,
    /// The analysis window end.
    pub window_end: DateTime<Utc>,
    /// Participants whose events were considered, ascending.
    pub participants: Vec<AccountId>,
    /// Merged busy intervals (sorted by start, disjoint and non-touching).
    pub busy: Vec<Interval>,
    /// Free slots (gaps between busy intervals within the window).
    pub free: Vec<FreeSlot>,
    /// Participants dropped because their events could not be retrieved.
    pub excluded: Vec<AccountId>,
}

/// Computes shared free time over an [`EventStore`].
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: EventStore> AvailabilityEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Merge all participants' busy time within `window` and derive the free slots.
    ///
    /// # Errors
    /// Returns `AvailabilityError::Retrieval` when an event lookup fails and the
    /// configured policy is [`crate::FetchFailurePolicy::Fail`].
    pub fn shared_availability(
        &self,
        window: &Window,
        participants: &ParticipantSet,
    ) -> Result<SharedAvailability> {
        let collected = collect_busy_intervals(
            &self.store,
            window,
            participants,
            self.config.fetch_failure_policy,
        )?;

        let busy = freebusy::merge_intervals(collected.intervals);
        let free = freebusy::find_free_slots(window, &busy);

        debug!(
            participants = participants.len(),
            excluded = collected.excluded.len(),
            busy = busy.len(),
            free = free.len(),
            "computed shared availability"
        );

        Ok(SharedAvailability {
            window_start: window.start(),
            window_end: window.end(),
            participants: participants
                .iter()
                .filter(|id| !collected.excluded.contains(id))
                .collect(),
            busy,
            free,
            excluded: collected.excluded,
        })
    }

    /// Free slots shared by all participants within `window`.
    pub fn free_slots(
        &self,
        window: &Window,
        participants: &ParticipantSet,
    ) -> Result<Vec<FreeSlot>> {
        Ok(self.shared_availability(window, participants)?.free)
    }

    /// The first shared free slot lasting at least `min_duration_minutes`.
    pub fn first_free_slot(
        &self,
        window: &Window,
        participants: &ParticipantSet,
        min_duration_minutes: i64,
    ) -> Result<Option<FreeSlot>> {
        let busy = self.shared_availability(window, participants)?.busy;
        Ok(freebusy::find_first_free_slot(window, &busy, min_duration_minutes))
    }
}
