//! # availability-engine
//!
//! Shared free/busy computation for scheduling across several people.
//!
//! Given a time window and a set of participants, the engine fetches each
//! participant's events, clips them to the window, merges the busy time into a
//! single timeline and returns the free slots everyone has in common.
//!
//! ## Modules
//!
//! - [`availability`] - `AvailabilityEngine`, the end-to-end computation
//! - [`collector`] - per-participant event fetch and clipping
//! - [`freebusy`] - interval merging and free-slot derivation
//! - [`interval`] - `Window` and busy `Interval` types
//! - [`participants`] - participant sets and id list parsing
//! - [`store`] - the `EventStore` collaborator and an in-memory store
//! - [`format`] - request parsing and response formatting
//! - [`config`] - engine configuration and fetch-failure policy
//! - [`error`] - Error types

pub mod availability;
pub mod collector;
pub mod config;
pub mod error;
pub mod format;
pub mod freebusy;
pub mod interval;
pub mod participants;
pub mod store;

pub use availability::{AvailabilityEngine, SharedAvailability};
pub use config::{EngineConfig, FetchFailurePolicy};
pub use error::AvailabilityError;
pub use format::FormattedInterval;
pub use freebusy::{find_first_free_slot, find_free_slots, merge_intervals, FreeSlot};
pub use interval::{Interval, Window};
pub use participants::ParticipantSet;
pub use store::{AccountId, Event, EventStore, InMemoryEventStore, StoreError};
