//! Participant sets for a shared availability query.

use std::collections::BTreeSet;

use crate::error::{AvailabilityError, Result};
use crate::store::AccountId;

/// Unique participants of one query. Always contains the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSet {
    requester: AccountId,
    members: BTreeSet<AccountId>,
}

impl ParticipantSet {
    /// A set holding only the requester.
    pub fn with_requester(requester: AccountId) -> Self {
        let mut members = BTreeSet::new();
        members.insert(requester);
        Self { requester, members }
    }

    /// Add explicitly invited participants. Duplicates collapse.
    pub fn with_participants<I>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = AccountId>,
    {
        self.members.extend(participants);
        self
    }

    /// Parse a comma-separated id list (e.g. `"2, 3,5"`) and add the requester.
    ///
    /// Whitespace and empty segments are ignored, so `""` yields just the
    /// requester.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidParticipant` for a segment that is
    /// not an integer id.
    pub fn parse(list: &str, requester: AccountId) -> Result<Self> {
        let ids = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<AccountId>()
                    .map_err(|_| AvailabilityError::InvalidParticipant(s.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_requester(requester).with_participants(ids))
    }

    pub fn requester(&self) -> AccountId {
        self.requester
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true: the requester is always a member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, account_id: AccountId) -> bool {
        self.members.contains(&account_id)
    }
}
