//! Collect every participant's busy time inside a window.

use tracing::{debug, warn};

use crate::config::FetchFailurePolicy;
use crate::error::{AvailabilityError, Result};
use crate::interval::{Interval, Window};
use crate::participants::ParticipantSet;
use crate::store::{AccountId, Event, EventStore};

/// Busy intervals gathered for one computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedBusy {
    /// Clipped busy intervals, unordered and possibly overlapping.
    pub intervals: Vec<Interval>,
    /// Participants left out under [`FetchFailurePolicy::Exclude`].
    pub excluded: Vec<AccountId>,
}

/// Clip events to `window`, discarding events entirely outside it.
pub fn clip_events<'a, I>(events: I, window: &Window) -> impl Iterator<Item = Interval> + 'a
where
    I: IntoIterator<Item = &'a Event>,
    I::IntoIter: 'a,
{
    let window = *window;
    events
        .into_iter()
        .filter_map(move |e| window.clip(e.start, e.end))
}

/// Fetch each participant's events and clip them to `window`.
///
/// # Errors
/// Under [`FetchFailurePolicy::Fail`], a failed lookup aborts with
/// `AvailabilityError::Retrieval`. The other policies never fail.
pub fn collect_busy_intervals<S: EventStore>(
    store: &S,
    window: &Window,
    participants: &ParticipantSet,
    policy: FetchFailurePolicy,
) -> Result<CollectedBusy> {
    let mut collected = CollectedBusy::default();

    for account_id in participants.iter() {
        match store.events_by_account(account_id) {
            Ok(events) => {
                let before = collected.intervals.len();
                collected.intervals.extend(clip_events(&events, window));
                debug!(
                    account_id,
                    fetched = events.len(),
                    in_window = collected.intervals.len() - before,
                    "collected busy intervals"
                );
            }
            Err(source) => match policy {
                FetchFailurePolicy::Fail => {
                    return Err(AvailabilityError::Retrieval { account_id, source });
                }
                FetchFailurePolicy::Exclude => {
                    warn!(
                        account_id,
                        error = %source,
                        "excluding participant after failed event lookup"
                    );
                    collected.excluded.push(account_id);
                }
                FetchFailurePolicy::TreatAsBusy => {
                    warn!(
                        account_id,
                        error = %source,
                        "treating participant as busy after failed event lookup"
                    );
                    collected.intervals.push(window.as_interval());
                }
            },
        }
    }

    Ok(collected)
}
