//! Route reconstruction from raw announcement streams.
//!
//! The announcement feed delivers one event per activity per station,
//! in no particular order and with occasional duplicates. This module
//! reconstructs the ordered itinerary: group the two half-events of each
//! stop into one merged record, compute delays, sort chronologically,
//! and classify each station as passed or upcoming.
//!
//! Assembly is a pure function. It never fails on messy data: malformed
//! timestamps degrade to "unknown", one-sided stops (origin, terminus)
//! are valid, and an empty input is simply an unknown train.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Activity, AnnouncementEvent, LocationDetails, Signature};
use crate::stations::CodeResolver;

use super::Itinerary;

/// At most one arrival and one departure contribute per station.
#[derive(Default)]
struct StopGroup<'a> {
    arrival: Option<&'a AnnouncementEvent>,
    departure: Option<&'a AnnouncementEvent>,
}

/// Reconstruct an ordered itinerary from a flat announcement list.
///
/// Grouping is by location signature. Within a group the *first* event
/// of each activity kind wins and later duplicates are ignored; the
/// upstream feed normally sends at most one of each, but schedule
/// revisions have been seen to violate that, and first-match is the
/// long-standing observable behaviour, so it is kept rather than fixed.
///
/// The arrival half of a stop is merged before the departure half, so
/// creation-time fields (track in particular) take the arrival's value
/// when both carry one.
///
/// Sorting is by effective time: the advertised arrival, falling back
/// to the advertised departure. A record where neither parses borrows
/// the key of its nearest keyed neighbour, so the stable sort leaves it
/// where grouping first saw it instead of failing.
pub fn assemble(events: &[AnnouncementEvent], resolver: &CodeResolver) -> Itinerary {
    let mut order: Vec<Signature> = Vec::new();
    let mut groups: HashMap<Signature, StopGroup<'_>> = HashMap::new();

    for event in events {
        let group = groups.entry(event.location.clone()).or_insert_with(|| {
            order.push(event.location.clone());
            StopGroup::default()
        });

        let slot = match event.activity {
            Activity::Arrival => &mut group.arrival,
            Activity::Departure => &mut group.departure,
        };

        // First match wins; duplicates of the same kind are dropped.
        if slot.is_none() {
            *slot = Some(event);
        }
    }

    let mut stops: Vec<LocationDetails> = Vec::with_capacity(order.len());

    for signature in order {
        let group = &groups[&signature];
        let mut details = LocationDetails::new(resolver.resolve(&signature), signature);

        if let Some(arrival) = group.arrival {
            details.apply(arrival);
        }
        if let Some(departure) = group.departure {
            details.apply(departure);
        }

        stops.push(details);
    }

    Itinerary::from_sorted(sort_by_effective_time(stops))
}

/// Stable sort by effective time.
///
/// Records without a usable time borrow the key of the nearest keyed
/// record before them (or after, for a leading run), which ties them to
/// that neighbour; the stable sort then keeps them in grouping order.
/// This avoids an inconsistent comparator while preserving the position
/// of degraded records.
fn sort_by_effective_time(stops: Vec<LocationDetails>) -> Vec<LocationDetails> {
    let mut keys: Vec<Option<DateTime<FixedOffset>>> =
        stops.iter().map(|s| s.effective_time()).collect();

    let mut carried = None;
    for key in keys.iter_mut() {
        match key {
            Some(t) => carried = Some(*t),
            None => *key = carried,
        }
    }

    // A leading run of unkeyed records borrows the first key behind it.
    let mut carried = None;
    for key in keys.iter_mut().rev() {
        match key {
            Some(t) => carried = Some(*t),
            None => *key = carried,
        }
    }

    // After both passes the keys are either all Some or (when nothing
    // parsed at all) all None; either way Option's ordering is total.
    let mut keyed: Vec<_> = keys.into_iter().zip(stops).collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, stop)| stop).collect()
}
