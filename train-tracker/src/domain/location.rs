//! Merged per-station route records.
//!
//! A `LocationDetails` is one station along a journey, with the arrival
//! and departure halves of the stop merged into a single record. The
//! origin has no arrival side and the terminus no departure side; both
//! are valid, not errors.

use chrono::{DateTime, FixedOffset};

use super::{Activity, AnnouncementEvent, Delay, Signature, parse_timestamp};

/// One station along an assembled itinerary.
///
/// "Absent" is modelled with `Option` throughout, never sentinel empty
/// strings, so "no delay known" and "delay of exactly zero" stay
/// distinct. Advertised and revised times are kept as raw wire strings;
/// they are parsed on demand for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDetails {
    /// Resolved display name (falls back to the signature when unknown).
    pub name: String,
    /// Raw location code, kept for identity and lookup.
    pub signature: Signature,
    /// Platform label, from whichever activity supplied one first.
    pub track: Option<String>,
    /// Advertised arrival timestamp; `None` at the origin.
    pub arrival_time: Option<String>,
    /// Advertised departure timestamp; `None` at the terminus.
    pub departure_time: Option<String>,
    /// Revised arrival (actual time preferred over estimate).
    pub estimated_arrival: Option<String>,
    /// Revised departure (actual time preferred over estimate).
    pub estimated_departure: Option<String>,
    /// Arrival-side delay, kept separate from the departure side.
    pub arrival_delay: Option<Delay>,
    /// Departure-side delay.
    pub departure_delay: Option<Delay>,
    /// True once an actual time at location was recorded for either activity.
    pub passed: bool,
    /// True if any contributing announcement was canceled.
    pub canceled: bool,
    /// Distinct product descriptions accumulated from contributing events.
    pub product_info: Vec<String>,
    /// Deviation descriptions accumulated from contributing events.
    pub deviations: Vec<String>,
}

impl LocationDetails {
    /// Creates an empty record for a station.
    pub fn new(name: String, signature: Signature) -> Self {
        Self {
            name,
            signature,
            track: None,
            arrival_time: None,
            departure_time: None,
            estimated_arrival: None,
            estimated_departure: None,
            arrival_delay: None,
            departure_delay: None,
            passed: false,
            canceled: false,
            product_info: Vec::new(),
            deviations: Vec::new(),
        }
    }

    /// Merge one announcement into this record.
    ///
    /// Only the fields belonging to the event's activity kind are set;
    /// everything the other half already wrote is left alone. Shared
    /// fields (track, cancellation, metadata) are patched, never
    /// replaced: the first non-empty track wins, cancellation is sticky,
    /// and product/deviation lists accumulate distinct entries.
    ///
    /// The caller is responsible for applying at most one event per
    /// activity kind; the route assembler enforces first-match-wins for
    /// duplicates.
    pub fn apply(&mut self, event: &AnnouncementEvent) {
        debug_assert_eq!(event.location, self.signature);

        let revised = event.estimated_or_actual().map(str::to_string);
        let delay = Delay::between(
            event.advertised_time.as_deref(),
            event.estimated_or_actual(),
        );

        match event.activity {
            Activity::Arrival => {
                self.arrival_time = event.advertised_time.clone();
                self.estimated_arrival = revised;
                self.arrival_delay = delay;
            }
            Activity::Departure => {
                self.departure_time = event.advertised_time.clone();
                self.estimated_departure = revised;
                self.departure_delay = delay;
            }
        }

        if self.track.is_none() {
            self.track = event.track.clone().filter(|t| !t.is_empty());
        }

        self.passed |= event.has_occurred();
        self.canceled |= event.canceled;

        for product in &event.product_info {
            if !self.product_info.contains(product) {
                self.product_info.push(product.clone());
            }
        }
        for deviation in &event.deviations {
            if !self.deviations.contains(deviation) {
                self.deviations.push(deviation.clone());
            }
        }
    }

    /// The effective chronological position of this stop: the advertised
    /// arrival, falling back to the advertised departure when the arrival
    /// is absent or unparseable. `None` when neither parses.
    pub fn effective_time(&self) -> Option<DateTime<FixedOffset>> {
        self.arrival_time
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.departure_time.as_deref().and_then(parse_timestamp))
    }

    /// The delay to surface for display: the departure-side delay when
    /// present, otherwise the arrival-side one.
    pub fn display_delay(&self) -> Option<Delay> {
        self.departure_delay.or(self.arrival_delay)
    }
}
