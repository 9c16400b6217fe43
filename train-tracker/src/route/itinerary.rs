//! Assembled itineraries.
//!
//! An `Itinerary` is the chronologically ordered sequence of stations a
//! journey passes through, one merged record per station. It is an
//! immutable snapshot: each assembly pass produces a fresh one, and
//! consumers swap whole itineraries rather than patching in place.

use crate::domain::{LocationDetails, Signature};

/// An ordered sequence of stations along one train journey.
///
/// # Invariants
///
/// - Exactly one record per distinct location signature.
/// - Iteration order is itinerary order (chronological by effective
///   time, with unparseable records left in first-seen order).
///
/// An empty itinerary is the valid "unknown train" state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Itinerary {
    stops: Vec<LocationDetails>,
}

impl Itinerary {
    /// Constructs an itinerary from already-ordered stops.
    ///
    /// Only the assembler builds these; the ordering invariant is
    /// established there.
    pub(crate) fn from_sorted(stops: Vec<LocationDetails>) -> Self {
        Self { stops }
    }

    /// The empty itinerary.
    pub fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    /// All stops in itinerary order.
    pub fn stops(&self) -> &[LocationDetails] {
        &self.stops
    }

    /// Iterate over stops in itinerary order.
    pub fn iter(&self) -> impl Iterator<Item = &LocationDetails> {
        self.stops.iter()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True for the "unknown train" state.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Look up a station by its signature.
    pub fn get(&self, signature: &Signature) -> Option<&LocationDetails> {
        self.stops.iter().find(|s| &s.signature == signature)
    }

    /// The first station of the journey.
    pub fn origin(&self) -> Option<&LocationDetails> {
        self.stops.first()
    }

    /// The last station of the journey.
    pub fn terminus(&self) -> Option<&LocationDetails> {
        self.stops.last()
    }

    /// Index of the train's current position for progress display: the
    /// first station not yet passed, or the last station when the whole
    /// journey has been passed. `None` only when empty.
    pub fn current_index(&self) -> Option<usize> {
        if self.stops.is_empty() {
            return None;
        }

        Some(
            self.stops
                .iter()
                .position(|s| !s.passed)
                .unwrap_or(self.stops.len() - 1),
        )
    }

    /// The station at [`Self::current_index`].
    pub fn current_position(&self) -> Option<&LocationDetails> {
        self.current_index().map(|i| &self.stops[i])
    }

    /// Number of stations already passed.
    pub fn passed_count(&self) -> usize {
        self.stops.iter().filter(|s| s.passed).count()
    }

    /// True once every station has been passed.
    pub fn is_complete(&self) -> bool {
        !self.stops.is_empty() && self.stops.iter().all(|s| s.passed)
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a LocationDetails;
    type IntoIter = std::slice::Iter<'a, LocationDetails>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(signature: &str, passed: bool) -> LocationDetails {
        let sig = Signature::parse(signature).unwrap();
        let mut details = LocationDetails::new(signature.to_string(), sig);
        details.passed = passed;
        details
    }

    #[test]
    fn empty_itinerary() {
        let itinerary = Itinerary::empty();
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.len(), 0);
        assert!(itinerary.origin().is_none());
        assert!(itinerary.terminus().is_none());
        assert!(itinerary.current_index().is_none());
        assert!(itinerary.current_position().is_none());
        assert!(!itinerary.is_complete());
    }

    #[test]
    fn lookup_by_signature() {
        let itinerary =
            Itinerary::from_sorted(vec![stop("Cst", true), stop("Fle", false), stop("K", false)]);

        assert_eq!(itinerary.len(), 3);
        assert!(itinerary.get(&Signature::parse("Fle").unwrap()).is_some());
        assert!(itinerary.get(&Signature::parse("G").unwrap()).is_none());
    }

    #[test]
    fn current_position_is_first_not_passed() {
        let itinerary =
            Itinerary::from_sorted(vec![stop("Cst", true), stop("Fle", true), stop("K", false)]);

        assert_eq!(itinerary.current_index(), Some(2));
        assert_eq!(
            itinerary.current_position().unwrap().signature,
            Signature::parse("K").unwrap()
        );
        assert_eq!(itinerary.passed_count(), 2);
        assert!(!itinerary.is_complete());
    }

    #[test]
    fn current_position_sticks_at_terminus_when_complete() {
        let itinerary =
            Itinerary::from_sorted(vec![stop("Cst", true), stop("Fle", true), stop("K", true)]);

        assert_eq!(itinerary.current_index(), Some(2));
        assert!(itinerary.is_complete());
    }

    #[test]
    fn current_position_at_origin_before_departure() {
        let itinerary = Itinerary::from_sorted(vec![stop("Cst", false), stop("Fle", false)]);

        assert_eq!(itinerary.current_index(), Some(0));
        assert_eq!(itinerary.passed_count(), 0);
    }

    #[test]
    fn iteration_preserves_order() {
        let itinerary =
            Itinerary::from_sorted(vec![stop("Cst", false), stop("Fle", false), stop("K", false)]);

        let signatures: Vec<_> = itinerary.iter().map(|s| s.signature.as_str()).collect();
        assert_eq!(signatures, vec!["Cst", "Fle", "K"]);
    }
}
