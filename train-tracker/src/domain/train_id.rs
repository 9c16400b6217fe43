//! Train identifier type.

use std::fmt;

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train id: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// The advertised train ident that groups all announcements belonging
/// to one scheduled train run.
///
/// Idents are short ASCII alphanumeric strings, usually all digits
/// ("545", "10425"). This type guarantees well-formedness by
/// construction.
///
/// # Examples
///
/// ```
/// use train_tracker::domain::TrainId;
///
/// let id = TrainId::parse("545").unwrap();
/// assert_eq!(id.as_str(), "545");
///
/// assert!(TrainId::parse("").is_err());
/// assert!(TrainId::parse("5 45").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(String);

impl TrainId {
    /// Parse a train identifier from a string.
    ///
    /// The input must be 1-6 ASCII alphanumeric characters.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainId> {
        if s.is_empty() {
            return Err(InvalidTrainId {
                reason: "must not be empty",
            });
        }

        if s.len() > 6 {
            return Err(InvalidTrainId {
                reason: "must be at most 6 characters",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidTrainId {
                reason: "must be ASCII letters and digits only",
            });
        }

        Ok(TrainId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
