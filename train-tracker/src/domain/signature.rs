//! Location signature type.

use std::fmt;

/// Error returned when parsing an invalid location signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location signature: {reason}")]
pub struct InvalidSignature {
    reason: &'static str,
}

/// A valid location signature: the short code identifying a station
/// within the Swedish rail network.
///
/// Signatures are 1-8 letters or digits, conventionally starting with
/// an uppercase letter ("Cst" for Stockholm Central, "G" for Göteborg
/// Central, "Vå" for Västerås). Swedish letters (å, ä, ö) are valid.
/// This type guarantees that any `Signature` value is well-formed by
/// construction.
///
/// # Examples
///
/// ```
/// use train_tracker::domain::Signature;
///
/// let cst = Signature::parse("Cst").unwrap();
/// assert_eq!(cst.as_str(), "Cst");
/// assert!(Signature::parse("Vå").is_ok());
///
/// // Empty is rejected
/// assert!(Signature::parse("").is_err());
///
/// // Whitespace is rejected
/// assert!(Signature::parse("C st").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

/// Swedish letters allowed in signatures beyond ASCII.
const SWEDISH_LETTERS: &[char] = &['å', 'ä', 'ö', 'Å', 'Ä', 'Ö'];

impl Signature {
    /// Parse a location signature from a string.
    ///
    /// The input must be 1-8 characters, each an ASCII letter, an ASCII
    /// digit, or a Swedish letter (å/ä/ö in either case).
    pub fn parse(s: &str) -> Result<Self, InvalidSignature> {
        if s.is_empty() {
            return Err(InvalidSignature {
                reason: "must not be empty",
            });
        }

        if s.chars().count() > 8 {
            return Err(InvalidSignature {
                reason: "must be at most 8 characters",
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SWEDISH_LETTERS.contains(&c))
        {
            return Err(InvalidSignature {
                reason: "must be letters and digits only",
            });
        }

        Ok(Signature(s.to_string()))
    }

    /// Returns the signature as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
