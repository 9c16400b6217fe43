//! Station name lookup.
//!
//! Maps location signatures to human-readable station names. The
//! resolver never fails: an unknown signature resolves to itself, which
//! is still a usable (if terse) display name.

use std::collections::HashMap;

use crate::domain::Signature;

/// Built-in signature → name table for common Swedish stations.
///
/// This covers the major interchange stations; callers can extend the
/// resolver with further entries for their region.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("Cst", "Stockholm Central"),
    ("Sst", "Stockholm Södra"),
    ("Sci", "Stockholm City"),
    ("Sod", "Stockholm Odenplan"),
    ("Arnc", "Arlanda Central"),
    ("U", "Uppsala Central"),
    ("G", "Göteborg Central"),
    ("M", "Malmö Central"),
    ("Lu", "Lund Central"),
    ("Hb", "Helsingborg Central"),
    ("Hm", "Hässleholm Central"),
    ("Lp", "Linköping Central"),
    ("Nr", "Norrköping Central"),
    ("K", "Katrineholm Central"),
    ("Fle", "Flen"),
    ("E", "Eskilstuna Central"),
    ("Vå", "Västerås Central"),
    ("Ör", "Örebro Central"),
    ("Hpbg", "Hallsberg"),
    ("Sk", "Skövde Central"),
    ("F", "Falköping Central"),
    ("Hd", "Halmstad Central"),
    ("Vb", "Varberg"),
    ("Kb", "Kungsbacka"),
    ("Gä", "Gävle Central"),
    ("Suc", "Sundsvall Central"),
    ("Umå", "Umeå Central"),
    ("Lå", "Luleå"),
    ("Kra", "Kiruna"),
    ("Bdn", "Boden Central"),
    ("Öb", "Östersund Central"),
    ("Kil", "Kil"),
    ("Ks", "Karlstad Central"),
    ("Jö", "Jönköping Central"),
    ("N", "Nässjö Central"),
    ("Av", "Alvesta"),
    ("Vö", "Växjö"),
    ("Kld", "Kalmar Central"),
    ("Kh", "Karlshamn"),
    ("Ckr", "Karlskrona Central"),
    ("Y", "Ystad"),
    ("Tre", "Trelleborg"),
    ("Bål", "Bålsta"),
    ("Söö", "Södertälje Syd"),
    ("Nk", "Nyköping Central"),
    ("Mö", "Mjölby"),
    ("Tns", "Tranås"),
];

/// Signature → display name resolver.
///
/// Pure lookup table; resolution is infallible and side-effect-free.
///
/// # Examples
///
/// ```
/// use train_tracker::domain::Signature;
/// use train_tracker::stations::CodeResolver;
///
/// let resolver = CodeResolver::new();
/// let cst = Signature::parse("Cst").unwrap();
/// assert_eq!(resolver.resolve(&cst), "Stockholm Central");
///
/// // Unknown codes fall back to the code itself
/// let odd = Signature::parse("Xyz").unwrap();
/// assert_eq!(resolver.resolve(&odd), "Xyz");
/// ```
#[derive(Debug, Clone)]
pub struct CodeResolver {
    names: HashMap<Signature, String>,
}

impl CodeResolver {
    /// Creates a resolver with the built-in station table.
    pub fn new() -> Self {
        let names = BUILTIN_NAMES
            .iter()
            .filter_map(|(code, name)| {
                Signature::parse(code).ok().map(|sig| (sig, name.to_string()))
            })
            .collect();

        Self { names }
    }

    /// Creates a resolver with no entries; every code resolves to itself.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, signature: Signature, name: impl Into<String>) {
        self.names.insert(signature, name.into());
    }

    /// Extends the table with caller-supplied entries.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (Signature, String)>,
    {
        self.names.extend(entries);
        self
    }

    /// Resolves a signature to its display name.
    ///
    /// Never fails: an unknown signature resolves to the raw code.
    pub fn resolve(&self, signature: &Signature) -> String {
        self.names
            .get(signature)
            .cloned()
            .unwrap_or_else(|| signature.as_str().to_string())
    }

    /// Number of known stations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CodeResolver {
    fn default() -> Self {
        Self::new()
    }
}
