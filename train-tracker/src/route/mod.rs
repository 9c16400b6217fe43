//! Route reconstruction.
//!
//! Turns the flat announcement stream for one train into an ordered
//! [`Itinerary`] of merged per-station records. See [`assemble`] for the
//! merge and ordering rules.

mod assemble;
mod itinerary;

pub use assemble::assemble;
pub use itinerary::Itinerary;
