//! Live train route tracker.
//!
//! Reconstructs the ordered itinerary of a Swedish train from the flat,
//! unordered announcement feed, and keeps it fresh by polling:
//! "where is train 545 right now, and which stations are still ahead?"

pub mod cache;
pub mod domain;
pub mod position;
pub mod route;
pub mod stations;
pub mod tracker;
pub mod trafikverket;
