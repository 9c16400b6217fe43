//! Domain types for the train route tracker.
//!
//! This module contains the validated core data model. Identifiers are
//! parsed at the boundary so code that receives these types can trust
//! their validity; time fields stay as raw wire strings and are parsed
//! leniently where needed, because the upstream feed is allowed to be
//! messy and the tracker is not allowed to crash over it.

mod activity;
mod announcement;
mod location;
mod signature;
mod time;
mod train_id;

pub use activity::Activity;
pub use announcement::AnnouncementEvent;
pub use location::LocationDetails;
pub use signature::{InvalidSignature, Signature};
pub use time::{Delay, parse_timestamp};
pub use train_id::{InvalidTrainId, TrainId};
