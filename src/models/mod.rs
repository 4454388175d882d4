pub mod entry;
pub mod location;
pub mod page;
pub mod trip;
pub mod user;

pub use entry::{NewTripEntry, TripEntry};
pub use location::{Location, NewLocation};
pub use page::Page;
pub use trip::{NewTrip, Privacy, Trip, TripPatch, TripStats, TripStatus};
pub use user::{NewUser, User};
