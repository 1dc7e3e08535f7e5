mod booking_query;
mod booking_service;
mod errors;
mod views;

pub use booking_query::{ListBookings, find_owner_bookings, find_requester_bookings};
pub use booking_service::{ServiceDependencies, create_booking, decide_booking, get_booking};
pub use errors::{BookingApplicationError, ErrorKind, Result};
pub use views::{BookerSummary, BookingDetails, ItemSummary};

pub(crate) use booking_service::{load_item, load_user};
