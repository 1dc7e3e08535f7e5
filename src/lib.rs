//! Booking temporal-state engine for a peer-to-peer item sharing service.
//!
//! Classifies bookings relative to an explicit "now", lists a requester's or
//! an owner's bookings filtered by state, and annotates item views with the
//! nearest past and upcoming bookings.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use config::AppConfig;
