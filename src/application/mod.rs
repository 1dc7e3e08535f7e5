pub mod booking;
pub mod item;
