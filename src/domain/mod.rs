pub mod booking;
pub mod commands;
pub mod errors;
pub mod item;
pub mod nearest;
pub mod value_objects;

pub use booking::*;
pub use errors::*;
pub use item::*;
pub use nearest::*;
pub use value_objects::*;
