mod item_view;

pub use item_view::{ItemView, get_item_view, list_owner_items};
