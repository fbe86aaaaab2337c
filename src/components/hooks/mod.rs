pub mod use_scroll_load;

pub use use_scroll_load::use_scroll_load;
