pub mod config;
pub mod fetch;
pub mod html;
pub mod logger;
pub mod page;
pub mod post;
pub mod post_handle;
pub mod post_index;
pub mod sort;
mod test_data;
mod text_utils;
