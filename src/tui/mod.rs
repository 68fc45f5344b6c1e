pub mod log_view;

pub use log_view::LogView;
