pub mod header_footer;

pub use header_footer::{Footer, FooterStatus, Header};
