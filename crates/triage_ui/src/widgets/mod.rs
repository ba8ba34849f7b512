//! Reusable view pieces.

pub mod response_view;

pub use response_view::response_view;
