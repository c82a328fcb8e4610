//! Leptos components wiring a [`Session`](crate::graph::Session) to the page.

pub mod details;
pub mod explorer;
pub mod filter_panel;
pub mod graph_title;
pub mod graph_view;
pub mod search_field;

pub use explorer::Explorer;
