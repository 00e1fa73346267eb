pub mod api;
pub mod translation;
