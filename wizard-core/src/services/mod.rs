pub mod api;
pub mod observable;
pub mod store;
