pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod services;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use services::api::ApiClient;
pub use services::store::TranslationStore;
