pub mod config;
pub mod error;
pub mod fields;
pub mod types;

pub use config::AppConfig;
pub use error::{AdLensError, AdLensResult};
