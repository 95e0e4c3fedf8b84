//! Error types for the sensor bridge (thiserror), plus result-code mapping.

pub mod config_error;
pub mod error_code;
pub mod sensor_error;
pub mod translation_error;

pub use config_error::ConfigError;
pub use error_code::ResultCode;
pub use sensor_error::SensorError;
pub use translation_error::TranslationError;

pub type SensorResult<T> = Result<T, SensorError>;
