//! Integer result codes returned across the control surface.

pub use crate::constants::{
    SENSOR_ERROR_ALREADY_ENABLED as ALREADY_ENABLED,
    SENSOR_ERROR_CANNOT_DISABLE as CANNOT_DISABLE,
    SENSOR_ERROR_INTERVAL_NOT_SET as INTERVAL_NOT_SET, SENSOR_ERROR_NONE as NONE,
    SENSOR_ERROR_NOT_AVAILABLE as NOT_AVAILABLE, SENSOR_ERROR_NOT_ENABLED as NOT_ENABLED,
};

/// Maps an error onto the integer code the embedding runtime understands.
pub trait ResultCode {
    fn result_code(&self) -> i32;
}

impl<T, E: ResultCode> ResultCode for Result<T, E> {
    fn result_code(&self) -> i32 {
        match self {
            Ok(_) => NONE,
            Err(e) => e.result_code(),
        }
    }
}
