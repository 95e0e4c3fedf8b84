//! Rate Mapping Table: portable rate codes → the platform's native rate.
//!
//! Named presets map to the platform's coarse delay presets; a positive
//! code is a period in milliseconds, scaled into the platform's finer unit.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::constants::{
    SENSOR_DELAY_FASTEST, SENSOR_DELAY_GAME, SENSOR_DELAY_MULTIPLIER, SENSOR_DELAY_NORMAL,
    SENSOR_DELAY_UI,
};
use crate::errors::SensorError;

/// Delivery rate requested by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorRate {
    Fastest,
    Game,
    #[default]
    Normal,
    Ui,
    /// Milliseconds between samples.
    Millis(NonZeroU32),
}

impl SensorRate {
    /// Parse a caller rate code: `0`, `-1`, `-2`, `-3`, or a positive
    /// millisecond period. Anything below `-3` is rejected.
    pub fn from_code(code: i32) -> Result<Self, SensorError> {
        match code {
            SENSOR_DELAY_FASTEST => Ok(Self::Fastest),
            SENSOR_DELAY_GAME => Ok(Self::Game),
            SENSOR_DELAY_NORMAL => Ok(Self::Normal),
            SENSOR_DELAY_UI => Ok(Self::Ui),
            ms => u32::try_from(ms)
                .ok()
                .and_then(NonZeroU32::new)
                .map(Self::Millis)
                .ok_or(SensorError::InvalidInterval { code }),
        }
    }

    /// The caller's original code.
    pub fn code(self) -> i32 {
        match self {
            Self::Fastest => SENSOR_DELAY_FASTEST,
            Self::Game => SENSOR_DELAY_GAME,
            Self::Normal => SENSOR_DELAY_NORMAL,
            Self::Ui => SENSOR_DELAY_UI,
            // from_code only accepts positive i32 values.
            Self::Millis(ms) => i32::try_from(ms.get()).unwrap_or(i32::MAX),
        }
    }

    /// Convert to the native rate using the default multiplier.
    pub fn native(self) -> NativeRate {
        self.to_native(SENSOR_DELAY_MULTIPLIER)
    }

    /// Convert to the native rate. Millisecond periods are multiplied by
    /// `multiplier`, saturating at `u64::MAX`.
    pub fn to_native(self, multiplier: u32) -> NativeRate {
        match self {
            Self::Fastest => NativeRate::Preset(NativeDelay::Fastest),
            Self::Game => NativeRate::Preset(NativeDelay::Game),
            Self::Normal => NativeRate::Preset(NativeDelay::Normal),
            Self::Ui => NativeRate::Preset(NativeDelay::Ui),
            Self::Millis(ms) => {
                NativeRate::Micros(u64::from(ms.get()).saturating_mul(u64::from(multiplier)))
            }
        }
    }
}

impl fmt::Display for SensorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fastest => f.write_str("fastest"),
            Self::Game => f.write_str("game"),
            Self::Normal => f.write_str("normal"),
            Self::Ui => f.write_str("ui"),
            Self::Millis(ms) => write!(f, "{ms}ms"),
        }
    }
}

/// The platform's coarse delay presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeDelay {
    Fastest,
    Game,
    Normal,
    Ui,
}

/// A rate expressed in the platform's own unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeRate {
    Preset(NativeDelay),
    /// Microseconds between samples.
    Micros(u64),
}

impl fmt::Display for NativeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(delay) => write!(f, "{delay:?}"),
            Self::Micros(us) => write!(f, "{us}us"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_platform_presets() {
        let cases = [
            (0, NativeRate::Preset(NativeDelay::Fastest)),
            (-1, NativeRate::Preset(NativeDelay::Game)),
            (-2, NativeRate::Preset(NativeDelay::Normal)),
            (-3, NativeRate::Preset(NativeDelay::Ui)),
        ];
        for (code, expected) in cases {
            assert_eq!(SensorRate::from_code(code).unwrap().native(), expected, "code {code}");
        }
    }

    #[test]
    fn millisecond_period_is_scaled_to_micros() {
        assert_eq!(SensorRate::from_code(5).unwrap().native(), NativeRate::Micros(5000));
        assert_eq!(SensorRate::from_code(1).unwrap().native(), NativeRate::Micros(1000));
    }

    #[test]
    fn codes_below_ui_are_rejected() {
        assert!(matches!(
            SensorRate::from_code(-4),
            Err(SensorError::InvalidInterval { code: -4 })
        ));
        assert!(SensorRate::from_code(i32::MIN).is_err());
    }

    #[test]
    fn large_periods_do_not_overflow() {
        let rate = SensorRate::from_code(i32::MAX).unwrap();
        assert_eq!(rate.to_native(u32::MAX), NativeRate::Micros(i32::MAX as u64 * u32::MAX as u64));
        assert_eq!(rate.code(), i32::MAX);
    }
}
