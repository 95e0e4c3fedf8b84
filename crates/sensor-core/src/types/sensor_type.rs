//! Sensor type enumeration, numbered the way the host runtime numbers them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SENSOR_TYPE_ALL;

/// A concrete class of physical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Accelerometer,
    MagneticField,
    Orientation,
    Gyroscope,
    Light,
    Pressure,
    Temperature,
    Proximity,
    Gravity,
    LinearAcceleration,
}

impl SensorType {
    /// Every concrete sensor type, in code order.
    pub const ALL: [SensorType; 10] = [
        Self::Accelerometer,
        Self::MagneticField,
        Self::Orientation,
        Self::Gyroscope,
        Self::Light,
        Self::Pressure,
        Self::Temperature,
        Self::Proximity,
        Self::Gravity,
        Self::LinearAcceleration,
    ];

    /// Parse a host sensor type code. Returns `None` for the wildcard and
    /// for codes outside `1..=10`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Accelerometer),
            2 => Some(Self::MagneticField),
            3 => Some(Self::Orientation),
            4 => Some(Self::Gyroscope),
            5 => Some(Self::Light),
            6 => Some(Self::Pressure),
            7 => Some(Self::Temperature),
            8 => Some(Self::Proximity),
            9 => Some(Self::Gravity),
            10 => Some(Self::LinearAcceleration),
            _ => None,
        }
    }

    /// The host sensor type code.
    pub fn code(self) -> i32 {
        match self {
            Self::Accelerometer => 1,
            Self::MagneticField => 2,
            Self::Orientation => 3,
            Self::Gyroscope => 4,
            Self::Light => 5,
            Self::Pressure => 6,
            Self::Temperature => 7,
            Self::Proximity => 8,
            Self::Gravity => 9,
            Self::LinearAcceleration => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Accelerometer => "accelerometer",
            Self::MagneticField => "magnetic_field",
            Self::Orientation => "orientation",
            Self::Gyroscope => "gyroscope",
            Self::Light => "light",
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::Proximity => "proximity",
            Self::Gravity => "gravity",
            Self::LinearAcceleration => "linear_acceleration",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a caller asked to start: one concrete sensor, or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSelector {
    /// Multiplexed "any sensor" registration. Always rejected.
    All,
    One(SensorType),
}

impl SensorSelector {
    /// Parse a caller-supplied sensor code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        if code == SENSOR_TYPE_ALL {
            return Some(Self::All);
        }
        SensorType::from_code(code).map(Self::One)
    }

    pub fn code(self) -> i32 {
        match self {
            Self::All => SENSOR_TYPE_ALL,
            Self::One(sensor) => sensor.code(),
        }
    }
}

impl From<SensorType> for SensorSelector {
    fn from(sensor: SensorType) -> Self {
        Self::One(sensor)
    }
}

impl fmt::Display for SensorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::One(sensor) => sensor.fmt(f),
        }
    }
}
