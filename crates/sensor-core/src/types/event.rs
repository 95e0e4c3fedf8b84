//! Raw platform samples and the fixed-width portable event record.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    SENSOR_EVENT_SIZE, SENSOR_MAX_VALUES, SEVENT_SENSOR_TYPE, SEVENT_SENSOR_VALUES, SEVENT_TYPE,
};
use crate::errors::TranslationError;

use super::sensor_type::SensorType;

/// One sample as delivered by the platform sensor service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub sensor_type: SensorType,
    /// Component values in the platform's native units. Platforms may
    /// deliver more than the event record can carry.
    pub values: SmallVec<[f32; 4]>,
    /// Platform accuracy status at the time of the sample.
    pub accuracy: i32,
    /// Platform timestamp in nanoseconds.
    pub timestamp_ns: i64,
}

impl RawSample {
    pub fn new(sensor_type: SensorType, values: &[f32]) -> Self {
        Self {
            sensor_type,
            values: SmallVec::from_slice(values),
            accuracy: 0,
            timestamp_ns: 0,
        }
    }

    pub fn with_accuracy(mut self, accuracy: i32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ns: i64) -> Self {
        self.timestamp_ns = timestamp_ns;
        self
    }
}

/// Fixed-width event record handed to the event sink.
///
/// Layout: `[tag, sensor type, v0, v1, v2, v3]`. Values are the raw bit
/// patterns of `f32`s; unused value slots are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorEvent([i32; SENSOR_EVENT_SIZE]);

impl SensorEvent {
    /// Encode already-scaled values into a record.
    pub fn encode(
        event_type: i32,
        sensor_type: SensorType,
        values: &[f32],
    ) -> Result<Self, TranslationError> {
        if values.len() > SENSOR_MAX_VALUES {
            return Err(TranslationError::TooManyValues {
                sensor: sensor_type,
                len: values.len(),
                max: SENSOR_MAX_VALUES,
            });
        }

        let mut record = [0i32; SENSOR_EVENT_SIZE];
        record[SEVENT_TYPE] = event_type;
        record[SEVENT_SENSOR_TYPE] = sensor_type.code();
        for (slot, value) in record[SEVENT_SENSOR_VALUES..].iter_mut().zip(values) {
            *slot = value.to_bits() as i32;
        }
        Ok(Self(record))
    }

    /// Wrap a record received from elsewhere.
    pub fn from_raw(record: [i32; SENSOR_EVENT_SIZE]) -> Self {
        Self(record)
    }

    pub fn event_type(&self) -> i32 {
        self.0[SEVENT_TYPE]
    }

    pub fn sensor_code(&self) -> i32 {
        self.0[SEVENT_SENSOR_TYPE]
    }

    pub fn sensor_type(&self) -> Option<SensorType> {
        SensorType::from_code(self.sensor_code())
    }

    /// Raw bits of value `index`, or `None` past the last value slot.
    pub fn value_bits(&self, index: usize) -> Option<i32> {
        (index < SENSOR_MAX_VALUES).then(|| self.0[SEVENT_SENSOR_VALUES + index])
    }

    /// Value `index` reinterpreted as `f32`.
    pub fn value(&self, index: usize) -> Option<f32> {
        self.value_bits(index).map(|bits| f32::from_bits(bits as u32))
    }

    pub fn values(&self) -> [f32; SENSOR_MAX_VALUES] {
        let mut out = [0.0; SENSOR_MAX_VALUES];
        for (i, v) in out.iter_mut().enumerate() {
            *v = f32::from_bits(self.0[SEVENT_SENSOR_VALUES + i] as u32);
        }
        out
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn into_inner(self) -> [i32; SENSOR_EVENT_SIZE] {
        self.0
    }
}
