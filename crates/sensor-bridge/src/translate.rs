//! Platform sample → portable event record.

use smallvec::SmallVec;

use sensor_core::{BridgeConfig, RawSample, SensorEvent, SensorType, TranslationError};

/// Builds event records from raw samples. Accelerometer values are divided
/// by the configured adjustment (rescale to roughly [-1, 1] and flip the
/// sign); every other sensor type passes through unchanged.
#[derive(Debug, Clone, Copy)]
pub struct SampleTranslator {
    event_type: i32,
    accelerometer_adjustment: f32,
}

impl SampleTranslator {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            event_type: config.effective_event_type_tag(),
            accelerometer_adjustment: config.effective_accelerometer_adjustment(),
        }
    }

    pub fn translate(&self, sample: &RawSample) -> Result<SensorEvent, TranslationError> {
        if sample.sensor_type == SensorType::Accelerometer {
            let scaled: SmallVec<[f32; 4]> = sample
                .values
                .iter()
                .map(|v| v / self.accelerometer_adjustment)
                .collect();
            SensorEvent::encode(self.event_type, sample.sensor_type, &scaled)
        } else {
            SensorEvent::encode(self.event_type, sample.sensor_type, &sample.values)
        }
    }
}

impl Default for SampleTranslator {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}
