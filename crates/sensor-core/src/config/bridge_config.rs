//! BridgeConfig: sensor bridge settings from the `[sensor_bridge]` TOML table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{ACCELEROMETER_ADJUSTMENT, EVENT_TYPE_SENSOR, SENSOR_DELAY_MULTIPLIER};
use crate::errors::ConfigError;
use crate::types::sensor_type::SensorType;

/// Sensor bridge configuration. Unset fields fall back to the host
/// runtime's constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Tag written into slot 0 of every event. Default: 22.
    pub event_type_tag: Option<i32>,
    /// Divisor applied to accelerometer values. Default: -10.0.
    pub accelerometer_adjustment: Option<f32>,
    /// Millisecond → native rate multiplier. Default: 1000.
    pub rate_multiplier: Option<u32>,
    /// Sensor types that are never started, whatever the device supports.
    pub disabled_sensors: Vec<SensorType>,
    /// Log every dropped sample at warn level. Default: true.
    pub log_dropped_samples: Option<bool>,
}

impl BridgeConfig {
    /// Parse from TOML. Accepts either a file with a `[sensor_bridge]`
    /// table or the bare table contents.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(input)?;
        let config: Self = match table.remove("sensor_bridge") {
            Some(section) => section.try_into()?,
            None => toml::Value::Table(table).try_into()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&input)?;
        tracing::debug!(path = %path.display(), "Loaded sensor bridge config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let adjustment = self.effective_accelerometer_adjustment();
        if !adjustment.is_finite() || adjustment == 0.0 {
            return Err(ConfigError::Invalid {
                field: "accelerometer_adjustment",
                reason: format!("must be finite and non-zero, got {adjustment}"),
            });
        }
        if self.effective_rate_multiplier() == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_multiplier",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn effective_event_type_tag(&self) -> i32 {
        self.event_type_tag.unwrap_or(EVENT_TYPE_SENSOR)
    }

    pub fn effective_accelerometer_adjustment(&self) -> f32 {
        self.accelerometer_adjustment.unwrap_or(ACCELEROMETER_ADJUSTMENT)
    }

    pub fn effective_rate_multiplier(&self) -> u32 {
        self.rate_multiplier.unwrap_or(SENSOR_DELAY_MULTIPLIER)
    }

    pub fn effective_log_dropped_samples(&self) -> bool {
        self.log_dropped_samples.unwrap_or(true)
    }

    pub fn is_disabled(&self, sensor: SensorType) -> bool {
        self.disabled_sensors.contains(&sensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_constants() {
        let config = BridgeConfig::default();
        assert_eq!(config.effective_event_type_tag(), 22);
        assert_eq!(config.effective_accelerometer_adjustment(), -10.0);
        assert_eq!(config.effective_rate_multiplier(), 1000);
        assert!(config.effective_log_dropped_samples());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_bare_table() {
        let config = BridgeConfig::from_toml_str(
            r#"
            event_type_tag = 40
            disabled_sensors = ["proximity", "light"]
            "#,
        )
        .unwrap();
        assert_eq!(config.effective_event_type_tag(), 40);
        assert!(config.is_disabled(SensorType::Proximity));
        assert!(!config.is_disabled(SensorType::Accelerometer));
    }

    #[test]
    fn parses_nested_table() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [other]
            key = 1

            [sensor_bridge]
            rate_multiplier = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.effective_rate_multiplier(), 500);
    }

    #[test]
    fn nested_table_takes_precedence_over_top_level_keys() {
        let config = BridgeConfig::from_toml_str(
            r#"
            event_type_tag = 7

            [sensor_bridge]
            event_type_tag = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.effective_event_type_tag(), 8);
    }

    #[test]
    fn non_table_section_is_a_parse_error() {
        let err = BridgeConfig::from_toml_str("sensor_bridge = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_adjustment() {
        let err = BridgeConfig::from_toml_str("accelerometer_adjustment = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "accelerometer_adjustment",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_multiplier() {
        let err = BridgeConfig::from_toml_str("rate_multiplier = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rate_multiplier", .. }));
    }

    #[test]
    fn rejects_unknown_sensor_names() {
        let err = BridgeConfig::from_toml_str(r#"disabled_sensors = ["barometer"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
