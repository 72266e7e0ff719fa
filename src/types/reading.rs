//! Weather reading submitted through the input form

use crate::error::{AqiError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Form field names in the order the scaler and model were trained with.
pub const FIELD_NAMES: [&str; 8] = ["T", "TM", "Tm", "SLP", "H", "VV", "V", "VM"];

/// One day of weather measurements used as model input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherReading {
    /// Average temperature (°C)
    #[serde(rename = "T")]
    pub avg_temperature: f64,

    /// Maximum temperature (°C)
    #[serde(rename = "TM")]
    pub max_temperature: f64,

    /// Minimum temperature (°C)
    #[serde(rename = "Tm")]
    pub min_temperature: f64,

    /// Atmospheric pressure at sea level (hPa)
    #[serde(rename = "SLP")]
    pub sea_level_pressure: f64,

    /// Average relative humidity (%)
    #[serde(rename = "H")]
    pub humidity: f64,

    /// Average visibility (km)
    #[serde(rename = "VV")]
    pub visibility: f64,

    /// Average wind speed (km/h)
    #[serde(rename = "V")]
    pub wind_speed: f64,

    /// Maximum sustained wind speed (km/h)
    #[serde(rename = "VM")]
    pub max_wind_speed: f64,
}

impl WeatherReading {
    /// Build a reading from raw form fields.
    ///
    /// Fields are checked in [`FIELD_NAMES`] order and the first missing or
    /// non-numeric one is reported. Unknown fields are ignored.
    pub fn from_form(fields: &HashMap<String, String>) -> Result<Self> {
        let mut values = [0.0_f64; FIELD_NAMES.len()];
        for (slot, name) in values.iter_mut().zip(FIELD_NAMES) {
            let raw = fields.get(name).ok_or_else(|| AqiError::Validation {
                field: name,
                reason: "missing field".to_string(),
            })?;
            *slot = parse_number(name, raw)?;
        }
        Ok(Self::from_array(values))
    }

    /// Construct from values in canonical field order.
    pub fn from_array(values: [f64; 8]) -> Self {
        let [t, tm, t_min, slp, h, vv, v, vm] = values;
        Self {
            avg_temperature: t,
            max_temperature: tm,
            min_temperature: t_min,
            sea_level_pressure: slp,
            humidity: h,
            visibility: vv,
            wind_speed: v,
            max_wind_speed: vm,
        }
    }

    /// Values in canonical field order.
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.avg_temperature,
            self.max_temperature,
            self.min_temperature,
            self.sea_level_pressure,
            self.humidity,
            self.visibility,
            self.wind_speed,
            self.max_wind_speed,
        ]
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AqiError::Validation {
            field,
            reason: format!("not a number: {:?}", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> HashMap<String, String> {
        [
            ("T", "20"),
            ("TM", "25"),
            ("Tm", "15"),
            ("SLP", "1012"),
            ("H", "60"),
            ("VV", "5"),
            ("V", "3"),
            ("VM", "8"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parse_complete_form() {
        let reading = WeatherReading::from_form(&sample_form()).unwrap();

        assert_eq!(
            reading.to_array(),
            [20.0, 25.0, 15.0, 1012.0, 60.0, 5.0, 3.0, 8.0]
        );
        assert_eq!(reading.sea_level_pressure, 1012.0);
        assert_eq!(reading.min_temperature, 15.0);
    }

    #[test]
    fn test_accepts_signed_exponent_and_whitespace() {
        let mut form = sample_form();
        form.insert("T".to_string(), " -3.5 ".to_string());
        form.insert("SLP".to_string(), "1.0125e3".to_string());
        form.insert("V".to_string(), "+2".to_string());

        let reading = WeatherReading::from_form(&form).unwrap();
        assert_eq!(reading.avg_temperature, -3.5);
        assert_eq!(reading.sea_level_pressure, 1012.5);
        assert_eq!(reading.wind_speed, 2.0);
    }

    #[test]
    fn test_rejects_each_missing_field() {
        for name in FIELD_NAMES {
            let mut form = sample_form();
            form.remove(name);

            match WeatherReading::from_form(&form) {
                Err(AqiError::Validation { field, reason }) => {
                    assert_eq!(field, name);
                    assert_eq!(reason, "missing field");
                }
                other => panic!("expected validation error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_each_non_numeric_field() {
        for name in FIELD_NAMES {
            let mut form = sample_form();
            form.insert(name.to_string(), "abc".to_string());

            match WeatherReading::from_form(&form) {
                Err(AqiError::Validation { field, .. }) => assert_eq!(field, name),
                other => panic!("expected validation error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_empty_and_non_finite_values() {
        for bad in ["", "   ", "NaN", "inf", "-infinity"] {
            let mut form = sample_form();
            form.insert("H".to_string(), bad.to_string());
            assert!(WeatherReading::from_form(&form).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let mut form = sample_form();
        let value = form.remove("Tm").unwrap();
        form.insert("tm".to_string(), value);

        let err = WeatherReading::from_form(&form).unwrap_err();
        assert!(matches!(err, AqiError::Validation { field: "Tm", .. }));
    }

    #[test]
    fn test_ignores_extra_fields() {
        let mut form = sample_form();
        form.insert("submit".to_string(), "Predict".to_string());
        assert!(WeatherReading::from_form(&form).is_ok());
    }

    #[test]
    fn test_serializes_with_form_names() {
        let reading = WeatherReading::from_array([20.0, 25.0, 15.0, 1012.0, 60.0, 5.0, 3.0, 8.0]);
        let json = serde_json::to_value(reading).unwrap();

        for name in FIELD_NAMES {
            assert!(json.get(name).is_some(), "missing key {name}");
        }
        assert_eq!(json["Tm"], 15.0);
    }
}
