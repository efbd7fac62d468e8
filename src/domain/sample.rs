// Measurement sample models and locale normalization
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One measurement row as it appears on the wire. The numeric fields are
/// locale-formatted decimal strings with a comma fractional separator
/// ("10,5"), exactly as stored in the turbine CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    pub datetime: String,
    pub wind_speed: String,
    pub power: String,
}

/// A normalized sample, ready to plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    pub wind_speed: f64,
    pub power: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed {field} value {value:?}")]
pub struct MalformedSample {
    pub field: &'static str,
    pub value: String,
}

/// Parse a locale-formatted decimal ("2500,0") into a finite f64.
pub fn parse_locale_decimal(field: &'static str, raw: &str) -> Result<f64, MalformedSample> {
    let malformed = || MalformedSample {
        field,
        value: raw.to_string(),
    };
    let value: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| malformed())?;
    // "NaN" and "inf" parse successfully but are useless as chart points.
    if !value.is_finite() {
        return Err(malformed());
    }
    Ok(value)
}

impl RawSample {
    pub fn normalize(&self) -> Result<PowerSample, MalformedSample> {
        Ok(PowerSample {
            wind_speed: parse_locale_decimal("wind_speed", &self.wind_speed)?,
            power: parse_locale_decimal("power", &self.power)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(wind_speed: &str, power: &str) -> RawSample {
        RawSample {
            datetime: "2016-01-01 00:00:00".to_string(),
            wind_speed: wind_speed.to_string(),
            power: power.to_string(),
        }
    }

    #[test]
    fn test_normalize_decimal_comma() {
        let sample = raw("5,3", "120,7").normalize().unwrap();
        assert_eq!(sample.wind_speed, 5.3);
        assert_eq!(sample.power, 120.7);
    }

    #[test]
    fn test_normalize_zero_and_plain_values() {
        let sample = raw("0,0", "0,0").normalize().unwrap();
        assert_eq!(sample.wind_speed, 0.0);
        assert_eq!(sample.power, 0.0);

        // Already point-formatted values still parse
        let sample = raw("10.5", "2500").normalize().unwrap();
        assert_eq!(sample.wind_speed, 10.5);
        assert_eq!(sample.power, 2500.0);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let err = raw("n/a", "120,7").normalize().unwrap_err();
        assert_eq!(err.field, "wind_speed");
        assert_eq!(err.value, "n/a");

        let err = raw("5,3", "").normalize().unwrap_err();
        assert_eq!(err.field, "power");
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(parse_locale_decimal("wind_speed", "NaN").is_err());
        assert!(parse_locale_decimal("power", "inf").is_err());
    }
}
