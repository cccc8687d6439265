//! Display-duration normalization.
//!
//! Every place that ingests a duration (upload forms, playlist bodies, screen
//! configuration payloads) funnels the raw value through [`normalize`], so a
//! missing, zero, negative or otherwise unusable value always becomes
//! [`DEFAULT_DISPLAY_SECS`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fallback display time, in seconds, for items without a usable duration.
pub const DEFAULT_DISPLAY_SECS: f64 = 5.0;

/// Longest display time accepted, in seconds. Larger values are clamped.
pub const MAX_DISPLAY_SECS: f64 = 86_400.0;

/// A finite number of seconds that converts to a non-zero [`Duration`] no
/// longer than [`MAX_DISPLAY_SECS`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DisplayDuration(f64);

impl DisplayDuration {
    pub fn secs(self) -> f64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::try_from_secs_f64(self.0)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_DISPLAY_SECS))
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        DisplayDuration(DEFAULT_DISPLAY_SECS)
    }
}

impl fmt::Display for DisplayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Normalize a raw duration. Zero, negative, NaN, infinite and missing values
/// all map to the default, as do values too small to survive conversion to
/// nanoseconds. Values above [`MAX_DISPLAY_SECS`] are clamped.
pub fn normalize(raw: Option<f64>) -> DisplayDuration {
    match raw {
        Some(secs) if secs.is_finite() && secs > 0.0 => {
            let secs = secs.min(MAX_DISPLAY_SECS);
            match Duration::try_from_secs_f64(secs) {
                Ok(duration) if !duration.is_zero() => DisplayDuration(secs),
                _ => DisplayDuration::default(),
            }
        }
        _ => DisplayDuration::default(),
    }
}

/// Normalize a textual duration as it arrives from multipart form fields.
pub fn normalize_str(raw: Option<&str>) -> DisplayDuration {
    normalize(raw.and_then(|value| value.trim().parse::<f64>().ok()))
}

impl From<Option<f64>> for DisplayDuration {
    fn from(value: Option<f64>) -> Self {
        normalize(value)
    }
}

impl From<f64> for DisplayDuration {
    fn from(value: f64) -> Self {
        normalize(Some(value))
    }
}

impl Serialize for DisplayDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for DisplayDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawDuration>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawDuration::Number(secs)) => normalize(Some(secs)),
            Some(RawDuration::Text(text)) => normalize_str(Some(&text)),
            Some(RawDuration::Other(_)) | None => DisplayDuration::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Slot {
        #[serde(default)]
        duration: DisplayDuration,
    }

    #[test]
    fn non_positive_and_missing_default_to_five() {
        assert_eq!(normalize(Some(0.0)).secs(), 5.0);
        assert_eq!(normalize(Some(-3.0)).secs(), 5.0);
        assert_eq!(normalize(None).secs(), 5.0);
        assert_eq!(normalize(Some(f64::NAN)).secs(), 5.0);
        assert_eq!(normalize(Some(f64::INFINITY)).secs(), 5.0);
    }

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(normalize(Some(3.0)).secs(), 3.0);
        assert_eq!(normalize(Some(0.5)).as_duration(), Duration::from_millis(500));
    }

    #[test]
    fn huge_values_are_clamped_to_a_day() {
        let day = Duration::from_secs(86_400);
        assert_eq!(normalize(Some(1e20)).secs(), MAX_DISPLAY_SECS);
        assert_eq!(normalize(Some(1e20)).as_duration(), day);
        assert_eq!(normalize_str(Some("1e20")).as_duration(), day);
        assert_eq!(normalize(Some(f64::MAX)).as_duration(), day);

        let slot: Slot = serde_json::from_str(r#"{"duration": 1e20}"#).unwrap();
        assert_eq!(slot.duration.as_duration(), day);
    }

    #[test]
    fn values_that_round_to_zero_fall_back_to_default() {
        assert_eq!(normalize(Some(1e-300)).secs(), DEFAULT_DISPLAY_SECS);
        assert_eq!(
            normalize(Some(1e-300)).as_duration(),
            Duration::from_secs(5)
        );
        assert_eq!(normalize(Some(f64::MIN_POSITIVE)).secs(), DEFAULT_DISPLAY_SECS);
        assert_eq!(normalize(Some(1e-9)).as_duration(), Duration::from_nanos(1));
    }

    #[test]
    fn deserialization_normalizes_every_shape() {
        let cases = [
            (r#"{}"#, 5.0),
            (r#"{"duration": null}"#, 5.0),
            (r#"{"duration": 0}"#, 5.0),
            (r#"{"duration": -1}"#, 5.0),
            (r#"{"duration": 12}"#, 12.0),
            (r#"{"duration": "7"}"#, 7.0),
            (r#"{"duration": "soon"}"#, 5.0),
            (r#"{"duration": [1, 2]}"#, 5.0),
        ];

        for (json, expected) in cases {
            let slot: Slot = serde_json::from_str(json).unwrap();
            assert_eq!(slot.duration.secs(), expected, "input: {json}");
        }
    }

    #[test]
    fn form_values_are_trimmed_before_parsing() {
        assert_eq!(normalize_str(Some(" 8 ")).secs(), 8.0);
        assert_eq!(normalize_str(Some("")).secs(), 5.0);
        assert_eq!(normalize_str(None).secs(), 5.0);
    }
}
