//! Stream Frame Codec
//!
//! Decodes one raw text frame from the transport into a typed [`Envelope`].
//!
//! # Wire Format
//!
//! Frames are JSON objects tagged by a `status` discriminant:
//!
//! ```json
//! {"status": "success", "data": {"price": 42123.45, "high_24h": 43000.0}}
//! {"status": "waiting"}
//! {"status": "error"}
//! ```
//!
//! A bare object with no `status` key is the legacy format and is accepted
//! as an implicit success payload:
//!
//! ```json
//! {"price": 42123.45, "countdown": 30}
//! ```
//!
//! # Tolerance
//!
//! Decoding tolerates problems at the field level: a numeric field that is
//! absent or carries a non-numeric value becomes "unknown" rather than
//! failing the frame. Only structural problems reject a frame: payloads
//! that are not parsable JSON objects, or that carry an unrecognized
//! discriminant. Decoding is a pure, synchronous function of the input text
//! and never panics.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::snapshot::{Envelope, PriceSnapshot};

/// Unix timestamps at or above this magnitude are taken as milliseconds
/// rather than seconds.
const UNIX_MILLIS_THRESHOLD: f64 = 100_000_000_000.0;

/// Codec errors.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame is not parsable structured data.
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// The frame parsed but carries an unrecognized status discriminant.
    #[error("unknown status discriminant: {0}")]
    UnknownStatus(String),
}

/// Decode a raw text frame into an envelope.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when the frame is not a JSON object
/// and [`DecodeError::UnknownStatus`] when the discriminant is not one of
/// `success`, `waiting`, or `error`. Individual field problems never fail
/// the frame; the affected fields decode as unknown.
pub fn decode(raw: &str) -> Result<Envelope, DecodeError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|error| DecodeError::Malformed(error.to_string()))?;

    let Value::Object(object) = value else {
        return Err(DecodeError::Malformed(
            "expected a JSON object frame".to_string(),
        ));
    };

    match object.get("status") {
        // Legacy frames carry the snapshot fields at the top level.
        None => Ok(Envelope::Success(snapshot_from(Some(&object)))),
        Some(Value::String(status)) => match status.as_str() {
            "success" => {
                let data = object.get("data").and_then(Value::as_object);
                Ok(Envelope::Success(snapshot_from(data)))
            }
            "waiting" => Ok(Envelope::Waiting),
            "error" => Ok(Envelope::Error),
            other => Err(DecodeError::UnknownStatus(other.to_string())),
        },
        Some(_) => Err(DecodeError::Malformed(
            "status discriminant must be a string".to_string(),
        )),
    }
}

/// Build a snapshot from a payload map, tolerating absent and non-numeric
/// fields. A missing map (e.g. `success` without `data`) yields an
/// all-unknown snapshot.
fn snapshot_from(data: Option<&Map<String, Value>>) -> PriceSnapshot {
    data.map_or_else(PriceSnapshot::default, |map| PriceSnapshot {
        price: number_field(map, "price"),
        last_updated: timestamp_field(map.get("last_updated")),
        high_24h: number_field(map, "high_24h"),
        low_24h: number_field(map, "low_24h"),
        price_change_24h: number_field(map, "price_change_24h"),
        price_change_percentage_24h: number_field(map, "price_change_percentage_24h"),
        countdown_seconds: number_field(map, "countdown"),
    })
}

/// Read a numeric field; anything that is not a JSON number is unknown.
fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

/// Read the update timestamp: RFC 3339 strings and unix-epoch numbers are
/// accepted, anything else defaults to the decode time.
fn timestamp_field(value: Option<&Value>) -> DateTime<Utc> {
    match value {
        Some(Value::String(text)) => DateTime::parse_from_rfc3339(text)
            .map_or_else(|_| Utc::now(), |parsed| parsed.with_timezone(&Utc)),
        Some(other) => other
            .as_f64()
            .and_then(timestamp_from_unix)
            .unwrap_or_else(Utc::now),
        None => Utc::now(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_from_unix(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() {
        return None;
    }
    let seconds = if raw.abs() >= UNIX_MILLIS_THRESHOLD {
        raw / 1_000.0
    } else {
        raw
    };
    DateTime::from_timestamp_millis((seconds * 1_000.0) as i64)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_with_full_data() {
        let raw = r#"{
            "status": "success",
            "data": {
                "price": 42123.456,
                "last_updated": "2024-05-01T12:00:00Z",
                "high_24h": 43000.0,
                "low_24h": 41500.0,
                "price_change_24h": -120.5,
                "price_change_percentage_24h": -0.29
            }
        }"#;

        let envelope = decode(raw).unwrap();
        let snapshot = envelope.snapshot().unwrap();
        assert_eq!(snapshot.price, Some(42_123.456));
        assert_eq!(snapshot.high_24h, Some(43_000.0));
        assert_eq!(snapshot.low_24h, Some(41_500.0));
        assert_eq!(snapshot.price_change_24h, Some(-120.5));
        assert_eq!(snapshot.price_change_percentage_24h, Some(-0.29));
        assert_eq!(
            snapshot.last_updated.to_rfc3339(),
            "2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn decodes_success_with_partial_data() {
        let envelope = decode(r#"{"status":"success","data":{"price":42123.456}}"#).unwrap();
        let snapshot = envelope.snapshot().unwrap();

        assert_eq!(snapshot.price, Some(42_123.456));
        assert_eq!(snapshot.high_24h, None);
        assert_eq!(snapshot.low_24h, None);
        assert_eq!(snapshot.price_change_percentage_24h, None);
    }

    #[test]
    fn decodes_success_without_data_as_all_unknown() {
        let envelope = decode(r#"{"status":"success"}"#).unwrap();
        let snapshot = envelope.snapshot().unwrap();
        assert_eq!(snapshot.price, None);
    }

    #[test]
    fn decodes_legacy_bare_snapshot_as_success() {
        let envelope = decode(r#"{"price":65000.0,"countdown":30}"#).unwrap();
        let snapshot = envelope.snapshot().unwrap();

        assert_eq!(snapshot.price, Some(65_000.0));
        assert_eq!(snapshot.countdown_seconds, Some(30.0));
    }

    #[test]
    fn decodes_waiting_and_error_statuses() {
        assert_eq!(decode(r#"{"status":"waiting"}"#).unwrap(), Envelope::Waiting);
        assert_eq!(decode(r#"{"status":"error"}"#).unwrap(), Envelope::Error);
    }

    #[test]
    fn non_numeric_fields_become_unknown() {
        let raw = r#"{
            "status": "success",
            "data": {"price": "not-a-number", "high_24h": null, "low_24h": 41500.0}
        }"#;

        let envelope = decode(raw).unwrap();
        let snapshot = envelope.snapshot().unwrap();
        assert_eq!(snapshot.price, None);
        assert_eq!(snapshot.high_24h, None);
        assert_eq!(snapshot.low_24h, Some(41_500.0));
    }

    #[test]
    fn unparsable_frame_is_malformed() {
        assert!(matches!(decode("not-json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(""), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn non_object_frames_are_malformed() {
        assert!(matches!(decode("[1,2,3]"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("42"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode(r#""text""#), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = decode(r#"{"status":"paused"}"#);
        assert!(matches!(result, Err(DecodeError::UnknownStatus(status)) if status == "paused"));
    }

    #[test]
    fn non_string_status_is_malformed() {
        assert!(matches!(
            decode(r#"{"status":42}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn missing_timestamp_defaults_to_now() {
        let before = Utc::now();
        let envelope = decode(r#"{"status":"success","data":{"price":1.0}}"#).unwrap();
        let after = Utc::now();

        let last_updated = envelope.snapshot().unwrap().last_updated;
        assert!(last_updated >= before && last_updated <= after);
    }

    #[test]
    fn numeric_timestamps_accept_seconds_and_millis() {
        let seconds = decode(r#"{"status":"success","data":{"last_updated":1714564800}}"#).unwrap();
        assert_eq!(
            seconds.snapshot().unwrap().last_updated.to_rfc3339(),
            "2024-05-01T12:00:00+00:00"
        );

        let millis =
            decode(r#"{"status":"success","data":{"last_updated":1714564800000}}"#).unwrap();
        assert_eq!(
            millis.snapshot().unwrap().last_updated.to_rfc3339(),
            "2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn invalid_timestamp_string_defaults_to_now() {
        let before = Utc::now();
        let envelope =
            decode(r#"{"status":"success","data":{"last_updated":"yesterday"}}"#).unwrap();

        assert!(envelope.snapshot().unwrap().last_updated >= before);
    }

    #[test]
    fn decode_is_idempotent() {
        let raw = r#"{"status":"success","data":{"price":10.0,"last_updated":"2024-05-01T12:00:00Z"}}"#;
        assert_eq!(decode(raw).unwrap(), decode(raw).unwrap());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            // Decoding must be total: any input yields Ok or Err, never a panic.
            #[test]
            fn decode_never_panics(raw in ".*") {
                let _ = decode(&raw);
            }

            #[test]
            fn decode_never_panics_on_json_like_input(raw in r#"\{("status":"[a-z]*",?)?("data":\{\})?\}"#) {
                let _ = decode(&raw);
            }
        }
    }
}
