//! `google.protobuf.Timestamp` ↔ `chrono::DateTime<Utc>`
//!
//! A protobuf timestamp is only meaningful when `nanos` is in `[0, 1e9)` and
//! the instant falls between `0001-01-01T00:00:00Z` and
//! `9999-12-31T23:59:59.999999999Z`. Both directions enforce that range, so a
//! value accepted here can always be sent back over the wire.
//!
//! ```ignore
//! use grpc_client::conversions::{datetime_to_timestamp, timestamp_to_datetime};
//!
//! let ts = datetime_to_timestamp(chrono::Utc::now())?;
//! let dt = timestamp_to_datetime(&ts)?;
//! ```

use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use thiserror::Error;

/// Seconds of `0001-01-01T00:00:00Z` relative to the Unix epoch
pub const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;

/// Seconds of `9999-12-31T23:59:59Z` relative to the Unix epoch
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
  #[error("nanos {0} is outside [0, 1000000000)")]
  NanosOutOfRange(i32),

  #[error("seconds {0} is outside years 0001..=9999")]
  SecondsOutOfRange(i64),
}

/// Check a wire timestamp without converting it.
pub fn validate_timestamp(ts: &Timestamp) -> Result<(), TimestampError> {
  if !(0..NANOS_PER_SECOND).contains(&ts.nanos) {
    return Err(TimestampError::NanosOutOfRange(ts.nanos));
  }
  if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&ts.seconds) {
    return Err(TimestampError::SecondsOutOfRange(ts.seconds));
  }
  Ok(())
}

/// Decode a wire timestamp, rejecting anything [`validate_timestamp`] rejects.
pub fn timestamp_to_datetime(ts: &Timestamp) -> Result<DateTime<Utc>, TimestampError> {
  validate_timestamp(ts)?;
  DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
    .ok_or(TimestampError::SecondsOutOfRange(ts.seconds))
}

/// Encode an instant, rejecting instants a protobuf timestamp cannot carry.
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> Result<Timestamp, TimestampError> {
  let ts = Timestamp {
    seconds: dt.timestamp(),
    nanos: dt.timestamp_subsec_nanos() as i32,
  };
  validate_timestamp(&ts)?;
  Ok(ts)
}
