// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Capture date & time values as read from, and written to, metadata.

use core::fmt;
use std::{
  fmt::{Display, Formatter},
  str::FromStr,
  sync::LazyLock,
};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;

/// RFC 3339, but with the time zone offset optional.
static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?)(Z|[+-]\d{2}:\d{2})?$").unwrap()
});

/// Format used for both reading (via `ExifTool -d`) and writing sidecars. `%.f`
/// prints nothing when there are no fractional seconds.
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// A capture date & time. Values without a time zone offset are kept as-is
/// rather than being pinned to the local time zone, so they are written back
/// exactly as found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTime {
  Offset(DateTime<FixedOffset>),
  Local(NaiveDateTime),
}

impl FromStr for CaptureTime {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let caps = ISO_8601
      .captures(s)
      .ok_or(format!("`{s}` is not an ISO 8601 date & time"))?;

    if caps.get(2).is_some() {
      return DateTime::parse_from_rfc3339(s)
        .map(CaptureTime::Offset)
        .map_err(|e| format!("Unable to parse date & time `{s}` ({e})"));
    }

    NaiveDateTime::parse_from_str(&caps[1], LOCAL_FORMAT)
      .map(CaptureTime::Local)
      .map_err(|e| format!("Unable to parse date & time `{s}` ({e})"))
  }
}

impl Display for CaptureTime {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CaptureTime::Offset(dt) => write!(f, "{}", dt.format(OFFSET_FORMAT)),
      CaptureTime::Local(dt) => write!(f, "{}", dt.format(LOCAL_FORMAT)),
    }
  }
}
