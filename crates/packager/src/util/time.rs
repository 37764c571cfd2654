use chrono::TimeDelta;

use crate::clock::Clock;

const XML_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Convert seconds to an ISO8601 duration as used by MPD attributes.
///
/// The shortest representation which round-trips the `f64` is used, so no
/// precision of the input is lost: `7.9` becomes `PT7.9S`, `0` becomes `PT0S`.
pub fn seconds_to_xml_duration(seconds: f64) -> String {
    format!("PT{seconds}S")
}

/// Current time of `clock` moved by `offset_seconds`, formatted as an XML
/// `dateTime` in UTC, e.g. `2024-05-01T12:00:00Z`.
///
/// Returns `None` when the resulting instant is not representable.
pub fn xml_date_time_now_with_offset(offset_seconds: i64, clock: &dyn Clock) -> Option<String> {
    let offset = TimeDelta::try_seconds(offset_seconds)?;
    let time = clock.now().checked_add_signed(offset)?;
    Some(time.format(XML_DATE_TIME_FORMAT).to_string())
}
