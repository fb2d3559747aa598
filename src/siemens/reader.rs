//! Token stream reader and data-start marker locator.
//!
//! # Layout
//! ```text
//! line 1   : <params> 6002 [<params> 6002 …] s0 s1 … 5002 <annotation> 6002 … sN 5003
//! footer   : ECG  Freq Per: 0 0
//!            …
//!            LogStartMDHTime:  47029710
//!            LogStopMDHTime:   47654452
//!            …
//! ```
//! The first non-empty line is the token body; the `LogStart/StopMDHTime`
//! fields may appear anywhere in the text but exactly once each.
use regex::Regex;
use tracing::{debug, warn};

use super::constants::{DATA_START_MARKER, LOG_START_FIELD, LOG_STOP_FIELD, TRAILING_MARKER};
use crate::config::ChannelKind;
use crate::error::{PhysioError, Result};

/// One channel log split into body tokens and header times.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLog<'a> {
    pub channel: ChannelKind,
    /// Whitespace-delimited tokens of the body line.
    pub tokens: Vec<&'a str>,
    /// `LogStartMDHTime` in ms since midnight.
    pub start_ms: i64,
    /// `LogStopMDHTime` in ms since midnight.
    pub stop_ms: i64,
}

/// Split a log file's text into body tokens and header start/stop times.
pub fn read_log(text: &str, channel: ChannelKind) -> Result<RawLog<'_>> {
    let body = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(PhysioError::EmptyBody { channel })?;
    let tokens: Vec<&str> = body.split_whitespace().collect();

    let start_ms = header_field(text, LOG_START_FIELD, channel)?;
    let stop_ms = header_field(text, LOG_STOP_FIELD, channel)?;
    if stop_ms <= start_ms {
        return Err(PhysioError::InvalidParameter(format!(
            "{channel}: {LOG_STOP_FIELD} ({stop_ms}) is not after {LOG_START_FIELD} ({start_ms})"
        )));
    }

    Ok(RawLog { channel, tokens, start_ms, stop_ms })
}

/// Extract the integer value of `<field>:` which must occur exactly once.
fn header_field(text: &str, field: &'static str, channel: ChannelKind) -> Result<i64> {
    let re = Regex::new(&format!(r"{field}:\s+(\d+)")).expect("header field pattern is valid");
    let values: Vec<&str> = re
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    match values.as_slice() {
        [] => Err(PhysioError::MissingHeaderField { channel, field }),
        [v] => v.parse().map_err(|_| PhysioError::InvalidParameter(format!(
            "{channel}: header field {field} value '{v}' out of range"
        ))),
        _ => Err(PhysioError::DuplicateHeaderField { channel, field, count: values.len() }),
    }
}

/// Index just past the `occurrence`-th (1-based) exact match of `sentinel`.
///
/// Returns `Err(found)` with the number of matches when there are fewer.
pub fn nth_marker(tokens: &[&str], sentinel: &str, occurrence: usize) -> std::result::Result<usize, usize> {
    let mut found = 0;
    for (i, &tok) in tokens.iter().enumerate() {
        if tok == sentinel {
            found += 1;
            if found == occurrence {
                return Ok(i + 1);
            }
        }
    }
    Err(found)
}

/// Slice out the sample body: everything after the channel's data-start
/// marker, minus the trailing marker token.
pub fn locate_marker<'t, 'a>(tokens: &'t [&'a str], channel: ChannelKind) -> Result<&'t [&'a str]> {
    let occurrence = channel.data_start_occurrence();
    let start = nth_marker(tokens, DATA_START_MARKER, occurrence).map_err(|found| {
        PhysioError::MarkerNotFound {
            channel,
            marker: DATA_START_MARKER,
            occurrence,
            found,
        }
    })?;
    debug!(%channel, occurrence, start, "data-start marker located");

    let body = &tokens[start..];
    let Some((&last, body)) = body.split_last() else {
        return Err(PhysioError::EmptyBody { channel });
    };
    if last != TRAILING_MARKER {
        warn!(%channel, token = last, "final token is not the trailing marker; dropped anyway");
    }
    if body.is_empty() {
        return Err(PhysioError::EmptyBody { channel });
    }
    Ok(body)
}
