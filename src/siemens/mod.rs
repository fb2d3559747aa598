//! Siemens physiological log reader.
//!
//! Turns the text of a `*_PULS.log` / `*_RESP.log` (or `.puls` / `.resp`)
//! file into a clean integer sample trace:
//!
//! ```text
//! text ─ read_log ─▶ RawLog { tokens, start/stop MDH time }
//!        locate_marker      skip to the k-th data-start marker, drop trailer
//!        filter_annotations drop 5002 … 6002 annotation runs
//!        repair_spikes      replace interior 5000 samples
//!                         ─▶ CleanTrace
//! ```
//!
//! # Quick start
//! ```
//! use physlog::{siemens::clean_channel, ChannelKind};
//!
//! let text = "1 2 6002 10 5002 note 6002 11 5000 13 5003\n\
//!             LogStartMDHTime:  1000\nLogStopMDHTime:  1020\n";
//! let trace = clean_channel(text, ChannelKind::Pulse).unwrap();
//! assert_eq!(trace.samples, vec![10, 11, 12, 13]);
//! ```
pub mod annotation;
pub mod constants;
pub mod reader;
pub mod spike;

pub use annotation::{filter_annotations, FilterState};
pub use reader::{locate_marker, read_log, RawLog};
pub use spike::repair_spikes;

use tracing::debug;

use crate::config::ChannelKind;
use crate::error::Result;

/// Integer samples of one channel after annotation removal and spike repair.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTrace {
    pub channel: ChannelKind,
    /// `LogStartMDHTime` as written in the header (ms since midnight).
    pub start_ms: i64,
    /// `LogStopMDHTime` as written in the header (ms since midnight).
    pub stop_ms: i64,
    /// Device-rate samples.
    pub samples: Vec<i64>,
    /// Number of annotation runs removed from the stream.
    pub annotation_runs: usize,
}

/// Run reader, marker locator, annotation filter and spike repair on one log.
pub fn clean_channel(text: &str, channel: ChannelKind) -> Result<CleanTrace> {
    let raw = read_log(text, channel)?;
    let body = locate_marker(&raw.tokens, channel)?;
    let (samples, annotation_runs) = filter_annotations(body, channel)?;
    let samples = repair_spikes(&samples);
    debug!(
        %channel,
        tokens = raw.tokens.len(),
        samples = samples.len(),
        annotation_runs,
        "channel cleaned"
    );
    Ok(CleanTrace {
        channel,
        start_ms: raw.start_ms,
        stop_ms: raw.stop_ms,
        samples,
        annotation_runs,
    })
}
