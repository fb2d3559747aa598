//! Reserved tokens of the Siemens physiological log encoding.
//!
//! Sample values are 12-bit (0–4095); everything at or above 5000 is a
//! structural marker written by the logger firmware.

/// Marks the end of a parameter block; the channel samples begin after a
/// fixed occurrence of it (see [`ChannelKind::data_start_occurrence`]).
///
/// [`ChannelKind::data_start_occurrence`]: crate::ChannelKind::data_start_occurrence
pub const DATA_START_MARKER: &str = "6002";

/// Opens an embedded annotation run (trigger info, scanner messages).
pub const ANNOTATION_START: &str = "5002";

/// Closes an annotation run; normal sampling resumes after it.
pub const ANNOTATION_END: &str = "6002";

/// Written in place of a sample when the peak detector fires.
pub const SATURATION_VALUE: i64 = 5000;

/// Final token of the sample line.
pub const TRAILING_MARKER: &str = "5003";

/// Header field holding the logger start time (ms since midnight).
pub const LOG_START_FIELD: &str = "LogStartMDHTime";

/// Header field holding the logger stop time (ms since midnight).
pub const LOG_STOP_FIELD: &str = "LogStopMDHTime";
