//! Error taxonomy for the conversion pipeline.
//!
//! Every variant names the stage that failed and carries the offending value
//! (marker, occurrence, token index, endpoint timestamp, channel) so the
//! command-line front end can report a single explicit message.
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ChannelKind;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, PhysioError>;

#[derive(Error, Debug)]
pub enum PhysioError {
    /// The `occurrence`-th data-start marker was not found in the token stream.
    #[error("{channel}: data-start marker '{marker}' occurrence #{occurrence} not found (only {found} present)")]
    MarkerNotFound {
        channel: ChannelKind,
        marker: &'static str,
        occurrence: usize,
        found: usize,
    },

    /// The token stream ended inside an annotation run.
    #[error("{channel}: annotation run opened at token {opened_at} is never closed ({run_len} tokens buffered)")]
    MalformedAnnotationRun {
        channel: ChannelKind,
        opened_at: usize,
        run_len: usize,
    },

    /// The metadata record has no `AcquisitionTime` field.
    #[error("metadata: 'AcquisitionTime' field is missing")]
    MissingAcquisitionTime,

    /// `AcquisitionTime` is present but not of the form `HH:MM:SS[.ffffff]`.
    #[error("metadata: cannot parse AcquisitionTime '{0}'")]
    InvalidAcquisitionTime(String),

    /// A window endpoint does not exist on the channel's absolute time axis.
    #[error("{channel}: window endpoint {timestamp_ms} ms not on time axis [{axis_start_ms}, {axis_stop_ms}] ms")]
    TimestampOutOfRange {
        channel: ChannelKind,
        timestamp_ms: i64,
        axis_start_ms: i64,
        axis_stop_ms: i64,
    },

    /// A trace and its time axis (or two table columns) disagree in length.
    #[error("{channel}: trace has {trace_len} samples but time axis has {axis_len}")]
    ChannelLengthMismatch {
        channel: ChannelKind,
        trace_len: usize,
        axis_len: usize,
    },

    #[error("{channel}: header field '{field}' is missing")]
    MissingHeaderField {
        channel: ChannelKind,
        field: &'static str,
    },

    #[error("{channel}: header field '{field}' appears {count} times")]
    DuplicateHeaderField {
        channel: ChannelKind,
        field: &'static str,
        count: usize,
    },

    #[error("{channel}: log body is empty")]
    EmptyBody { channel: ChannelKind },

    #[error("{channel}: token {index} ('{token}') is not an integer sample")]
    InvalidSample {
        channel: ChannelKind,
        index: usize,
        token: String,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
