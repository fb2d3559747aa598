//! Annotation-run removal.
//!
//! The logger interleaves free-form annotation runs with the samples:
//!
//! ```text
//! 2048 2050 5002 LOGVERSION 1 ... 6002 2047 2049 …
//!           └──── excluded ──────────┘
//! ```
//!
//! A two-state machine drops everything from [`ANNOTATION_START`] up to and
//! including the next [`ANNOTATION_END`]; the remaining tokens must all be
//! integers.
use tracing::debug;

use super::constants::{ANNOTATION_END, ANNOTATION_START};
use crate::config::ChannelKind;
use crate::error::{PhysioError, Result};

/// State of the annotation filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState<'a> {
    /// Tokens are samples.
    Including,
    /// Inside an annotation run opened at token `opened_at`.
    Excluding { opened_at: usize, run: Vec<&'a str> },
}

/// Remove annotation runs and parse the remaining tokens as integers.
///
/// Returns the samples and the number of runs removed. A stream that ends
/// inside a run is [`PhysioError::MalformedAnnotationRun`].
pub fn filter_annotations(tokens: &[&str], channel: ChannelKind) -> Result<(Vec<i64>, usize)> {
    let mut samples = Vec::with_capacity(tokens.len());
    let mut runs = 0;
    let mut state = FilterState::Including;

    for (i, &tok) in tokens.iter().enumerate() {
        state = match state {
            FilterState::Including if tok == ANNOTATION_START => FilterState::Excluding {
                opened_at: i,
                run: Vec::new(),
            },
            FilterState::Including => {
                let v = tok.parse::<i64>().map_err(|_| PhysioError::InvalidSample {
                    channel,
                    index: i,
                    token: tok.to_string(),
                })?;
                samples.push(v);
                FilterState::Including
            }
            FilterState::Excluding { opened_at, run } if tok == ANNOTATION_END => {
                runs += 1;
                debug!(%channel, opened_at, "excluded annotation: '{}'", run.join(" "));
                FilterState::Including
            }
            FilterState::Excluding { opened_at, mut run } => {
                run.push(tok);
                FilterState::Excluding { opened_at, run }
            }
        };
    }

    match state {
        FilterState::Including => Ok((samples, runs)),
        FilterState::Excluding { opened_at, run } => Err(PhysioError::MalformedAnnotationRun {
            channel,
            opened_at,
            run_len: run.len(),
        }),
    }
}
