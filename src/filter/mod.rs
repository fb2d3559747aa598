//! Anti-aliasing FIR design and application.
//!
//! - [`design`]: Hamming-windowed sinc lowpass, matching `scipy.signal.firwin`.
//! - [`apply`]: overlap-add zero-phase convolution with reflect-limited edges.

pub mod apply;
pub mod design;

pub use apply::filter_zero_phase;
pub use design::{design_decimation_lowpass, firwin, gain_at, hamming};
