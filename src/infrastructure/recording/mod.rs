//! Recording infrastructure module
//!
//! Microphone capture through cpal, spooled to WAV while recording and
//! saved as FLAC.

mod cpal_recorder;
mod flac_encoder;
mod spool;

pub use cpal_recorder::{CpalAudioDevice, CpalCapture, PREFERRED_SAMPLE_RATE};
pub use flac_encoder::{encode_to_flac, EncodingError};
