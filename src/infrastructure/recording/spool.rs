//! On-disk PCM spool for a capture in progress
//!
//! Captured samples go to a WAV file next to the recording as they arrive,
//! so memory use stays flat for long sessions. The header is rewritten on
//! every flush; after a crash the spool is a playable WAV up to the last
//! flush.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::application::ports::RecordingError;
use crate::domain::recording::RecordingFile;

/// Extension of the spool that sits next to a recording while it is captured
pub const SPOOL_EXTENSION: &str = "wav";

/// Spool location for a recording
pub fn spool_path(file: &RecordingFile) -> PathBuf {
    file.path().with_extension(SPOOL_EXTENSION)
}

/// Mono 16-bit WAV writer for captured samples
pub struct SpoolWriter {
    writer: WavWriter<BufWriter<File>>,
}

impl SpoolWriter {
    pub fn create(path: &Path, sample_rate: u32) -> Result<Self, RecordingError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let writer = WavWriter::create(path, spec).map_err(spool_error)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, samples: &[i16]) -> Result<(), RecordingError> {
        for &sample in samples {
            self.writer.write_sample(sample).map_err(spool_error)?;
        }
        Ok(())
    }

    /// Push buffered samples to disk and update the header
    pub fn flush(&mut self) -> Result<(), RecordingError> {
        self.writer.flush().map_err(spool_error)
    }

    pub fn finish(self) -> Result<(), RecordingError> {
        self.writer.finalize().map_err(spool_error)
    }
}

/// Read a spool back as samples and sample rate
pub fn read_spool(path: &Path) -> Result<(Vec<i16>, u32), RecordingError> {
    let mut reader = WavReader::open(path).map_err(spool_error)?;
    let sample_rate = reader.spec().sample_rate;
    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(spool_error)?;
    Ok((samples, sample_rate))
}

fn spool_error(e: hound::Error) -> RecordingError {
    match e {
        hound::Error::IoError(e) => RecordingError::OutputFile(e),
        other => RecordingError::WriteFailed(format!("spool: {}", other)),
    }
}
