//! Microphone capture using cpal
//!
//! The cpal stream is not `Send`, so it lives on a dedicated thread for the
//! whole life of a capture handle. The callback mixes samples down to mono
//! i16 into a small staging buffer, which the same thread drains into the
//! WAV spool every poll. `finalize` encodes the spool to FLAC, writes it
//! over the file created at open and removes the spool.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::oneshot;

use super::flac_encoder::encode_to_flac;
use super::spool::{read_spool, spool_path, SpoolWriter};
use crate::application::ports::{AudioDevice, CaptureHandle, RecordingError};
use crate::domain::recording::RecordingFile;

/// Sample rate requested from the device when it supports it
pub const PREFERRED_SAMPLE_RATE: u32 = 44_100;

/// How often the capture thread checks whether it should exit
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(50);

/// Polls between spool header updates (about one second)
const FLUSH_EVERY_POLLS: u32 = 20;

type SampleBuffer = Arc<StdMutex<Vec<i16>>>;

/// The default input device of the default cpal host
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalAudioDevice;

impl CpalAudioDevice {
    pub fn new() -> Self {
        Self
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        // Prefer mono, but accept stereo (mixed down in the callback)
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => config.channels() < current.channels(),
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= PREFERRED_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= PREFERRED_SAMPLE_RATE
        {
            SampleRate(PREFERRED_SAMPLE_RATE)
        } else {
            config_range.max_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix interleaved channels down to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / chunk.len() as i32) as i16
            })
            .collect()
    }

    fn append(buffer: &SampleBuffer, paused: &AtomicBool, data: &[i16], channels: u16) {
        if paused.load(Ordering::SeqCst) {
            return;
        }
        let mono = Self::stereo_to_mono(data, channels);
        if let Ok(mut buffer) = buffer.lock() {
            buffer.extend_from_slice(&mono);
        }
    }

    /// Move everything staged so far into the spool
    fn drain(buffer: &SampleBuffer, spool: &mut SpoolWriter) -> Result<(), RecordingError> {
        let samples = {
            let mut buffer = buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };
        spool.write(&samples)
    }

    /// Body of the capture thread
    fn capture(
        buffer: SampleBuffer,
        paused: Arc<AtomicBool>,
        running: Arc<AtomicBool>,
        spool_path: PathBuf,
        ready: oneshot::Sender<Result<(), RecordingError>>,
    ) -> Result<(), RecordingError> {
        let started = Self::build_stream(Arc::clone(&buffer), paused).and_then(|(stream, rate)| {
            Ok((stream, SpoolWriter::create(&spool_path, rate)?))
        });
        let (stream, mut spool) = match started {
            Ok(started) => {
                let _ = ready.send(Ok(()));
                started
            }
            Err(e) => {
                let _ = ready.send(Err(e));
                return Ok(());
            }
        };

        let mut polls: u32 = 0;
        while running.load(Ordering::SeqCst) {
            std::thread::sleep(POLL_INTERVAL);
            Self::drain(&buffer, &mut spool)?;
            polls = polls.wrapping_add(1);
            if polls % FLUSH_EVERY_POLLS == 0 {
                spool.flush()?;
            }
        }

        drop(stream);
        Self::drain(&buffer, &mut spool)?;
        spool.finish()
    }

    fn build_stream(
        buffer: SampleBuffer,
        paused: Arc<AtomicBool>,
    ) -> Result<(cpal::Stream, u32), RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device)?;
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    Self::append(&buffer, &paused, data, channels);
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let i16_data: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                    Self::append(&buffer, &paused, &i16_data, channels);
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            ),
            _ => {
                return Err(RecordingError::StartFailed(
                    "Unsupported sample format".into(),
                ))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        Ok((stream, sample_rate))
    }
}

#[async_trait]
impl AudioDevice for CpalAudioDevice {
    async fn open(&self, file: RecordingFile) -> Result<Box<dyn CaptureHandle>, RecordingError> {
        if let Some(parent) = file.path().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::File::create(file.path())?;

        let buffer: SampleBuffer = Arc::new(StdMutex::new(Vec::new()));
        let paused = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicBool::new(true));
        let spool = spool_path(&file);
        let (ready_tx, ready_rx) = oneshot::channel();

        let thread = {
            let paused = Arc::clone(&paused);
            let running = Arc::clone(&running);
            let spool = spool.clone();
            std::thread::spawn(move || Self::capture(buffer, paused, running, spool, ready_tx))
        };

        let started = ready_rx
            .await
            .unwrap_or_else(|_| Err(RecordingError::StartFailed("capture thread exited".into())));

        match started {
            Ok(()) => Ok(Box::new(CpalCapture {
                file,
                paused,
                running,
                thread: Some(thread),
            })),
            Err(e) => {
                let _ = std::fs::remove_file(file.path());
                let _ = std::fs::remove_file(&spool);
                Err(e)
            }
        }
    }
}

/// A live cpal capture bound to one output file
pub struct CpalCapture {
    file: RecordingFile,
    paused: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<Result<(), RecordingError>>>,
}

impl CpalCapture {
    /// Signal the capture thread to drop the stream, then wait for it to
    /// close the spool
    async fn release(&mut self) -> Result<(), RecordingError> {
        self.running.store(false, Ordering::SeqCst);
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        tokio::task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| RecordingError::WriteFailed(format!("Capture join error: {}", e)))?
            .map_err(|_| RecordingError::WriteFailed("capture thread panicked".into()))?
    }
}

#[async_trait]
impl CaptureHandle for CpalCapture {
    fn file(&self) -> &RecordingFile {
        &self.file
    }

    fn pause(&mut self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&mut self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    async fn finalize(&mut self) -> Result<RecordingFile, RecordingError> {
        if self.thread.is_none() {
            return Err(RecordingError::WriteFailed("capture already finalized".into()));
        }
        self.release().await?;

        let spool = spool_path(&self.file);
        let encoded = {
            let spool = spool.clone();
            tokio::task::spawn_blocking(move || {
                let (samples, sample_rate) = read_spool(&spool)?;
                encode_to_flac(&samples, sample_rate)
                    .map_err(|e| RecordingError::EncodeFailed(e.to_string()))
            })
            .await
            .map_err(|e| RecordingError::EncodeFailed(format!("Encode task error: {}", e)))??
        };

        tokio::fs::write(self.file.path(), encoded)
            .await
            .map_err(|e| RecordingError::WriteFailed(e.to_string()))?;
        // The FLAC is complete; a leftover spool would only duplicate it
        let _ = tokio::fs::remove_file(&spool).await;

        Ok(self.file.clone())
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
