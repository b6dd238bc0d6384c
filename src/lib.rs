//! NotiMic - background microphone recorder with a live notification
//!
//! A foreground service records from the default microphone and keeps a
//! desktop notification up to date with the recorder state and elapsed
//! time. The notification's buttons, the `notimic` control subcommands and
//! SIGINT/SIGTERM all drive the same state machine. Finished recordings are
//! saved as FLAC and announced with a notification that offers to share them.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session state machine, elapsed time, recording files, notification rendering
//! - **Application**: Recording service, ticker, permission bridge, share use case, port traits
//! - **Infrastructure**: Adapter implementations (cpal, flacenc, notify-rust, config file)
//! - **CLI**: Command-line interface, IPC, PID file and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
