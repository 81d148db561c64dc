//! Single video track QuickTime/MP4 movie writer.
//!
//! Encoded H.264 frames are appended one at a time and written straight to
//! the media data region. Finishing builds the movie box from the recorded
//! sample tables and places it after the media data, or ahead of it for
//! progressive playback.

mod config;
mod error;
mod layout;
mod logging;
mod movie;
mod sample;
mod track;
mod writer;

pub use config::{EncodeQuality, FinishConfig, MoovPlacement, MovFileConfig};
pub use error::{MovFileError, Result};
pub use layout::DATA_OFFSET;
pub use logging::{LogLevel, Logger, NoopLogger, TracingLogger};
pub use movie::{MovieContainer, MovieParams};
pub use sample::{ParameterSets, Sample};
pub use track::{ChunkRun, SampleRecord, SampleTables, Track};
pub use writer::{CancelHandle, FinishHandle, MovFile, State};

#[cfg(test)]
mod tests;
