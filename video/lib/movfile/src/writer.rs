use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{self, Seek, SeekFrom, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
};

use h264::AVCDecoderConfigurationRecord;
use mp4::boxes::types::{
    avc1::Avc1,
    avcc::AvcC,
    pasp::Pasp,
    stsd::{SampleEntry, VisualSampleEntry},
};

use crate::{
    config::{MoovPlacement, MovFileConfig},
    error::{MovFileError, Result},
    layout,
    logging::{LogLevel, Logger, NoopLogger},
    movie::{MovieContainer, MovieParams},
    sample::Sample,
    track::Track,
};

const TAG: &str = "movfile";

/// Seconds between 1904-01-01 and 1970-01-01.
const QUICKTIME_EPOCH_OFFSET: u64 = 2_082_844_800;

macro_rules! log {
    ($self:ident, $level:ident, $($arg:tt)+) => {
        $self.logger.log(LogLevel::$level, TAG, format_args!($($arg)+))
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing written yet.
    Open,
    Accepting,
    Finalizing,
    Closed,
    Cancelled,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepting => "accepting samples",
            Self::Finalizing => "finalizing",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests cancellation of a [`MovFile`] from any thread.
///
/// The writer notices at its next append or finalize.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A finalize running on a worker thread.
#[derive(Debug)]
pub struct FinishHandle {
    inner: thread::JoinHandle<()>,
}

impl FinishHandle {
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Waits for the worker. The outcome itself goes to the completion callback.
    pub fn join(self) -> Result<()> {
        self.inner
            .join()
            .map_err(|_| MovFileError::Io(io::Error::other("finish worker panicked")))
    }
}

/// Writes a single video track movie from encoded frames.
///
/// Samples go straight to the media data region of the output file as they
/// arrive. The movie box is built and written once, in [`finalize`](Self::finalize).
/// Calls must not overlap; the writer does no locking of its own.
pub struct MovFile {
    config: MovFileConfig,
    logger: Arc<dyn Logger>,
    state: State,
    file: Option<File>,
    track: Track,
    last_pts: Option<u64>,
    cancel: CancelHandle,
}

impl fmt::Debug for MovFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovFile")
            .field("output_path", &self.config.output_path)
            .field("state", &self.state)
            .field("samples", &self.track.samples().len())
            .finish()
    }
}

impl MovFile {
    pub fn new(config: MovFileConfig) -> Result<Self> {
        Self::with_logger(config, Arc::new(NoopLogger))
    }

    pub fn with_logger(config: MovFileConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        config.validate()?;

        let track = Track::new(
            config.width as u16,
            config.height as u16,
            config.timescale,
            config.sample_duration(),
            config.finish.samples_per_chunk,
        );

        let mut this = Self {
            config,
            logger,
            state: State::Open,
            file: None,
            track,
            last_pts: None,
            cancel: CancelHandle::default(),
        };

        if !this.config.lazy_writer {
            this.start()?;
        }

        Ok(this)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &MovFileConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn start(&mut self) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.config.output_path)?;

        layout::write_head(&mut file)?;

        log!(
            self,
            Debug,
            "created {} ({}x{} @ {} fps)",
            self.config.output_path.display(),
            self.config.width,
            self.config.height,
            self.config.frame_rate
        );

        self.file = Some(file);
        self.state = State::Accepting;
        Ok(())
    }

    fn check_cancelled(&mut self) -> Result<()> {
        match self.state {
            State::Cancelled => Err(MovFileError::Cancelled),
            State::Closed => Ok(()),
            _ if self.cancel.is_cancelled() => {
                self.cancel();
                Err(MovFileError::Cancelled)
            }
            _ => Ok(()),
        }
    }

    /// Appends one encoded frame.
    ///
    /// Nothing is recorded when this fails, and a failed write can be retried
    /// with the same sample. Parameter sets that cannot be parsed close the
    /// writer and remove the file.
    pub fn append_sample(&mut self, sample: Sample) -> Result<()> {
        self.check_cancelled()?;

        match self.state {
            State::Open => self.start()?,
            State::Accepting => {}
            state => {
                return Err(MovFileError::InvalidState {
                    operation: "append a sample",
                    state: state.as_str(),
                })
            }
        }

        if sample.data.is_empty() {
            return Err(MovFileError::EmptySample);
        }

        let length = u32::try_from(sample.data.len()).map_err(|_| {
            MovFileError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "sample is larger than 4 GiB",
            ))
        })?;

        if let Some(previous) = self.last_pts {
            if sample.presentation_time <= previous {
                return Err(MovFileError::OutOfOrder {
                    pts: sample.presentation_time,
                    previous,
                });
            }
        }

        let has_config = self.track.parameter_sets().is_some();
        let config = match &sample.parameter_sets {
            Some(sets) if sample.keyframe && !has_config => {
                match AVCDecoderConfigurationRecord::from_parameter_sets(
                    sets.sps.clone(),
                    sets.pps.clone(),
                ) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        log!(self, Error, "unusable parameter sets: {}", err);
                        self.discard();
                        self.state = State::Closed;
                        return Err(MovFileError::MalformedParameterSet(err.to_string()));
                    }
                }
            }
            _ => None,
        };

        let offset = self.track.next_offset();
        let file = self.file.as_mut().ok_or(MovFileError::InvalidState {
            operation: "append a sample",
            state: "missing its file",
        })?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&sample.data)?;

        if let Some(config) = config {
            log!(
                self,
                Info,
                "captured parameter sets (profile {}, level {})",
                config.profile_indication,
                config.level_indication
            );
            self.track.set_parameter_sets(config);
        } else if sample.keyframe && self.track.parameter_sets().is_none() {
            log!(self, Warn, "keyframe without parameter sets");
        }

        let record = self.track.record_sample(length, sample.keyframe);
        self.last_pts = Some(sample.presentation_time);

        log!(
            self,
            Debug,
            "sample {} at {} ({} bytes{})",
            self.track.samples().len(),
            record.offset,
            record.length,
            if record.keyframe { ", keyframe" } else { "" }
        );

        Ok(())
    }

    /// Writes the movie box and closes the file.
    ///
    /// Runs at most once. On failure the output file is removed and the
    /// writer is closed; it cannot be resumed.
    pub fn finalize(&mut self) -> Result<()> {
        self.check_cancelled()?;

        match self.state {
            State::Accepting => {}
            State::Open => {
                self.state = State::Closed;
                return Err(MovFileError::EmptySequence);
            }
            state => {
                return Err(MovFileError::InvalidState {
                    operation: "finalize",
                    state: state.as_str(),
                })
            }
        }

        self.state = State::Finalizing;

        match self.write_movie() {
            Ok(()) => {
                self.state = State::Closed;
                log!(
                    self,
                    Info,
                    "finished {} ({} samples, {} bytes of media)",
                    self.config.output_path.display(),
                    self.track.samples().len(),
                    self.track.data_len()
                );
                Ok(())
            }
            Err(err) => {
                log!(self, Error, "finalize failed: {}", err);
                self.discard();
                self.state = State::Closed;
                Err(err)
            }
        }
    }

    fn write_movie(&mut self) -> Result<()> {
        if self.track.samples().is_empty() {
            return Err(MovFileError::EmptySequence);
        }

        let repeats = self
            .track
            .repeat_last_keyframe(self.config.finish.copy_last_frame_count);
        if repeats > 0 {
            log!(self, Debug, "repeated the last keyframe {} times", repeats);
        }

        let tables = self.track.sample_tables(self.sample_entry()?)?;

        let creation_time = self.config.creation_time.unwrap_or_else(now_since_1904);
        let mut movie = MovieContainer::new(MovieParams {
            creation_time,
            modification_time: creation_time,
            timescale: self.config.timescale,
            frame_rate: self.config.frame_rate,
            duration: self.track.duration(),
            width: self.track.width,
            height: self.track.height,
        });
        movie.install_tables(tables)?;

        let data_len = self.track.data_len();
        let large = self.config.finish.prefer_64bit_mdat;
        let mut file = self.file.take().ok_or(MovFileError::InvalidState {
            operation: "finalize",
            state: "missing its file",
        })?;

        match self.config.finish.moov_placement {
            MoovPlacement::End => layout::finish_at_end(&mut file, &movie, data_len, large),
            MoovPlacement::Front => layout::finish_at_front(
                &mut file,
                &self.config.output_path,
                &mut movie,
                data_len,
                large,
            ),
        }
    }

    fn sample_entry(&self) -> Result<Avc1> {
        let config = self
            .track
            .parameter_sets()
            .cloned()
            .ok_or(MovFileError::NoKeyframe)?;

        let visual = VisualSampleEntry::new(self.track.width, self.track.height)
            .with_compressor_name(&self.config.compressor_name)
            .map_err(|err| MovFileError::Configuration(err.to_string()))?;

        let (h_spacing, v_spacing) = self.config.pixel_aspect_ratio;

        Ok(Avc1::new(
            SampleEntry::new(visual),
            AvcC::new(config),
            Some(Pasp::new(h_spacing, v_spacing)),
        ))
    }

    /// Moves the writer to a worker thread, finalizes there and hands the
    /// outcome to `completion`.
    pub fn finish_writing<F>(self, completion: F) -> Result<FinishHandle>
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<(Self, F)>(1);

        let spawned = thread::Builder::new()
            .name("movfile-finish".into())
            .spawn(move || {
                if let Ok((mut this, completion)) = rx.recv() {
                    completion(this.finalize());
                }
            });

        let inner = match spawned {
            Ok(inner) => inner,
            Err(err) => {
                self.abandon(completion, &err);
                return Err(err.into());
            }
        };

        if let Err(mpsc::SendError((this, completion))) = tx.send((self, completion)) {
            let err = io::Error::other("finish worker exited early");
            this.abandon(completion, &err);
            return Err(err.into());
        }

        Ok(FinishHandle { inner })
    }

    /// Gives up on a finish that never reached the worker.
    pub(crate) fn abandon<F>(mut self, completion: F, err: &io::Error)
    where
        F: FnOnce(Result<()>),
    {
        log!(self, Error, "could not start finishing: {}", err);
        self.discard();
        self.state = State::Closed;
        completion(Err(MovFileError::Io(io::Error::new(
            err.kind(),
            err.to_string(),
        ))));
    }

    /// Abandons the file and removes whatever was written. Does nothing once
    /// the writer is closed or already cancelled.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }

        self.cancel.cancel();
        self.discard();
        self.state = State::Cancelled;

        log!(self, Info, "cancelled {}", self.config.output_path.display());
    }

    fn discard(&mut self) {
        let had_file = self.file.take().is_some();

        if had_file || self.state == State::Finalizing {
            match fs::remove_file(&self.config.output_path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => log!(
                    self,
                    Warn,
                    "could not remove {}: {}",
                    self.config.output_path.display(),
                    err
                ),
            }
        }
    }
}

fn now_since_1904() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0) + QUICKTIME_EPOCH_OFFSET
}
