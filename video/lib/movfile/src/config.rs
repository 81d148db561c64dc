use std::path::PathBuf;

use mp4::boxes::types::stsd::MAX_COMPRESSOR_NAME_LEN;

use crate::error::{MovFileError, Result};

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct MovFileConfig {
    /// Frames per second
    pub frame_rate: u32,

    /// Time units per second for every duration in the file
    pub timescale: u32,

    pub width: u32,
    pub height: u32,

    /// Where the finished movie ends up
    pub output_path: PathBuf,

    /// Frames between keyframes, advisory only
    pub max_keyframe_interval: u32,

    /// Passed through to whoever encodes the frames
    pub quality: EncodeQuality,

    /// Delay creating the file until the first sample arrives
    pub lazy_writer: bool,

    /// Stored in the visual sample entry, at most 31 bytes
    pub compressor_name: String,

    /// Horizontal and vertical pixel spacing
    pub pixel_aspect_ratio: (u32, u32),

    /// Seconds since 1904-01-01, defaults to the time of finishing
    pub creation_time: Option<u64>,

    pub finish: FinishConfig,
}

impl Default for MovFileConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            timescale: 600,
            width: 0,
            height: 0,
            output_path: PathBuf::new(),
            max_keyframe_interval: 5,
            quality: EncodeQuality::default(),
            lazy_writer: false,
            compressor_name: String::new(),
            pixel_aspect_ratio: (1, 1),
            creation_time: None,
            finish: FinishConfig::default(),
        }
    }
}

impl MovFileConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(MovFileError::Configuration(msg));

        if self.width == 0 || self.width > u16::MAX as u32 {
            return invalid(format!("width {} is out of range", self.width));
        }

        if self.height == 0 || self.height > u16::MAX as u32 {
            return invalid(format!("height {} is out of range", self.height));
        }

        if self.frame_rate == 0 {
            return invalid("frame rate must not be 0".into());
        }

        if self.timescale == 0 {
            return invalid("timescale must not be 0".into());
        }

        if self.sample_duration() == 0 {
            return invalid(format!(
                "timescale {} is too small for {} fps",
                self.timescale, self.frame_rate
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return invalid("output path is empty".into());
        }

        if self.compressor_name.len() > MAX_COMPRESSOR_NAME_LEN {
            return invalid(format!(
                "compressor name is longer than {MAX_COMPRESSOR_NAME_LEN} bytes"
            ));
        }

        if self.pixel_aspect_ratio.0 == 0 || self.pixel_aspect_ratio.1 == 0 {
            return invalid("pixel aspect ratio must not contain 0".into());
        }

        Ok(())
    }

    /// Duration of one frame in timescale units.
    pub fn sample_duration(&self) -> u32 {
        self.timescale.checked_div(self.frame_rate).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct FinishConfig {
    /// Upper bound of samples per chunk, 0 and 1 both mean one per chunk
    pub samples_per_chunk: u32,

    /// Repeats of the last keyframe appended when finishing
    pub copy_last_frame_count: u32,

    pub moov_placement: MoovPlacement,

    /// Always use the 16 byte mdat header
    pub prefer_64bit_mdat: bool,
}

impl Default for FinishConfig {
    fn default() -> Self {
        Self {
            samples_per_chunk: 1,
            copy_last_frame_count: 0,
            moov_placement: MoovPlacement::default(),
            prefer_64bit_mdat: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoovPlacement {
    /// After the media data
    #[default]
    End,
    /// Ahead of the media data, so playback can start before the file is fully read
    Front,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeQuality {
    Base,
    #[default]
    Main,
    High,
}
