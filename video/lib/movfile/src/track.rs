use h264::AVCDecoderConfigurationRecord;
use mp4::boxes::types::{
    avc1::Avc1,
    stbl::ChunkOffsetBox,
    stsc::Stsc,
    stsd::Stsd,
    stss::Stss,
    stsz::Stsz,
    stts::Stts,
};

use crate::{
    error::{MovFileError, Result},
    layout::DATA_OFFSET,
};

/// Where one sample's bytes live in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRecord {
    /// Absolute offset assuming the media data starts at [`DATA_OFFSET`].
    pub offset: u64,
    pub length: u32,
    /// In timescale units.
    pub duration: u32,
    pub keyframe: bool,
}

impl SampleRecord {
    fn end(&self) -> u64 {
        self.offset + self.length as u64
    }
}

/// A run of consecutive samples stored as one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRun {
    /// 0-based index of the first sample in the chunk.
    pub first_sample: u32,
    pub sample_count: u32,
    pub offset: u64,
}

/// The six per-sample tables of a finished track.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTables {
    pub stsd: Stsd,
    pub stts: Stts,
    pub stss: Option<Stss>,
    pub stsc: Stsc,
    pub stsz: Stsz,
    pub chunk_offsets: ChunkOffsetBox,
}

/// Bookkeeping for the single video track.
///
/// Records are only ever appended. Chunks and keyframe indices are kept in
/// step with every append, so the tables can be built at any time.
#[derive(Debug, Clone)]
pub struct Track {
    pub width: u16,
    pub height: u16,
    pub timescale: u32,
    pub sample_duration: u32,
    samples_per_chunk: u32,
    samples: Vec<SampleRecord>,
    chunks: Vec<ChunkRun>,
    keyframes: Vec<u32>,
    parameter_sets: Option<AVCDecoderConfigurationRecord>,
    data_len: u64,
}

impl Track {
    pub fn new(
        width: u16,
        height: u16,
        timescale: u32,
        sample_duration: u32,
        samples_per_chunk: u32,
    ) -> Self {
        Self {
            width,
            height,
            timescale,
            sample_duration,
            samples_per_chunk: samples_per_chunk.max(1),
            samples: Vec::new(),
            chunks: Vec::new(),
            keyframes: Vec::new(),
            parameter_sets: None,
            data_len: 0,
        }
    }

    /// Records `length` new bytes appended to the media data.
    pub fn record_sample(&mut self, length: u32, keyframe: bool) -> SampleRecord {
        let record = SampleRecord {
            offset: self.next_offset(),
            length,
            duration: self.sample_duration,
            keyframe,
        };

        self.push(record);
        self.data_len += length as u64;

        record
    }

    /// Appends `count` samples that reuse the bytes of the last keyframe.
    /// Returns how many were added, 0 if there is no keyframe.
    pub fn repeat_last_keyframe(&mut self, count: u32) -> u32 {
        let Some(last) = self.last_keyframe() else {
            return 0;
        };

        for _ in 0..count {
            self.push(last);
        }

        count
    }

    fn push(&mut self, record: SampleRecord) {
        let index = self.samples.len() as u32;
        let contiguous = self
            .samples
            .last()
            .is_some_and(|last| last.end() == record.offset);

        match self.chunks.last_mut() {
            Some(chunk) if contiguous && chunk.sample_count < self.samples_per_chunk => {
                chunk.sample_count += 1;
            }
            _ => self.chunks.push(ChunkRun {
                first_sample: index,
                sample_count: 1,
                offset: record.offset,
            }),
        }

        if record.keyframe {
            self.keyframes.push(index + 1);
        }

        self.samples.push(record);
    }

    /// Keeps the first configuration only. Returns whether it was taken.
    pub fn set_parameter_sets(&mut self, config: AVCDecoderConfigurationRecord) -> bool {
        if self.parameter_sets.is_some() {
            return false;
        }

        self.parameter_sets = Some(config);
        true
    }

    pub fn parameter_sets(&self) -> Option<&AVCDecoderConfigurationRecord> {
        self.parameter_sets.as_ref()
    }

    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    pub fn chunks(&self) -> &[ChunkRun] {
        &self.chunks
    }

    /// 1-based sample numbers of the keyframes.
    pub fn keyframes(&self) -> &[u32] {
        &self.keyframes
    }

    pub fn last_keyframe(&self) -> Option<SampleRecord> {
        self.samples.iter().rev().find(|s| s.keyframe).copied()
    }

    /// Bytes of media data, repeats not included.
    pub fn data_len(&self) -> u64 {
        self.data_len
    }

    pub fn next_offset(&self) -> u64 {
        DATA_OFFSET + self.data_len
    }

    pub fn duration(&self) -> u64 {
        self.samples.iter().map(|s| s.duration as u64).sum()
    }

    /// Freezes the bookkeeping into box tables around `sample_entry`.
    pub fn sample_tables(&self, sample_entry: Avc1) -> Result<SampleTables> {
        if self.samples.is_empty() {
            return Err(MovFileError::EmptySequence);
        }

        if self.parameter_sets.is_none() {
            return Err(MovFileError::NoKeyframe);
        }

        Ok(SampleTables {
            stsd: Stsd::new(vec![sample_entry.into()]),
            stts: Stts::constant(self.samples.len() as u32, self.sample_duration),
            stss: Some(Stss::new(self.keyframes.clone())),
            stsc: Stsc::from_chunk_sizes(self.chunks.iter().map(|c| c.sample_count)),
            stsz: Stsz::per_sample(self.samples.iter().map(|s| s.length).collect()),
            chunk_offsets: ChunkOffsetBox::from_offsets(
                self.chunks.iter().map(|c| c.offset).collect(),
            ),
        })
    }
}
