use std::io;

use bytes::Bytes;
use bytesio::{copy_packed, BigEndian};

use crate::boxes::{
    array::{MovArray, Record},
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Sample To Chunk Box
/// ISO/IEC 14496-12:2022(E) - 8.7.4
pub struct Stsc {
    pub header: FullBoxHeader,
    pub entries: MovArray<StscEntry>,
}

impl Stsc {
    pub fn new(entries: Vec<StscEntry>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries: entries.into(),
        }
    }

    /// Collapses per-chunk sample counts into the run-length table.
    ///
    /// A new entry is emitted only where the count changes, so
    /// `[4, 4, 2]` becomes `(1, 4), (3, 2)`.
    pub fn from_chunk_sizes(chunk_sizes: impl IntoIterator<Item = u32>) -> Self {
        let mut entries: Vec<StscEntry> = Vec::new();

        for (index, samples_per_chunk) in chunk_sizes.into_iter().enumerate() {
            if entries
                .last()
                .is_some_and(|last| last.samples_per_chunk == samples_per_chunk)
            {
                continue;
            }

            entries.push(StscEntry {
                first_chunk: index as u32 + 1,
                samples_per_chunk,
                sample_description_index: 1,
            });
        }

        Self::new(entries)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Sample To Chunk Entry
pub struct StscEntry {
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
    pub sample_description_index: u32,
}

impl Record for StscEntry {
    const SIZE: usize = 12;

    fn encode(&self, out: &mut [u8]) -> io::Result<usize> {
        let mut buf = [0; 12];
        BigEndian::<u32>::new(self.first_chunk).write_to(&mut buf[0..4])?;
        BigEndian::<u32>::new(self.samples_per_chunk).write_to(&mut buf[4..8])?;
        BigEndian::<u32>::new(self.sample_description_index).write_to(&mut buf[8..12])?;
        copy_packed::<12>(out, &buf)
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        let field = |at: usize| -> io::Result<u32> {
            Ok(BigEndian::<u32>::read_from(data.get(at..).unwrap_or_default())?.get())
        };

        Ok(Self {
            first_chunk: field(0)?,
            samples_per_chunk: field(4)?,
            sample_description_index: field(8)?,
        })
    }
}

impl BoxType for Stsc {
    const NAME: [u8; 4] = *b"stsc";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;
        let entries = MovArray::demux(&mut reader)?;

        Ok(Self { header, entries })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size() + self.entries.size()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;
        self.entries.mux(writer)
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.version != 0 || self.header.flags != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsc version and flags must be 0",
            ));
        }

        if self.entries.iter().next().is_some_and(|e| e.first_chunk != 1) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsc must start at chunk 1",
            ));
        }

        if self
            .entries
            .entries
            .windows(2)
            .any(|w| w[0].first_chunk >= w[1].first_chunk)
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsc first_chunk must be strictly increasing",
            ));
        }

        Ok(())
    }
}
