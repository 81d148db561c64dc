use std::io;

use bytes::Bytes;
use bytesio::{copy_packed, BigEndian};

use crate::boxes::{
    array::{MovArray, Record},
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Time To Sample Box
/// ISO/IEC 14496-12:2022(E) - 8.6.1.2
pub struct Stts {
    pub header: FullBoxHeader,
    pub entries: MovArray<SttsEntry>,
}

impl Stts {
    pub fn new(entries: Vec<SttsEntry>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries: entries.into(),
        }
    }

    /// Every sample shares one duration.
    pub fn constant(sample_count: u32, sample_delta: u32) -> Self {
        Self::new(vec![SttsEntry {
            sample_count,
            sample_delta,
        }])
    }

    pub fn sample_count(&self) -> u64 {
        self.entries.iter().map(|e| e.sample_count as u64).sum()
    }

    pub fn duration(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.sample_count as u64 * e.sample_delta as u64)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Time To Sample Entry
pub struct SttsEntry {
    pub sample_count: u32,
    pub sample_delta: u32,
}

impl Record for SttsEntry {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut [u8]) -> io::Result<usize> {
        let mut buf = [0; 8];
        BigEndian::<u32>::new(self.sample_count).write_to(&mut buf[0..4])?;
        BigEndian::<u32>::new(self.sample_delta).write_to(&mut buf[4..8])?;
        copy_packed::<8>(out, &buf)
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        Ok(Self {
            sample_count: BigEndian::<u32>::read_from(data)?.get(),
            sample_delta: BigEndian::<u32>::read_from(data.get(4..).unwrap_or_default())?.get(),
        })
    }
}

impl BoxType for Stts {
    const NAME: [u8; 4] = *b"stts";

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
                "stts version and flags must be 0",
            ));
        }

        Ok(())
    }
}
