use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;

use crate::boxes::{
    array::MovArray,
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Sample Size Box
///
/// A non-zero `sample_size` applies to every sample and `samples` stays
/// empty. Zero means one size per sample follows.
/// ISO/IEC 14496-12:2022(E) - 8.7.3.2
pub struct Stsz {
    pub header: FullBoxHeader,
    pub sample_size: u32,
    pub sample_count: u32,
    pub samples: MovArray<u32>,
}

impl Stsz {
    pub fn new(sample_size: u32, samples: Vec<u32>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            sample_size,
            sample_count: samples.len() as u32,
            samples: if sample_size == 0 {
                samples.into()
            } else {
                MovArray::default()
            },
        }
    }

    /// One size per sample.
    pub fn per_sample(samples: Vec<u32>) -> Self {
        Self::new(0, samples)
    }

    pub fn size_of(&self, index: usize) -> Option<u32> {
        if self.sample_size != 0 {
            (index < self.sample_count as usize).then_some(self.sample_size)
        } else {
            self.samples.entries.get(index).copied()
        }
    }
}

impl BoxType for Stsz {
    const NAME: [u8; 4] = *b"stsz";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;
        let sample_size = reader.read_u32::<BigEndian>()?;

        let (sample_count, samples) = if sample_size == 0 {
            // The table shares its count prefix with sample_count.
            let samples = MovArray::<u32>::demux(&mut reader)?;
            (samples.len() as u32, samples)
        } else {
            (reader.read_u32::<BigEndian>()?, MovArray::default())
        };

        Ok(Self {
            header,
            sample_size,
            sample_count,
            samples,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size()
            + 4 // sample_size
            + if self.sample_size == 0 {
                self.samples.size() // sample_count + entries
            } else {
                4 // sample_count
            }
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;
        writer.write_u32::<BigEndian>(self.sample_size)?;

        if self.sample_size == 0 {
            self.samples.mux(writer)
        } else {
            writer.write_u32::<BigEndian>(self.sample_count)
        }
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.version != 0 || self.header.flags != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsz version and flags must be 0",
            ));
        }

        if self.sample_size == 0 && self.samples.len() != self.sample_count as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsz sample_count does not match its table",
            ));
        }

        Ok(())
    }
}
