use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use bytesio::Fixed16_16;

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Edit List Box
/// ISO/IEC 14496-12:2022(E) - 8.6.6
pub struct Elst {
    pub header: FullBoxHeader,
    pub entries: Vec<ElstEntry>,
}

impl Elst {
    pub fn new(entries: Vec<ElstEntry>) -> Self {
        let version = if entries.iter().any(|e| {
            e.segment_duration > u32::MAX as u64 || e.media_time > i32::MAX as i64
        }) {
            1
        } else {
            0
        };

        Self {
            header: FullBoxHeader::new(Self::NAME, version, 0),
            entries,
        }
    }

    /// A single edit playing the whole media from its start at normal speed.
    pub fn single(segment_duration: u64) -> Self {
        Self::new(vec![ElstEntry {
            segment_duration,
            media_time: 0,
            media_rate: Fixed16_16::ONE,
        }])
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Entry in the Edit List Box
pub struct ElstEntry {
    /// In movie timescale units.
    pub segment_duration: u64,
    /// In media timescale units, -1 for an empty edit.
    pub media_time: i64,
    /// `media_rate_integer` and `media_rate_fraction` read together as 16.16.
    pub media_rate: Fixed16_16,
}

impl BoxType for Elst {
    const NAME: [u8; 4] = *b"elst";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;

        let entry_count = reader.read_u32::<BigEndian>()?;

        let mut entries = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            let (segment_duration, media_time) = if header.version == 1 {
                (
                    reader.read_u64::<BigEndian>()?, // segment_duration
                    reader.read_i64::<BigEndian>()?, // media_time
                )
            } else {
                (
                    reader.read_u32::<BigEndian>()? as u64, // segment_duration
                    reader.read_i32::<BigEndian>()? as i64, // media_time
                )
            };

            let media_rate = Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?);

            entries.push(ElstEntry {
                segment_duration,
                media_time,
                media_rate,
            });
        }

        Ok(Self { header, entries })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size()
        + 4 // entry_count
        + (self.entries.len() as u64) * if self.header.version == 1 {
            8 + 8 + 4 // segment_duration + media_time + media_rate
        } else {
            4 + 4 + 4 // segment_duration + media_time + media_rate
        }
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;

        writer.write_u32::<BigEndian>(self.entries.len() as u32)?;

        for entry in &self.entries {
            if self.header.version == 1 {
                writer.write_u64::<BigEndian>(entry.segment_duration)?;
                writer.write_i64::<BigEndian>(entry.media_time)?;
            } else {
                writer.write_u32::<BigEndian>(entry.segment_duration as u32)?;
                writer.write_i32::<BigEndian>(entry.media_time as i32)?;
            }

            writer.write_i32::<BigEndian>(entry.media_rate.to_bits())?;
        }

        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.flags != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "elst flags must be 0",
            ));
        }

        if self.header.version > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "elst version must be 0 or 1",
            ));
        }

        if self.header.version == 0 {
            for entry in &self.entries {
                if entry.segment_duration > u32::MAX as u64 {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "elst segment_duration must fit 32 bits in version 0",
                    ));
                }

                if entry.media_time > i32::MAX as i64 || entry.media_time < i32::MIN as i64 {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "elst media_time must fit 32 bits in version 0",
                    ));
                }
            }
        }

        Ok(())
    }
}
