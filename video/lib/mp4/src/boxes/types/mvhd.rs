use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use bytesio::{Fixed16_16, Fixed8_8};

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    matrix::Matrix,
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Movie Header Box
/// ISO/IEC 14496-12:2022(E) - 8.2.2
pub struct Mvhd {
    pub header: FullBoxHeader,
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    pub rate: Fixed16_16,
    pub volume: Fixed8_8,
    pub reserved: u16,
    pub reserved2: [u32; 2],
    pub matrix: Matrix,
    pub pre_defined: [u32; 6],
    pub next_track_id: u32,
}

impl Mvhd {
    /// The version is picked from the time values: 1 if any of them needs 64 bits.
    pub fn new(
        creation_time: u64,
        modification_time: u64,
        timescale: u32,
        duration: u64,
        next_track_id: u32,
    ) -> Self {
        let version = FullBoxHeader::version_for(&[creation_time, modification_time, duration]);

        Self {
            header: FullBoxHeader::new(Self::NAME, version, 0),
            creation_time,
            modification_time,
            timescale,
            duration,
            rate: Fixed16_16::ONE,
            volume: Fixed8_8::ONE,
            reserved: 0,
            reserved2: [0; 2],
            matrix: Matrix::IDENTITY,
            pre_defined: [0; 6],
            next_track_id,
        }
    }
}

impl BoxType for Mvhd {
    const NAME: [u8; 4] = *b"mvhd";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;

        let (creation_time, modification_time, timescale, duration) = if header.version == 1 {
            (
                reader.read_u64::<BigEndian>()?, // creation_time
                reader.read_u64::<BigEndian>()?, // modification_time
                reader.read_u32::<BigEndian>()?, // timescale
                reader.read_u64::<BigEndian>()?, // duration
            )
        } else {
            (
                reader.read_u32::<BigEndian>()? as u64, // creation_time
                reader.read_u32::<BigEndian>()? as u64, // modification_time
                reader.read_u32::<BigEndian>()?,        // timescale
                reader.read_u32::<BigEndian>()? as u64, // duration
            )
        };

        let rate = Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?);
        let volume = Fixed8_8::from_bits(reader.read_i16::<BigEndian>()?);

        let reserved = reader.read_u16::<BigEndian>()?;
        let mut reserved2 = [0; 2];
        for v in reserved2.iter_mut() {
            *v = reader.read_u32::<BigEndian>()?;
        }

        let matrix = Matrix::demux(&mut reader)?;

        let mut pre_defined = [0; 6];
        for v in pre_defined.iter_mut() {
            *v = reader.read_u32::<BigEndian>()?;
        }

        let next_track_id = reader.read_u32::<BigEndian>()?;

        Ok(Self {
            header,
            creation_time,
            modification_time,
            timescale,
            duration,
            rate,
            volume,
            reserved,
            reserved2,
            matrix,
            pre_defined,
            next_track_id,
        })
    }

    fn primitive_size(&self) -> u64 {
        let mut size = self.header.size();

        if self.header.version == 1 {
            size += 8 + 8 + 4 + 8; // creation_time, modification_time, timescale, duration
        } else {
            size += 4 + 4 + 4 + 4; // creation_time, modification_time, timescale, duration
        }

        size += 4 + 2 + 2; // rate, volume, reserved
        size += 4 * 2; // reserved2
        size += Matrix::size();
        size += 4 * 6; // pre_defined
        size += 4; // next_track_id

        size
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;

        if self.header.version == 1 {
            writer.write_u64::<BigEndian>(self.creation_time)?;
            writer.write_u64::<BigEndian>(self.modification_time)?;
            writer.write_u32::<BigEndian>(self.timescale)?;
            writer.write_u64::<BigEndian>(self.duration)?;
        } else {
            writer.write_u32::<BigEndian>(self.creation_time as u32)?;
            writer.write_u32::<BigEndian>(self.modification_time as u32)?;
            writer.write_u32::<BigEndian>(self.timescale)?;
            writer.write_u32::<BigEndian>(self.duration as u32)?;
        }

        writer.write_i32::<BigEndian>(self.rate.to_bits())?;
        writer.write_i16::<BigEndian>(self.volume.to_bits())?;

        writer.write_u16::<BigEndian>(self.reserved)?;

        for v in self.reserved2.iter() {
            writer.write_u32::<BigEndian>(*v)?;
        }

        self.matrix.mux(writer)?;

        for v in self.pre_defined.iter() {
            writer.write_u32::<BigEndian>(*v)?;
        }

        writer.write_u32::<BigEndian>(self.next_track_id)?;

        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.flags != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mvhd flags must be 0",
            ));
        }

        if self.header.version > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mvhd version must be 0 or 1",
            ));
        }

        if self.header.version == 0
            && FullBoxHeader::version_for(&[
                self.creation_time,
                self.modification_time,
                self.duration,
            ]) != 0
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mvhd version 0 requires every time field to fit 32 bits",
            ));
        }

        if self.timescale == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mvhd timescale must not be 0",
            ));
        }

        if self.reserved != 0 || self.reserved2 != [0; 2] || self.pre_defined != [0; 6] {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mvhd reserved fields must be 0",
            ));
        }

        Ok(())
    }
}
