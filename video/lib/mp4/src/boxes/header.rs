use std::{
    fmt::{Debug, Formatter},
    io::{self, Read},
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use bytesio::bytes_reader::BytesCursor;

/// Size of a compact box header: `size:u32` + `type:[u8; 4]`.
pub const HEADER_SIZE: u64 = 8;
/// Size of a box header using the 64 bit `largesize` field.
pub const LARGE_HEADER_SIZE: u64 = 16;

#[derive(Clone, PartialEq)]
pub struct BoxHeader {
    pub box_type: [u8; 4],
}

impl BoxHeader {
    pub fn new(box_type: [u8; 4]) -> Self {
        Self { box_type }
    }
}

impl Debug for BoxHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxHeader")
            .field("box_type", &String::from_utf8_lossy(&self.box_type))
            .finish()
    }
}

impl BoxHeader {
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> io::Result<(Self, Bytes)> {
        let size = reader.read_u32::<BigEndian>()? as u64;

        let mut box_type: [u8; 4] = [0; 4];
        reader.read_exact(&mut box_type)?;

        let (offset, size) = match size {
            1 => (LARGE_HEADER_SIZE, reader.read_u64::<BigEndian>()?),
            // A zero size extends the box to the end of the enclosing data.
            0 => (
                HEADER_SIZE,
                HEADER_SIZE + (reader.get_ref().len() as u64 - reader.position()),
            ),
            size => (HEADER_SIZE, size),
        };

        if size < offset {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "box {} declares size {} smaller than its header",
                    String::from_utf8_lossy(&box_type),
                    size
                ),
            ));
        }

        let data = reader.read_slice((size - offset) as usize)?;

        Ok((Self { box_type }, data))
    }

    /// Header bytes needed for a box with `payload` bytes after the header.
    pub fn size_for(payload: u64) -> u64 {
        if payload + HEADER_SIZE > u32::MAX as u64 {
            payload + LARGE_HEADER_SIZE
        } else {
            payload + HEADER_SIZE
        }
    }

    /// Writes `size` and `type`, switching to `largesize` when the total does not fit 32 bits.
    /// `size` is the full box size including the header.
    pub fn mux<T: io::Write>(&self, writer: &mut T, size: u64) -> io::Result<()> {
        if size > u32::MAX as u64 {
            writer.write_u32::<BigEndian>(1)?;
            writer.write_all(&self.box_type)?;
            writer.write_u64::<BigEndian>(size)?;
        } else {
            writer.write_u32::<BigEndian>(size as u32)?;
            writer.write_all(&self.box_type)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullBoxHeader {
    pub header: BoxHeader,
    pub version: u8,
    pub flags: u32,
}

impl FullBoxHeader {
    pub fn new(box_type: [u8; 4], version: u8, flags: u32) -> Self {
        Self {
            header: BoxHeader::new(box_type),
            version,
            flags,
        }
    }

    pub fn demux(header: BoxHeader, reader: &mut io::Cursor<Bytes>) -> io::Result<Self> {
        let version = reader.read_u8()?;
        let flags = reader.read_u24::<BigEndian>()?;
        Ok(Self {
            header,
            version,
            flags,
        })
    }

    pub fn mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u8(self.version)?;
        writer.write_u24::<BigEndian>(self.flags)?;
        Ok(())
    }

    pub const fn size(&self) -> u64 {
        1 // version
        + 3 // flags
    }

    /// Picks version 1 when any of the time fields needs more than 32 bits.
    pub fn version_for(times: &[u64]) -> u8 {
        if times.iter().any(|t| *t > u32::MAX as u64) {
            1
        } else {
            0
        }
    }
}
