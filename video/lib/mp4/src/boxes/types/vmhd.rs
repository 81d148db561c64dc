use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Video Media Header Box
/// ISO/IEC 14496-12:2022(E) - 12.1.2
pub struct Vmhd {
    pub header: FullBoxHeader,
    /// 0 is copy.
    pub graphics_mode: u16,
    pub opcolor: [u16; 3],
}

impl Default for Vmhd {
    fn default() -> Self {
        Self::new()
    }
}

impl Vmhd {
    /// The only flag value the format allows.
    pub const NO_LEAN_AHEAD_FLAG: u32 = 0x000001;

    pub fn new() -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, Self::NO_LEAN_AHEAD_FLAG),
            graphics_mode: 0,
            opcolor: [0; 3],
        }
    }
}

impl BoxType for Vmhd {
    const NAME: [u8; 4] = *b"vmhd";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;
        let graphics_mode = reader.read_u16::<BigEndian>()?;
        let opcolor = [
            reader.read_u16::<BigEndian>()?,
            reader.read_u16::<BigEndian>()?,
            reader.read_u16::<BigEndian>()?,
        ];

        Ok(Self {
            header,
            graphics_mode,
            opcolor,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size()
        + 2 // graphics_mode
        + 2 * 3 // opcolor
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;

        writer.write_u16::<BigEndian>(self.graphics_mode)?;
        for c in self.opcolor {
            writer.write_u16::<BigEndian>(c)?;
        }

        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.version != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "vmhd version must be 0",
            ));
        }

        if self.header.flags != Self::NO_LEAN_AHEAD_FLAG {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "vmhd flags must be 1",
            ));
        }

        Ok(())
    }
}
