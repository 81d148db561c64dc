use std::io;

use bytes::Bytes;

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Data Entry Url Box
///
/// Only the self-contained form is supported: the media data lives in the
/// same file, signalled by flag 1 and no location string.
/// ISO/IEC 14496-12:2022(E) - 8.7.2.2
pub struct Url {
    pub header: FullBoxHeader,
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

impl Url {
    pub const SELF_CONTAINED_FLAG: u32 = 0x000001;

    pub fn new() -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, Self::SELF_CONTAINED_FLAG),
        }
    }
}

impl BoxType for Url {
    const NAME: [u8; 4] = *b"url ";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);
        let header = FullBoxHeader::demux(header, &mut reader)?;

        if header.flags & Self::SELF_CONTAINED_FLAG == 0 {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "url box references an external file",
            ));
        }

        Ok(Self { header })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.version != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "url version must be 0",
            ));
        }

        if self.header.flags & Self::SELF_CONTAINED_FLAG == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "url box must be self-contained",
            ));
        }

        Ok(())
    }
}
