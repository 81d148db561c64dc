use std::io;

use bytes::Bytes;

use crate::boxes::{
    array::MovArray,
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Sync Sample Box
///
/// 1-based indices of the keyframes, strictly increasing.
/// ISO/IEC 14496-12:2022(E) - 8.6.2
pub struct Stss {
    pub header: FullBoxHeader,
    pub entries: MovArray<u32>,
}

impl Stss {
    pub fn new(entries: Vec<u32>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries: entries.into(),
        }
    }
}

impl BoxType for Stss {
    const NAME: [u8; 4] = *b"stss";

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
                "stss version and flags must be 0",
            ));
        }

        if self.entries.iter().any(|i| *i == 0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stss sample numbers start at 1",
            ));
        }

        if self.entries.entries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stss sample numbers must be strictly increasing",
            ));
        }

        Ok(())
    }
}
