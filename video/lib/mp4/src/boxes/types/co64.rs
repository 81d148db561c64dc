use std::io;

use bytes::Bytes;

use crate::boxes::{
    array::MovArray,
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Chunk Large Offset Box
/// ISO/IEC 14496-12:2022(E) - 8.7.5
pub struct Co64 {
    pub header: FullBoxHeader,
    pub entries: MovArray<u64>,
}

impl Co64 {
    pub fn new(entries: Vec<u64>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries: entries.into(),
        }
    }

    pub fn update_offset(&mut self, shift: u64) -> io::Result<()> {
        let shifted = self
            .entries
            .iter()
            .map(|offset| {
                offset.checked_add(shift).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "chunk offset overflow")
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        self.entries = shifted.into();
        Ok(())
    }
}

impl BoxType for Co64 {
    const NAME: [u8; 4] = *b"co64";

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
                "co64 version and flags must be 0",
            ));
        }

        Ok(())
    }
}
