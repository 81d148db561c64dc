use std::io;

use bytes::Bytes;

use crate::boxes::{
    array::MovArray,
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Chunk Offset Box
///
/// Absolute file offset of every chunk, 32 bits wide.
/// ISO/IEC 14496-12:2022(E) - 8.7.5
pub struct Stco {
    pub header: FullBoxHeader,
    pub entries: MovArray<u32>,
}

impl Stco {
    pub fn new(entries: Vec<u32>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries: entries.into(),
        }
    }

    /// Adds `shift` to every offset. Fails without touching the table if any
    /// result would not fit 32 bits.
    pub fn update_offset(&mut self, shift: u64) -> io::Result<()> {
        let shifted = self
            .entries
            .iter()
            .map(|offset| {
                (*offset as u64)
                    .checked_add(shift)
                    .and_then(|o| u32::try_from(o).ok())
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            "shifted chunk offset does not fit stco",
                        )
                    })
            })
            .collect::<io::Result<Vec<_>>>()?;

        self.entries = shifted.into();
        Ok(())
    }
}

impl BoxType for Stco {
    const NAME: [u8; 4] = *b"stco";

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
                "stco version and flags must be 0",
            ));
        }

        Ok(())
    }
}
