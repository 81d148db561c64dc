use std::io;

use bytes::Bytes;

use crate::boxes::{
    header::{BoxHeader, HEADER_SIZE, LARGE_HEADER_SIZE},
    traits::BoxType,
};

#[derive(Debug, Clone, PartialEq)]
/// Media Data Box
/// ISO/IEC 14496-12:2022(E) - 8.1.1
pub struct Mdat {
    pub header: BoxHeader,
    pub data: Vec<Bytes>,
}

impl Mdat {
    pub fn new(data: Vec<Bytes>) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            data,
        }
    }

    /// Header size for `data_len` bytes of media data.
    pub fn header_size(data_len: u64, large: bool) -> u64 {
        if large || data_len + HEADER_SIZE > u32::MAX as u64 {
            LARGE_HEADER_SIZE
        } else {
            HEADER_SIZE
        }
    }

    /// Writes just the header of an `mdat` holding `data_len` bytes.
    ///
    /// The media data itself is streamed to the file separately. With `large`
    /// set the 16 byte form is used even if the size would fit 32 bits.
    pub fn mux_header<T: io::Write>(writer: &mut T, data_len: u64, large: bool) -> io::Result<u64> {
        let header_size = Self::header_size(data_len, large);
        let size = header_size + data_len;
        let header = BoxHeader::new(Self::NAME);

        if header_size == LARGE_HEADER_SIZE {
            // BoxHeader::mux only picks largesize when it has to.
            writer.write_all(&1u32.to_be_bytes())?;
            writer.write_all(&header.box_type)?;
            writer.write_all(&size.to_be_bytes())?;
        } else {
            header.mux(writer, size)?;
        }

        Ok(header_size)
    }
}

impl BoxType for Mdat {
    const NAME: [u8; 4] = *b"mdat";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        Ok(Self {
            header,
            data: vec![data],
        })
    }

    fn primitive_size(&self) -> u64 {
        self.data.iter().map(|data| data.len() as u64).sum()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for data in &self.data {
            writer.write_all(data)?;
        }

        Ok(())
    }
}
