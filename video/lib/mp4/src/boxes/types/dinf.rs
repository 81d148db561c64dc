use std::io;

use bytes::{Buf, Bytes};

use super::dref::Dref;
use crate::boxes::{header::BoxHeader, traits::BoxType, DynBox};

#[derive(Debug, Clone, PartialEq)]
/// Data Information Box
/// ISO/IEC 14496-12:2022(E) - 8.7.1
pub struct Dinf {
    pub header: BoxHeader,
    pub dref: Dref,
}

impl Default for Dinf {
    fn default() -> Self {
        Self::new()
    }
}

impl Dinf {
    pub fn new() -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            dref: Dref::new(),
        }
    }
}

impl BoxType for Dinf {
    const NAME: [u8; 4] = *b"dinf";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);
        let mut dref = None;

        while reader.has_remaining() {
            if let DynBox::Dref(b) = DynBox::demux(&mut reader)? {
                dref = Some(b);
            }
        }

        let dref = dref.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "dinf box is missing dref box")
        })?;

        Ok(Self { header, dref })
    }

    fn primitive_size(&self) -> u64 {
        self.dref.size()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.dref.mux(writer)
    }
}
