use std::io;

use bytes::{Buf, Bytes};

use super::{hdlr::Hdlr, mdhd::Mdhd, minf::Minf};
use crate::boxes::{header::BoxHeader, traits::BoxType, DynBox};

#[derive(Debug, Clone, PartialEq)]
/// Media Box
///
/// Children are written as mdhd, hdlr, then minf. Anything else found on
/// demux is dropped.
/// ISO/IEC 14496-12:2022(E) - 8.4.1
pub struct Mdia {
    pub header: BoxHeader,
    pub mdhd: Mdhd,
    pub hdlr: Hdlr,
    pub minf: Minf,
}

impl Mdia {
    pub fn new(mdhd: Mdhd, hdlr: Hdlr, minf: Minf) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            mdhd,
            hdlr,
            minf,
        }
    }
}

impl BoxType for Mdia {
    const NAME: [u8; 4] = *b"mdia";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);
        let (mut mdhd, mut hdlr, mut minf) = (None, None, None);

        while reader.has_remaining() {
            match DynBox::demux(&mut reader)? {
                DynBox::Mdhd(b) => mdhd = Some(b),
                DynBox::Hdlr(b) => hdlr = Some(b),
                DynBox::Minf(b) => minf = Some(b),
                _ => {}
            }
        }

        let missing = |name: &str| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("mdia box is missing {name} box"),
            )
        };

        Ok(Self {
            header,
            mdhd: mdhd.ok_or_else(|| missing("mdhd"))?,
            hdlr: hdlr.ok_or_else(|| missing("hdlr"))?,
            minf: minf.ok_or_else(|| missing("minf"))?,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.mdhd.size() + self.hdlr.size() + self.minf.size()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.mdhd.mux(writer)?;
        self.hdlr.mux(writer)?;
        self.minf.mux(writer)
    }
}
