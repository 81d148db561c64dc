use std::io;

use bytes::{Buf, Bytes};

use super::{dinf::Dinf, stbl::Stbl, vmhd::Vmhd};
use crate::boxes::{header::BoxHeader, traits::BoxType, DynBox};

#[derive(Debug, Clone, PartialEq)]
/// Media Information Box
/// ISO/IEC 14496-12:2022(E) - 8.4.4
pub struct Minf {
    pub header: BoxHeader,
    pub vmhd: Vmhd,
    pub dinf: Dinf,
    pub stbl: Stbl,
    pub unknown: Vec<DynBox>,
}

impl Minf {
    pub fn new(stbl: Stbl) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            vmhd: Vmhd::new(),
            dinf: Dinf::new(),
            stbl,
            unknown: Vec::new(),
        }
    }
}

impl BoxType for Minf {
    const NAME: [u8; 4] = *b"minf";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let mut vmhd = None;
        let mut dinf = None;
        let mut stbl = None;
        let mut unknown = Vec::new();

        while reader.has_remaining() {
            let dyn_box = DynBox::demux(&mut reader)?;

            match dyn_box {
                DynBox::Vmhd(b) => {
                    vmhd = Some(b);
                }
                DynBox::Dinf(b) => {
                    dinf = Some(b);
                }
                DynBox::Stbl(b) => {
                    stbl = Some(b);
                }
                _ => {
                    unknown.push(dyn_box);
                }
            }
        }

        let vmhd = vmhd.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "minf box is missing vmhd box")
        })?;
        let dinf = dinf.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "minf box is missing dinf box")
        })?;
        let stbl = stbl.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "minf box is missing stbl box")
        })?;

        Ok(Self {
            header,
            vmhd,
            dinf,
            stbl,
            unknown,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.vmhd.size()
            + self.dinf.size()
            + self.stbl.size()
            + self.unknown.iter().map(|b| b.size()).sum::<u64>()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.vmhd.mux(writer)?;
        self.dinf.mux(writer)?;
        self.stbl.mux(writer)?;

        for unknown in &self.unknown {
            unknown.mux(writer)?;
        }

        Ok(())
    }
}
