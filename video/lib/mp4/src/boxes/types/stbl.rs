use std::io;

use bytes::{Buf, Bytes};

use super::{co64::Co64, stco::Stco, stsc::Stsc, stsd::Stsd, stss::Stss, stsz::Stsz, stts::Stts};
use crate::boxes::{header::BoxHeader, traits::BoxType, DynBox};

#[derive(Debug, Clone, PartialEq)]
/// Chunk offsets in whichever width the file needs.
pub enum ChunkOffsetBox {
    Stco(Stco),
    Co64(Co64),
}

impl ChunkOffsetBox {
    /// `stco` unless some offset needs 64 bits.
    pub fn from_offsets(offsets: Vec<u64>) -> Self {
        if offsets.iter().any(|o| *o > u32::MAX as u64) {
            Self::Co64(Co64::new(offsets))
        } else {
            Self::Stco(Stco::new(offsets.into_iter().map(|o| o as u32).collect()))
        }
    }

    pub fn offsets(&self) -> Vec<u64> {
        match self {
            Self::Stco(b) => b.entries.iter().map(|o| *o as u64).collect(),
            Self::Co64(b) => b.entries.entries.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Stco(b) => b.entries.len(),
            Self::Co64(b) => b.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn update_offset(&mut self, shift: u64) -> io::Result<()> {
        match self {
            Self::Stco(b) => b.update_offset(shift),
            Self::Co64(b) => b.update_offset(shift),
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Self::Stco(b) => b.size(),
            Self::Co64(b) => b.size(),
        }
    }

    pub fn mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match self {
            Self::Stco(b) => b.mux(writer),
            Self::Co64(b) => b.mux(writer),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Sample Table Box
///
/// Children are written as stsd, stts, stss, stsc, stsz, then the chunk offsets.
/// ISO/IEC 14496-12:2022(E) - 8.5.1
pub struct Stbl {
    pub header: BoxHeader,
    pub stsd: Stsd,
    pub stts: Stts,
    pub stss: Option<Stss>,
    pub stsc: Stsc,
    pub stsz: Stsz,
    pub chunk_offsets: ChunkOffsetBox,
    pub unknown: Vec<DynBox>,
}

impl Stbl {
    pub fn new(
        stsd: Stsd,
        stts: Stts,
        stss: Option<Stss>,
        stsc: Stsc,
        stsz: Stsz,
        chunk_offsets: ChunkOffsetBox,
    ) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            stsd,
            stts,
            stss,
            stsc,
            stsz,
            chunk_offsets,
            unknown: Vec::new(),
        }
    }
}

impl BoxType for Stbl {
    const NAME: [u8; 4] = *b"stbl";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);
        let mut stsd = None;
        let mut stts = None;
        let mut stss = None;
        let mut stsc = None;
        let mut stsz = None;
        let mut chunk_offsets = None;
        let mut unknown = Vec::new();

        while reader.has_remaining() {
            let dyn_box = DynBox::demux(&mut reader)?;

            match dyn_box {
                DynBox::Stsd(b) => {
                    stsd = Some(b);
                }
                DynBox::Stts(b) => {
                    stts = Some(b);
                }
                DynBox::Stss(b) => {
                    stss = Some(b);
                }
                DynBox::Stsc(b) => {
                    stsc = Some(b);
                }
                DynBox::Stsz(b) => {
                    stsz = Some(b);
                }
                DynBox::Stco(b) => {
                    chunk_offsets = Some(ChunkOffsetBox::Stco(b));
                }
                DynBox::Co64(b) => {
                    chunk_offsets = Some(ChunkOffsetBox::Co64(b));
                }
                _ => {
                    unknown.push(dyn_box);
                }
            }
        }

        let missing = |name: &str| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{name} box not found in stbl box"),
            )
        };

        Ok(Self {
            header,
            stsd: stsd.ok_or_else(|| missing("stsd"))?,
            stts: stts.ok_or_else(|| missing("stts"))?,
            stss,
            stsc: stsc.ok_or_else(|| missing("stsc"))?,
            stsz: stsz.ok_or_else(|| missing("stsz"))?,
            chunk_offsets: chunk_offsets.ok_or_else(|| missing("stco"))?,
            unknown,
        })
    }

    fn primitive_size(&self) -> u64 {
        let mut size = self.stsd.size();
        size += self.stts.size();
        size += self.stss.as_ref().map(|b| b.size()).unwrap_or(0);
        size += self.stsc.size();
        size += self.stsz.size();
        size += self.chunk_offsets.size();
        size += self.unknown.iter().map(|b| b.size()).sum::<u64>();
        size
    }

    fn primitive_mux<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.stsd.mux(writer)?;
        self.stts.mux(writer)?;
        if let Some(stss) = &self.stss {
            stss.mux(writer)?;
        }
        self.stsc.mux(writer)?;
        self.stsz.mux(writer)?;
        self.chunk_offsets.mux(writer)?;
        for unknown in &self.unknown {
            unknown.mux(writer)?;
        }
        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        let sample_count = self.stsz.sample_count as u64;

        if self.stts.sample_count() != sample_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stts and stsz disagree on the sample count",
            ));
        }

        if let Some(stss) = &self.stss {
            if stss.entries.iter().any(|i| *i as u64 > sample_count) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stss references a sample past the end",
                ));
            }
        }

        if self
            .stsc
            .entries
            .iter()
            .any(|e| e.first_chunk as usize > self.chunk_offsets.len())
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsc references a chunk past the end",
            ));
        }

        Ok(())
    }
}
