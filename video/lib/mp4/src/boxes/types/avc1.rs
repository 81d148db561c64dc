use std::io;

use bytes::{Buf, Bytes};

use super::{
    avcc::AvcC,
    pasp::Pasp,
    stsd::{SampleEntry, VisualSampleEntry},
};
use crate::boxes::{header::BoxHeader, traits::BoxType, DynBox};

#[derive(Debug, Clone, PartialEq)]
/// AVC Sample Entry
///
/// Written as the visual sample entry fields, then `avcC`, then `pasp`.
/// ISO/IEC 14496-15:2022(E) - 5.4.2
pub struct Avc1 {
    pub header: BoxHeader,
    pub visual_sample_entry: SampleEntry<VisualSampleEntry>,
    pub avcc: AvcC,
    pub pasp: Option<Pasp>,
    pub unknown: Vec<DynBox>,
}

impl Avc1 {
    pub fn new(
        visual_sample_entry: SampleEntry<VisualSampleEntry>,
        avcc: AvcC,
        pasp: Option<Pasp>,
    ) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            visual_sample_entry,
            avcc,
            pasp,
            unknown: Vec::new(),
        }
    }
}

impl BoxType for Avc1 {
    const NAME: [u8; 4] = *b"avc1";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let visual_sample_entry = SampleEntry::<VisualSampleEntry>::demux(&mut reader)?;

        let mut avcc = None;
        let mut pasp = None;
        let mut unknown = Vec::new();

        while reader.has_remaining() {
            let dyn_box = DynBox::demux(&mut reader)?;
            match dyn_box {
                DynBox::AvcC(b) => {
                    avcc = Some(b);
                }
                DynBox::Pasp(b) => {
                    pasp = Some(b);
                }
                _ => {
                    unknown.push(dyn_box);
                }
            }
        }

        let avcc = avcc.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "avc1 box is missing avcC box")
        })?;

        Ok(Self {
            header,
            visual_sample_entry,
            avcc,
            pasp,
            unknown,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.visual_sample_entry.size()
            + self.avcc.size()
            + self.pasp.as_ref().map(|b| b.size()).unwrap_or(0)
            + self.unknown.iter().map(|b| b.size()).sum::<u64>()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.visual_sample_entry.mux(writer)?;
        self.avcc.mux(writer)?;
        if let Some(pasp) = &self.pasp {
            pasp.mux(writer)?;
        }
        for unknown in &self.unknown {
            unknown.mux(writer)?;
        }
        Ok(())
    }
}
