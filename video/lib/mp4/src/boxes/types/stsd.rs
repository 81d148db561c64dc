use std::fmt::Debug;
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    traits::BoxType,
    DynBox,
};

#[derive(Debug, Clone, PartialEq)]
/// Sample Description Box
/// ISO/IEC 14496-12:2022(E) - 8.5.2
pub struct Stsd {
    pub header: FullBoxHeader,
    pub entries: Vec<DynBox>,
}

impl Stsd {
    pub fn new(entries: Vec<DynBox>) -> Self {
        Self {
            header: FullBoxHeader::new(Self::NAME, 0, 0),
            entries,
        }
    }

    pub fn is_video(&self) -> bool {
        self.entries.iter().any(|e| matches!(e, DynBox::Avc1(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Sample Entry Box
/// Contains a template field for the Type of Sample Entry
/// ISO/IEC 14496-12:2022(E) - 8.5.2.2
pub struct SampleEntry<T: SampleEntryExtension> {
    pub reserved: [u8; 6],
    pub data_reference_index: u16,
    pub extension: T,
}

impl<T: SampleEntryExtension> SampleEntry<T> {
    pub fn new(extension: T) -> Self {
        Self {
            reserved: [0; 6],
            data_reference_index: 1,
            extension,
        }
    }
}

pub trait SampleEntryExtension: Debug + Clone + PartialEq {
    fn demux<R: Read>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized;

    fn size(&self) -> u64;

    fn mux<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn validate(&self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: SampleEntryExtension> SampleEntry<T> {
    pub fn demux<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut reserved = [0; 6];
        reader.read_exact(&mut reserved)?;

        let data_reference_index = reader.read_u16::<BigEndian>()?;

        Ok(Self {
            reserved,
            data_reference_index,
            extension: T::demux(reader)?,
        })
    }

    pub fn size(&self) -> u64 {
        6 // reserved
        + 2 // data_reference_index
        + self.extension.size()
    }

    pub fn mux<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.validate()?;

        writer.write_all(&self.reserved)?;
        writer.write_u16::<BigEndian>(self.data_reference_index)?;
        self.extension.mux(writer)
    }

    pub fn validate(&self) -> io::Result<()> {
        if self.reserved != [0; 6] {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "sample entry reserved field must be 0",
            ));
        }

        if self.data_reference_index == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "sample entry data_reference_index starts at 1",
            ));
        }

        self.extension.validate()
    }
}

/// Longest compressor name the 32 byte Pascal string field can hold.
pub const MAX_COMPRESSOR_NAME_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq)]
/// Visual Sample Entry Contents
/// ISO/IEC 14496-12:2022(E) - 12.1.3.2
pub struct VisualSampleEntry {
    pub pre_defined: u16,
    pub reserved: u16,
    pub pre_defined2: [u32; 3],
    pub width: u16,
    pub height: u16,
    pub horizresolution: u32,
    pub vertresolution: u32,
    pub reserved2: u32,
    pub frame_count: u16,
    /// Length byte followed by up to 31 bytes of name, zero padded.
    pub compressorname: [u8; 32],
    pub depth: u16,
    pub pre_defined3: i16,
}

impl VisualSampleEntry {
    /// 72 dpi, one frame per sample, 24 bit color, no color table.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pre_defined: 0,
            reserved: 0,
            pre_defined2: [0, 0, 0],
            width,
            height,
            horizresolution: 0x00480000,
            vertresolution: 0x00480000,
            reserved2: 0,
            frame_count: 1,
            compressorname: [0; 32],
            depth: 0x0018,
            pre_defined3: -1,
        }
    }

    pub fn with_compressor_name(mut self, name: &str) -> io::Result<Self> {
        if name.len() > MAX_COMPRESSOR_NAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "compressor name is {} bytes, at most {} fit",
                    name.len(),
                    MAX_COMPRESSOR_NAME_LEN
                ),
            ));
        }

        self.compressorname = [0; 32];
        self.compressorname[0] = name.len() as u8;
        self.compressorname[1..=name.len()].copy_from_slice(name.as_bytes());
        Ok(self)
    }

    pub fn compressor_name(&self) -> String {
        let len = (self.compressorname[0] as usize).min(MAX_COMPRESSOR_NAME_LEN);
        String::from_utf8_lossy(&self.compressorname[1..=len]).into_owned()
    }
}

impl SampleEntryExtension for VisualSampleEntry {
    fn demux<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let pre_defined = reader.read_u16::<BigEndian>()?;
        let reserved = reader.read_u16::<BigEndian>()?;
        let pre_defined2 = [
            reader.read_u32::<BigEndian>()?,
            reader.read_u32::<BigEndian>()?,
            reader.read_u32::<BigEndian>()?,
        ];
        let width = reader.read_u16::<BigEndian>()?;
        let height = reader.read_u16::<BigEndian>()?;
        let horizresolution = reader.read_u32::<BigEndian>()?;
        let vertresolution = reader.read_u32::<BigEndian>()?;
        let reserved2 = reader.read_u32::<BigEndian>()?;
        let frame_count = reader.read_u16::<BigEndian>()?;
        let mut compressorname = [0; 32];
        reader.read_exact(&mut compressorname)?;
        let depth = reader.read_u16::<BigEndian>()?;
        let pre_defined3 = reader.read_i16::<BigEndian>()?;

        Ok(Self {
            pre_defined,
            reserved,
            pre_defined2,
            width,
            height,
            horizresolution,
            vertresolution,
            reserved2,
            frame_count,
            compressorname,
            depth,
            pre_defined3,
        })
    }

    fn size(&self) -> u64 {
        2 // pre_defined
        + 2 // reserved
        + 4 * 3 // pre_defined2
        + 2 // width
        + 2 // height
        + 4 // horizresolution
        + 4 // vertresolution
        + 4 // reserved2
        + 2 // frame_count
        + 32 // compressorname
        + 2 // depth
        + 2 // pre_defined3
    }

    fn mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u16::<BigEndian>(self.pre_defined)?;
        writer.write_u16::<BigEndian>(self.reserved)?;
        for v in self.pre_defined2 {
            writer.write_u32::<BigEndian>(v)?;
        }
        writer.write_u16::<BigEndian>(self.width)?;
        writer.write_u16::<BigEndian>(self.height)?;
        writer.write_u32::<BigEndian>(self.horizresolution)?;
        writer.write_u32::<BigEndian>(self.vertresolution)?;
        writer.write_u32::<BigEndian>(self.reserved2)?;
        writer.write_u16::<BigEndian>(self.frame_count)?;
        writer.write_all(&self.compressorname)?;
        writer.write_u16::<BigEndian>(self.depth)?;
        writer.write_i16::<BigEndian>(self.pre_defined3)?;

        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        if self.pre_defined != 0 || self.pre_defined2 != [0, 0, 0] {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "pre_defined fields must be 0",
            ));
        }

        if self.reserved != 0 || self.reserved2 != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "reserved fields must be 0",
            ));
        }

        if self.pre_defined3 != -1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "pre_defined3 field must be -1",
            ));
        }

        if self.compressorname[0] as usize > MAX_COMPRESSOR_NAME_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "compressor name length byte out of range",
            ));
        }

        Ok(())
    }
}

impl BoxType for Stsd {
    const NAME: [u8; 4] = *b"stsd";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let header = FullBoxHeader::demux(header, &mut reader)?;

        let entry_count = reader.read_u32::<BigEndian>()?;
        let mut entries = Vec::with_capacity(entry_count as usize);

        for _ in 0..entry_count {
            entries.push(DynBox::demux(&mut reader)?);
        }

        Ok(Self { header, entries })
    }

    fn primitive_size(&self) -> u64 {
        self.header.size()
            + 4 // entry_count
            + self.entries.iter().map(|entry| entry.size()).sum::<u64>()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.header.mux(writer)?;
        writer.write_u32::<BigEndian>(self.entries.len() as u32)?;
        for entry in &self.entries {
            entry.mux(writer)?;
        }
        Ok(())
    }

    fn validate(&self) -> io::Result<()> {
        if self.header.version != 0 || self.header.flags != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stsd version and flags must be 0",
            ));
        }

        Ok(())
    }
}
