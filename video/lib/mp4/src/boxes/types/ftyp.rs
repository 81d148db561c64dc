use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::{Buf, Bytes};

use crate::boxes::{header::BoxHeader, traits::BoxType};

#[derive(Debug, Clone, PartialEq)]
/// File Type Box
/// ISO/IEC 14496-12:2022(E) - 4.2.3
pub struct Ftyp {
    pub header: BoxHeader,
    pub major_brand: FourCC,
    pub minor_version: u32,
    pub compatible_brands: Vec<FourCC>,
}

impl Ftyp {
    pub fn new(major_brand: FourCC, minor_version: u32, compatible_brands: Vec<FourCC>) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            major_brand,
            minor_version,
            compatible_brands,
        }
    }

    /// `mp42` v1, compatible with `isom`, `mp41` and `mp42`.
    pub fn movie() -> Self {
        Self::new(
            FourCC::Mp42,
            1,
            vec![FourCC::Isom, FourCC::Mp41, FourCC::Mp42],
        )
    }
}

impl BoxType for Ftyp {
    const NAME: [u8; 4] = *b"ftyp";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);

        let mut major_brand = [0; 4];
        reader.read_exact(&mut major_brand)?;
        let minor_version = reader.read_u32::<BigEndian>()?;

        let mut compatible_brands = Vec::new();
        while reader.remaining() >= 4 {
            let mut brand = [0; 4];
            reader.read_exact(&mut brand)?;
            compatible_brands.push(FourCC::from(brand));
        }

        Ok(Self {
            header,
            major_brand: major_brand.into(),
            minor_version,
            compatible_brands,
        })
    }

    fn primitive_size(&self) -> u64 {
        4 // major_brand
        + 4 // minor_version
        + self.compatible_brands.len() as u64 * 4
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_all(&self.major_brand.to_bytes())?;
        writer.write_u32::<BigEndian>(self.minor_version)?;
        for compatible_brand in &self.compatible_brands {
            writer.write_all(&compatible_brand.to_bytes())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// FourCC (Four Character Code)
pub enum FourCC {
    Isom,
    Mp41,
    Mp42,
    Qt,
    Unknown([u8; 4]),
}

impl FourCC {
    pub fn to_bytes(&self) -> [u8; 4] {
        match self {
            Self::Isom => *b"isom",
            Self::Mp41 => *b"mp41",
            Self::Mp42 => *b"mp42",
            Self::Qt => *b"qt  ",
            Self::Unknown(bytes) => *bytes,
        }
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"isom" => Self::Isom,
            b"mp41" => Self::Mp41,
            b"mp42" => Self::Mp42,
            b"qt  " => Self::Qt,
            _ => Self::Unknown(bytes),
        }
    }
}
