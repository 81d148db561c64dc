use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::{Buf, Bytes};
use bytesio::bytes_reader::BytesCursor;

/// `lengthSizeMinusOne` lives in the low 2 bits, the upper 6 bits are reserved as ones.
const LENGTH_SIZE_MASK: u8 = 0b0000_0011;
const LENGTH_SIZE_RESERVED: u8 = 0b1111_1100;

/// `numOfSequenceParameterSets` lives in the low 5 bits, the upper 3 bits are reserved as ones.
const NUM_SPS_MASK: u8 = 0b0001_1111;
const NUM_SPS_RESERVED: u8 = 0b1110_0000;

/// `chroma_format` lives in the low 2 bits, the upper 6 bits are reserved as ones.
const CHROMA_FORMAT_MASK: u8 = 0b0000_0011;
const CHROMA_FORMAT_RESERVED: u8 = 0b1111_1100;

/// Bit depths live in the low 3 bits, the upper 5 bits are reserved as ones.
const BIT_DEPTH_MASK: u8 = 0b0000_0111;
const BIT_DEPTH_RESERVED: u8 = 0b1111_1000;

/// Samples are written with 4 byte NAL unit lengths.
pub const NAL_LENGTH_SIZE: u8 = 4;

#[derive(Debug, Clone, PartialEq)]
/// AVC (H.264) Decoder Configuration Record
/// ISO/IEC 14496-15:2022(E) - 5.3.2.1.2
pub struct AVCDecoderConfigurationRecord {
    pub configuration_version: u8,
    pub profile_indication: u8,
    pub profile_compatibility: u8,
    pub level_indication: u8,
    pub length_size_minus_one: u8,
    pub sps: Vec<Bytes>,
    pub pps: Vec<Bytes>,
    pub extended_config: Option<AvccExtendedConfig>,
}

#[derive(Debug, Clone, PartialEq)]
/// AVC (H.264) Extended Configuration
/// ISO/IEC 14496-15:2022(E) - 5.3.2.1.2
pub struct AvccExtendedConfig {
    pub chroma_format: u8,
    pub bit_depth_luma_minus8: u8,
    pub bit_depth_chroma_minus8: u8,
    pub sequence_parameter_set_ext: Vec<Bytes>,
}

impl AVCDecoderConfigurationRecord {
    /// Builds the record from one SPS and one PPS NAL unit (without start codes).
    ///
    /// Profile, compatibility and level are the 2nd, 3rd and 4th bytes of the SPS.
    /// A zero profile or level means the encoder handed us a broken parameter set.
    pub fn from_parameter_sets(sps: Bytes, pps: Bytes) -> io::Result<Self> {
        if sps.len() < 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("sps is too short ({} bytes)", sps.len()),
            ));
        }

        if pps.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "pps is empty"));
        }

        if sps.len() > u16::MAX as usize || pps.len() > u16::MAX as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "parameter set does not fit a 16 bit length",
            ));
        }

        let config = Self {
            configuration_version: 1,
            profile_indication: sps[1],
            profile_compatibility: sps[2],
            level_indication: sps[3],
            length_size_minus_one: NAL_LENGTH_SIZE - 1,
            sps: vec![sps],
            pps: vec![pps],
            extended_config: None,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> io::Result<()> {
        if self.profile_indication == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "avcc profile_indication must not be 0",
            ));
        }

        if self.level_indication == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "avcc level_indication must not be 0",
            ));
        }

        if self.sps.len() > NUM_SPS_MASK as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "avcc can hold at most 31 sps",
            ));
        }

        if self.pps.len() > u8::MAX as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "avcc can hold at most 255 pps",
            ));
        }

        Ok(())
    }

    pub fn demux(reader: &mut io::Cursor<Bytes>) -> io::Result<Self> {
        let configuration_version = reader.read_u8()?;
        let profile_indication = reader.read_u8()?;
        let profile_compatibility = reader.read_u8()?;
        let level_indication = reader.read_u8()?;
        let length_size_minus_one = reader.read_u8()? & LENGTH_SIZE_MASK;
        let num_of_sequence_parameter_sets = reader.read_u8()? & NUM_SPS_MASK;

        let mut sps = Vec::with_capacity(num_of_sequence_parameter_sets as usize);
        for _ in 0..num_of_sequence_parameter_sets {
            let sps_length = reader.read_u16::<BigEndian>()?;
            sps.push(reader.read_slice(sps_length as usize)?);
        }

        let num_of_picture_parameter_sets = reader.read_u8()?;
        let mut pps = Vec::with_capacity(num_of_picture_parameter_sets as usize);
        for _ in 0..num_of_picture_parameter_sets {
            let pps_length = reader.read_u16::<BigEndian>()?;
            pps.push(reader.read_slice(pps_length as usize)?);
        }

        // Encoders regularly leave the extension out even for high profiles.
        let extended_config = match profile_indication {
            66 | 77 | 88 => None,
            _ if reader.has_remaining() => {
                let chroma_format = reader.read_u8()? & CHROMA_FORMAT_MASK;
                let bit_depth_luma_minus8 = reader.read_u8()? & BIT_DEPTH_MASK;
                let bit_depth_chroma_minus8 = reader.read_u8()? & BIT_DEPTH_MASK;
                let number_of_sequence_parameter_set_ext = reader.read_u8()?;

                let mut sequence_parameter_set_ext =
                    Vec::with_capacity(number_of_sequence_parameter_set_ext as usize);
                for _ in 0..number_of_sequence_parameter_set_ext {
                    let sps_ext_length = reader.read_u16::<BigEndian>()?;
                    sequence_parameter_set_ext.push(reader.read_slice(sps_ext_length as usize)?);
                }

                Some(AvccExtendedConfig {
                    chroma_format,
                    bit_depth_luma_minus8,
                    bit_depth_chroma_minus8,
                    sequence_parameter_set_ext,
                })
            }
            _ => None,
        };

        Ok(Self {
            configuration_version,
            profile_indication,
            profile_compatibility,
            level_indication,
            length_size_minus_one,
            sps,
            pps,
            extended_config,
        })
    }

    /// Size of the record in bytes. Depends on the parameter set payloads.
    pub fn size(&self) -> u64 {
        1 // configuration_version
        + 1 // avc_profile_indication
        + 1 // profile_compatibility
        + 1 // avc_level_indication
        + 1 // length_size_minus_one (6 bits reserved, 2 bits)
        + 1 // num_of_sequence_parameter_sets (3 bits reserved, 5 bits)
        + self.sps.iter().map(|sps| 2 + sps.len() as u64).sum::<u64>()
        + 1 // num_of_picture_parameter_sets
        + self.pps.iter().map(|pps| 2 + pps.len() as u64).sum::<u64>()
        + match &self.extended_config {
            Some(config) => {
                1 // chroma_format
                + 1 // bit_depth_luma_minus8
                + 1 // bit_depth_chroma_minus8
                + 1 // number_of_sequence_parameter_set_ext
                + config
                    .sequence_parameter_set_ext
                    .iter()
                    .map(|sps_ext| 2 + sps_ext.len() as u64)
                    .sum::<u64>()
            }
            None => 0,
        }
    }

    pub fn mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_u8(self.configuration_version)?;
        writer.write_u8(self.profile_indication)?;
        writer.write_u8(self.profile_compatibility)?;
        writer.write_u8(self.level_indication)?;
        writer.write_u8(LENGTH_SIZE_RESERVED | (self.length_size_minus_one & LENGTH_SIZE_MASK))?;

        writer.write_u8(NUM_SPS_RESERVED | (self.sps.len() as u8 & NUM_SPS_MASK))?;
        for sps in &self.sps {
            writer.write_u16::<BigEndian>(sps.len() as u16)?;
            writer.write_all(sps)?;
        }

        writer.write_u8(self.pps.len() as u8)?;
        for pps in &self.pps {
            writer.write_u16::<BigEndian>(pps.len() as u16)?;
            writer.write_all(pps)?;
        }

        if let Some(config) = &self.extended_config {
            writer.write_u8(CHROMA_FORMAT_RESERVED | (config.chroma_format & CHROMA_FORMAT_MASK))?;
            writer.write_u8(BIT_DEPTH_RESERVED | (config.bit_depth_luma_minus8 & BIT_DEPTH_MASK))?;
            writer
                .write_u8(BIT_DEPTH_RESERVED | (config.bit_depth_chroma_minus8 & BIT_DEPTH_MASK))?;

            writer.write_u8(config.sequence_parameter_set_ext.len() as u8)?;
            for sps_ext in &config.sequence_parameter_set_ext {
                writer.write_u16::<BigEndian>(sps_ext.len() as u16)?;
                writer.write_all(sps_ext)?;
            }
        }

        Ok(())
    }
}
