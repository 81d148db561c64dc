use std::io;

use bytes::{BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// NAL unit types this crate cares about.
/// ITU-T H.264 - Table 7-1
pub enum NalUnitType {
    NonIdrSlice,
    IdrSlice,
    Sei,
    Sps,
    Pps,
    AccessUnitDelimiter,
    Other(u8),
}

impl NalUnitType {
    pub fn is_vcl(&self) -> bool {
        matches!(self, Self::NonIdrSlice | Self::IdrSlice)
    }
}

impl From<u8> for NalUnitType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::NonIdrSlice,
            5 => Self::IdrSlice,
            6 => Self::Sei,
            7 => Self::Sps,
            8 => Self::Pps,
            9 => Self::AccessUnitDelimiter,
            v => Self::Other(v),
        }
    }
}

/// The type of a NAL unit from its first (header) byte.
pub fn nal_unit_type(header: u8) -> NalUnitType {
    NalUnitType::from(header & 0b0001_1111)
}

/// Splits an Annex-B byte stream on its 3 and 4 byte start codes.
///
/// Trailing zero bytes are stripped from every unit, so the leading zero of a
/// 4 byte start code never ends up in the previous unit.
pub fn split_annexb(data: &Bytes) -> Vec<Bytes> {
    let mut units = Vec::new();
    let mut start = None;
    let mut i = 0;

    while i + 3 <= data.len() {
        if data[i] == 0 && data[i + 1] == 0 && data[i + 2] == 1 {
            if let Some(start) = start {
                push_trimmed(&mut units, data, start, i);
            }

            i += 3;
            start = Some(i);
        } else {
            i += 1;
        }
    }

    if let Some(start) = start {
        push_trimmed(&mut units, data, start, data.len());
    }

    units
}

fn push_trimmed(units: &mut Vec<Bytes>, data: &Bytes, start: usize, mut end: usize) {
    while end > start && data[end - 1] == 0 {
        end -= 1;
    }

    if end > start {
        units.push(data.slice(start..end));
    }
}

/// Joins NAL units into one sample, each prefixed with a 4 byte big-endian length.
pub fn to_length_prefixed(units: &[Bytes]) -> Bytes {
    let mut buf = BytesMut::with_capacity(units.iter().map(|u| u.len() + 4).sum());

    for unit in units {
        buf.put_u32(unit.len() as u32);
        buf.put_slice(unit);
    }

    buf.freeze()
}

/// Splits a sample of 4 byte length-prefixed NAL units.
pub fn split_length_prefixed(data: &Bytes) -> io::Result<Vec<Bytes>> {
    let mut units = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        if data.len() - offset < 4 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "truncated nal unit length",
            ));
        }

        let mut length = [0u8; 4];
        length.copy_from_slice(&data[offset..offset + 4]);
        let length = u32::from_be_bytes(length) as usize;
        offset += 4;

        if data.len() - offset < length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "truncated nal unit",
            ));
        }

        units.push(data.slice(offset..offset + length));
        offset += length;
    }

    Ok(units)
}

#[derive(Debug, Clone, Default, PartialEq)]
/// One coded picture worth of NAL units.
pub struct AccessUnit {
    pub nal_units: Vec<Bytes>,
    pub keyframe: bool,
    pub sps: Option<Bytes>,
    pub pps: Option<Bytes>,
}

impl AccessUnit {
    /// The sample payload: every unit except parameter sets and delimiters,
    /// 4 byte length-prefixed. Parameter sets travel in the avcC box instead.
    pub fn sample_data(&self) -> Bytes {
        let units = self
            .nal_units
            .iter()
            .filter(|unit| {
                !matches!(
                    unit.first().map(|b| nal_unit_type(*b)),
                    None | Some(
                        NalUnitType::Sps | NalUnitType::Pps | NalUnitType::AccessUnitDelimiter
                    )
                )
            })
            .cloned()
            .collect::<Vec<_>>();

        to_length_prefixed(&units)
    }

    fn has_vcl(&self) -> bool {
        self.nal_units
            .iter()
            .any(|unit| unit.first().is_some_and(|b| nal_unit_type(*b).is_vcl()))
    }
}

/// Groups NAL units from an Annex-B stream into access units.
///
/// A new unit starts at a slice whose `first_mb_in_slice` is zero, or at a
/// delimiter, SEI or parameter set that follows slice data.
/// ITU-T H.264 - 7.4.1.2.3
#[derive(Debug, Default)]
pub struct AccessUnitSplitter {
    current: AccessUnit,
}

impl AccessUnitSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one NAL unit, returning the previous access unit if this one closed it.
    pub fn push(&mut self, unit: Bytes) -> Option<AccessUnit> {
        if unit.is_empty() {
            return None;
        }

        let ty = nal_unit_type(unit[0]);
        let starts_new = self.current.has_vcl()
            && match ty {
                NalUnitType::NonIdrSlice | NalUnitType::IdrSlice => first_mb_is_zero(&unit),
                NalUnitType::Sei
                | NalUnitType::Sps
                | NalUnitType::Pps
                | NalUnitType::AccessUnitDelimiter => true,
                NalUnitType::Other(v) => (14..=18).contains(&v),
            };

        let finished = if starts_new {
            Some(std::mem::take(&mut self.current))
        } else {
            None
        };

        match ty {
            NalUnitType::IdrSlice => self.current.keyframe = true,
            NalUnitType::Sps => self.current.sps = Some(unit.clone()),
            NalUnitType::Pps => self.current.pps = Some(unit.clone()),
            _ => {}
        }

        self.current.nal_units.push(unit);

        finished
    }

    /// Returns the trailing access unit, if it carries any picture data.
    pub fn flush(&mut self) -> Option<AccessUnit> {
        let current = std::mem::take(&mut self.current);
        current.has_vcl().then_some(current)
    }

    /// Splits a complete Annex-B stream.
    pub fn split(data: &Bytes) -> Vec<AccessUnit> {
        let mut splitter = Self::new();
        let mut units = split_annexb(data)
            .into_iter()
            .filter_map(|unit| splitter.push(unit))
            .collect::<Vec<_>>();
        units.extend(splitter.flush());
        units
    }
}

// first_mb_in_slice is ue(v); a value of zero encodes as a single 1 bit.
fn first_mb_is_zero(unit: &Bytes) -> bool {
    unit.get(1).map(|b| b & 0b1000_0000 != 0).unwrap_or(false)
}
