use std::{fmt::Debug, io};

use bytes::Bytes;
use bytesio::{bytes_reader::BytesCursor, copy_packed, BigEndian};

/// A fixed width table entry.
pub trait Record: Debug + Clone + PartialEq {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Writes exactly `SIZE` bytes to the front of `out`.
    fn encode(&self, out: &mut [u8]) -> io::Result<usize>;

    /// Reads one entry from the first `SIZE` bytes of `data`.
    fn decode(data: &[u8]) -> io::Result<Self>
    where
        Self: Sized;
}

impl Record for u32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut [u8]) -> io::Result<usize> {
        copy_packed::<4>(out, BigEndian::<u32>::new(*self).as_bytes())
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        Ok(BigEndian::<u32>::read_from(data)?.get())
    }
}

impl Record for u64 {
    const SIZE: usize = 8;

    fn encode(&self, out: &mut [u8]) -> io::Result<usize> {
        copy_packed::<8>(out, BigEndian::<u64>::new(*self).as_bytes())
    }

    fn decode(data: &[u8]) -> io::Result<Self> {
        Ok(BigEndian::<u64>::read_from(data)?.get())
    }
}

/// Count-prefixed run of fixed width records.
///
/// Wire format: `entry_count:u32` followed by `entry_count * T::SIZE` bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct MovArray<T: Record> {
    pub entries: Vec<T>,
}

impl<T: Record> Default for MovArray<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Record> From<Vec<T>> for MovArray<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<T: Record> MovArray<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn size(&self) -> u64 {
        4 // entry_count
        + self.entries.len() as u64 * T::SIZE as u64
    }

    pub fn validate(&self) -> io::Result<()> {
        if self.entries.len() > u32::MAX as usize {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "table has more than 2^32 entries",
            ));
        }

        Ok(())
    }

    pub fn demux(reader: &mut io::Cursor<Bytes>) -> io::Result<Self> {
        let mut count = [0; 4];
        count.copy_from_slice(&reader.read_slice(4)?);
        let count = BigEndian::<u32>::from_bytes(count).get() as usize;

        let data = reader.read_slice(count * T::SIZE)?;
        let entries = data
            .chunks_exact(T::SIZE)
            .map(T::decode)
            .collect::<io::Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Encodes the whole table into one buffer and writes it in a single call.
    pub fn mux<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.validate()?;

        let mut buf = vec![0; self.size() as usize];
        let mut offset = BigEndian::<u32>::new(self.entries.len() as u32).write_to(&mut buf)?;

        for entry in &self.entries {
            offset += entry.encode(&mut buf[offset..])?;
        }

        writer.write_all(&buf)
    }
}
