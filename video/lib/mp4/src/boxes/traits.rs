use std::io;

use bytes::Bytes;

use super::header::BoxHeader;

pub trait BoxType {
    const NAME: [u8; 4];

    /// Parse a box from a byte stream. The basic header is already parsed.
    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self>
    where
        Self: Sized;

    /// The size of the box without the basic header.
    fn primitive_size(&self) -> u64;

    /// Write the box to a byte stream. The basic header is already written.
    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()>;

    /// Write the box to a byte stream.
    ///
    /// Fails with `InvalidData` if the box emitted a different number of bytes
    /// than `size()` declared.
    fn mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.validate()?;

        let size = self.size();
        let mut writer = CountingWriter::new(writer);

        BoxHeader::new(Self::NAME).mux(&mut writer, size)?;
        self.primitive_mux(&mut writer)?;

        writer.finish(&Self::NAME, size)
    }

    /// Size of the box including the basic header.
    fn size(&self) -> u64 {
        BoxHeader::size_for(self.primitive_size())
    }

    /// Validate the box.
    fn validate(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Counts the bytes a box writes so they can be checked against its declared size.
pub struct CountingWriter<'a> {
    inner: &'a mut dyn io::Write,
    written: u64,
}

impl<'a> CountingWriter<'a> {
    pub fn new<T: io::Write>(inner: &'a mut T) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(self, name: &[u8; 4], declared: u64) -> io::Result<()> {
        if self.written != declared {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} declared {} bytes but wrote {}",
                    String::from_utf8_lossy(name),
                    declared,
                    self.written
                ),
            ));
        }

        Ok(())
    }
}

impl io::Write for CountingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
