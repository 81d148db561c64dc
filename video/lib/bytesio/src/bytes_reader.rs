use std::io;

use bytes::{Buf, Bytes};

/// Zero-copy reads out of a `Cursor<Bytes>`.
pub trait BytesCursor {
    /// Returns the next `size` bytes as a shared slice and advances past them.
    fn read_slice(&mut self, size: usize) -> io::Result<Bytes>;

    /// Returns everything left in the cursor and advances to the end.
    fn read_remaining(&mut self) -> Bytes;
}

impl BytesCursor for io::Cursor<Bytes> {
    fn read_slice(&mut self, size: usize) -> io::Result<Bytes> {
        if self.remaining() < size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Not enough bytes",
            ));
        }

        let position = self.position() as usize;
        let slice = self.get_ref().slice(position..position + size);
        self.advance(size);

        Ok(slice)
    }

    fn read_remaining(&mut self) -> Bytes {
        let remaining = self.remaining();
        // Can only fail if the cursor is past the end, where nothing remains.
        self.read_slice(remaining).unwrap_or_default()
    }
}
