use std::io;

use bytes::Bytes;

use crate::boxes::{header::BoxHeader, traits::BoxType};

#[derive(Debug, Clone, PartialEq)]
/// Wide Box
///
/// An empty 8 byte placeholder placed right before `mdat`. If the media data
/// outgrows a 32 bit size the `mdat` header is widened over it.
pub struct Wide {
    pub header: BoxHeader,
}

impl Default for Wide {
    fn default() -> Self {
        Self::new()
    }
}

impl Wide {
    pub fn new() -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
        }
    }
}

impl BoxType for Wide {
    const NAME: [u8; 4] = *b"wide";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        if !data.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "wide box must be empty",
            ));
        }

        Ok(Self { header })
    }

    fn primitive_size(&self) -> u64 {
        0
    }

    fn primitive_mux<T: io::Write>(&self, _: &mut T) -> io::Result<()> {
        Ok(())
    }
}
