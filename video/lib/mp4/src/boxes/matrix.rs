use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytesio::{Fixed16_16, Fixed2_30};

/// Transformation matrix stored in the movie and track headers.
///
/// `a b u / c d v / x y w`, where `u`, `v` and `w` are 2.30 fixed point and
/// everything else is 16.16.
/// ISO/IEC 14496-12:2022(E) - 6.2.2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: Fixed16_16,
    pub b: Fixed16_16,
    pub u: Fixed2_30,
    pub c: Fixed16_16,
    pub d: Fixed16_16,
    pub v: Fixed2_30,
    pub x: Fixed16_16,
    pub y: Fixed16_16,
    pub w: Fixed2_30,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        a: Fixed16_16::ONE,
        b: Fixed16_16::ZERO,
        u: Fixed2_30::ZERO,
        c: Fixed16_16::ZERO,
        d: Fixed16_16::ONE,
        v: Fixed2_30::ZERO,
        x: Fixed16_16::ZERO,
        y: Fixed16_16::ZERO,
        w: Fixed2_30::ONE,
    };

    pub const fn size() -> u64 {
        9 * 4
    }

    pub fn demux<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            a: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            b: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            u: Fixed2_30::from_bits(reader.read_i32::<BigEndian>()?),
            c: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            d: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            v: Fixed2_30::from_bits(reader.read_i32::<BigEndian>()?),
            x: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            y: Fixed16_16::from_bits(reader.read_i32::<BigEndian>()?),
            w: Fixed2_30::from_bits(reader.read_i32::<BigEndian>()?),
        })
    }

    pub fn mux<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for bits in [
            self.a.to_bits(),
            self.b.to_bits(),
            self.u.to_bits(),
            self.c.to_bits(),
            self.d.to_bits(),
            self.v.to_bits(),
            self.x.to_bits(),
            self.y.to_bits(),
            self.w.to_bits(),
        ] {
            writer.write_i32::<BigEndian>(bits)?;
        }

        Ok(())
    }
}
