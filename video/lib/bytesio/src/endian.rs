use std::fmt::{self, Debug};
use std::hash::Hash;
use std::io;

use fixed::types::extra::{LeEqU16, LeEqU32, U16, U30, U8};
use fixed::{FixedI16, FixedI32};

use crate::packed::copy_exact;

/// 16.16 signed fixed point, used for rates, dimensions and most matrix cells.
pub type Fixed16_16 = FixedI32<U16>;
/// 2.30 signed fixed point, used for the `u`, `v` and `w` matrix columns.
pub type Fixed2_30 = FixedI32<U30>;
/// 8.8 signed fixed point, used for volumes.
pub type Fixed8_8 = FixedI16<U8>;

/// A value with a fixed 2, 4 or 8 byte wire representation.
pub trait Endian: Copy + Debug {
    type Bytes: Copy + Default + AsRef<[u8]> + AsMut<[u8]> + Eq + Hash;

    const SIZE: usize;

    fn to_be_bytes(self) -> Self::Bytes;

    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_endian_int {
    ($($ty:ty => $size:literal,)*) => {
        $(
            impl Endian for $ty {
                type Bytes = [u8; $size];

                const SIZE: usize = $size;

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }
            }

            impl From<BigEndian<$ty>> for $ty {
                fn from(value: BigEndian<$ty>) -> Self {
                    value.get()
                }
            }
        )*
    };
}

impl_endian_int!(
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
);

// Fixed point values travel as their scaled integer, never as the real number.
impl<Frac: LeEqU32> Endian for FixedI32<Frac> {
    type Bytes = [u8; 4];

    const SIZE: usize = 4;

    fn to_be_bytes(self) -> Self::Bytes {
        self.to_bits().to_be_bytes()
    }

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Self::from_bits(i32::from_be_bytes(bytes))
    }
}

impl<Frac: LeEqU16> Endian for FixedI16<Frac> {
    type Bytes = [u8; 2];

    const SIZE: usize = 2;

    fn to_be_bytes(self) -> Self::Bytes {
        self.to_bits().to_be_bytes()
    }

    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Self::from_bits(i16::from_be_bytes(bytes))
    }
}

/// Stores a value in network byte order.
///
/// The swap happens once on construction and once on [`BigEndian::get`], so a
/// `BigEndian<T>` can be copied straight into an output buffer.
#[repr(transparent)]
pub struct BigEndian<T: Endian> {
    bytes: T::Bytes,
}

impl<T: Endian> BigEndian<T> {
    pub fn new(value: impl Into<T>) -> Self {
        Self {
            bytes: value.into().to_be_bytes(),
        }
    }

    pub fn from_bytes(bytes: T::Bytes) -> Self {
        Self { bytes }
    }

    pub fn get(self) -> T {
        T::from_be_bytes(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Copies the wire bytes to the front of `out`, returning how many were written.
    pub fn write_to(&self, out: &mut [u8]) -> io::Result<usize> {
        copy_exact(out, self.bytes.as_ref(), T::SIZE)
    }

    /// Reads the wire bytes from the front of `data`.
    pub fn read_from(data: &[u8]) -> io::Result<Self> {
        let mut bytes = T::Bytes::default();
        copy_exact(bytes.as_mut(), data, T::SIZE)?;
        Ok(Self { bytes })
    }

    pub fn mux<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.bytes.as_ref())
    }
}

impl<T: Endian> Clone for BigEndian<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Endian> Copy for BigEndian<T> {}

impl<T: Endian> Default for BigEndian<T> {
    fn default() -> Self {
        Self {
            bytes: T::Bytes::default(),
        }
    }
}

impl<T: Endian> PartialEq for BigEndian<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<T: Endian> Eq for BigEndian<T> {}

impl<T: Endian> Hash for BigEndian<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state)
    }
}

impl<T: Endian> Debug for BigEndian<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BigEndian").field(&self.get()).finish()
    }
}

impl<T: Endian> From<T> for BigEndian<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
