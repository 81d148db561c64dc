pub mod bytes_reader;
pub mod endian;
pub mod packed;

pub use endian::{BigEndian, Endian, Fixed16_16, Fixed2_30, Fixed8_8};
pub use packed::{copy_exact, copy_packed};

#[cfg(test)]
mod tests;
