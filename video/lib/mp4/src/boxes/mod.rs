use std::io;

use bytes::{Buf, Bytes};
use paste::paste;

pub mod array;
pub mod header;
pub mod matrix;
mod traits;
pub mod types;

#[macro_use]
mod macros;

use header::BoxHeader;
pub use traits::{BoxType, CountingWriter};

use crate::boxes::types::{
    avc1::Avc1, avcc::AvcC, co64::Co64, dinf::Dinf, dref::Dref, edts::Edts, elst::Elst,
    ftyp::Ftyp, hdlr::Hdlr, mdat::Mdat, mdhd::Mdhd, mdia::Mdia, minf::Minf, moov::Moov,
    mvhd::Mvhd, pasp::Pasp, stbl::Stbl, stco::Stco, stsc::Stsc, stsd::Stsd, stss::Stss,
    stsz::Stsz, stts::Stts, tkhd::Tkhd, trak::Trak, url::Url, vmhd::Vmhd, wide::Wide,
};

#[rustfmt::skip]
impl_box!(
    Ftyp, Wide, Mdat, Moov, Mvhd, Trak,
    Tkhd, Edts, Elst, Mdia, Mdhd, Hdlr,
    Minf, Vmhd, Dinf, Dref, Url, Stbl,
    Stsd, Avc1, AvcC, Pasp, Stts, Stss,
    Stsc, Stsz, Stco, Co64,
);
