pub mod avc1;
pub mod avcc;
pub mod co64;
pub mod dinf;
pub mod dref;
pub mod edts;
pub mod elst;
pub mod ftyp;
pub mod hdlr;
pub mod mdat;
pub mod mdhd;
pub mod mdia;
pub mod minf;
pub mod moov;
pub mod mvhd;
pub mod pasp;
pub mod stbl;
pub mod stco;
pub mod stsc;
pub mod stsd;
pub mod stss;
pub mod stsz;
pub mod stts;
pub mod tkhd;
pub mod trak;
pub mod url;
pub mod vmhd;
pub mod wide;
