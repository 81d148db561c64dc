use std::io;

use bytes::Bytes;

use crate::boxes::{
    header::{BoxHeader, FullBoxHeader},
    types::{mdat::Mdat, mdhd::Mdhd, mvhd::Mvhd, tkhd::Tkhd, wide::Wide},
    BoxType, DynBox,
};

const BIG: u64 = 5_000_000_000;

#[test]
fn test_header_demux() {
    let data = Bytes::from_static(b"\0\0\0\x0cfree\x01\x02\x03\x04rest");
    let mut reader = io::Cursor::new(data);

    let (header, data) = BoxHeader::demux(&mut reader).unwrap();

    assert_eq!(header.box_type, *b"free");
    assert_eq!(data.as_ref(), &[1, 2, 3, 4]);
    assert_eq!(reader.position(), 12);
}

#[test]
fn test_header_demux_large_size() {
    let data = Bytes::from_static(b"\0\0\0\x01mdat\0\0\0\0\0\0\0\x12ab");
    let mut reader = io::Cursor::new(data);

    let (header, data) = BoxHeader::demux(&mut reader).unwrap();

    assert_eq!(header.box_type, *b"mdat");
    assert_eq!(data.as_ref(), b"ab");
}

#[test]
fn test_header_demux_rejects_short_size() {
    let data = Bytes::from_static(b"\0\0\0\x04free");
    let err = BoxHeader::demux(&mut io::Cursor::new(data)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_full_box_header_mux() {
    let header = FullBoxHeader::new(*b"vmhd", 1, 0x000001);

    let mut buf = Vec::new();
    header.mux(&mut buf).unwrap();

    assert_eq!(buf, vec![0x01, 0x00, 0x00, 0x01]);
    assert_eq!(header.size(), 4);
}

#[test]
fn test_size_for_switches_to_largesize() {
    assert_eq!(BoxHeader::size_for(0), 8);
    assert_eq!(BoxHeader::size_for(u32::MAX as u64 - 8), u32::MAX as u64);
    assert_eq!(
        BoxHeader::size_for(u32::MAX as u64 - 7),
        u32::MAX as u64 - 7 + 16
    );
}

#[test]
fn test_version_picked_from_time_fields() {
    assert_eq!(Mvhd::new(0, 0, 600, 1000, 2).header.version, 0);
    assert_eq!(Mvhd::new(BIG, 0, 600, 1000, 2).header.version, 1);
    assert_eq!(Tkhd::new(0, BIG, 1, 1000, 640, 480).header.version, 1);
    assert_eq!(Mdhd::new(0, 0, 600, BIG).header.version, 1);
    assert_eq!(
        Mdhd::new(u32::MAX as u64, u32::MAX as u64, 600, u32::MAX as u64)
            .header
            .version,
        0
    );
}

#[test]
fn test_version_one_adds_twelve_bytes() {
    let small = Mvhd::new(100, 200, 600, 1000, 2);
    let large = Mvhd::new(100, 200, 600, BIG, 2);
    assert_eq!(small.size(), 108);
    assert_eq!(large.size(), small.size() + 12);

    let small = Tkhd::new(100, 200, 1, 1000, 640, 480);
    let large = Tkhd::new(100, 200, 1, BIG, 640, 480);
    assert_eq!(small.size(), 92);
    assert_eq!(large.size(), small.size() + 12);

    let small = Mdhd::new(100, 200, 600, 1000);
    let large = Mdhd::new(100, 200, 600, BIG);
    assert_eq!(small.size(), 32);
    assert_eq!(large.size(), small.size() + 12);
}

#[test]
fn test_time_fields_round_trip() {
    for mvhd in [
        Mvhd::new(3_000_000_000, 3_000_000_001, 600, u32::MAX as u64, 2),
        Mvhd::new(3_000_000_000, 3_000_000_001, 600, BIG, 2),
    ] {
        let mut buf = Vec::new();
        mvhd.mux(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, mvhd.size());

        let parsed = DynBox::demux(&mut io::Cursor::new(Bytes::from(buf))).unwrap();
        assert_eq!(parsed, DynBox::Mvhd(mvhd));
    }

    let mdhd = Mdhd::new(1, 2, 90_000, BIG);
    let mut buf = Vec::new();
    mdhd.mux(&mut buf).unwrap();
    let parsed = DynBox::demux(&mut io::Cursor::new(Bytes::from(buf))).unwrap();
    assert_eq!(parsed.as_mdhd().unwrap().duration, BIG);
    assert_eq!(parsed.as_mdhd().unwrap().language_code(), *b"und");
}

#[test]
fn test_version_zero_rejects_wide_values() {
    let mut mvhd = Mvhd::new(0, 0, 600, 1000, 2);
    mvhd.duration = BIG;

    let err = mvhd.mux(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_tkhd_layout() {
    let tkhd = Tkhd::new(0, 0, 1, 20, 640, 480);

    let mut buf = Vec::new();
    tkhd.mux(&mut buf).unwrap();

    // flags: enabled | in movie
    assert_eq!(&buf[8..12], &[0, 0, 0, 3]);
    // identity matrix w = 1.0 in 2.30
    assert_eq!(&buf[80..84], &[0x40, 0, 0, 0]);
    assert_eq!(&buf[84..88], &[0x02, 0x80, 0, 0]);
    assert_eq!(&buf[88..92], &[0x01, 0xe0, 0, 0]);

    let wide = Tkhd::new(0, 0, 1, 20, 65535, 1);
    let mut buf = Vec::new();
    wide.mux(&mut buf).unwrap();
    assert_eq!(&buf[84..88], &[0xff, 0xff, 0, 0]);
}

#[test]
fn test_mdat_header() {
    let mut buf = Vec::new();
    assert_eq!(Mdat::mux_header(&mut buf, 100, false).unwrap(), 8);
    assert_eq!(buf, b"\0\0\0\x6cmdat".to_vec());

    let mut buf = Vec::new();
    assert_eq!(Mdat::mux_header(&mut buf, 100, true).unwrap(), 16);
    assert_eq!(buf, b"\0\0\0\x01mdat\0\0\0\0\0\0\0\x74".to_vec());

    assert_eq!(Mdat::header_size(u32::MAX as u64, false), 16);
}

#[test]
fn test_wide_is_eight_bytes() {
    let mut buf = Vec::new();
    Wide::new().mux(&mut buf).unwrap();
    assert_eq!(buf, b"\0\0\0\x08wide".to_vec());
}

struct Liar;

impl BoxType for Liar {
    const NAME: [u8; 4] = *b"liar";

    fn demux(_: BoxHeader, _: Bytes) -> io::Result<Self> {
        Ok(Self)
    }

    fn primitive_size(&self) -> u64 {
        4
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        writer.write_all(&[0, 0])
    }
}

#[test]
fn test_declared_size_is_enforced() {
    let err = Liar.mux(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
