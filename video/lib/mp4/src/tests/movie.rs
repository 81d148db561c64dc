use bytes::Bytes;

use crate::boxes::{
    header::BoxHeader,
    types::{
        avc1::Avc1,
        avcc::AvcC,
        edts::Edts,
        elst::Elst,
        ftyp::Ftyp,
        hdlr::Hdlr,
        mdhd::Mdhd,
        mdia::Mdia,
        minf::Minf,
        moov::Moov,
        mvhd::Mvhd,
        pasp::Pasp,
        stbl::{ChunkOffsetBox, Stbl},
        stsc::Stsc,
        stsd::{SampleEntry, Stsd, VisualSampleEntry},
        stss::Stss,
        stsz::Stsz,
        stts::Stts,
        tkhd::Tkhd,
        trak::Trak,
    },
    BoxType, DynBox,
};

const BASELINE_SPS: [u8; 14] = [
    0x67, 0x42, 0xc0, 0x1f, 0x8c, 0x8d, 0x40, 0x50, 0x1e, 0x90, 0x0f, 0x08, 0x84, 0x6a,
];
const BASELINE_PPS: [u8; 4] = [0x68, 0xce, 0x3c, 0x80];

const CREATED: u64 = 3_000_000_000;

fn sample_entry() -> Avc1 {
    let visual = VisualSampleEntry::new(640, 480)
        .with_compressor_name("H.264")
        .unwrap();
    let avcc = AvcC::fill_in(
        Bytes::from_static(&BASELINE_SPS),
        Bytes::from_static(&BASELINE_PPS),
    )
    .unwrap();

    Avc1::new(SampleEntry::new(visual), avcc, Some(Pasp::new(1, 1)))
}

fn movie() -> Moov {
    let stbl = Stbl::new(
        Stsd::new(vec![sample_entry().into()]),
        Stts::constant(3, 20),
        Some(Stss::new(vec![1])),
        Stsc::from_chunk_sizes([3]),
        Stsz::per_sample(vec![1000, 200, 1500]),
        ChunkOffsetBox::from_offsets(vec![44]),
    );

    let trak = Trak::new(
        Tkhd::new(CREATED, CREATED, 1, 60, 640, 480),
        Some(Edts::new(Some(Elst::single(60)))),
        Mdia::new(
            Mdhd::new(CREATED, CREATED, 600, 60),
            Hdlr::video(),
            Minf::new(stbl),
        ),
    );

    Moov::new(Mvhd::new(CREATED, CREATED, 600, 60, 2), vec![trak])
}

fn child_names(data: Bytes) -> Vec<[u8; 4]> {
    DynBox::demux_all(data)
        .unwrap()
        .iter()
        .map(|b| b.name())
        .collect()
}

#[test]
fn test_movie_size_matches_bytes() {
    let moov = movie();

    assert_eq!(moov.size(), moov.size());

    let mut buf = Vec::new();
    moov.mux(&mut buf).unwrap();
    assert_eq!(buf.len() as u64, moov.size());
    assert_eq!(&buf[4..8], b"moov");

    let parsed = DynBox::demux_all(Bytes::from(buf)).unwrap();
    assert_eq!(parsed, vec![DynBox::Moov(moov)]);
}

#[test]
fn test_movie_child_order() {
    let moov = movie();
    let mut buf = Vec::new();
    moov.mux(&mut buf).unwrap();

    let trak = &moov.traks[0];

    let mut stbl = Vec::new();
    trak.mdia.minf.stbl.mux(&mut stbl).unwrap();
    assert_eq!(
        child_names(Bytes::from(stbl).slice(8..)),
        vec![*b"stsd", *b"stts", *b"stss", *b"stsc", *b"stsz", *b"stco"]
    );

    let mut minf = Vec::new();
    trak.mdia.minf.mux(&mut minf).unwrap();
    assert_eq!(
        child_names(Bytes::from(minf).slice(8..)),
        vec![*b"vmhd", *b"dinf", *b"stbl"]
    );

    let mut mdia = Vec::new();
    trak.mdia.mux(&mut mdia).unwrap();
    assert_eq!(
        child_names(Bytes::from(mdia).slice(8..)),
        vec![*b"mdhd", *b"hdlr", *b"minf"]
    );

    let mut trak_buf = Vec::new();
    trak.mux(&mut trak_buf).unwrap();
    assert_eq!(
        child_names(Bytes::from(trak_buf).slice(8..)),
        vec![*b"tkhd", *b"edts", *b"mdia"]
    );

    assert_eq!(
        child_names(Bytes::from(buf).slice(8..)),
        vec![*b"mvhd", *b"trak"]
    );
}

#[test]
fn test_sample_entry_layout() {
    let avc1 = sample_entry();

    let mut buf = Vec::new();
    avc1.mux(&mut buf).unwrap();
    assert_eq!(buf.len() as u64, avc1.size());

    // 8 header + 8 sample entry + 70 visual fields
    let children = Bytes::from(buf).slice(86..);
    assert_eq!(child_names(children), vec![*b"avcC", *b"pasp"]);

    assert_eq!(avc1.visual_sample_entry.extension.compressor_name(), "H.264");
    assert_eq!(avc1.avcc.avc_decoder_configuration_record.profile_indication, 0x42);
}

#[test]
fn test_compressor_name_limit() {
    let name = "x".repeat(32);
    assert!(VisualSampleEntry::new(16, 16)
        .with_compressor_name(&name)
        .is_err());

    let name = "x".repeat(31);
    let entry = VisualSampleEntry::new(16, 16)
        .with_compressor_name(&name)
        .unwrap();
    assert_eq!(entry.compressorname[0], 31);
    assert_eq!(entry.compressor_name(), name);
}

#[test]
fn test_movie_rejects_stale_next_track_id() {
    let mut moov = movie();
    moov.mvhd.next_track_id = 1;

    assert!(moov.mux(&mut Vec::<u8>::new()).is_err());
}

#[test]
fn test_sample_table_rejects_count_mismatch() {
    let mut moov = movie();
    moov.traks[0].mdia.minf.stbl.stts = Stts::constant(4, 20);

    assert!(moov.mux(&mut Vec::<u8>::new()).is_err());
}

#[test]
fn test_ftyp_movie() {
    let ftyp = Ftyp::movie();

    let mut buf = Vec::new();
    ftyp.mux(&mut buf).unwrap();

    assert_eq!(buf.len(), 28);
    assert_eq!(&buf[..], b"\0\0\0\x1cftypmp42\0\0\0\x01isommp41mp42");
}

#[test]
fn test_unknown_box_passthrough() {
    let data = Bytes::from_static(b"\0\0\0\x0cfree\x01\x02\x03\x04");

    let boxes = DynBox::demux_all(data.clone()).unwrap();
    assert_eq!(
        boxes,
        vec![DynBox::Unknown((
            BoxHeader::new(*b"free"),
            Bytes::from_static(&[1, 2, 3, 4])
        ))]
    );

    let mut buf = Vec::new();
    boxes[0].mux(&mut buf).unwrap();
    assert_eq!(buf, data.to_vec());
}

#[test]
fn test_mdia_children() {
    let mdia = movie().traks.remove(0).mdia;

    let mut body = Vec::new();
    mdia.mdhd.mux(&mut body).unwrap();
    mdia.hdlr.mux(&mut body).unwrap();
    body.extend_from_slice(b"\0\0\0\x0cfree\x01\x02\x03\x04");

    let err = Mdia::demux(BoxHeader::new(*b"mdia"), Bytes::from(body.clone())).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert_eq!(err.to_string(), "mdia box is missing minf box");

    mdia.minf.mux(&mut body).unwrap();
    let parsed = Mdia::demux(BoxHeader::new(*b"mdia"), Bytes::from(body)).unwrap();
    assert_eq!(parsed.mdhd, mdia.mdhd);
    assert_eq!(parsed.hdlr, mdia.hdlr);
    assert_eq!(parsed.minf, mdia.minf);
    assert_eq!(parsed.size(), mdia.size());
}

#[test]
fn test_movie_volume() {
    let moov = movie();

    let mut mvhd = Vec::new();
    moov.mvhd.mux(&mut mvhd).unwrap();
    assert_eq!(&mvhd[32..34], &[0x01, 0x00]);

    let mut tkhd = Vec::new();
    moov.traks[0].tkhd.mux(&mut tkhd).unwrap();
    assert_eq!(&tkhd[44..46], &[0x00, 0x00]);
}
