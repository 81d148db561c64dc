use std::io;

use bytes::Bytes;

use crate::boxes::{
    array::{MovArray, Record},
    types::{
        co64::Co64,
        stbl::ChunkOffsetBox,
        stco::Stco,
        stsc::{Stsc, StscEntry},
        stss::Stss,
        stsz::Stsz,
        stts::{Stts, SttsEntry},
    },
    BoxType, DynBox,
};

fn mux<B: BoxType>(b: &B) -> Vec<u8> {
    let mut buf = Vec::new();
    b.mux(&mut buf).unwrap();
    assert_eq!(buf.len() as u64, b.size());
    buf
}

fn reparse(buf: Vec<u8>) -> DynBox {
    DynBox::demux(&mut io::Cursor::new(Bytes::from(buf))).unwrap()
}

#[test]
fn test_array_encoding() {
    let array = MovArray::new(vec![1u32, 0x01020304]);

    let mut buf = Vec::new();
    array.mux(&mut buf).unwrap();

    assert_eq!(array.size(), 12);
    assert_eq!(buf, vec![0, 0, 0, 2, 0, 0, 0, 1, 1, 2, 3, 4]);

    let parsed = MovArray::<u32>::demux(&mut io::Cursor::new(Bytes::from(buf))).unwrap();
    assert_eq!(parsed, array);
}

#[test]
fn test_array_demux_truncated() {
    let data = Bytes::from_static(&[0, 0, 0, 3, 0, 0, 0, 1]);
    let err = MovArray::<u32>::demux(&mut io::Cursor::new(data)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn test_record_encode_needs_room() {
    let entry = StscEntry {
        first_chunk: 1,
        samples_per_chunk: 2,
        sample_description_index: 1,
    };

    let mut short = [0; 11];
    assert!(entry.encode(&mut short).is_err());
    assert_eq!(short, [0; 11]);

    let mut exact = [0; 12];
    assert_eq!(entry.encode(&mut exact).unwrap(), 12);
    assert_eq!(exact, [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 1]);
    assert_eq!(StscEntry::decode(&exact).unwrap(), entry);
}

#[test]
fn test_stts_constant() {
    let stts = Stts::constant(3, 20);

    let buf = mux(&stts);
    assert_eq!(
        buf,
        vec![
            0, 0, 0, 24, b's', b't', b't', b's', 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 3, 0, 0, 0, 20,
        ]
    );

    assert_eq!(stts.sample_count(), 3);
    assert_eq!(stts.duration(), 60);
    assert_eq!(
        reparse(buf).as_stts().unwrap().entries.entries,
        vec![SttsEntry {
            sample_count: 3,
            sample_delta: 20
        }]
    );
}

#[test]
fn test_stsc_ladder() {
    let stsc = Stsc::from_chunk_sizes([4, 4, 2]);

    let entries = stsc
        .entries
        .iter()
        .map(|e| (e.first_chunk, e.samples_per_chunk, e.sample_description_index))
        .collect::<Vec<_>>();
    assert_eq!(entries, vec![(1, 4, 1), (3, 2, 1)]);

    let stsc = Stsc::from_chunk_sizes([1, 1, 1, 1]);
    assert_eq!(stsc.entries.len(), 1);

    let stsc = Stsc::from_chunk_sizes([2, 1, 2]);
    let first_chunks = stsc.entries.iter().map(|e| e.first_chunk).collect::<Vec<_>>();
    assert_eq!(first_chunks, vec![1, 2, 3]);

    let buf = mux(&stsc);
    assert_eq!(reparse(buf), DynBox::Stsc(stsc));
}

#[test]
fn test_stsc_rejects_unordered_chunks() {
    let stsc = Stsc::new(vec![
        StscEntry {
            first_chunk: 1,
            samples_per_chunk: 1,
            sample_description_index: 1,
        },
        StscEntry {
            first_chunk: 1,
            samples_per_chunk: 2,
            sample_description_index: 1,
        },
    ]);

    assert!(stsc.mux(&mut Vec::<u8>::new()).is_err());
}

#[test]
fn test_stss_validation() {
    assert!(Stss::new(vec![1, 5, 9]).mux(&mut Vec::<u8>::new()).is_ok());
    assert!(Stss::new(vec![0, 5]).mux(&mut Vec::<u8>::new()).is_err());
    assert!(Stss::new(vec![5, 5]).mux(&mut Vec::<u8>::new()).is_err());
}

#[test]
fn test_stsz_per_sample() {
    let stsz = Stsz::per_sample(vec![1000, 200, 1500]);

    let buf = mux(&stsz);
    assert_eq!(buf.len(), 8 + 4 + 4 + 4 + 3 * 4);

    let parsed = reparse(buf);
    let parsed = parsed.as_stsz().unwrap();
    assert_eq!(parsed.sample_size, 0);
    assert_eq!(parsed.sample_count, 3);
    assert_eq!(parsed.samples.entries, vec![1000, 200, 1500]);
    assert_eq!(parsed.size_of(1), Some(200));
    assert_eq!(parsed.size_of(3), None);
}

#[test]
fn test_stsz_constant() {
    let stsz = Stsz::new(512, vec![512; 4]);

    let buf = mux(&stsz);
    assert_eq!(buf.len(), 20);

    let parsed = reparse(buf);
    let parsed = parsed.as_stsz().unwrap();
    assert_eq!(parsed.sample_count, 4);
    assert!(parsed.samples.is_empty());
    assert_eq!(parsed.size_of(3), Some(512));
}

#[test]
fn test_stco_update_offset() {
    let mut stco = Stco::new(vec![44, 1044, 1244]);
    stco.update_offset(100).unwrap();
    assert_eq!(stco.entries.entries, vec![144, 1144, 1344]);

    let mut stco = Stco::new(vec![44, u32::MAX]);
    assert!(stco.update_offset(1).is_err());
    assert_eq!(stco.entries.entries, vec![44, u32::MAX]);

    let mut co64 = Co64::new(vec![44, u32::MAX as u64]);
    co64.update_offset(1).unwrap();
    assert_eq!(co64.entries.entries, vec![45, u32::MAX as u64 + 1]);
}

#[test]
fn test_chunk_offset_width() {
    let offsets = ChunkOffsetBox::from_offsets(vec![44, 1044]);
    assert!(matches!(offsets, ChunkOffsetBox::Stco(_)));
    assert_eq!(offsets.size(), 8 + 4 + 4 + 2 * 4);

    let offsets = ChunkOffsetBox::from_offsets(vec![44, u32::MAX as u64 + 1]);
    assert!(matches!(offsets, ChunkOffsetBox::Co64(_)));
    assert_eq!(offsets.size(), 8 + 4 + 4 + 2 * 8);
    assert_eq!(offsets.offsets(), vec![44, u32::MAX as u64 + 1]);

    let mut buf = Vec::new();
    offsets.mux(&mut buf).unwrap();
    assert_eq!(&buf[4..8], b"co64");
}
