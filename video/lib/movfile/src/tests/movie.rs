use bytes::Bytes;
use h264::AVCDecoderConfigurationRecord;
use mp4::{
    boxes::types::{
        avc1::Avc1,
        avcc::AvcC,
        stbl::ChunkOffsetBox,
        stsd::{SampleEntry, VisualSampleEntry},
    },
    BoxType, DynBox,
};

use super::{BASELINE_PPS, BASELINE_SPS, CREATED};
use crate::{MovFileError, MovieContainer, MovieParams, SampleTables, Track};

fn params(time: u64, duration: u64) -> MovieParams {
    MovieParams {
        creation_time: time,
        modification_time: time,
        timescale: 600,
        frame_rate: 30,
        duration,
        width: 640,
        height: 480,
    }
}

fn tables() -> SampleTables {
    let mut track = Track::new(640, 480, 600, 20, 1);
    track.set_parameter_sets(
        AVCDecoderConfigurationRecord::from_parameter_sets(
            Bytes::from_static(&BASELINE_SPS),
            Bytes::from_static(&BASELINE_PPS),
        )
        .unwrap(),
    );

    track.record_sample(1000, true);
    track.record_sample(200, false);
    track.record_sample(1500, false);

    let config = track.parameter_sets().cloned().unwrap();
    let entry = Avc1::new(
        SampleEntry::new(VisualSampleEntry::new(640, 480)),
        AvcC::new(config),
        None,
    );

    track.sample_tables(entry).unwrap()
}

fn container(time: u64, duration: u64) -> MovieContainer {
    let mut movie = MovieContainer::new(params(time, duration));
    movie.install_tables(tables()).unwrap();
    movie
}

#[test]
fn test_scenario_tables() {
    let movie = container(CREATED, 60);

    let mut buf = Vec::new();
    movie.mux(&mut buf).unwrap();
    assert_eq!(buf.len() as u64, movie.size());
    assert_eq!(movie.size(), movie.size());

    let boxes = DynBox::demux_all(Bytes::from(buf)).unwrap();
    let moov = boxes[0].as_moov().unwrap();

    assert_eq!(moov.mvhd.timescale, 600);
    assert_eq!(moov.mvhd.duration, 60);
    assert_eq!(moov.mvhd.next_track_id, 2);
    assert_eq!(moov.mvhd.header.version, 0);

    let trak = &moov.traks[0];
    assert_eq!(trak.tkhd.track_id, 1);
    assert_eq!(trak.tkhd.duration, 60);
    assert_eq!(trak.mdia.mdhd.timescale, 600);
    assert_eq!(
        trak.edts.as_ref().unwrap().elst.as_ref().unwrap().entries[0].segment_duration,
        60
    );

    let stbl = &trak.mdia.minf.stbl;
    assert_eq!(stbl.stts.entries.len(), 1);
    assert_eq!(stbl.stts.entries.entries[0].sample_count, 3);
    assert_eq!(stbl.stts.entries.entries[0].sample_delta, 20);
    assert_eq!(stbl.stss.as_ref().unwrap().entries.entries, vec![1]);
    assert_eq!(stbl.stsz.samples.entries, vec![1000, 200, 1500]);
    assert_eq!(stbl.chunk_offsets.offsets(), vec![44, 1044, 1244]);
    assert!(stbl.stsd.is_video());
}

#[test]
fn test_wide_times_switch_version() {
    let narrow = container(CREATED, 60);
    let wide = container(5_000_000_000, 60);

    let moov = wide.moov();
    assert_eq!(moov.mvhd.header.version, 1);
    assert_eq!(moov.traks[0].tkhd.header.version, 1);
    assert_eq!(moov.traks[0].mdia.mdhd.header.version, 1);

    // mvhd, tkhd and mdhd grow by 12 bytes each.
    assert_eq!(wide.size(), narrow.size() + 36);

    let long = container(CREATED, 5_000_000_000);
    // Plus 8 more for the 64 bit elst entry.
    assert_eq!(long.size(), narrow.size() + 36 + 8);

    let mut buf = Vec::new();
    wide.mux(&mut buf).unwrap();
    let boxes = DynBox::demux_all(Bytes::from(buf)).unwrap();
    assert_eq!(boxes[0].as_moov().unwrap().mvhd.creation_time, 5_000_000_000);
}

#[test]
fn test_tables_install_once() {
    let mut movie = MovieContainer::new(params(CREATED, 60));

    assert!(matches!(
        movie.mux(&mut Vec::<u8>::new()),
        Err(MovFileError::InvalidState { .. })
    ));

    movie.install_tables(tables()).unwrap();
    assert!(matches!(
        movie.install_tables(tables()),
        Err(MovFileError::InvalidState { .. })
    ));
}

#[test]
fn test_update_offset_once() {
    let mut movie = container(CREATED, 60);

    movie.update_offset(100).unwrap();
    assert_eq!(
        movie.chunk_offsets().unwrap().offsets(),
        vec![144, 1144, 1344]
    );

    assert!(matches!(
        movie.update_offset(100),
        Err(MovFileError::OffsetAlreadyApplied)
    ));
    assert_eq!(
        movie.chunk_offsets().unwrap().offsets(),
        vec![144, 1144, 1344]
    );
}

#[test]
fn test_update_offset_overflow_keeps_table() {
    let mut movie = container(CREATED, 60);

    assert!(matches!(
        movie.update_offset(u32::MAX as u64),
        Err(MovFileError::Io(_))
    ));
    assert_eq!(movie.chunk_offsets().unwrap().offsets(), vec![44, 1044, 1244]);

    let stco_size = movie.size();
    movie.widen_chunk_offsets().unwrap();
    assert!(matches!(
        movie.chunk_offsets(),
        Some(ChunkOffsetBox::Co64(_))
    ));
    assert_eq!(movie.size(), stco_size + 3 * 4);

    movie.update_offset(u32::MAX as u64).unwrap();
    assert_eq!(
        movie.chunk_offsets().unwrap().offsets()[0],
        44 + u32::MAX as u64
    );
}
