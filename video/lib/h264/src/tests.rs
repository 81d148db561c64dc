use std::io;

use bytes::Bytes;

use crate::{
    config::{AVCDecoderConfigurationRecord, AvccExtendedConfig},
    nal::{
        nal_unit_type, split_annexb, split_length_prefixed, to_length_prefixed,
        AccessUnit, AccessUnitSplitter, NalUnitType,
    },
};

const BASELINE_SPS: [u8; 14] = [
    0x67, 0x42, 0xc0, 0x1f, 0x8c, 0x8d, 0x40, 0x50, 0x1e, 0x90, 0x0f, 0x08, 0x84, 0x6a,
];
const BASELINE_PPS: [u8; 4] = [0x68, 0xce, 0x3c, 0x80];

#[test]
fn test_config_demux() {
    let data = Bytes::from(b"\x01d\0\x1f\xff\xe1\0\x1dgd\0\x1f\xac\xd9A\xe0m\xf9\xe6\xa0  (\0\0\x03\0\x08\0\0\x03\x01\xe0x\xc1\x8c\xb0\x01\0\x06h\xeb\xe3\xcb\"\xc0\xfd\xf8\xf8\0".to_vec());

    let config = AVCDecoderConfigurationRecord::demux(&mut io::Cursor::new(data)).unwrap();

    assert_eq!(config.configuration_version, 1);
    assert_eq!(config.profile_indication, 100);
    assert_eq!(config.profile_compatibility, 0);
    assert_eq!(config.level_indication, 31);
    assert_eq!(config.length_size_minus_one, 3);
    assert_eq!(
        config.extended_config,
        Some(AvccExtendedConfig {
            bit_depth_chroma_minus8: 0,
            bit_depth_luma_minus8: 0,
            chroma_format: 1,
            sequence_parameter_set_ext: vec![],
        })
    );

    assert_eq!(config.sps.len(), 1);
    assert_eq!(config.sps[0].len(), 29);
    assert_eq!(config.pps.len(), 1);
    assert_eq!(config.pps[0].len(), 6);
}

#[test]
fn test_config_mux() {
    let data = Bytes::from(b"\x01d\0\x1f\xff\xe1\0\x1dgd\0\x1f\xac\xd9A\xe0m\xf9\xe6\xa0  (\0\0\x03\0\x08\0\0\x03\x01\xe0x\xc1\x8c\xb0\x01\0\x06h\xeb\xe3\xcb\"\xc0\xfd\xf8\xf8\0".to_vec());

    let config = AVCDecoderConfigurationRecord::demux(&mut io::Cursor::new(data.clone())).unwrap();

    assert_eq!(config.size(), data.len() as u64);

    let mut buf = Vec::new();
    config.mux(&mut buf).unwrap();

    assert_eq!(buf, data.to_vec());
}

#[test]
fn test_config_from_parameter_sets() {
    let config = AVCDecoderConfigurationRecord::from_parameter_sets(
        Bytes::from_static(&BASELINE_SPS),
        Bytes::from_static(&BASELINE_PPS),
    )
    .unwrap();

    assert_eq!(config.profile_indication, 0x42);
    assert_eq!(config.profile_compatibility, 0xc0);
    assert_eq!(config.level_indication, 0x1f);
    assert_eq!(config.length_size_minus_one, 3);
    assert_eq!(config.extended_config, None);

    let mut buf = Vec::new();
    config.mux(&mut buf).unwrap();

    assert_eq!(buf.len() as u64, config.size());
    assert_eq!(buf.len(), 6 + 2 + 14 + 1 + 2 + 4);
    assert_eq!(&buf[..6], &[0x01, 0x42, 0xc0, 0x1f, 0xff, 0xe1]);
    assert_eq!(&buf[6..8], &[0x00, 0x0e]);
    assert_eq!(&buf[8..22], &BASELINE_SPS);
    assert_eq!(buf[22], 0x01);
    assert_eq!(&buf[23..25], &[0x00, 0x04]);
    assert_eq!(&buf[25..], &BASELINE_PPS);
}

#[test]
fn test_config_rejects_broken_parameter_sets() {
    let zero_profile = Bytes::from_static(&[0x67, 0x00, 0xc0, 0x1f, 0x8c]);
    let err = AVCDecoderConfigurationRecord::from_parameter_sets(
        zero_profile,
        Bytes::from_static(&BASELINE_PPS),
    )
    .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);

    let zero_level = Bytes::from_static(&[0x67, 0x42, 0xc0, 0x00, 0x8c]);
    assert!(AVCDecoderConfigurationRecord::from_parameter_sets(
        zero_level,
        Bytes::from_static(&BASELINE_PPS)
    )
    .is_err());

    let short = Bytes::from_static(&[0x67, 0x42]);
    assert!(AVCDecoderConfigurationRecord::from_parameter_sets(
        short,
        Bytes::from_static(&BASELINE_PPS)
    )
    .is_err());

    assert!(AVCDecoderConfigurationRecord::from_parameter_sets(
        Bytes::from_static(&BASELINE_SPS),
        Bytes::new()
    )
    .is_err());
}

#[test]
fn test_nal_unit_type() {
    assert_eq!(nal_unit_type(0x67), NalUnitType::Sps);
    assert_eq!(nal_unit_type(0x68), NalUnitType::Pps);
    assert_eq!(nal_unit_type(0x65), NalUnitType::IdrSlice);
    assert_eq!(nal_unit_type(0x41), NalUnitType::NonIdrSlice);
    assert_eq!(nal_unit_type(0x09), NalUnitType::AccessUnitDelimiter);
    assert_eq!(nal_unit_type(0x06), NalUnitType::Sei);
    assert_eq!(nal_unit_type(0x0c), NalUnitType::Other(12));
    assert!(NalUnitType::IdrSlice.is_vcl());
    assert!(!NalUnitType::Sps.is_vcl());
}

#[test]
fn test_split_annexb() {
    let data = Bytes::from_static(&[
        0, 0, 0, 1, 0x67, 0x42, 0, 0, 1, 0x68, 0xce, 0, 0, 0, 1, 0x65, 0x88, 0x80, 0,
    ]);

    let units = split_annexb(&data);

    assert_eq!(units.len(), 3);
    assert_eq!(units[0].as_ref(), &[0x67, 0x42]);
    assert_eq!(units[1].as_ref(), &[0x68, 0xce]);
    assert_eq!(units[2].as_ref(), &[0x65, 0x88, 0x80]);
}

#[test]
fn test_split_annexb_without_start_code() {
    assert!(split_annexb(&Bytes::from_static(&[0x65, 0x88])).is_empty());
}

#[test]
fn test_length_prefixed() {
    let units = vec![
        Bytes::from_static(&[0x65, 0x88]),
        Bytes::from_static(&[0x06, 0x05, 0x01]),
    ];

    let sample = to_length_prefixed(&units);
    assert_eq!(
        sample.as_ref(),
        &[0, 0, 0, 2, 0x65, 0x88, 0, 0, 0, 3, 0x06, 0x05, 0x01]
    );

    assert_eq!(split_length_prefixed(&sample).unwrap(), units);

    let truncated = sample.slice(..sample.len() - 1);
    assert_eq!(
        split_length_prefixed(&truncated).unwrap_err().kind(),
        io::ErrorKind::UnexpectedEof
    );
}

#[test]
fn test_access_unit_splitter() {
    let mut stream = Vec::new();
    let mut push = |unit: &[u8]| {
        stream.extend_from_slice(&[0, 0, 0, 1]);
        stream.extend_from_slice(unit);
    };

    push(&[0x09, 0xf0]);
    push(&BASELINE_SPS);
    push(&BASELINE_PPS);
    push(&[0x65, 0x88, 0x84]);
    // second slice of the same picture, first_mb_in_slice != 0
    push(&[0x65, 0x40, 0x84]);
    push(&[0x09, 0xf0]);
    push(&[0x41, 0x9a, 0x02]);
    push(&[0x41, 0x9a, 0x04]);

    let units = AccessUnitSplitter::split(&Bytes::from(stream));

    assert_eq!(units.len(), 3);

    assert!(units[0].keyframe);
    assert_eq!(units[0].nal_units.len(), 5);
    assert_eq!(units[0].sps.as_deref(), Some(&BASELINE_SPS[..]));
    assert_eq!(units[0].pps.as_deref(), Some(&BASELINE_PPS[..]));
    assert_eq!(
        units[0].sample_data().as_ref(),
        &[0, 0, 0, 3, 0x65, 0x88, 0x84, 0, 0, 0, 3, 0x65, 0x40, 0x84]
    );

    assert!(!units[1].keyframe);
    assert_eq!(units[1].nal_units.len(), 2);
    assert_eq!(units[1].sps, None);
    assert_eq!(
        units[1].sample_data().as_ref(),
        &[0, 0, 0, 3, 0x41, 0x9a, 0x02]
    );

    assert!(!units[2].keyframe);
    assert_eq!(units[2].nal_units.len(), 1);
}

#[test]
fn test_access_unit_splitter_drops_trailing_parameter_sets() {
    let mut splitter = AccessUnitSplitter::new();

    assert!(splitter.push(Bytes::from_static(&BASELINE_SPS)).is_none());
    assert!(splitter.push(Bytes::new()).is_none());
    assert!(splitter.flush().is_none());
}

#[test]
fn test_access_unit_skips_empty_units() {
    let unit = AccessUnit {
        nal_units: vec![Bytes::new(), Bytes::from_static(&[0x41, 0x9a])],
        ..Default::default()
    };

    assert_eq!(unit.sample_data().as_ref(), &[0, 0, 0, 2, 0x41, 0x9a]);

    let empty = AccessUnit {
        nal_units: vec![Bytes::new()],
        ..Default::default()
    };
    assert!(empty.sample_data().is_empty());
}
