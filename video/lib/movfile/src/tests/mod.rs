use std::path::Path;

use bytes::Bytes;
use mp4::{
    boxes::types::{moov::Moov, stbl::Stbl},
    DynBox,
};

use crate::{MovFileConfig, Sample};

mod config;
mod movie;

const BASELINE_SPS: [u8; 14] = [
    0x67, 0x42, 0xc0, 0x1f, 0x8c, 0x8d, 0x40, 0x50, 0x1e, 0x90, 0x0f, 0x08, 0x84, 0x6a,
];
const BASELINE_PPS: [u8; 4] = [0x68, 0xce, 0x3c, 0x80];

/// 2024-01-01 in seconds since 1904.
const CREATED: u64 = 3_786_825_600;

fn test_config(dir: &Path) -> MovFileConfig {
    MovFileConfig {
        width: 640,
        height: 480,
        output_path: dir.join("out.mov"),
        creation_time: Some(CREATED),
        ..Default::default()
    }
}

fn payload(len: usize, fill: u8) -> Bytes {
    Bytes::from(vec![fill; len])
}

fn keyframe(len: usize, pts: u64, fill: u8) -> Sample {
    Sample::new(payload(len, fill), pts, true).with_parameter_sets(
        Bytes::from_static(&BASELINE_SPS),
        Bytes::from_static(&BASELINE_PPS),
    )
}

fn frame(len: usize, pts: u64, fill: u8) -> Sample {
    Sample::new(payload(len, fill), pts, false)
}

fn read_boxes(path: &Path) -> (Vec<u8>, Vec<DynBox>) {
    let data = std::fs::read(path).unwrap();
    let boxes = DynBox::demux_all(Bytes::from(data.clone())).unwrap();
    (data, boxes)
}

fn names(boxes: &[DynBox]) -> Vec<[u8; 4]> {
    boxes.iter().map(|b| b.name()).collect()
}

fn moov(boxes: &[DynBox]) -> &Moov {
    boxes.iter().find_map(|b| b.as_moov()).unwrap()
}

fn stbl(moov: &Moov) -> &Stbl {
    &moov.traks[0].mdia.minf.stbl
}
