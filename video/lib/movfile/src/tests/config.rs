use std::path::PathBuf;

use crate::{EncodeQuality, MoovPlacement, MovFileConfig, MovFileError};

fn valid() -> MovFileConfig {
    MovFileConfig {
        width: 1920,
        height: 1080,
        output_path: PathBuf::from("out.mov"),
        ..Default::default()
    }
}

#[test]
fn test_defaults() {
    let config = MovFileConfig::default();

    assert_eq!(config.frame_rate, 30);
    assert_eq!(config.timescale, 600);
    assert_eq!(config.sample_duration(), 20);
    assert_eq!(config.max_keyframe_interval, 5);
    assert_eq!(config.pixel_aspect_ratio, (1, 1));
    assert_eq!(config.finish.moov_placement, MoovPlacement::End);
    assert!(!config.lazy_writer);

    assert!(valid().validate().is_ok());
}

#[test]
fn test_rejects_bad_values() {
    let cases: Vec<Box<dyn Fn(&mut MovFileConfig)>> = vec![
        Box::new(|c| c.width = 0),
        Box::new(|c| c.height = 0),
        Box::new(|c| c.width = 65536),
        Box::new(|c| c.frame_rate = 0),
        Box::new(|c| c.timescale = 0),
        Box::new(|c| {
            c.timescale = 24;
            c.frame_rate = 30;
        }),
        Box::new(|c| c.output_path = PathBuf::new()),
        Box::new(|c| c.compressor_name = "x".repeat(32)),
        Box::new(|c| c.pixel_aspect_ratio = (0, 1)),
    ];

    for (i, case) in cases.iter().enumerate() {
        let mut config = valid();
        case(&mut config);

        assert!(
            matches!(config.validate(), Err(MovFileError::Configuration(_))),
            "case {i} was accepted"
        );
    }

    let mut config = valid();
    config.width = 65535;
    config.compressor_name = "x".repeat(31);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_overlay() {
    let config: MovFileConfig = toml::from_str(
        r#"
        width = 1280
        height = 720
        frame_rate = 60
        output_path = "clip.mov"
        quality = "high"
        pixel_aspect_ratio = [4, 3]

        [finish]
        samples_per_chunk = 8
        moov_placement = "front"
        "#,
    )
    .unwrap();

    assert_eq!(config.width, 1280);
    assert_eq!(config.frame_rate, 60);
    assert_eq!(config.timescale, 600);
    assert_eq!(config.sample_duration(), 10);
    assert_eq!(config.quality, EncodeQuality::High);
    assert_eq!(config.pixel_aspect_ratio, (4, 3));
    assert_eq!(config.finish.samples_per_chunk, 8);
    assert_eq!(config.finish.moov_placement, MoovPlacement::Front);
    assert_eq!(config.finish.copy_last_frame_count, 0);
    assert!(config.validate().is_ok());
}
