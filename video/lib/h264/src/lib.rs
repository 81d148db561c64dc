mod config;
mod nal;

pub use self::config::{AVCDecoderConfigurationRecord, AvccExtendedConfig, NAL_LENGTH_SIZE};
pub use self::nal::{
    nal_unit_type, split_annexb, split_length_prefixed, to_length_prefixed, AccessUnit,
    AccessUnitSplitter, NalUnitType,
};

#[cfg(test)]
mod tests;
