use bytes::Bytes;
use h264::AccessUnit;

/// SPS and PPS NAL units, without start codes or length prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSets {
    pub sps: Bytes,
    pub pps: Bytes,
}

/// One encoded frame as it comes out of the encoder.
///
/// `data` is the sample payload in 4 byte length-prefixed form. The first
/// keyframe must carry the stream's parameter sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub data: Bytes,
    pub presentation_time: u64,
    pub keyframe: bool,
    pub parameter_sets: Option<ParameterSets>,
}

impl Sample {
    pub fn new(data: Bytes, presentation_time: u64, keyframe: bool) -> Self {
        Self {
            data,
            presentation_time,
            keyframe,
            parameter_sets: None,
        }
    }

    pub fn with_parameter_sets(mut self, sps: Bytes, pps: Bytes) -> Self {
        self.parameter_sets = Some(ParameterSets { sps, pps });
        self
    }

    /// Builds a sample from an access unit split out of an Annex-B stream.
    /// In-band parameter sets are moved out of the payload.
    pub fn from_access_unit(unit: &AccessUnit, presentation_time: u64) -> Self {
        let sample = Self::new(unit.sample_data(), presentation_time, unit.keyframe);

        match (&unit.sps, &unit.pps) {
            (Some(sps), Some(pps)) => sample.with_parameter_sets(sps.clone(), pps.clone()),
            _ => sample,
        }
    }
}
