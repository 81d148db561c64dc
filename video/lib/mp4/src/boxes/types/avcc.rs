use std::io;

use bytes::Bytes;
use h264::AVCDecoderConfigurationRecord;

use crate::boxes::{header::BoxHeader, traits::BoxType};

#[derive(Debug, Clone, PartialEq)]
/// AVC Configuration Box
/// ISO/IEC 14496-15:2022(E) - 5.4.2
pub struct AvcC {
    pub header: BoxHeader,
    pub avc_decoder_configuration_record: AVCDecoderConfigurationRecord,
}

impl AvcC {
    pub fn new(avc_decoder_configuration_record: AVCDecoderConfigurationRecord) -> Self {
        Self {
            header: BoxHeader::new(Self::NAME),
            avc_decoder_configuration_record,
        }
    }

    /// Fills the box in from one SPS and one PPS. The box size follows the
    /// parameter set lengths, so this has to happen before anything is sized.
    pub fn fill_in(sps: Bytes, pps: Bytes) -> io::Result<Self> {
        Ok(Self::new(AVCDecoderConfigurationRecord::from_parameter_sets(
            sps, pps,
        )?))
    }
}

impl BoxType for AvcC {
    const NAME: [u8; 4] = *b"avcC";

    fn demux(header: BoxHeader, data: Bytes) -> io::Result<Self> {
        let mut reader = io::Cursor::new(data);
        Ok(Self {
            header,
            avc_decoder_configuration_record: AVCDecoderConfigurationRecord::demux(&mut reader)?,
        })
    }

    fn primitive_size(&self) -> u64 {
        self.avc_decoder_configuration_record.size()
    }

    fn primitive_mux<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.avc_decoder_configuration_record.mux(writer)
    }

    fn validate(&self) -> io::Result<()> {
        self.avc_decoder_configuration_record.validate()
    }
}
