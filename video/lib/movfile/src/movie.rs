use std::io;

use mp4::{
    boxes::types::{
        co64::Co64,
        edts::Edts,
        elst::Elst,
        hdlr::Hdlr,
        mdhd::Mdhd,
        mdia::Mdia,
        minf::Minf,
        moov::Moov,
        mvhd::Mvhd,
        stbl::{ChunkOffsetBox, Stbl},
        stsc::Stsc,
        stsd::Stsd,
        stsz::Stsz,
        stts::Stts,
        tkhd::Tkhd,
        trak::Trak,
    },
    BoxType,
};

use crate::{
    error::{MovFileError, Result},
    track::SampleTables,
};

const TRACK_ID: u32 = 1;

/// Everything the movie box is built from besides the sample tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieParams {
    /// Seconds since 1904-01-01.
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub frame_rate: u32,
    /// In timescale units.
    pub duration: u64,
    pub width: u16,
    pub height: u16,
}

/// The `moov` box of a single video track movie.
///
/// Built with empty sample tables, filled exactly once with
/// [`install_tables`](Self::install_tables), then serialized.
#[derive(Debug, Clone)]
pub struct MovieContainer {
    params: MovieParams,
    moov: Moov,
    tables_installed: bool,
    offsets_shifted: bool,
}

impl MovieContainer {
    pub fn new(params: MovieParams) -> Self {
        let MovieParams {
            creation_time,
            modification_time,
            timescale,
            duration,
            width,
            height,
            ..
        } = params;

        let empty_stbl = Stbl::new(
            Stsd::new(Vec::new()),
            Stts::new(Vec::new()),
            None,
            Stsc::new(Vec::new()),
            Stsz::per_sample(Vec::new()),
            ChunkOffsetBox::from_offsets(Vec::new()),
        );

        let trak = Trak::new(
            Tkhd::new(
                creation_time,
                modification_time,
                TRACK_ID,
                duration,
                width,
                height,
            ),
            Some(Edts::new(Some(Elst::single(duration)))),
            Mdia::new(
                Mdhd::new(creation_time, modification_time, timescale, duration),
                Hdlr::video(),
                Minf::new(empty_stbl),
            ),
        );

        let moov = Moov::new(
            Mvhd::new(
                creation_time,
                modification_time,
                timescale,
                duration,
                TRACK_ID + 1,
            ),
            vec![trak],
        );

        Self {
            params,
            moov,
            tables_installed: false,
            offsets_shifted: false,
        }
    }

    pub fn params(&self) -> &MovieParams {
        &self.params
    }

    pub fn moov(&self) -> &Moov {
        &self.moov
    }

    fn stbl_mut(&mut self) -> Result<&mut Stbl> {
        self.moov
            .traks
            .first_mut()
            .map(|trak| &mut trak.mdia.minf.stbl)
            .ok_or_else(|| {
                MovFileError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "movie has no track",
                ))
            })
    }

    pub fn chunk_offsets(&self) -> Option<&ChunkOffsetBox> {
        self.moov
            .traks
            .first()
            .map(|trak| &trak.mdia.minf.stbl.chunk_offsets)
    }

    pub fn install_tables(&mut self, tables: SampleTables) -> Result<()> {
        if self.tables_installed {
            return Err(MovFileError::InvalidState {
                operation: "install sample tables",
                state: "already populated",
            });
        }

        let stbl = self.stbl_mut()?;
        stbl.stsd = tables.stsd;
        stbl.stts = tables.stts;
        stbl.stss = tables.stss;
        stbl.stsc = tables.stsc;
        stbl.stsz = tables.stsz;
        stbl.chunk_offsets = tables.chunk_offsets;

        self.tables_installed = true;
        Ok(())
    }

    /// Switches the chunk offsets to `co64`.
    pub fn widen_chunk_offsets(&mut self) -> Result<()> {
        let stbl = self.stbl_mut()?;
        if let ChunkOffsetBox::Stco(_) = stbl.chunk_offsets {
            stbl.chunk_offsets = ChunkOffsetBox::Co64(Co64::new(stbl.chunk_offsets.offsets()));
        }

        Ok(())
    }

    /// Adds `shift` to every chunk offset. Allowed once per movie; the table
    /// is left untouched if any shifted offset would not fit.
    pub fn update_offset(&mut self, shift: u64) -> Result<()> {
        if self.offsets_shifted {
            return Err(MovFileError::OffsetAlreadyApplied);
        }

        self.stbl_mut()?.chunk_offsets.update_offset(shift)?;
        self.offsets_shifted = true;

        Ok(())
    }

    /// Full size of the `moov` box.
    pub fn size(&self) -> u64 {
        self.moov.size()
    }

    pub fn mux<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        if !self.tables_installed {
            return Err(MovFileError::InvalidState {
                operation: "write the movie box",
                state: "missing sample tables",
            });
        }

        self.moov.mux(writer)?;
        Ok(())
    }
}
