use std::{
    fs::File,
    io::{self, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use mp4::{
    boxes::{
        header::HEADER_SIZE,
        types::{ftyp::Ftyp, mdat::Mdat, wide::Wide},
    },
    BoxType,
};

use crate::{
    error::{MovFileError, Result},
    movie::MovieContainer,
};

/// `ftyp` (28) + `wide` (8) + `mdat` header (8).
pub const DATA_OFFSET: u64 = 44;

/// Writes `ftyp`, `wide` and an empty `mdat` header.
///
/// `wide` reserves the room a 16 byte `mdat` header needs, so the media
/// data always starts at [`DATA_OFFSET`].
pub fn write_head<W: Write>(writer: &mut W) -> io::Result<()> {
    Ftyp::movie().mux(writer)?;
    Wide::new().mux(writer)?;
    Mdat::mux_header(writer, 0, false)?;
    Ok(())
}

pub fn head_size() -> u64 {
    Ftyp::movie().size() + Wide::new().size() + HEADER_SIZE
}

/// Rewrites the `mdat` header for `data_len` bytes and leaves the writer at
/// the end of the media data.
///
/// A 16 byte header is written over `wide`, an 8 byte one keeps it.
pub fn patch_mdat<W: Write + Seek>(writer: &mut W, data_len: u64, large: bool) -> io::Result<()> {
    let header_size = Mdat::header_size(data_len, large);

    writer.seek(SeekFrom::Start(DATA_OFFSET - header_size))?;
    Mdat::mux_header(writer, data_len, large)?;
    writer.seek(SeekFrom::Start(DATA_OFFSET + data_len))?;

    Ok(())
}

/// Appends the movie box after the media data.
pub fn finish_at_end(
    file: &mut File,
    movie: &MovieContainer,
    data_len: u64,
    large: bool,
) -> Result<()> {
    patch_mdat(file, data_len, large)?;

    let mut writer = BufWriter::new(&mut *file);
    movie.mux(&mut writer)?;
    writer.flush()?;
    drop(writer);

    // A retried append may have left bytes past the end.
    let end = file.stream_position()?;
    file.set_len(end)?;
    file.sync_all()?;

    Ok(())
}

/// Rewrites the file as `ftyp`, `moov`, `mdat` next to `dest` and moves it
/// into place.
///
/// The chunk offsets are shifted once the final size of the movie box is
/// known, after their width has been settled.
pub fn finish_at_front(
    source: &mut File,
    dest: &Path,
    movie: &mut MovieContainer,
    data_len: u64,
    large: bool,
) -> Result<()> {
    let ftyp = Ftyp::movie();
    let mdat_header = Mdat::header_size(data_len, large);

    let shift_for = |movie: &MovieContainer| -> Result<u64> {
        (ftyp.size() + movie.size() + mdat_header)
            .checked_sub(DATA_OFFSET)
            .ok_or_else(|| {
                MovFileError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "movie box is smaller than the head it replaces",
                ))
            })
    };

    let mut shift = shift_for(movie)?;
    let max_offset = movie
        .chunk_offsets()
        .and_then(|offsets| offsets.offsets().into_iter().max())
        .unwrap_or(0);

    if max_offset.saturating_add(shift) > u32::MAX as u64 {
        movie.widen_chunk_offsets()?;
        shift = shift_for(movie)?;
    }

    movie.update_offset(shift)?;

    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".movfile")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        ftyp.mux(&mut writer)?;
        movie.mux(&mut writer)?;
        Mdat::mux_header(&mut writer, data_len, large)?;

        source.seek(SeekFrom::Start(DATA_OFFSET))?;
        let copied = io::copy(&mut (&mut *source).take(data_len), &mut writer)?;
        if copied != data_len {
            return Err(MovFileError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("media data is {copied} bytes, expected {data_len}"),
            )));
        }

        writer.flush()?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|err| MovFileError::Io(err.error))?;

    Ok(())
}
