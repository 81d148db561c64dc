use std::io;

/// Copies exactly `N` bytes from the front of `src` into the front of `dest`.
///
/// Neither buffer needs any particular alignment. If either buffer is shorter
/// than `N` nothing is written and an `UnexpectedEof` error is returned.
/// Returns the number of bytes copied so callers can advance a cursor.
#[inline]
pub fn copy_packed<const N: usize>(dest: &mut [u8], src: &[u8]) -> io::Result<usize> {
    check_len(N, dest.len(), src.len())?;

    match N {
        1 => dest[0] = src[0],
        2 => dest[..2].copy_from_slice(&src[..2]),
        3 => {
            dest[..2].copy_from_slice(&src[..2]);
            dest[2] = src[2];
        }
        4 => dest[..4].copy_from_slice(&src[..4]),
        8 => dest[..8].copy_from_slice(&src[..8]),
        _ => copy_bytes(&mut dest[..N], &src[..N]),
    }

    Ok(N)
}

/// Copies exactly `len` bytes when the length is only known at runtime.
#[inline]
pub fn copy_exact(dest: &mut [u8], src: &[u8], len: usize) -> io::Result<usize> {
    check_len(len, dest.len(), src.len())?;
    copy_bytes(&mut dest[..len], &src[..len]);
    Ok(len)
}

#[inline]
fn copy_bytes(dest: &mut [u8], src: &[u8]) {
    // 16 byte blocks first, then the tail.
    let mut dest_blocks = dest.chunks_exact_mut(16);
    let mut src_blocks = src.chunks_exact(16);
    for (d, s) in (&mut dest_blocks).zip(&mut src_blocks) {
        d.copy_from_slice(s);
    }

    for (d, s) in dest_blocks
        .into_remainder()
        .iter_mut()
        .zip(src_blocks.remainder())
    {
        *d = *s;
    }
}

#[inline]
fn check_len(len: usize, dest: usize, src: usize) -> io::Result<()> {
    if dest < len || src < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("packed copy of {len} bytes (dest {dest}, src {src})"),
        ));
    }

    Ok(())
}
