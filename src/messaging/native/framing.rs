//! Length-prefixed frames: a 4-byte native-endian length, then the payload.

use std::io::{self, Read, Write};
use thiserror::Error;

/// Largest inbound frame accepted.
pub const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;

/// Largest frame the browser accepts from a native host.
pub const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

/// Errors from reading or writing frames.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("frame truncated after {read} of {expected} bytes")]
    Truncated { read: usize, expected: usize },

    #[error("frame of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

/// Reads one frame.
///
/// Returns `Ok(None)` on a clean end of input. Oversized frames are skipped
/// and reported as [`FrameError::TooLarge`], leaving the stream positioned at
/// the next frame.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError> {
    let mut header = [0u8; 4];
    match fill(reader, &mut header)? {
        0 => return Ok(None),
        4 => {}
        read => return Err(FrameError::Truncated { read, expected: 4 }),
    }

    let size = u32::from_ne_bytes(header) as usize;
    if size > MAX_INBOUND_FRAME {
        io::copy(&mut reader.by_ref().take(size as u64), &mut io::sink())?;
        return Err(FrameError::TooLarge {
            size,
            limit: MAX_INBOUND_FRAME,
        });
    }

    let mut payload = vec![0u8; size];
    let read = fill(reader, &mut payload)?;
    if read < size {
        return Err(FrameError::Truncated {
            read,
            expected: size,
        });
    }
    Ok(Some(payload))
}

/// Writes one frame and flushes.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), FrameError> {
    if payload.len() > MAX_OUTBOUND_FRAME {
        return Err(FrameError::TooLarge {
            size: payload.len(),
            limit: MAX_OUTBOUND_FRAME,
        });
    }
    let size = payload.len() as u32;
    writer.write_all(&size.to_ne_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Reads until `buf` is full or input ends; returns the bytes read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
