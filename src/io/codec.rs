use byteorder::ByteOrder;
use byteorder::LittleEndian;
use itertools::Itertools;

use crate::common::error::GenericError;
use crate::common::error::GResult;
use crate::common::error::MalformedInput;
use crate::common::error::UnsupportedMode;


/* Layout: [mode: 1 byte] [offset: width bytes]* */

pub const MODE_LENGTH: usize = 1;
pub const MIN_RECORDS_LENGTH: usize = 3;
pub const SUPPORTED_MODES: [u8; 4] = [0, 1, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthMode {
  U8 = 0,
  U16 = 1,
  U32 = 2,
  U64 = 3,
}

impl WidthMode {
  // narrowest width that still holds max_offset
  pub fn for_extent(max_offset: usize) -> WidthMode {
    let max_offset = max_offset as u64;
    if max_offset <= u8::MAX as u64 {
      WidthMode::U8
    } else if max_offset <= u16::MAX as u64 {
      WidthMode::U16
    } else if max_offset <= u32::MAX as u64 {
      WidthMode::U32
    } else {
      WidthMode::U64
    }
  }

  pub fn from_code(code: u8) -> GResult<WidthMode> {
    match code {
      0 => Ok(WidthMode::U8),
      1 => Ok(WidthMode::U16),
      2 => Ok(WidthMode::U32),
      3 => Ok(WidthMode::U64),
      _ => Err(UnsupportedMode::boxed(code, &SUPPORTED_MODES)),
    }
  }

  pub fn code(&self) -> u8 {
    *self as u8
  }

  pub fn width(&self) -> usize {
    match self {
      WidthMode::U8 => 1,
      WidthMode::U16 => 2,
      WidthMode::U32 => 4,
      WidthMode::U64 => 8,
    }
  }
}


/* Boundary sequence codec */

/// Packs ascending boundary offsets behind a mode byte chosen from `max_offset`.
///
/// Every offset must be at most `max_offset`.
pub fn encode_boundaries<I>(max_offset: usize, offsets: I) -> Vec<u8>
where
  I: ExactSizeIterator<Item = usize>,
{
  let mode = WidthMode::for_extent(max_offset);
  let width = mode.width();
  let mut buffer = vec![0u8; MODE_LENGTH + offsets.len() * width];
  buffer[0] = mode.code();
  for (record, offset) in buffer[MODE_LENGTH..].chunks_exact_mut(width).zip(offsets) {
    LittleEndian::write_uint(record, offset as u64, width);
  }
  log::trace!("Encoded boundaries in {:?} mode into {} bytes", mode, buffer.len());
  buffer
}

/// Unpacks boundary offsets written by [`encode_boundaries`].
///
/// The result always has an even number of strictly ascending offsets, so
/// marker kinds can be recovered from position parity. A lone mode byte
/// decodes to no boundaries.
pub fn decode_boundaries(buffer: &[u8]) -> GResult<Vec<usize>> {
  // an empty map serializes to its mode byte alone
  if buffer.len() == MODE_LENGTH {
    WidthMode::from_code(buffer[0])?;
    return Ok(Vec::new());
  }
  if buffer.len() < MIN_RECORDS_LENGTH {
    return Err(reject(buffer, "too short to hold a boundary pair"));
  }
  let mode = WidthMode::from_code(buffer[0])?;
  let width = mode.width();

  let records = &buffer[MODE_LENGTH..];
  if records.len() % width != 0 {
    return Err(reject(buffer, "trailing bytes after the last record"));
  }
  let offsets = records.chunks_exact(width)
    .map(|record| usize::try_from(LittleEndian::read_uint(record, width)))
    .collect::<Result<Vec<usize>, _>>()
    .map_err(|_| reject(buffer, "offset exceeds native width"))?;

  if offsets.len() % 2 != 0 {
    return Err(reject(buffer, "odd number of boundaries"));
  }
  if offsets.iter().tuple_windows().any(|(left, right)| left >= right) {
    return Err(reject(buffer, "boundaries not strictly ascending"));
  }
  log::trace!("Decoded {} boundaries in {:?} mode", offsets.len(), mode);
  Ok(offsets)
}

fn reject(buffer: &[u8], reason: &str) -> GenericError {
  log::debug!("Rejected {} bytes of boundaries: {}", buffer.len(), reason);
  MalformedInput::boxed(buffer.len(), reason)
}
