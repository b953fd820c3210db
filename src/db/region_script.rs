use sscanf::scanf;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::common::error::GResult;
use crate::common::error::MalformedScript;
use crate::region::OffsetT;
use crate::region::region_map::RegionMap;


/* Operations */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionOp {
  MarkUsed { start: OffsetT, length: OffsetT },
  MarkUnused { start: OffsetT, length: OffsetT },
  Query { start: OffsetT, length: OffsetT },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryOutcome {
  pub start: OffsetT,
  pub length: OffsetT,
  pub used: bool,
}

const DEMO_SCRIPT: &str = "\
# carve a hole, then grow a merged region and punch two single offsets
used 0 10
unused 2 5
used 20 30
used 50 20
unused 33
unused 66
query 11 8
";

pub fn demo_script() -> &'static str {
  DEMO_SCRIPT
}


/* Parsing */

/// One operation per line: `used|unused|query <start> [<length>]`, where the
/// length defaults to 1. Blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> GResult<Vec<RegionOp>> {
  let mut ops = Vec::new();
  for (idx, line) in script.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    match parse_line(line) {
      Some(op) => ops.push(op),
      None => {
        log::debug!("Rejected script line {}: {:?}", idx + 1, line);
        return Err(MalformedScript::boxed(idx + 1, line));
      }
    }
  }
  Ok(ops)
}

fn parse_line(line: &str) -> Option<RegionOp> {
  let (verb, operands) = line.split_once(' ')?;
  let operands = operands.trim();
  let (start, length) = scanf!(operands, "{} {}", OffsetT, OffsetT)
    .or_else(|| operands.parse::<OffsetT>().ok().map(|start| (start, 1)))?;
  // the range end must fit the offset space
  start.checked_add(length)?;
  match verb {
    "used" => Some(RegionOp::MarkUsed { start, length }),
    "unused" => Some(RegionOp::MarkUnused { start, length }),
    "query" => Some(RegionOp::Query { start, length }),
    _ => None,
  }
}


/* Replay */

pub fn replay(ops: &[RegionOp], region_map: &mut RegionMap) -> Vec<QueryOutcome> {
  let mut outcomes = Vec::new();
  for op in ops {
    match *op {
      RegionOp::MarkUsed { start, length } => region_map.mark_as_used(start, length),
      RegionOp::MarkUnused { start, length } => region_map.mark_as_unused(start, length),
      RegionOp::Query { start, length } => outcomes.push(QueryOutcome {
        start,
        length,
        used: region_map.is_used(start, length),
      }),
    }
  }
  log::trace!("Replayed {} operations into {} regions", ops.len(), region_map.num_regions());
  outcomes
}


/* Persistence */

pub fn write_encoding(path: &Path, region_map: &RegionMap) -> GResult<usize> {
  let buffer = region_map.serialize();
  let mut encoding_file = OpenOptions::new()
    .create(true)
    .write(true)
    .truncate(true)
    .open(path)?;
  encoding_file.write_all(&buffer)?;
  Ok(buffer.len())
}

pub fn read_encoding(path: &Path) -> GResult<RegionMap> {
  let buffer = std::fs::read(path)?;
  RegionMap::from_bytes(&buffer)
}
