use serde::Serialize;
use std::path::Path;
use structopt::StructOpt;

use regionmap::common::error::GResult;
use regionmap::db::region_script;
use regionmap::region::region_map::RegionMap;


/* Parsed arguments */

#[derive(Debug, Serialize, StructOpt)]
pub struct Cli {
  /// path to an operation script, runs the built-in scenario if absent
  #[structopt(long)]
  script_path: Option<String>,
  /// extent passed to the unused region listing
  #[structopt(long, default_value = "70")]
  unused_extent: usize,
  /// path to write the serialized regions
  #[structopt(long)]
  out_path: Option<String>,
}


fn main_guarded() -> GResult<()> {
  // execution init
  env_logger::init();

  // parse args
  let args = Cli::from_args();
  println!("{:?}", args);

  // replay operations
  let script = match &args.script_path {
    Some(script_path) => std::fs::read_to_string(script_path)?,
    None => region_script::demo_script().to_string(),
  };
  let ops = region_script::parse_script(&script)?;
  let mut region_map = RegionMap::new();
  let outcomes = region_script::replay(&ops, &mut region_map);

  // round trip through the encoding
  let buffer = region_map.serialize();
  println!("Serialized size: {}", buffer.len());
  if let Some(out_path) = &args.out_path {
    region_script::write_encoding(Path::new(out_path), &region_map)?;
    println!("Wrote serialized regions at {}", out_path);
  }
  let restored = RegionMap::from_bytes(&buffer)?;

  for outcome in &outcomes {
    println!("Query offset: {}, length: {} -> used= {}", outcome.start, outcome.length, outcome.used);
  }
  println!("Used:");
  for (offset, length) in restored.used_regions() {
    println!("\toffset: {}, length: {}", offset, length);
  }
  println!("Unused:");
  for (offset, length) in restored.unused_regions(args.unused_extent) {
    println!("\toffset: {}, length: {}", offset, length);
  }
  println!("Max offset: {}", restored.max_offset());
  println!("Total used size: {}", restored.used_size());
  Ok(())
}

fn main() {
  main_guarded().expect("Error occur during region demo");
}
