pub type OffsetT = usize;

// (start, length)
pub type Region = (OffsetT, OffsetT);

pub mod marker;
pub mod region_map;
