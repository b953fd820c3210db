pub mod codec;
pub mod intervals;
