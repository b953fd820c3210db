// roughly in abstraction order
pub mod common;
pub mod io;
pub mod region;
pub mod db;
