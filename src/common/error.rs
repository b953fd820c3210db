use derive_more::Display;
use std::error::Error;

pub type GenericError = Box<dyn Error + Send + Sync>;
pub type GResult<T> = Result<T, GenericError>;


/* Codec errors */

#[derive(Display, Debug, Clone)]
#[display(fmt = "Malformed region map buffer of {} bytes, due to {}", length, reason)]
pub struct MalformedInput {
  length: usize,
  reason: String,
}
impl MalformedInput {
  pub fn boxed(length: usize, reason: &str) -> GenericError {
    Box::new(MalformedInput { length, reason: reason.to_string() })
  }

  pub fn length(&self) -> usize {
    self.length
  }
}
impl Error for MalformedInput {}


#[derive(Display, Debug, Clone)]
#[display(fmt = "Requested width mode {}, only {:?} supported", mode, supported)]
pub struct UnsupportedMode {
  mode: u8,
  supported: Vec<u8>,
}
impl UnsupportedMode {
  pub fn boxed(mode: u8, supported: &[u8]) -> GenericError {
    Box::new(UnsupportedMode { mode, supported: supported.to_vec() })
  }

  pub fn mode(&self) -> u8 {
    self.mode
  }
}
impl Error for UnsupportedMode {}


/* Scripts */

#[derive(Display, Debug, Clone)]
#[display(fmt = "Failed to parse script line {}: \"{}\"", line_number, line)]
pub struct MalformedScript {
  line_number: usize,
  line: String,
}
impl MalformedScript {
  pub fn boxed(line_number: usize, line: &str) -> GenericError {
    Box::new(MalformedScript { line_number, line: line.to_string() })
  }

  pub fn line_number(&self) -> usize {
    self.line_number
  }
}
impl Error for MalformedScript {}
