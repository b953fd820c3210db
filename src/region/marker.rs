/* Boundary marker kinds */

/// Kind of a boundary: `Begin` opens a used region, `End` closes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
  Begin,
  End,
}

impl Mark {
  // kinds alternate from Begin, so position alone recovers the kind
  pub fn from_parity(idx: usize) -> Mark {
    if idx % 2 == 0 { Mark::Begin } else { Mark::End }
  }

  pub fn is_begin(&self) -> bool {
    *self == Mark::Begin
  }
}
