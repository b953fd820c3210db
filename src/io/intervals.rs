use bitvec::prelude::*;
use itertools::Itertools;


// half-open [left, right)
pub type Interval = (usize, usize);

/// Bit-per-offset view over `[0, len)`, one flag per offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseIntervals {
  flags: BitVec,
}

impl DenseIntervals {
  pub fn empty(size: usize) -> DenseIntervals {
    DenseIntervals {
      flags: BitVec::<usize, Lsb0>::repeat(false, size),
    }
  }

  pub fn full(size: usize) -> DenseIntervals {
    DenseIntervals {
      flags: BitVec::<usize, Lsb0>::repeat(true, size),
    }
  }

  pub fn len(&self) -> usize {
    self.flags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.flags.is_empty()
  }

  // smallest interval covering every unset offset within the given one
  pub fn missing(&self, interval: &Interval) -> Option<Interval> {
    let slice = &self.flags[interval.0 .. interval.1];
    slice.first_zero()
      .zip(slice.last_zero())
      .map(|(missing_left, missing_right)| {
        (missing_left + interval.0, missing_right + 1 + interval.0)
      })
  }

  pub fn is_filled(&self, interval: &Interval) -> bool {
    self.flags[interval.0 .. interval.1].all()
  }

  pub fn fill(&mut self, interval: &Interval) {
    self.flags[interval.0 .. interval.1].fill(true);
  }

  pub fn clear(&mut self, interval: &Interval) {
    self.flags[interval.0 .. interval.1].fill(false);
  }

  pub fn used_size(&self) -> usize {
    self.flags.count_ones()
  }

  /// Collapses runs of set offsets into `(start, length)` pairs, in order.
  pub fn used_regions(&self) -> Vec<(usize, usize)> {
    self.flags.iter_ones()
      .map(|offset| (offset, 1))
      .coalesce(|(start, length), (offset, unit)| {
        if start + length == offset {
          Ok((start, length + unit))
        } else {
          Err(((start, length), (offset, unit)))
        }
      })
      .collect()
  }
}
