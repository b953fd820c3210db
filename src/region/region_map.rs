use itertools::Itertools;
use std::collections::BTreeMap;

use crate::common::error::GResult;
use crate::io::codec;
use crate::io::intervals::DenseIntervals;
use crate::region::marker::Mark;
use crate::region::OffsetT;
use crate::region::Region;


/// Used/unused bookkeeping over an unbounded offset space.
///
/// Used offsets are kept as sorted boundary markers that alternate
/// `Begin, End, Begin, End, ...`. Each `(Begin, End)` pair is one maximal
/// used region `[begin, end)`; regions never touch or overlap, so the marker
/// sequence is canonical for a given set of used offsets.
///
/// Callers must ensure `start + length` does not overflow [`OffsetT`].
/// Concurrent mutation needs external locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMap {
  boundaries: BTreeMap<OffsetT, Mark>,
  max_offset: OffsetT,  // high-water mark of any mutated end offset
}

impl RegionMap {
  pub fn new() -> RegionMap {
    RegionMap {
      boundaries: BTreeMap::new(),
      max_offset: 0,
    }
  }

  pub fn from_bytes(buffer: &[u8]) -> GResult<RegionMap> {
    let mut region_map = RegionMap::new();
    region_map.deserialize(buffer)?;
    Ok(region_map)
  }

  pub fn is_empty(&self) -> bool {
    self.boundaries.is_empty()
  }

  pub fn num_regions(&self) -> usize {
    self.boundaries.len() / 2
  }

  pub fn max_offset(&self) -> OffsetT {
    self.max_offset
  }

  pub fn boundaries(&self) -> impl Iterator<Item = (OffsetT, Mark)> + '_ {
    self.boundaries.iter().map(|(offset, mark)| (*offset, *mark))
  }


  /* Mutation */

  /// Marks `[start, start + length)` as used, merging with any region it
  /// touches or overlaps.
  pub fn mark_as_used(&mut self, start: OffsetT, length: OffsetT) {
    self.paint(start, length, Mark::Begin);
  }

  pub fn mark_offset_as_used(&mut self, offset: OffsetT) {
    self.mark_as_used(offset, 1);
  }

  /// Marks `[start, start + length)` as unused, shrinking or splitting any
  /// region that overlaps it.
  pub fn mark_as_unused(&mut self, start: OffsetT, length: OffsetT) {
    self.paint(start, length, Mark::End);
  }

  pub fn mark_offset_as_unused(&mut self, offset: OffsetT) {
    self.mark_as_unused(offset, 1);
  }

  // `opening` is the marker that would start the painted range: Begin paints
  // used, End paints unused.
  fn paint(&mut self, start: OffsetT, length: OffsetT, opening: Mark) {
    let end = start + length;
    if length > 0 {
      // what governs the offsets right outside the range, before any change
      let outer_left = self.governing_before(start);
      let outer_right = self.governing_at(end);

      // everything within [start, end] is enclosed by the painted range
      let enclosed: Vec<OffsetT> = self.boundaries.range(start ..= end)
        .map(|(offset, _mark)| *offset)
        .collect();
      for offset in &enclosed {
        self.boundaries.remove(offset);
      }

      // keep an edge only where the state flips, otherwise neighbours merge
      if outer_left != opening {
        self.boundaries.insert(start, opening);
      }
      if outer_right != opening {
        self.boundaries.insert(end, outer_right);
      }
      log::trace!(
        "Painted [{}, {}) with {:?}, dropped {} enclosed boundaries, now {} boundaries",
        start,
        end,
        opening,
        enclosed.len(),
        self.boundaries.len(),
      );
    }

    if end > self.max_offset {
      self.max_offset = end;
    }
  }

  // marker in effect at offset - 1; End stands for "nothing used yet"
  fn governing_before(&self, offset: OffsetT) -> Mark {
    self.boundaries.range(.. offset)
      .next_back()
      .map_or(Mark::End, |(_offset, mark)| *mark)
  }

  // marker in effect at offset
  fn governing_at(&self, offset: OffsetT) -> Mark {
    self.boundaries.range(..= offset)
      .next_back()
      .map_or(Mark::End, |(_offset, mark)| *mark)
  }


  /* Queries */

  /// Whether every offset in `[start, start + length)` is used. An empty
  /// range is trivially covered.
  pub fn is_used(&self, start: OffsetT, length: OffsetT) -> bool {
    if length == 0 {
      return true;
    }
    let end = start + length;
    // start must sit in a region whose End is not before end
    self.governing_at(start).is_begin()
      && self.boundaries.range(start + 1 .. end).next().is_none()
  }

  pub fn is_offset_used(&self, offset: OffsetT) -> bool {
    self.is_used(offset, 1)
  }

  pub fn used_regions(&self) -> Vec<Region> {
    self.boundaries.keys()
      .tuples::<(_, _)>()
      .map(|(begin, end)| (*begin, end - begin))
      .collect()
  }

  /// Gaps between consecutive used regions. When `extent` exceeds
  /// [`max_offset`](Self::max_offset), also a trailing gap from the last
  /// boundary (or zero) up to `extent`.
  pub fn unused_regions(&self, extent: OffsetT) -> Vec<Region> {
    let mut gaps: Vec<Region> = self.boundaries.keys()
      .skip(1)
      .tuples::<(_, _)>()
      .map(|(end, begin)| (*end, begin - end))
      .collect();
    if extent > self.max_offset {
      let last_offset = self.boundaries.keys().next_back().copied().unwrap_or(0);
      gaps.push((last_offset, extent - last_offset));
    }
    gaps
  }

  pub fn used_size(&self) -> OffsetT {
    self.boundaries.keys()
      .tuples::<(_, _)>()
      .map(|(begin, end)| end - begin)
      .sum()
  }

  pub fn to_dense(&self, extent: OffsetT) -> DenseIntervals {
    let mut dense = DenseIntervals::empty(extent);
    for (start, length) in self.used_regions() {
      let end = std::cmp::min(start + length, extent);
      if start < end {
        dense.fill(&(start, end));
      }
    }
    dense
  }


  /* Serialization */

  pub fn serialize(&self) -> Vec<u8> {
    codec::encode_boundaries(self.max_offset, self.boundaries.keys().copied())
  }

  /// Replaces the whole map with the decoded buffer. On error the map is
  /// left untouched.
  pub fn deserialize(&mut self, buffer: &[u8]) -> GResult<()> {
    let offsets = codec::decode_boundaries(buffer)?;
    let max_offset = offsets.last().copied().unwrap_or(0);
    self.boundaries = offsets.into_iter()
      .enumerate()
      .map(|(idx, offset)| (offset, Mark::from_parity(idx)))
      .collect();
    self.max_offset = max_offset;
    Ok(())
  }
}
