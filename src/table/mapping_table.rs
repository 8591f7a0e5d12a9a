// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use crate::mapping::Mapping;
use crate::table::BLOCK_BITS;
use crate::table::BLOCK_SIZE;
use crate::table::MappingTableBuilder;
use crate::table::NO_MAPPING;

/// Slot pattern backing every empty block. Constructed once for the whole
/// process and never written through.
static EMPTY_SLOTS: [u32; BLOCK_SIZE] = [NO_MAPPING; BLOCK_SIZE];

/// One 256-slot segment of a mapping table.
///
/// An entry is either the shared empty block or an owned block holding at
/// least one mapping. Every `Empty` entry reads from the same static slot
/// pattern, which is what keeps wide but sparse tables small.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// No slot in this segment holds a mapping.
    Empty,
    /// This segment owns its slots; unset slots hold [`NO_MAPPING`].
    Populated(Box<[u32; BLOCK_SIZE]>),
}

impl Block {
    /// Returns the destination slots of this block.
    ///
    /// For `Empty` entries this is the shared slot pattern: every empty
    /// block in every table reads from the same storage.
    pub fn slots(&self) -> &[u32; BLOCK_SIZE] {
        match self {
            Block::Empty => &EMPTY_SLOTS,
            Block::Populated(slots) => slots,
        }
    }

    /// Returns true if this entry is the shared empty block.
    pub fn is_empty(&self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Transitions an `Empty` entry into an owned block by copying the
    /// shared slot pattern, then returns its slots for writing. The shared
    /// pattern itself is never written through.
    pub(super) fn materialize(&mut self) -> &mut [u32; BLOCK_SIZE] {
        if self.is_empty() {
            *self = Block::Populated(Box::new(EMPTY_SLOTS));
        }
        match self {
            Block::Populated(slots) => slots,
            Block::Empty => unreachable!("materialized block must be populated"),
        }
    }
}

/// An immutable two-level code point mapping table.
///
/// A table is built once from a finite mapping sequence by
/// [`MappingTableBuilder`] and then only queried with
/// [`lookup`](Self::lookup). It keeps one [`Block`] entry for every block
/// index between the lowest and highest touched block, interior empty
/// blocks included, so a block is always addressed by position.
///
/// # Examples
///
/// ```
/// use charmap::mapping::Mapping;
/// use charmap::table::MappingTable;
///
/// let table = MappingTable::from_mappings(&[Mapping::new(0xC4, 0xE4)]).unwrap();
///
/// assert_eq!(table.lookup(0xC4), Some(0xE4));
/// assert_eq!(table.lookup(0xC5), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    point_start: u32,
    point_end: u32,
    block_start: u32,
    block_end: u32,
    blocks: Vec<Block>,
}

impl MappingTable {
    pub(super) fn from_parts(
        point_start: u32,
        point_end: u32,
        block_start: u32,
        block_end: u32,
        blocks: Vec<Block>,
    ) -> Self {
        Self {
            point_start,
            point_end,
            block_start,
            block_end,
            blocks,
        }
    }

    /// Creates a builder for mapping tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use charmap::mapping::Mapping;
    /// use charmap::table::MappingTable;
    ///
    /// let mut builder = MappingTable::builder();
    /// builder.insert(Mapping::new(0x41, 0x61)).unwrap();
    /// let table = builder.build();
    /// assert_eq!(table.lookup(0x41), Some(0x61));
    /// ```
    pub fn builder() -> MappingTableBuilder {
        MappingTableBuilder::default()
    }

    /// Builds a table from a mapping slice, in order.
    ///
    /// Duplicate sources resolve last-write-wins. An empty slice yields an
    /// empty table.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ReservedDestination`](crate::error::ErrorKind::ReservedDestination)
    /// if any destination equals [`NO_MAPPING`].
    pub fn from_mappings(mappings: &[Mapping]) -> Result<Self, Error> {
        let mut builder = MappingTableBuilder::new();
        for &mapping in mappings {
            builder.insert(mapping)?;
        }
        Ok(builder.build())
    }

    /// Looks up the destination for `point`.
    ///
    /// Returns `None` when the table holds no mapping for `point`. The
    /// query is O(1): points outside the table's bounds are rejected
    /// before any block is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use charmap::mapping::Mapping;
    /// use charmap::table::MappingTable;
    ///
    /// let table = MappingTable::from_mappings(&[
    ///     Mapping::new(0x41, 0x61),
    ///     Mapping::new(0x1F600, 0x1F600),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.lookup(0x41), Some(0x61));
    /// assert_eq!(table.lookup(0x40), None); // below the lowest source
    /// assert_eq!(table.lookup(0x4100), None); // interior empty block
    /// ```
    pub fn lookup(&self, point: u32) -> Option<u32> {
        if self.blocks.is_empty() {
            return None;
        }
        if point < self.point_start || point > self.point_end {
            return None;
        }
        let block_index = point >> BLOCK_BITS;
        if block_index < self.block_start || block_index > self.block_end {
            return None;
        }
        let slots = self.blocks[(block_index - self.block_start) as usize].slots();
        let destination = slots[point as usize & (BLOCK_SIZE - 1)];
        if destination == NO_MAPPING {
            None
        } else {
            Some(destination)
        }
    }

    /// Returns true if the table holds no mappings.
    ///
    /// The bounds of an empty table are meaningless and must not be used.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the lowest source code point in the table.
    pub fn point_start(&self) -> u32 {
        self.point_start
    }

    /// Returns the highest source code point in the table.
    pub fn point_end(&self) -> u32 {
        self.point_end
    }

    /// Returns the block index of the first table entry.
    pub fn block_start(&self) -> u32 {
        self.block_start
    }

    /// Returns the block index of the last table entry.
    pub fn block_end(&self) -> u32 {
        self.block_end
    }

    /// Returns the table's blocks, one per block index from
    /// [`block_start`](Self::block_start) to [`block_end`](Self::block_end)
    /// inclusive.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the number of block entries, interior empty blocks included.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the number of owned, populated blocks.
    pub fn num_populated_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_empty()).count()
    }

    /// Returns the number of mappings stored, duplicates collapsed.
    pub fn num_mappings(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| b.slots().iter().filter(|&&slot| slot != NO_MAPPING).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entries_share_one_storage() {
        let a = Block::Empty;
        let b = Block::Empty;
        assert!(std::ptr::eq(a.slots(), b.slots()));
        assert!(a.slots().iter().all(|&slot| slot == NO_MAPPING));
    }

    #[test]
    fn test_materialize_copies_the_shared_pattern() {
        let mut block = Block::Empty;
        let slots = block.materialize();
        assert!(slots.iter().all(|&slot| slot == NO_MAPPING));
        slots[0x41] = 0x61;

        assert!(!block.is_empty());
        assert_eq!(block.slots()[0x41], 0x61);
        // The shared pattern is untouched by writes to the owned copy.
        assert_eq!(Block::Empty.slots()[0x41], NO_MAPPING);
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let mut block = Block::Empty;
        block.materialize()[7] = 0x100;
        block.materialize()[8] = 0x200;
        assert_eq!(block.slots()[7], 0x100);
        assert_eq!(block.slots()[8], 0x200);
    }
}
