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
use crate::error::ErrorKind;
use crate::mapping::Mapping;
use crate::table::BLOCK_BITS;
use crate::table::BLOCK_SIZE;
use crate::table::Block;
use crate::table::MappingTable;
use crate::table::NO_MAPPING;

/// An accumulating builder for [`MappingTable`].
///
/// Mappings are inserted one at a time and the finished table is taken
/// with [`build`](Self::build). Until a block receives its first mapping
/// the builder keeps it as the shared empty block, so inserting a handful
/// of scattered mappings stays cheap no matter how far apart they land.
///
/// Inserting the same source twice overwrites the earlier destination.
///
/// # Examples
///
/// ```
/// use charmap::mapping::Mapping;
/// use charmap::table::MappingTableBuilder;
///
/// let mut builder = MappingTableBuilder::new();
/// builder.insert(Mapping::new(0x41, 0x61)).unwrap();
/// builder.insert(Mapping::new(0x41, 0x7A)).unwrap();
/// let table = builder.build();
///
/// assert_eq!(table.lookup(0x41), Some(0x7A));
/// ```
#[derive(Debug, Clone)]
pub struct MappingTableBuilder {
    point_start: u32,
    point_end: u32,
    block_start: u32,
    block_end: u32,
    blocks: Vec<Block>,
}

impl MappingTableBuilder {
    /// Creates a builder holding no mappings.
    pub fn new() -> Self {
        Self {
            point_start: u32::MAX,
            point_end: 0,
            block_start: u32::MAX,
            block_end: 0,
            blocks: Vec::new(),
        }
    }

    /// Inserts one mapping, overwriting any earlier mapping for the same
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ReservedDestination`] if the destination is
    /// [`NO_MAPPING`], which is reserved to mark unmapped slots. A
    /// rejected insert leaves the builder unchanged.
    pub fn insert(&mut self, mapping: Mapping) -> Result<(), Error> {
        if mapping.destination == NO_MAPPING {
            return Err(Error::new(
                ErrorKind::ReservedDestination,
                "destination 0xFFFFFFFF is reserved to mark unmapped slots",
            )
            .with_context("mapping", mapping.to_string()));
        }

        self.point_start = self.point_start.min(mapping.source);
        self.point_end = self.point_end.max(mapping.source);

        let block_index = mapping.source >> BLOCK_BITS;
        self.block_start = self.block_start.min(block_index);
        self.block_end = self.block_end.max(block_index);

        while self.blocks.len() <= block_index as usize {
            self.blocks.push(Block::Empty);
        }
        let slots = self.blocks[block_index as usize].materialize();
        slots[mapping.source as usize & (BLOCK_SIZE - 1)] = mapping.destination;
        Ok(())
    }

    /// Returns true if no mapping has been inserted.
    ///
    /// Emptiness is tracked through the block list, not the bounds: a
    /// mapping whose source is `u32::MAX` leaves `point_start` at its
    /// initial value while still populating a block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Consumes the builder and returns the finished table.
    ///
    /// The table's blocks cover exactly the block indexes between the
    /// first and last block touched by an insert; blocks below the first
    /// are dropped here rather than carried as dead weight.
    pub fn build(mut self) -> MappingTable {
        if self.is_empty() {
            return MappingTable::from_parts(u32::MAX, 0, u32::MAX, 0, Vec::new());
        }
        let blocks = self.blocks.split_off(self.block_start as usize);
        MappingTable::from_parts(
            self.point_start,
            self.point_end,
            self.block_start,
            self.block_end,
            blocks,
        )
    }
}

impl Default for MappingTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
