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

use crate::table::BLOCK_BITS;
use crate::table::BLOCK_SIZE;
use crate::table::NO_MAPPING;

/// A mapping table whose blocks live in `'static` storage.
///
/// This is the form produced by [`emit::write_table_module`]: the
/// generated module defines the slot arrays as `static` items and one
/// `StaticTable` value referencing them, so a table built at generation
/// time is looked up at run time without any allocation or parsing. The
/// fields are public because generated code constructs the value as a
/// literal; they follow the same layout rules as
/// [`MappingTable`](crate::table::MappingTable), one block reference per
/// block index from `block_start` to `block_end` inclusive.
///
/// [`emit::write_table_module`]: crate::emit::write_table_module
///
/// # Examples
///
/// ```
/// use charmap::table::{BLOCK_SIZE, NO_MAPPING, StaticTable};
///
/// static BLOCK_0: [u32; BLOCK_SIZE] = {
///     let mut slots = [NO_MAPPING; BLOCK_SIZE];
///     slots[0x41] = 0x61;
///     slots
/// };
///
/// static TO_LOWER: StaticTable = StaticTable {
///     point_start: 0x41,
///     point_end: 0x41,
///     block_start: 0x0,
///     block_end: 0x0,
///     blocks: &[&BLOCK_0],
/// };
///
/// assert_eq!(TO_LOWER.lookup(0x41), Some(0x61));
/// assert_eq!(TO_LOWER.lookup(0x42), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTable {
    /// The lowest source code point in the table.
    pub point_start: u32,
    /// The highest source code point in the table.
    pub point_end: u32,
    /// The block index of the first entry in `blocks`.
    pub block_start: u32,
    /// The block index of the last entry in `blocks`.
    pub block_end: u32,
    /// One slot array per block index, empty blocks sharing one array.
    pub blocks: &'static [&'static [u32; BLOCK_SIZE]],
}

impl StaticTable {
    /// Looks up the destination for `point`.
    ///
    /// Returns `None` when the table holds no mapping for `point`.
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
        let slots = self.blocks[(block_index - self.block_start) as usize];
        let destination = slots[point as usize & (BLOCK_SIZE - 1)];
        if destination == NO_MAPPING {
            None
        } else {
            Some(destination)
        }
    }

    /// Returns true if the table holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
