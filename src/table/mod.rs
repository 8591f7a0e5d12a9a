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

//! Compact two-level mapping table implementation.
//!
//! A mapping table stores a sparse code-point-to-code-point mapping as a
//! span of 256-slot blocks addressed by the high bits of the source code
//! point. Blocks that received no mapping all alias one shared, immutable
//! empty block, so memory grows with the number of populated blocks rather
//! than with the span of the mapping. A lookup costs two bounds checks
//! and two array reads, independent of table size.
//!
//! # Usage
//!
//! ```rust
//! use charmap::mapping::Mapping;
//! use charmap::table::MappingTable;
//!
//! let table = MappingTable::from_mappings(&[
//!     Mapping::new(0x41, 0x61),
//!     Mapping::new(0x42, 0x62),
//!     Mapping::new(0x1F600, 0x1F600),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.lookup(0x41), Some(0x61));
//! assert_eq!(table.lookup(0x43), None);
//! assert_eq!(table.num_populated_blocks(), 2);
//! ```
//!
//! # Notes
//!
//! - Duplicate sources resolve last-write-wins, in input order.
//! - Tables are immutable once built.
//! - The reserved slot value [`NO_MAPPING`] is not a legal destination;
//!   the builder rejects it instead of silently conflating "maps to the
//!   sentinel" with "no mapping present".

mod builder;
mod mapping_table;
mod serialization;
mod static_table;

pub use self::builder::MappingTableBuilder;
pub use self::mapping_table::Block;
pub use self::mapping_table::MappingTable;
pub use self::static_table::StaticTable;

/// Number of low source bits addressing a slot within a block.
pub const BLOCK_BITS: u32 = 8;

/// Number of destination slots per block.
pub const BLOCK_SIZE: usize = 1 << BLOCK_BITS;

/// Reserved slot value meaning "no mapping present".
///
/// `u32::MAX` is far outside the Unicode code point range, so no real
/// destination can collide with it. The builder additionally refuses any
/// mapping whose destination equals this value.
pub const NO_MAPPING: u32 = u32::MAX;
