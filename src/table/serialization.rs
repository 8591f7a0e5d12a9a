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

//! Binary serialization format for mapping tables
//!
//! The format stores the table bounds in a fixed preamble and the block
//! list as a presence bitmap followed by the slots of the populated
//! blocks only. Empty blocks cost one bitmap bit, so a sparse table
//! stays sparse on disk.
//!
//! ## Preamble Layout (Little Endian)
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | preamble_longs | Number of 8-byte longs in preamble (1 or 3) |
//! | 1 | serial_version | Serialization version (currently 1) |
//! | 2 | family_id | Family ID (1 for mapping tables) |
//! | 3 | flags | Bit flags (see below) |
//! | 4-7 | unused | Written as zero, ignored on read |
//!
//! If preamble_longs >= 3:
//!
//! | Byte | Field |
//! |------|-------|
//! | 8-11 | point_start |
//! | 12-15 | point_end |
//! | 16-19 | block_start |
//! | 20-23 | block_end |
//!
//! ## Flags (Byte 3)
//!
//! | Bit | Name | Description |
//! |-----|------|-------------|
//! | 2 | EMPTY | Table holds no mappings |
//!
//! ## Payload (non-empty only)
//!
//! A presence bitmap of `ceil(num_blocks / 8)` bytes follows the
//! preamble, least significant bit first, one bit per block index from
//! `block_start` to `block_end`. A set bit marks a populated block.
//! After the bitmap come the populated blocks in block order, each as
//! 256 `u32` slots in little endian.

use std::io::Cursor;

use byteorder::LittleEndian;
use byteorder::ReadBytesExt;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::table::BLOCK_BITS;
use crate::table::BLOCK_SIZE;
use crate::table::Block;
use crate::table::MappingTable;
use crate::table::NO_MAPPING;

/// Family ID for mapping tables.
pub const MAPPING_TABLE_FAMILY_ID: u8 = 1;
/// Serialization version.
pub const SERIAL_VERSION: u8 = 1;

/// Preamble longs for an empty table.
pub const PREAMBLE_LONGS_EMPTY: u8 = 1;
/// Preamble longs for a non-empty table.
pub const PREAMBLE_LONGS_STANDARD: u8 = 3;

/// Empty flag mask.
pub const FLAG_EMPTY: u8 = 1 << 2;

impl MappingTable {
    /// Serializes this table into a byte vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use charmap::mapping::Mapping;
    /// use charmap::table::MappingTable;
    ///
    /// let table = MappingTable::from_mappings(&[Mapping::new(0x41, 0x61)]).unwrap();
    /// let bytes = table.serialize();
    /// let restored = MappingTable::deserialize(&bytes).unwrap();
    /// assert_eq!(restored, table);
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        if self.is_empty() {
            let mut out = vec![0u8; PREAMBLE_LONGS_EMPTY as usize * 8];
            out[0] = PREAMBLE_LONGS_EMPTY;
            out[1] = SERIAL_VERSION;
            out[2] = MAPPING_TABLE_FAMILY_ID;
            out[3] = FLAG_EMPTY;
            return out;
        }
        let bitmap_len = self.num_blocks().div_ceil(8);
        let slots_len = self.num_populated_blocks() * BLOCK_SIZE * 4;
        let mut out =
            Vec::with_capacity(PREAMBLE_LONGS_STANDARD as usize * 8 + bitmap_len + slots_len);
        out.extend_from_slice(&[
            PREAMBLE_LONGS_STANDARD,
            SERIAL_VERSION,
            MAPPING_TABLE_FAMILY_ID,
            0,
            0,
            0,
            0,
            0,
        ]);
        out.extend_from_slice(&self.point_start().to_le_bytes());
        out.extend_from_slice(&self.point_end().to_le_bytes());
        out.extend_from_slice(&self.block_start().to_le_bytes());
        out.extend_from_slice(&self.block_end().to_le_bytes());

        let mut bitmap = vec![0u8; bitmap_len];
        for (index, block) in self.blocks().iter().enumerate() {
            if !block.is_empty() {
                bitmap[index / 8] |= 1 << (index % 8);
            }
        }
        out.extend_from_slice(&bitmap);

        for block in self.blocks() {
            if block.is_empty() {
                continue;
            }
            for &slot in block.slots() {
                out.extend_from_slice(&slot.to_le_bytes());
            }
        }
        out
    }

    /// Deserializes a table from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedDeserializeData`] if the bytes are
    /// truncated, carry an unsupported version or family, or describe
    /// inconsistent bounds.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < PREAMBLE_LONGS_EMPTY as usize * 8 {
            return Err(malformed("insufficient data for preamble"));
        }
        let preamble_longs = bytes[0];
        let serial_version = bytes[1];
        let family = bytes[2];
        let flags = bytes[3];
        if serial_version != SERIAL_VERSION {
            return Err(malformed(format!(
                "unsupported serial version {serial_version}"
            )));
        }
        if family != MAPPING_TABLE_FAMILY_ID {
            return Err(malformed(format!(
                "expected family {MAPPING_TABLE_FAMILY_ID}, got {family}"
            )));
        }
        if flags & FLAG_EMPTY != 0 {
            if preamble_longs != PREAMBLE_LONGS_EMPTY {
                return Err(malformed("empty table with invalid preamble size"));
            }
            return Ok(MappingTable::from_parts(u32::MAX, 0, u32::MAX, 0, Vec::new()));
        }
        if preamble_longs != PREAMBLE_LONGS_STANDARD {
            return Err(malformed("non-empty table with invalid preamble size"));
        }
        if bytes.len() < PREAMBLE_LONGS_STANDARD as usize * 8 {
            return Err(malformed("insufficient data for full preamble"));
        }

        let mut reader = Cursor::new(&bytes[8..]);
        let point_start = read_u32(&mut reader)?;
        let point_end = read_u32(&mut reader)?;
        let block_start = read_u32(&mut reader)?;
        let block_end = read_u32(&mut reader)?;
        if point_start > point_end {
            return Err(malformed("point bounds out of order")
                .with_context("point_start", format!("{point_start:#X}"))
                .with_context("point_end", format!("{point_end:#X}")));
        }
        if block_start != point_start >> BLOCK_BITS || block_end != point_end >> BLOCK_BITS {
            return Err(malformed("block bounds do not match point bounds")
                .with_context("block_start", format!("{block_start:#X}"))
                .with_context("block_end", format!("{block_end:#X}")));
        }

        let num_blocks = (block_end - block_start + 1) as usize;
        let bitmap_len = num_blocks.div_ceil(8);
        let bitmap_offset = PREAMBLE_LONGS_STANDARD as usize * 8;
        if bytes.len() < bitmap_offset + bitmap_len {
            return Err(malformed("insufficient data for block bitmap"));
        }
        let bitmap = &bytes[bitmap_offset..bitmap_offset + bitmap_len];

        let mut reader = Cursor::new(&bytes[bitmap_offset + bitmap_len..]);
        let mut blocks = Vec::with_capacity(num_blocks);
        for index in 0..num_blocks {
            if bitmap[index / 8] & (1 << (index % 8)) == 0 {
                blocks.push(Block::Empty);
                continue;
            }
            let mut slots = Box::new([NO_MAPPING; BLOCK_SIZE]);
            reader
                .read_u32_into::<LittleEndian>(&mut slots[..])
                .map_err(|err| {
                    malformed("insufficient data for block slots")
                        .with_context("block_index", block_start as usize + index)
                        .set_source(err)
                })?;
            blocks.push(Block::Populated(slots));
        }
        Ok(MappingTable::from_parts(
            point_start,
            point_end,
            block_start,
            block_end,
            blocks,
        ))
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::MalformedDeserializeData, message)
}

fn read_u32(reader: &mut Cursor<&[u8]>) -> Result<u32, Error> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|err| malformed("unexpected end of data").set_source(err))
}
