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

//! Rendering of mapping tables as Rust source
//!
//! A built [`MappingTable`](crate::table::MappingTable) can be written
//! out as a generated module defining one
//! [`StaticTable`](crate::table::StaticTable) value, ready to be
//! included in another crate and queried without any run time setup.
//! All empty blocks in the generated module reference one shared
//! `BLOCK_EMPTY` array, so the source stays as sparse as the table.

use std::io;
use std::io::Write;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::table::MappingTable;

/// Slot literals per line in a generated block array.
const SLOTS_PER_LINE: usize = 8;

/// Writes `table` to `out` as a Rust module defining `pub static
/// <NAME>: StaticTable`, where `<NAME>` is `name` uppercased.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidArgument`] if `name` is not a valid
/// identifier, and [`ErrorKind::Io`] if writing to `out` fails.
///
/// # Examples
///
/// ```
/// use charmap::emit::write_table_module;
/// use charmap::mapping::Mapping;
/// use charmap::table::MappingTable;
///
/// let table = MappingTable::from_mappings(&[Mapping::new(0x41, 0x61)]).unwrap();
/// let mut out = Vec::new();
/// write_table_module(&mut out, &table, "to_lower").unwrap();
///
/// let module = String::from_utf8(out).unwrap();
/// assert!(module.contains("pub static TO_LOWER: StaticTable"));
/// ```
pub fn write_table_module<W: Write>(
    out: &mut W,
    table: &MappingTable,
    name: &str,
) -> Result<(), Error> {
    if !is_identifier(name) {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "table name is not a valid identifier",
        )
        .with_context("name", name));
    }
    write_module(out, table, &name.to_uppercase()).map_err(|err| {
        Error::new(ErrorKind::Io, "failed to write table module")
            .with_context("name", name)
            .set_source(err)
    })
}

fn write_module<W: Write>(out: &mut W, table: &MappingTable, name: &str) -> io::Result<()> {
    writeln!(out, "// Generated by charmap-gen. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(out, "use charmap::table::StaticTable;")?;

    if table.blocks().iter().any(|block| block.is_empty()) {
        writeln!(out)?;
        writeln!(out, "static BLOCK_EMPTY: [u32; 256] = [0xFFFFFFFF; 256];")?;
    }
    for (index, block) in table.blocks().iter().enumerate() {
        if block.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(
            out,
            "static BLOCK_{}: [u32; 256] = [",
            table.block_start() as usize + index
        )?;
        for row in block.slots().chunks(SLOTS_PER_LINE) {
            let cells: Vec<String> = row.iter().map(|slot| format!("0x{slot:X}")).collect();
            writeln!(out, "    {},", cells.join(", "))?;
        }
        writeln!(out, "];")?;
    }

    writeln!(out)?;
    writeln!(out, "pub static {name}: StaticTable = StaticTable {{")?;
    if table.is_empty() {
        writeln!(out, "    point_start: 0xFFFFFFFF,")?;
        writeln!(out, "    point_end: 0x0,")?;
        writeln!(out, "    block_start: 0xFFFFFFFF,")?;
        writeln!(out, "    block_end: 0x0,")?;
        writeln!(out, "    blocks: &[],")?;
    } else {
        writeln!(out, "    point_start: 0x{:X},", table.point_start())?;
        writeln!(out, "    point_end: 0x{:X},", table.point_end())?;
        writeln!(out, "    block_start: 0x{:X},", table.block_start())?;
        writeln!(out, "    block_end: 0x{:X},", table.block_end())?;
        writeln!(out, "    blocks: &[")?;
        for (index, block) in table.blocks().iter().enumerate() {
            if block.is_empty() {
                writeln!(out, "        &BLOCK_EMPTY,")?;
            } else {
                writeln!(out, "        &BLOCK_{},", table.block_start() as usize + index)?;
            }
        }
        writeln!(out, "    ],")?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    // "_" alone is a wildcard, not an identifier.
    if name == "_" {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
