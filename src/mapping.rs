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

//! Code point mappings and the mapping-file loader.
//!
//! A mapping file associates one code point with another, one pair per line.
//! A line is a mapping if and only if it starts with a `0x`-prefixed
//! hexadecimal token, followed by one or more tab or semicolon bytes,
//! followed by a second `0x`-prefixed hexadecimal token. Anything after the
//! second token is ignored, and every other line (comments, headers, blank
//! lines) is skipped without error.
//!
//! # Usage
//!
//! ```rust
//! use charmap::mapping::{invert_mappings, parse_mappings};
//!
//! let data = "# uppercase -> lowercase\n0x0041;0x0061\n0x0042\t0x0062\n";
//! let mappings = parse_mappings(data.as_bytes()).unwrap();
//! assert_eq!(mappings.len(), 2);
//! assert_eq!(mappings[0].source, 0x41);
//! assert_eq!(mappings[0].destination, 0x61);
//!
//! let reversed = invert_mappings(&mappings);
//! assert_eq!(reversed[0].source, 0x61);
//! ```

use std::io::BufRead;

use crate::error::Error;
use crate::error::ErrorKind;

/// A single code point mapping: `source` maps to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// The code point being mapped.
    pub source: u32,
    /// The code point it maps to.
    pub destination: u32,
}

impl Mapping {
    /// Creates a mapping from `source` to `destination`.
    pub fn new(source: u32, destination: u32) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Returns this mapping with source and destination swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use charmap::mapping::Mapping;
    ///
    /// assert_eq!(Mapping::new(0x41, 0x61).inverted(), Mapping::new(0x61, 0x41));
    /// ```
    pub fn inverted(self) -> Self {
        Self {
            source: self.destination,
            destination: self.source,
        }
    }
}

impl std::fmt::Display for Mapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:X} -> 0x{:X}", self.source, self.destination)
    }
}

/// Reads all mappings from `reader`, in input order.
///
/// Sources are not required to be sorted or unique; duplicates are resolved
/// later by the table builder's last-write-wins rule.
///
/// # Errors
///
/// Returns [`ErrorKind::MalformedMappingData`] if a mapping line carries a
/// token that does not fit in 32 bits, and [`ErrorKind::Io`] if the reader
/// fails. Both identify the offending line.
pub fn parse_mappings<R: BufRead>(reader: R) -> Result<Vec<Mapping>, Error> {
    let mut mappings = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|e| {
            Error::new(ErrorKind::Io, "failed to read mapping data")
                .with_context("line", number)
                .set_source(e)
        })?;
        if let Some((source, destination)) = match_mapping_line(&line) {
            mappings.push(Mapping {
                source: parse_token(source, number, &line)?,
                destination: parse_token(destination, number, &line)?,
            });
        }
    }
    Ok(mappings)
}

/// Swaps every mapping, preserving order.
///
/// No deduplication is performed; a destination reachable from several
/// sources becomes several entries for one source, and the table builder
/// keeps the last of them.
pub fn invert_mappings(mappings: &[Mapping]) -> Vec<Mapping> {
    mappings.iter().map(|m| m.inverted()).collect()
}

/// Matches a line against the mapping grammar, returning both hex digit
/// runs. The match is anchored at the start of the line and leaves any
/// trailing content unexamined.
fn match_mapping_line(line: &str) -> Option<(&str, &str)> {
    let (source, rest) = take_hex_token(line)?;
    let delimiter = rest
        .as_bytes()
        .iter()
        .position(|&b| b != b'\t' && b != b';')
        .unwrap_or(rest.len());
    if delimiter == 0 {
        return None;
    }
    let (destination, _) = take_hex_token(&rest[delimiter..])?;
    Some((source, destination))
}

/// Splits a leading `0x`-prefixed hex token off `input`. The prefix is
/// case sensitive; the digits are not.
fn take_hex_token(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix("0x")?;
    let digits = rest
        .as_bytes()
        .iter()
        .position(|b| !b.is_ascii_hexdigit())
        .unwrap_or(rest.len());
    if digits == 0 {
        return None;
    }
    Some(rest.split_at(digits))
}

fn parse_token(digits: &str, number: usize, line: &str) -> Result<u32, Error> {
    u32::from_str_radix(digits, 16).map_err(|e| {
        Error::new(
            ErrorKind::MalformedMappingData,
            "hexadecimal token does not fit in 32 bits",
        )
        .with_context("line", number)
        .with_context("text", line)
        .set_source(e)
    })
}
