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

//! Compact code point mapping tables
//!
//! This crate compresses sparse code point to code point mappings, of
//! the kind found in character set conversion data, into immutable
//! two-level lookup tables with constant time queries. A built table
//! can be rendered as generated Rust source through [`emit`], or as a
//! compact binary form through the table's serialization methods.
//!
//! # Usage
//!
//! ```rust
//! use charmap::mapping::parse_mappings;
//! use charmap::table::MappingTable;
//!
//! let data = "0x41\t0x61\n0x42\t0x62\n";
//! let mappings = parse_mappings(data.as_bytes()).unwrap();
//! let table = MappingTable::from_mappings(&mappings).unwrap();
//!
//! assert_eq!(table.lookup(0x41), Some(0x61));
//! assert_eq!(table.lookup(0x43), None);
//! ```
//!
//! # Notes
//!
//! - Tables are immutable once built; rebuilding is the only update path.
//! - The `charmap-gen` binary drives the whole pipeline: it parses a
//!   mapping file and writes one generated module for the forward table
//!   and one for its inversion.

pub mod emit;
pub mod error;
pub mod mapping;
pub mod table;
