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

use std::ptr;

use charmap::error::ErrorKind;
use charmap::mapping::Mapping;
use charmap::table::MappingTable;
use charmap::table::NO_MAPPING;
use googletest::assert_that;
use googletest::prelude::contains_substring;

#[test]
fn test_empty_table() {
    let table = MappingTable::from_mappings(&[]).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.num_blocks(), 0);
    assert_eq!(table.num_mappings(), 0);
    assert_eq!(table.lookup(0), None);
    assert_eq!(table.lookup(0x41), None);
    assert_eq!(table.lookup(u32::MAX), None);
}

#[test]
fn test_lookup_returns_every_inserted_mapping() {
    let mappings: Vec<Mapping> = (0..500)
        .map(|i| Mapping::new(0x100 + i * 7, 0x2_0000 + i))
        .collect();
    let table = MappingTable::from_mappings(&mappings).unwrap();

    assert_eq!(table.num_mappings(), mappings.len());
    for mapping in &mappings {
        assert_eq!(table.lookup(mapping.source), Some(mapping.destination));
    }
}

#[test]
fn test_lookup_misses() {
    let table = MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x42, 0x62),
        Mapping::new(0x1F600, 0x1F600),
    ])
    .unwrap();

    // Unmapped slot inside a populated block.
    assert_eq!(table.lookup(0x43), None);
    // Slot in an interior empty block.
    assert_eq!(table.lookup(0x1000), None);
    // Outside the point bounds.
    assert_eq!(table.lookup(0x40), None);
    assert_eq!(table.lookup(0x1F601), None);
    assert_eq!(table.lookup(u32::MAX), None);
}

#[test]
fn test_wide_sparse_table_shape() {
    let table = MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x42, 0x62),
        Mapping::new(0x1F600, 0x1F600),
    ])
    .unwrap();

    assert_eq!(table.point_start(), 0x41);
    assert_eq!(table.point_end(), 0x1F600);
    assert_eq!(table.block_start(), 0x0);
    assert_eq!(table.block_end(), 0x1F6);
    assert_eq!(table.num_blocks(), 503);
    assert_eq!(table.num_populated_blocks(), 2);
    assert_eq!(table.num_mappings(), 3);

    assert_eq!(table.lookup(0x41), Some(0x61));
    assert_eq!(table.lookup(0x42), Some(0x62));
    assert_eq!(table.lookup(0x1F600), Some(0x1F600));
}

#[test]
fn test_interior_empty_blocks_share_storage() {
    let first = MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x341, 0x361),
    ])
    .unwrap();
    let second = MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x241, 0x261),
    ])
    .unwrap();

    // Both interior empties of one table, and empties across tables,
    // all read from the same slot array.
    assert!(first.blocks()[1].is_empty());
    assert!(first.blocks()[2].is_empty());
    assert!(ptr::eq(first.blocks()[1].slots(), first.blocks()[2].slots()));
    assert!(ptr::eq(first.blocks()[1].slots(), second.blocks()[1].slots()));
}

#[test]
fn test_last_mapping_wins_for_duplicate_sources() {
    let table = MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x41, 0x7A),
    ])
    .unwrap();

    assert_eq!(table.lookup(0x41), Some(0x7A));
    assert_eq!(table.num_mappings(), 1);
}

#[test]
fn test_identical_input_builds_identical_tables() {
    let mappings = [
        Mapping::new(0x41, 0x61),
        Mapping::new(0x1F600, 0x1F600),
        Mapping::new(0x41, 0x7A),
    ];
    let first = MappingTable::from_mappings(&mappings).unwrap();
    let second = MappingTable::from_mappings(&mappings).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.clone(), second);
}

#[test]
fn test_reserved_destination_is_rejected() {
    let err =
        MappingTable::from_mappings(&[Mapping::new(0x41, NO_MAPPING)]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ReservedDestination);
    assert_that!(err.message(), contains_substring("reserved"));
    assert_that!(err.to_string(), contains_substring("0x41 -> 0xFFFFFFFF"));
}

#[test]
fn test_sources_beyond_unicode_are_accepted() {
    let table = MappingTable::from_mappings(&[Mapping::new(0x20_0000, 0x41)]).unwrap();

    assert_eq!(table.lookup(0x20_0000), Some(0x41));
    assert_eq!(table.point_end(), 0x20_0000);
    assert_eq!(table.block_start(), 0x2000);
    assert_eq!(table.block_end(), 0x2000);
    assert_eq!(table.num_blocks(), 1);
}

#[test]
fn test_destination_may_equal_source() {
    let table = MappingTable::from_mappings(&[Mapping::new(0x1F600, 0x1F600)]).unwrap();
    assert_eq!(table.lookup(0x1F600), Some(0x1F600));
}
