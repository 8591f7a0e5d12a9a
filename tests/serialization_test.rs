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
use googletest::assert_that;
use googletest::prelude::contains_substring;

// 503 blocks from 0x0 to 0x1F6, two of them populated.
fn sample_table() -> MappingTable {
    MappingTable::from_mappings(&[
        Mapping::new(0x41, 0x61),
        Mapping::new(0x42, 0x62),
        Mapping::new(0x1F600, 0x1F600),
    ])
    .unwrap()
}

#[test]
fn test_serialize_deserialize_round_trip() {
    let table = sample_table();
    let bytes = table.serialize();
    let restored = MappingTable::deserialize(&bytes).unwrap();

    assert_eq!(restored, table);
    assert_eq!(restored.serialize(), bytes);
    assert_eq!(restored.lookup(0x41), Some(0x61));
    assert_eq!(restored.lookup(0x1F600), Some(0x1F600));
    assert_eq!(restored.lookup(0x1000), None);

    // Interior empty blocks come back as the shared empty block.
    assert!(restored.blocks()[1].is_empty());
    assert!(ptr::eq(
        restored.blocks()[1].slots(),
        restored.blocks()[2].slots()
    ));
}

#[test]
fn test_empty_table_round_trip() {
    let table = MappingTable::from_mappings(&[]).unwrap();
    let bytes = table.serialize();

    assert_eq!(bytes.len(), 8);
    assert_eq!(bytes[0], 1, "preamble longs");
    assert_eq!(bytes[1], 1, "serial version");
    assert_eq!(bytes[2], 1, "family id");
    assert_ne!(bytes[3] & (1 << 2), 0, "empty flag");

    let restored = MappingTable::deserialize(&bytes).unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored.serialize(), bytes);
}

#[test]
fn test_serialized_form_stays_sparse() {
    let bytes = sample_table().serialize();

    // 24 preamble bytes, a 63 byte bitmap covering 503 blocks, and the
    // slots of the two populated blocks. The 501 empty blocks cost one
    // bit each.
    assert_eq!(bytes.len(), 24 + 63 + 2 * 256 * 4);
}

#[test]
fn test_deserialize_rejects_truncated_data() {
    let bytes = sample_table().serialize();

    for len in [0, 4, 7, 12, 23, 24 + 62, bytes.len() - 1] {
        let err = MappingTable::deserialize(&bytes[..len]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::MalformedDeserializeData,
            "prefix of {len} bytes"
        );
    }

    let err = MappingTable::deserialize(&bytes[..bytes.len() - 1]).unwrap_err();
    assert_that!(err.message(), contains_substring("insufficient data"));
}

#[test]
fn test_deserialize_rejects_unsupported_version() {
    let mut bytes = sample_table().serialize();
    bytes[1] = 9;

    let err = MappingTable::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("unsupported serial version 9"));
}

#[test]
fn test_deserialize_rejects_wrong_family() {
    let mut bytes = sample_table().serialize();
    bytes[2] = 7;

    let err = MappingTable::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("expected family 1, got 7"));
}

#[test]
fn test_deserialize_rejects_inconsistent_preamble() {
    let mut empty_bytes = MappingTable::from_mappings(&[]).unwrap().serialize();
    empty_bytes[0] = 3;
    let err = MappingTable::deserialize(&empty_bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("empty table"));

    let mut bytes = sample_table().serialize();
    bytes[0] = 1;
    let err = MappingTable::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("non-empty table"));
}

#[test]
fn test_deserialize_rejects_inconsistent_bounds() {
    // point_start above point_end.
    let mut bytes = sample_table().serialize();
    bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
    let err = MappingTable::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("point bounds out of order"));

    // block_start that no longer matches point_start.
    let mut bytes = sample_table().serialize();
    bytes[16..20].copy_from_slice(&1u32.to_le_bytes());
    let err = MappingTable::deserialize(&bytes).unwrap_err();
    assert_that!(
        err.message(),
        contains_substring("block bounds do not match point bounds")
    );
}
