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

//! The variable-width bit codec
//!
//! Each stored component is `selector | field | flag`. The selector
//! picks a label range; the field holds the offset of the stored label
//! from the range minimum in its `x` positions, with any literal `0`
//! and `1` positions fixed; the flag bit is 1 for real components and
//! 0 for fake ones. A fake component stores its label plus one, which
//! is what makes the serialized bytes collate in depth-first order.
//! Selector codes are prefix-free and every one contains a set bit, so
//! the zero padding of the final byte can never start a component.

use sqludt_cursor::{BitReader, BitWriter};

use crate::error::HierarchyError;
use crate::path::{HierarchyPath, Level};

/// One row of the canonical partition table
///
/// `max` is implied by `min` and the number of `x` positions in the
/// field pattern. Rows are listed most-negative first; together they
/// cover the storable label range with no gaps or overlaps.
struct LevelRange {
    selector_bits: u64,
    selector_len: u32,
    field: &'static str,
    min: i64,
}

impl LevelRange {
    const fn new(selector_bits: u64, selector_len: u32, field: &'static str, min: i64) -> Self {
        Self {
            selector_bits,
            selector_len,
            field,
            min,
        }
    }

    fn value_bits(&self) -> u32 {
        self.field.bytes().filter(|b| *b == b'x').count() as u32
    }

    fn max(&self) -> i64 {
        self.min + ((1i64 << self.value_bits()) - 1)
    }

    fn contains(&self, stored: i64) -> bool {
        stored >= self.min && stored <= self.max()
    }
}

/// The `110` row fixes two field bits so that no stored prefix of a
/// longer component collates equal to a complete shorter one.
const LEVEL_RANGES: [LevelRange; 13] = [
    LevelRange::new(0b000111, 6, "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", -281479271682120),
    LevelRange::new(0b00100, 5, "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", -4294971464),
    LevelRange::new(0b00101, 5, "xxxxxxxxxxxx", -4168),
    LevelRange::new(0b00110, 5, "xxxxxx", -72),
    LevelRange::new(0b00111, 5, "xxx", -8),
    LevelRange::new(0b01, 2, "xx", 0),
    LevelRange::new(0b100, 3, "xx", 4),
    LevelRange::new(0b101, 3, "xxx", 8),
    LevelRange::new(0b110, 3, "xx0x1xxx", 16),
    LevelRange::new(0b1110, 4, "xxxxxxxxxx", 80),
    LevelRange::new(0b11110, 5, "xxxxxxxxxxxx", 1104),
    LevelRange::new(0b111110, 6, "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", 5200),
    LevelRange::new(0b1111110, 7, "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx", 4294972496),
];

/// The longest selector code; accumulating more bits than this without
/// a match means the stream is corrupt
const MAX_SELECTOR_LEN: u32 = 7;

/// Serialize a path into its binary form; the root path is zero bytes
pub fn encode(path: &HierarchyPath) -> Result<Vec<u8>, HierarchyError> {
    let mut writer = BitWriter::new();
    for level in path.levels() {
        encode_level(&mut writer, level)?;
    }
    Ok(writer.into_bytes())
}

fn encode_level(writer: &mut BitWriter, level: &Level) -> Result<(), HierarchyError> {
    // Fake components store label + 1 so they collate directly before
    // the real component with that label
    let stored = if level.is_real {
        level.label
    } else {
        level.label.checked_add(1).ok_or_else(|| {
            HierarchyError::Invalid(format!("label {} out of range", level.label))
        })?
    };
    let range = LEVEL_RANGES
        .iter()
        .find(|range| range.contains(stored))
        .ok_or_else(|| {
            HierarchyError::Invalid(format!("label {} out of range", level.label))
        })?;

    writer.write_bits(range.selector_bits, range.selector_len)?;
    let offset = (stored - range.min) as u64;
    let mut remaining = range.value_bits();
    for pattern in range.field.bytes() {
        let bit = match pattern {
            b'0' => false,
            b'1' => true,
            _ => {
                remaining -= 1;
                offset >> remaining & 1 == 1
            }
        };
        writer.write_bit(bit);
    }
    writer.write_bit(level.is_real);
    Ok(())
}

/// Deserialize a binary hierarchyid; zero bytes is the root path
pub fn decode(buf: &[u8]) -> Result<HierarchyPath, HierarchyError> {
    let mut reader = BitReader::new(buf);
    let mut levels = vec![];
    while !reader.rest_is_zero() {
        levels.push(decode_level(&mut reader)?);
    }
    // The encoder pads only within the final byte, so the buffer
    // length must equal the bit length rounded up
    let expected_len = reader.position().div_ceil(8);
    if buf.len() > expected_len {
        return Err(HierarchyError::Invalid(format!(
            "{} byte(s) of zero padding beyond the final level",
            buf.len() - expected_len
        )));
    }
    HierarchyPath::new(levels)
}

fn decode_level(reader: &mut BitReader) -> Result<Level, HierarchyError> {
    let mut selector_bits = 0u64;
    let mut selector_len = 0u32;
    let range = loop {
        selector_bits = selector_bits << 1 | reader.read_bit()? as u64;
        selector_len += 1;
        if selector_len > MAX_SELECTOR_LEN {
            return Err(HierarchyError::Invalid(format!(
                "unknown selector code {selector_bits:b}"
            )));
        }
        // Selector codes are prefix-free, so the first match is the
        // only possible one
        if let Some(range) = LEVEL_RANGES
            .iter()
            .find(|r| r.selector_len == selector_len && r.selector_bits == selector_bits)
        {
            break range;
        }
    };

    let mut offset = 0u64;
    for pattern in range.field.bytes() {
        let bit = reader.read_bit()?;
        match pattern {
            b'0' | b'1' => {
                if bit != (pattern == b'1') {
                    return Err(HierarchyError::Invalid(format!(
                        "fixed field bit mismatch in selector {:b}",
                        range.selector_bits
                    )));
                }
            }
            _ => offset = offset << 1 | bit as u64,
        }
    }
    let stored = range.min + offset as i64;
    let is_real = reader.read_bit()?;
    let label = if is_real { stored } else { stored - 1 };
    Ok(Level { label, is_real })
}
