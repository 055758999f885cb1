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
use crate::error::CursorError;

/// Forward-only most-significant-bit-first reader over a byte buffer
///
/// Bit 0 is the high bit of the first byte. Fields cross byte
/// boundaries transparently.
#[derive(Debug)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read position in bits from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bits
    pub fn remaining_bits(&self) -> usize {
        self.buf.len() * 8 - self.pos
    }

    /// True when every unread bit is zero (or nothing remains)
    pub fn rest_is_zero(&self) -> bool {
        let byte_idx = self.pos / 8;
        if byte_idx >= self.buf.len() {
            return true;
        }
        let mask = 0xffu8 >> (self.pos % 8);
        if self.buf[byte_idx] & mask != 0 {
            return false;
        }
        self.buf[byte_idx + 1..].iter().all(|b| *b == 0)
    }

    pub fn read_bit(&mut self) -> Result<bool, CursorError> {
        if self.remaining_bits() == 0 {
            return Err(CursorError::UnexpectedEndOfBits {
                offset: self.pos,
                needed: 1,
            });
        }
        let byte = self.buf[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Ok(bit == 1)
    }

    /// Read a fixed-width unsigned field, high bit first
    pub fn read_bits(&mut self, width: u32) -> Result<u64, CursorError> {
        if width > 64 {
            return Err(CursorError::UnsupportedWidth(width));
        }
        if self.remaining_bits() < width as usize {
            return Err(CursorError::UnexpectedEndOfBits {
                offset: self.pos,
                needed: width as usize - self.remaining_bits(),
            });
        }
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }
}

/// Most-significant-bit-first writer over an owned, growing buffer
///
/// [into_bytes](Self::into_bytes) pads the final partial byte with
/// zero bits.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    len_bits: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far
    pub fn bit_len(&self) -> usize {
        self.len_bits
    }

    pub fn write_bit(&mut self, bit: bool) {
        if self.len_bits % 8 == 0 {
            self.buf.push(0);
        }
        if bit {
            let idx = self.len_bits / 8;
            self.buf[idx] |= 1 << (7 - self.len_bits % 8);
        }
        self.len_bits += 1;
    }

    /// Write the low `width` bits of `value`, high bit first
    pub fn write_bits(&mut self, value: u64, width: u32) -> Result<(), CursorError> {
        if width > 64 {
            return Err(CursorError::UnsupportedWidth(width));
        }
        for i in (0..width).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn msb_first_single_bits() {
        // 01011000
        let mut bits = BitReader::new(&[0x58]);
        let expected = [false, true, false, true, true, false, false, false];
        for bit in expected {
            assert_eq!(bits.read_bit().unwrap(), bit);
        }
        assert_eq!(bits.remaining_bits(), 0);
        assert!(bits.rest_is_zero());
    }

    #[test]
    fn fields_cross_byte_boundaries() {
        // 10110110 01000000
        let mut bits = BitReader::new(&[0xb6, 0x40]);
        assert_eq!(bits.read_bits(3).unwrap(), 0b101);
        assert_eq!(bits.read_bits(7).unwrap(), 0b1011001);
        assert_eq!(bits.position(), 10);
        assert!(bits.rest_is_zero());
        assert_eq!(bits.read_bits(6).unwrap(), 0);
    }

    #[test]
    fn read_past_end_of_bits() {
        let mut bits = BitReader::new(&[0xff]);
        assert_eq!(bits.read_bits(6).unwrap(), 0b111111);
        let err = bits.read_bits(3).unwrap_err();
        assert_eq!(
            err,
            CursorError::UnexpectedEndOfBits {
                offset: 6,
                needed: 1
            }
        );
        // The failed wide read consumed nothing
        assert_eq!(bits.read_bits(2).unwrap(), 0b11);
        let err = bits.read_bit().unwrap_err();
        assert_eq!(
            err,
            CursorError::UnexpectedEndOfBits {
                offset: 8,
                needed: 1
            }
        );
    }

    #[test]
    fn width_limits() {
        let buf = [0u8; 16];
        let mut bits = BitReader::new(&buf);
        assert_eq!(bits.read_bits(64).unwrap(), 0);
        assert_eq!(
            bits.read_bits(65).unwrap_err(),
            CursorError::UnsupportedWidth(65)
        );
        assert_eq!(
            BitWriter::new().write_bits(0, 65).unwrap_err(),
            CursorError::UnsupportedWidth(65)
        );
    }

    #[rstest]
    #[case(&[true, false, true, true], &[0b1011_0000])]
    #[case(&[false; 3], &[0x00])]
    #[case(&[true; 9], &[0xff, 0b1000_0000])]
    fn writer_pads_final_byte(#[case] input: &[bool], #[case] expected: &[u8]) {
        let mut writer = BitWriter::new();
        for bit in input {
            writer.write_bit(*bit);
        }
        assert_eq!(writer.bit_len(), input.len());
        assert_eq!(writer.into_bytes(), expected);
    }

    #[test]
    fn write_fields_round_trip() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b01, 2).unwrap();
        writer.write_bits(0b111, 3).unwrap();
        writer.write_bits(0x1234_5678_9abc, 48).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 7); // ceil(53 / 8)

        let mut bits = BitReader::new(&bytes);
        assert_eq!(bits.read_bits(2).unwrap(), 0b01);
        assert_eq!(bits.read_bits(3).unwrap(), 0b111);
        assert_eq!(bits.read_bits(48).unwrap(), 0x1234_5678_9abc);
        assert!(bits.rest_is_zero());
    }

    #[test]
    fn rest_is_zero_scans_partial_and_full_bytes() {
        let mut bits = BitReader::new(&[0b0000_0100, 0x00]);
        assert!(!bits.rest_is_zero());
        bits.read_bits(5).unwrap();
        assert!(!bits.rest_is_zero());
        bits.read_bit().unwrap();
        assert!(bits.rest_is_zero());
        assert!(BitReader::new(&[]).rest_is_zero());
    }
}
