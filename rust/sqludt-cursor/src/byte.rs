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

/// Forward-only little-endian reader over a borrowed byte buffer
///
/// The buffer is borrowed for the lifetime of the cursor and never
/// retained by anything the cursor produces.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current read position in bytes from the start of the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True once every byte of the buffer has been consumed
    pub fn is_at_end(&self) -> bool {
        self.offset == self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        if self.remaining() < n {
            return Err(CursorError::UnexpectedEnd {
                offset: self.offset,
                needed: n - self.remaining(),
            });
        }
        let bytes = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        let b = self.take(1)?;
        Ok(b[0])
    }

    pub fn read_i32(&mut self) -> Result<i32, CursorError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_f64(&mut self) -> Result<f64, CursorError> {
        let b = self.take(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}

/// Append-only little-endian writer over an owned, growing buffer
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_little_endian_fields() {
        let buf = [
            0x2a, // u8
            0xe6, 0x10, 0x00, 0x00, // i32 4326
            0xff, 0xff, 0xff, 0xff, // i32 -1
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x40, // f64 5.0
        ];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.read_u8().unwrap(), 0x2a);
        assert_eq!(cursor.read_i32().unwrap(), 4326);
        assert_eq!(cursor.read_i32().unwrap(), -1);
        assert_eq!(cursor.read_f64().unwrap(), 5.0);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn read_u64_and_u32() {
        let buf = [
            0x01, 0x00, 0x00, 0x00, // u32 1
            0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u64 2
        ];
        let mut cursor = ByteCursor::new(&buf);
        assert_eq!(cursor.read_u32().unwrap(), 1);
        assert_eq!(cursor.read_u64().unwrap(), 2);
    }

    #[test]
    fn read_past_end() {
        let mut cursor = ByteCursor::new(&[0x01, 0x02]);
        let err = cursor.read_i32().unwrap_err();
        assert_eq!(
            err,
            CursorError::UnexpectedEnd {
                offset: 0,
                needed: 2
            }
        );
        // A failed read consumes nothing
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);

        let err = ByteCursor::new(&[]).read_f64().unwrap_err();
        assert_eq!(
            err,
            CursorError::UnexpectedEnd {
                offset: 0,
                needed: 8
            }
        );
    }

    #[test]
    fn write_then_read_round_trip() {
        let mut writer = ByteWriter::new();
        writer.put_i32(-7);
        writer.put_u8(0x05);
        writer.put_f64(f64::NAN);
        writer.put_u32(u32::MAX);
        writer.put_u64(1 << 40);
        let bytes = writer.into_bytes();

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_i32().unwrap(), -7);
        assert_eq!(cursor.read_u8().unwrap(), 0x05);
        assert!(cursor.read_f64().unwrap().is_nan());
        assert_eq!(cursor.read_u32().unwrap(), u32::MAX);
        assert_eq!(cursor.read_u64().unwrap(), 1 << 40);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn writer_grows() {
        let mut writer = ByteWriter::with_capacity(1);
        assert!(writer.is_empty());
        for _ in 0..100 {
            writer.put_f64(1.5);
        }
        assert_eq!(writer.len(), 800);
    }
}
