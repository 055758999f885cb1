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

use sqludt_cursor::ByteWriter;

/// Chainable builder for serialized geometry blobs
///
/// Deliberately knows nothing about the format: tests use it to build
/// both canonical and malformed buffers field by field.
///
/// ```
/// use sqludt_testing::create::BlobBuilder;
///
/// let buf = BlobBuilder::new().i32(4326).u8(1).u8(0x0c).xy(5.0, 10.0).build();
/// assert_eq!(buf.len(), 22);
/// ```
#[derive(Default)]
pub struct BlobBuilder {
    writer: ByteWriter,
}

impl BlobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.writer.put_u8(value);
        self
    }

    pub fn i32(mut self, value: i32) -> Self {
        self.writer.put_i32(value);
        self
    }

    pub fn f64(mut self, value: f64) -> Self {
        self.writer.put_f64(value);
        self
    }

    /// An X/Y coordinate pair
    pub fn xy(self, x: f64, y: f64) -> Self {
        self.f64(x).f64(y)
    }

    /// A figure record: attribute byte then point offset
    pub fn figure(self, attribute: u8, point_offset: i32) -> Self {
        self.u8(attribute).i32(point_offset)
    }

    /// A shape record: parent offset, figure offset, type byte
    pub fn shape(self, parent_offset: i32, figure_offset: i32, shape_type: u8) -> Self {
        self.i32(parent_offset).i32(figure_offset).u8(shape_type)
    }

    pub fn build(self) -> Vec<u8> {
        self.writer.into_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fields_are_little_endian() {
        let buf = BlobBuilder::new().i32(4326).u8(1).f64(1.0).build();
        assert_eq!(buf[..4], [0xe6, 0x10, 0x00, 0x00]);
        assert_eq!(buf[4], 0x01);
        assert_eq!(buf[5..], [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f]);
    }

    #[test]
    fn records_concatenate() {
        let buf = BlobBuilder::new().figure(0x01, 0).shape(-1, 0, 0x02).build();
        assert_eq!(buf.len(), 5 + 9);
        assert_eq!(buf[0], 0x01);
        assert_eq!(buf[5..9], [0xff, 0xff, 0xff, 0xff]);
    }
}
