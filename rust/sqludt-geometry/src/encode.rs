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

use crate::decode::{
    PROP_HAS_M, PROP_HAS_Z, PROP_IS_VALID, PROP_LARGER_THAN_HEMISPHERE, PROP_SINGLE_LINE_SEGMENT,
    PROP_SINGLE_POINT,
};
use crate::error::GeometryError;
use crate::types::{FigureAttribute, GeometryType};
use crate::value::{GeometryValue, Vertex};

/// Encode a [GeometryValue] into its serialized blob
///
/// The exact inverse of [decode](crate::decode::decode):
/// `decode(&encode(&g)?)` is structurally equal to `g`, and canonical
/// buffers re-encode byte for byte. The single-point and
/// single-line-segment shortcut layouts are re-derived from the
/// tables rather than stored.
pub fn encode(value: &GeometryValue) -> Result<Vec<u8>, GeometryError> {
    value.validate()?;

    let mut props = 0u8;
    if value.has_z() {
        props |= PROP_HAS_Z;
    }
    if value.has_m() {
        props |= PROP_HAS_M;
    }
    if value.is_valid() {
        props |= PROP_IS_VALID;
    }
    if value.is_larger_than_hemisphere() {
        props |= PROP_LARGER_THAN_HEMISPHERE;
    }
    if is_single_point(value) {
        props |= PROP_SINGLE_POINT;
    } else if is_single_line_segment(value) {
        props |= PROP_SINGLE_LINE_SEGMENT;
    }

    let mut writer = ByteWriter::with_capacity(encoded_len(value));
    writer.put_i32(value.srid());
    writer.put_u8(value.version());
    writer.put_u8(props);

    if props & (PROP_SINGLE_POINT | PROP_SINGLE_LINE_SEGMENT) != 0 {
        for vertex in value.vertices() {
            write_vertex(&mut writer, vertex, value.has_z(), value.has_m());
        }
        return Ok(writer.into_bytes());
    }

    let num_points = table_len(value.vertices().len(), "point")?;
    writer.put_i32(num_points);
    for vertex in value.vertices() {
        writer.put_f64(vertex.x);
        writer.put_f64(vertex.y);
    }
    if value.has_z() {
        for vertex in value.vertices() {
            writer.put_f64(vertex.z);
        }
    }
    if value.has_m() {
        for vertex in value.vertices() {
            writer.put_f64(vertex.m);
        }
    }

    writer.put_i32(table_len(value.figures().len(), "figure")?);
    for figure in value.figures() {
        writer.put_u8(figure.attribute.as_u8());
        writer.put_i32(figure.point_offset);
    }

    writer.put_i32(table_len(value.shapes().len(), "shape")?);
    for shape in value.shapes() {
        writer.put_i32(shape.parent_offset);
        writer.put_i32(shape.figure_offset);
        writer.put_u8(shape.shape_type.udt_id());
    }

    if value.version() >= 2 {
        writer.put_i32(table_len(value.segments().len(), "segment")?);
        for segment in value.segments() {
            writer.put_u8(segment.as_u8());
        }
    }

    Ok(writer.into_bytes())
}

fn table_len(len: usize, what: &str) -> Result<i32, GeometryError> {
    i32::try_from(len).map_err(|_| {
        GeometryError::Invalid(format!("{what} table of {len} records exceeds i32 range"))
    })
}

fn is_single_point(value: &GeometryValue) -> bool {
    value.vertices().len() == 1
        && value.figures().len() == 1
        && value.shapes().len() == 1
        && value.segments().is_empty()
        && value.shapes()[0].shape_type == GeometryType::Point
        && value.figures()[0].attribute == FigureAttribute::Stroke
        && !value.is_larger_than_hemisphere()
}

fn is_single_line_segment(value: &GeometryValue) -> bool {
    value.vertices().len() == 2
        && value.figures().len() == 1
        && value.shapes().len() == 1
        && value.segments().is_empty()
        && value.shapes()[0].shape_type == GeometryType::LineString
        && value.figures()[0].attribute == FigureAttribute::Stroke
        && !value.is_larger_than_hemisphere()
}

fn write_vertex(writer: &mut ByteWriter, vertex: &Vertex, has_z: bool, has_m: bool) {
    writer.put_f64(vertex.x);
    writer.put_f64(vertex.y);
    if has_z {
        writer.put_f64(vertex.z);
    }
    if has_m {
        writer.put_f64(vertex.m);
    }
}

fn encoded_len(value: &GeometryValue) -> usize {
    let per_point = 16 + 8 * (value.has_z() as usize) + 8 * (value.has_m() as usize);
    6 + 4
        + value.vertices().len() * per_point
        + 4
        + value.figures().len() * 5
        + 4
        + value.shapes().len() * 9
        + if value.version() >= 2 {
            4 + value.segments().len()
        } else {
            0
        }
}
