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
use sqludt_cursor::ByteCursor;

use crate::error::GeometryError;
use crate::types::{FigureAttribute, GeometryType, SegmentType};
use crate::value::{Figure, GeometryValue, Shape, Vertex};

pub(crate) const PROP_HAS_Z: u8 = 0x01;
pub(crate) const PROP_HAS_M: u8 = 0x02;
pub(crate) const PROP_IS_VALID: u8 = 0x04;
pub(crate) const PROP_SINGLE_POINT: u8 = 0x08;
pub(crate) const PROP_SINGLE_LINE_SEGMENT: u8 = 0x10;
pub(crate) const PROP_LARGER_THAN_HEMISPHERE: u8 = 0x20;

/// SRID, version, and properties bytes
const HEADER_LEN: usize = 6;

/// Decode a serialized geometry blob into a [GeometryValue]
///
/// The buffer is borrowed only for the duration of the call; the
/// returned value owns all of its data. Every failure is fatal for the
/// call and returns no partial value.
pub fn decode(buf: &[u8]) -> Result<GeometryValue, GeometryError> {
    if buf.len() < HEADER_LEN {
        return Err(GeometryError::MalformedHeader(format!(
            "buffer of {} byte(s) is shorter than the {HEADER_LEN}-byte header",
            buf.len()
        )));
    }

    let mut cursor = ByteCursor::new(buf);
    let srid = cursor.read_i32()?;
    let version = cursor.read_u8()?;
    if version != 1 && version != 2 {
        return Err(GeometryError::MalformedHeader(format!(
            "unsupported serialization version {version}"
        )));
    }
    let props = cursor.read_u8()?;
    if props & 0xc0 != 0 {
        return Err(GeometryError::MalformedHeader(format!(
            "reserved property bits set in {props:#04x}"
        )));
    }
    let shortcuts = PROP_SINGLE_POINT | PROP_SINGLE_LINE_SEGMENT;
    if props & shortcuts == shortcuts {
        return Err(GeometryError::MalformedHeader(format!(
            "contradictory shortcut flags set in {props:#04x}"
        )));
    }

    let has_z = props & PROP_HAS_Z != 0;
    let has_m = props & PROP_HAS_M != 0;
    let is_valid = props & PROP_IS_VALID != 0;
    let is_larger_than_hemisphere = props & PROP_LARGER_THAN_HEMISPHERE != 0;

    let value = if props & PROP_SINGLE_POINT != 0 {
        let vertex = read_vertex(&mut cursor, has_z, has_m)?;
        GeometryValue {
            srid,
            version,
            has_z,
            has_m,
            is_valid,
            is_larger_than_hemisphere,
            vertices: vec![vertex],
            figures: vec![Figure::new(FigureAttribute::Stroke, 0)],
            shapes: vec![Shape::new(-1, 0, GeometryType::Point)],
            segments: vec![],
        }
    } else if props & PROP_SINGLE_LINE_SEGMENT != 0 {
        let start = read_vertex(&mut cursor, has_z, has_m)?;
        let end = read_vertex(&mut cursor, has_z, has_m)?;
        GeometryValue {
            srid,
            version,
            has_z,
            has_m,
            is_valid,
            is_larger_than_hemisphere,
            vertices: vec![start, end],
            figures: vec![Figure::new(FigureAttribute::Stroke, 0)],
            shapes: vec![Shape::new(-1, 0, GeometryType::LineString)],
            segments: vec![],
        }
    } else {
        let vertices = read_vertex_table(&mut cursor, has_z, has_m)?;
        let figures = read_figure_table(&mut cursor)?;
        let shapes = read_shape_table(&mut cursor)?;
        let segments = if version >= 2 {
            read_segment_table(&mut cursor)?
        } else {
            vec![]
        };
        let value = GeometryValue {
            srid,
            version,
            has_z,
            has_m,
            is_valid,
            is_larger_than_hemisphere,
            vertices,
            figures,
            shapes,
            segments,
        };
        value.validate()?;
        value
    };

    if !cursor.is_at_end() {
        return Err(GeometryError::Invalid(format!(
            "{} trailing byte(s) after the declared tables",
            cursor.remaining()
        )));
    }
    Ok(value)
}

fn read_count(cursor: &mut ByteCursor, what: &str) -> Result<usize, GeometryError> {
    let count = cursor.read_i32()?;
    usize::try_from(count)
        .map_err(|_| GeometryError::Invalid(format!("negative {what} count {count}")))
}

fn require_bytes(
    cursor: &ByteCursor,
    count: usize,
    record_len: usize,
    what: &str,
) -> Result<(), GeometryError> {
    let needed = count as u64 * record_len as u64;
    if (cursor.remaining() as u64) < needed {
        return Err(GeometryError::TruncatedTable(format!(
            "{what} table declares {count} record(s) but only {} byte(s) remain",
            cursor.remaining()
        )));
    }
    Ok(())
}

fn read_vertex(
    cursor: &mut ByteCursor,
    has_z: bool,
    has_m: bool,
) -> Result<Vertex, GeometryError> {
    let mut vertex = Vertex::new(cursor.read_f64()?, cursor.read_f64()?);
    if has_z {
        vertex = vertex.with_z(cursor.read_f64()?);
    }
    if has_m {
        vertex = vertex.with_m(cursor.read_f64()?);
    }
    Ok(vertex)
}

fn read_vertex_table(
    cursor: &mut ByteCursor,
    has_z: bool,
    has_m: bool,
) -> Result<Vec<Vertex>, GeometryError> {
    let num_points = read_count(cursor, "point")?;
    // X/Y pairs, then the whole Z array, then the whole M array
    let per_point = 16 + 8 * (has_z as usize) + 8 * (has_m as usize);
    require_bytes(cursor, num_points, per_point, "point")?;

    let mut vertices = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        vertices.push(Vertex::new(cursor.read_f64()?, cursor.read_f64()?));
    }
    if has_z {
        for vertex in vertices.iter_mut() {
            vertex.z = cursor.read_f64()?;
        }
    }
    if has_m {
        for vertex in vertices.iter_mut() {
            vertex.m = cursor.read_f64()?;
        }
    }
    Ok(vertices)
}

fn read_figure_table(cursor: &mut ByteCursor) -> Result<Vec<Figure>, GeometryError> {
    let num_figures = read_count(cursor, "figure")?;
    require_bytes(cursor, num_figures, 5, "figure")?;

    let mut figures = Vec::with_capacity(num_figures);
    for _ in 0..num_figures {
        let attribute = FigureAttribute::try_from_u8(cursor.read_u8()?)?;
        let point_offset = cursor.read_i32()?;
        figures.push(Figure::new(attribute, point_offset));
    }
    Ok(figures)
}

fn read_shape_table(cursor: &mut ByteCursor) -> Result<Vec<Shape>, GeometryError> {
    let num_shapes = read_count(cursor, "shape")?;
    require_bytes(cursor, num_shapes, 9, "shape")?;

    let mut shapes = Vec::with_capacity(num_shapes);
    for _ in 0..num_shapes {
        let parent_offset = cursor.read_i32()?;
        let figure_offset = cursor.read_i32()?;
        let shape_type = GeometryType::try_from_udt_id(cursor.read_u8()?)?;
        shapes.push(Shape::new(parent_offset, figure_offset, shape_type));
    }
    Ok(shapes)
}

fn read_segment_table(cursor: &mut ByteCursor) -> Result<Vec<SegmentType>, GeometryError> {
    let num_segments = read_count(cursor, "segment")?;
    require_bytes(cursor, num_segments, 1, "segment")?;

    let mut segments = Vec::with_capacity(num_segments);
    for _ in 0..num_segments {
        segments.push(SegmentType::try_from_u8(cursor.read_u8()?)?);
    }
    Ok(segments)
}
