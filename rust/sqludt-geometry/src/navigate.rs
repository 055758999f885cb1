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

//! Tree navigation over the flat tables
//!
//! Shapes are stored in preorder, so the subtree of shape `i` is the
//! contiguous run of shapes whose parent offset is at least `i`. The
//! figure span of that run, and in turn the vertex span of those
//! figures, give every sub-geometry accessor without materializing a
//! tree. Extraction re-bases the offsets so a returned sub-geometry is
//! a self-contained value.

use crate::error::GeometryError;
use crate::types::{FigureAttribute, GeometryType};
use crate::value::{Figure, GeometryValue, Shape};

impl GeometryValue {
    /// The type of the root shape
    pub fn geometry_type(&self) -> GeometryType {
        self.shapes[0].shape_type
    }

    /// True when the value carries no vertices at all
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.figures.is_empty()
    }

    /// Number of immediate sub-geometries
    ///
    /// Zero for an empty value, the direct child count for collection
    /// types, and one for everything else.
    pub fn num_geometries(&self) -> usize {
        if self.is_empty() {
            0
        } else if self.geometry_type().is_collection() {
            self.shapes
                .iter()
                .skip(1)
                .filter(|shape| shape.parent_offset == 0)
                .count()
        } else {
            1
        }
    }

    /// Extract the `n`-th (1-based) immediate sub-geometry as a
    /// self-contained value
    ///
    /// For non-collection types `n == 1` returns a copy of the value
    /// itself. Segment records travel with the curve figures of the
    /// extracted subtree.
    pub fn geometry_n(&self, n: usize) -> Result<GeometryValue, GeometryError> {
        if !self.geometry_type().is_collection() {
            if n == 1 && !self.is_empty() {
                return Ok(self.clone());
            }
            return Err(GeometryError::IndexOutOfRange(format!(
                "sub-geometry {n} of a geometry with {} sub-geometries",
                self.num_geometries()
            )));
        }

        let child = self
            .shapes
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, shape)| shape.parent_offset == 0)
            .nth(n.wrapping_sub(1))
            .map(|(i, _)| i)
            .ok_or_else(|| {
                GeometryError::IndexOutOfRange(format!(
                    "sub-geometry {n} of a collection with {} sub-geometries",
                    self.num_geometries()
                ))
            })?;
        self.extract_subtree(child)
    }

    /// Number of vertices belonging to the root shape's subtree
    pub fn num_points(&self) -> usize {
        let (start, end) = self.vertex_range(self.figure_range(0));
        end - start
    }

    /// The `n`-th (1-based) vertex of the value as a point geometry
    ///
    /// The returned point carries the same SRID and Z/M capabilities as
    /// the source value.
    pub fn point_n(&self, n: usize) -> Result<GeometryValue, GeometryError> {
        let (start, end) = self.vertex_range(self.figure_range(0));
        if n == 0 || n > end - start {
            return Err(GeometryError::IndexOutOfRange(format!(
                "point {n} of a geometry with {} point(s)",
                end - start
            )));
        }
        Ok(Self::single_vertex(
            self.srid,
            self.has_z,
            self.has_m,
            self.vertices[start + n - 1],
        ))
    }

    /// The X coordinate, present only for a non-empty point
    pub fn x(&self) -> Option<f64> {
        self.point_vertex().map(|vertex| vertex.x)
    }

    /// The Y coordinate, present only for a non-empty point
    pub fn y(&self) -> Option<f64> {
        self.point_vertex().map(|vertex| vertex.y)
    }

    /// The Z coordinate, absent for non-points, values without the Z
    /// capability, and NaN slots
    pub fn z(&self) -> Option<f64> {
        if !self.has_z {
            return None;
        }
        self.point_vertex()
            .map(|vertex| vertex.z)
            .filter(|z| !z.is_nan())
    }

    /// The M value, absent for non-points, values without the M
    /// capability, and NaN slots
    pub fn m(&self) -> Option<f64> {
        if !self.has_m {
            return None;
        }
        self.point_vertex()
            .map(|vertex| vertex.m)
            .filter(|m| !m.is_nan())
    }

    fn point_vertex(&self) -> Option<&crate::value::Vertex> {
        if self.geometry_type() == GeometryType::Point {
            self.vertices.first()
        } else {
            None
        }
    }

    /// The outermost ring of a Polygon or CurvePolygon
    ///
    /// Rings are returned as LineString values over the figure's vertex
    /// run; for curve rings this is the run of control vertices.
    pub fn exterior_ring(&self) -> Option<GeometryValue> {
        let (start, end) = self.areal_figure_range()?;
        if start == end {
            return None;
        }
        Some(self.ring_value(start))
    }

    /// Number of rings beyond the outermost one
    pub fn num_interior_rings(&self) -> usize {
        match self.areal_figure_range() {
            Some((start, end)) if start < end => end - start - 1,
            _ => 0,
        }
    }

    /// The `n`-th (1-based) interior ring of a Polygon or CurvePolygon
    pub fn interior_ring_n(&self, n: usize) -> Result<GeometryValue, GeometryError> {
        match self.areal_figure_range() {
            Some((start, end)) if n >= 1 && start + n < end => Ok(self.ring_value(start + n)),
            _ => Err(GeometryError::IndexOutOfRange(format!(
                "interior ring {n} of a geometry with {} interior ring(s)",
                self.num_interior_rings()
            ))),
        }
    }

    fn areal_figure_range(&self) -> Option<(usize, usize)> {
        match self.geometry_type() {
            GeometryType::Polygon | GeometryType::CurvePolygon => Some(self.figure_range(0)),
            _ => None,
        }
    }

    fn ring_value(&self, figure: usize) -> GeometryValue {
        let (start, end) = self.figure_vertex_range(figure);
        GeometryValue {
            srid: self.srid,
            version: 1,
            has_z: self.has_z,
            has_m: self.has_m,
            is_valid: self.is_valid,
            is_larger_than_hemisphere: false,
            vertices: self.vertices[start..end].to_vec(),
            figures: vec![Figure::new(FigureAttribute::Stroke, 0)],
            shapes: vec![Shape::new(-1, 0, GeometryType::LineString)],
            segments: vec![],
        }
    }

    /// One past the last shape of the subtree rooted at `shape`
    ///
    /// In preorder a descendant's parent offset always lands inside
    /// the subtree, so the subtree is the maximal run of shapes whose
    /// parent offset is at least `shape`.
    fn subtree_end(&self, shape: usize) -> usize {
        let mut end = shape + 1;
        while end < self.shapes.len() && self.shapes[end].parent_offset >= shape as i32 {
            end += 1;
        }
        end
    }

    /// The figure span of the subtree rooted at `shape`
    ///
    /// Empty shapes advertise no figures (offset −1); the span starts
    /// at the first advertised offset inside the subtree and ends at
    /// the first advertised offset after it.
    fn figure_range(&self, shape: usize) -> (usize, usize) {
        let subtree_end = self.subtree_end(shape);
        let end = self.shapes[subtree_end..]
            .iter()
            .find_map(|s| usize::try_from(s.figure_offset).ok())
            .unwrap_or(self.figures.len());
        let start = self.shapes[shape..subtree_end]
            .iter()
            .find_map(|s| usize::try_from(s.figure_offset).ok())
            .unwrap_or(end);
        (start, end)
    }

    fn figure_vertex_range(&self, figure: usize) -> (usize, usize) {
        let start = self.figures[figure].point_offset as usize;
        let end = match self.figures.get(figure + 1) {
            Some(next) => next.point_offset as usize,
            None => self.vertices.len(),
        };
        (start, end)
    }

    fn vertex_range(&self, figure_range: (usize, usize)) -> (usize, usize) {
        let (figure_start, figure_end) = figure_range;
        if figure_start >= figure_end {
            return (0, 0);
        }
        let start = self.figures[figure_start].point_offset as usize;
        let end = match self.figures.get(figure_end) {
            Some(next) => next.point_offset as usize,
            None => self.vertices.len(),
        };
        (start, end)
    }

    /// Per-figure spans into the segment table
    ///
    /// Curve figures consume segments in figure order: the opening
    /// segment consumes its full vertex count, each following segment
    /// chains off the previous end point. The walk must land exactly on
    /// every figure boundary and exhaust the table.
    pub(crate) fn segment_spans(&self) -> Result<Vec<(usize, usize)>, GeometryError> {
        let mut spans = Vec::with_capacity(self.figures.len());
        let mut next = 0usize;
        for figure in 0..self.figures.len() {
            let start = next;
            if self.figures[figure].attribute == FigureAttribute::Curve {
                let (vertex_start, vertex_end) = self.figure_vertex_range(figure);
                let vertex_count = vertex_end - vertex_start;
                let mut consumed = 0usize;
                while consumed < vertex_count {
                    let segment = self.segments.get(next).ok_or_else(|| {
                        GeometryError::Invalid(format!(
                            "segment table exhausted inside curve figure {figure}"
                        ))
                    })?;
                    consumed += if next == start {
                        segment.vertex_count_initial()
                    } else {
                        segment.vertex_count_chained()
                    };
                    next += 1;
                }
                if consumed != vertex_count {
                    return Err(GeometryError::Invalid(format!(
                        "segments of curve figure {figure} cover {consumed} of {vertex_count} vertices"
                    )));
                }
            }
            spans.push((start, next));
        }
        if next != self.segments.len() {
            return Err(GeometryError::Invalid(format!(
                "{} segment record(s) not claimed by any curve figure",
                self.segments.len() - next
            )));
        }
        Ok(spans)
    }

    /// Copy the subtree rooted at `shape` into a self-contained value,
    /// re-basing every offset
    fn extract_subtree(&self, shape: usize) -> Result<GeometryValue, GeometryError> {
        let subtree_end = self.subtree_end(shape);
        let (figure_start, figure_end) = self.figure_range(shape);
        let (vertex_start, vertex_end) = self.vertex_range((figure_start, figure_end));

        let segments = if self.segments.is_empty() || figure_start >= figure_end {
            vec![]
        } else {
            let spans = self.segment_spans()?;
            self.segments[spans[figure_start].0..spans[figure_end - 1].1].to_vec()
        };

        let shapes: Vec<Shape> = self.shapes[shape..subtree_end]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Shape::new(
                    if i == 0 {
                        -1
                    } else {
                        s.parent_offset - shape as i32
                    },
                    if s.figure_offset < 0 {
                        -1
                    } else {
                        s.figure_offset - figure_start as i32
                    },
                    s.shape_type,
                )
            })
            .collect();
        let figures: Vec<Figure> = self.figures[figure_start..figure_end]
            .iter()
            .map(|f| Figure::new(f.attribute, f.point_offset - vertex_start as i32))
            .collect();

        let version = if !segments.is_empty()
            || shapes.iter().any(|s| s.shape_type.requires_version_2())
        {
            2
        } else {
            1
        };

        Ok(GeometryValue {
            srid: self.srid,
            version,
            has_z: self.has_z,
            has_m: self.has_m,
            is_valid: self.is_valid,
            is_larger_than_hemisphere: false,
            vertices: self.vertices[vertex_start..vertex_end].to_vec(),
            figures,
            shapes,
            segments,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::decode;
    use sqludt_testing::create::BlobBuilder;
    use sqludt_testing::fixtures::*;

    #[test]
    fn collection_sub_geometries() {
        let value = decode(&geometry_collection_srid_4326()).unwrap();
        assert_eq!(value.geometry_type(), GeometryType::GeometryCollection);
        assert_eq!(value.num_geometries(), 3);
        assert_eq!(value.num_points(), 13);

        let point = value.geometry_n(1).unwrap();
        assert_eq!(point.geometry_type(), GeometryType::Point);
        assert_eq!(point.srid(), 4326);
        assert_eq!(point.x(), Some(1.0));
        assert_eq!(point.y(), Some(2.0));

        let line = value.geometry_n(2).unwrap();
        assert_eq!(line.geometry_type(), GeometryType::LineString);
        assert_eq!(line.num_points(), 2);
        assert_eq!(line.point_n(2).unwrap().x(), Some(6.0));

        let polygon = value.geometry_n(3).unwrap();
        assert_eq!(polygon.geometry_type(), GeometryType::Polygon);
        assert_eq!(polygon.num_points(), 10);

        let err = value.geometry_n(4).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange(_)));
        let err = value.geometry_n(0).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange(_)));
    }

    #[test]
    fn polygon_rings() {
        let value = decode(&geometry_collection_srid_4326()).unwrap();
        let polygon = value.geometry_n(3).unwrap();

        let exterior = polygon.exterior_ring().unwrap();
        assert_eq!(exterior.geometry_type(), GeometryType::LineString);
        assert_eq!(exterior.num_points(), 5);
        assert_eq!(exterior.point_n(1).unwrap().x(), Some(0.0));
        assert_eq!(exterior.point_n(3).unwrap().y(), Some(4.0));

        assert_eq!(polygon.num_interior_rings(), 1);
        let interior = polygon.interior_ring_n(1).unwrap();
        assert_eq!(interior.num_points(), 5);
        assert_eq!(interior.point_n(1).unwrap().x(), Some(1.0));

        let err = polygon.interior_ring_n(2).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange(_)));
    }

    #[test]
    fn rings_absent_for_non_areal_types() {
        let point = decode(&POINT_5_10_SRID_4326).unwrap();
        assert!(point.exterior_ring().is_none());
        assert_eq!(point.num_interior_rings(), 0);
        assert!(matches!(
            point.interior_ring_n(1).unwrap_err(),
            GeometryError::IndexOutOfRange(_)
        ));
    }

    #[test]
    fn non_collection_geometry_n() {
        let line = decode(&LINE_SEGMENT_SRID_4326).unwrap();
        assert_eq!(line.num_geometries(), 1);
        assert_eq!(line.geometry_n(1).unwrap(), line);
        assert!(matches!(
            line.geometry_n(2).unwrap_err(),
            GeometryError::IndexOutOfRange(_)
        ));
    }

    #[test]
    fn empty_geometry_navigation() {
        let empty = decode(&EMPTY_POINT).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.num_geometries(), 0);
        assert!(matches!(
            empty.geometry_n(1).unwrap_err(),
            GeometryError::IndexOutOfRange(_)
        ));
        assert!(matches!(
            empty.point_n(1).unwrap_err(),
            GeometryError::IndexOutOfRange(_)
        ));
    }

    #[test]
    fn curve_polygon_ring_uses_control_vertices() {
        let value = decode(&CURVE_POLYGON_SRID_4326).unwrap();
        let exterior = value.exterior_ring().unwrap();
        assert_eq!(exterior.geometry_type(), GeometryType::LineString);
        assert_eq!(exterior.num_points(), 5);
    }

    /// A version 2 collection holding a compound curve and a point:
    /// the segment records must travel with the extracted curve.
    fn curve_collection() -> Vec<u8> {
        BlobBuilder::new()
            .i32(4326)
            .u8(2)
            .u8(0x04)
            .i32(6)
            .xy(0.0, 0.0)
            .xy(1.0, 1.0)
            .xy(2.0, 0.0)
            .xy(3.0, 1.0)
            .xy(4.0, 0.0)
            .xy(9.0, 9.0)
            .i32(2)
            .figure(0x03, 0)
            .figure(0x01, 5)
            .i32(3)
            .shape(-1, 0, 7)
            .shape(0, 0, 9)
            .shape(0, 1, 1)
            .i32(3)
            .u8(0x02)
            .u8(0x00)
            .u8(0x01)
            .build()
    }

    #[test]
    fn segments_travel_with_extracted_curves() {
        let value = decode(&curve_collection()).unwrap();
        assert_eq!(value.num_geometries(), 2);

        let curve = value.geometry_n(1).unwrap();
        assert_eq!(curve.geometry_type(), GeometryType::CompoundCurve);
        assert_eq!(curve.version(), 2);
        assert_eq!(curve.segments().len(), 3);
        assert_eq!(curve.num_points(), 5);

        let point = value.geometry_n(2).unwrap();
        assert_eq!(point.geometry_type(), GeometryType::Point);
        assert_eq!(point.version(), 1);
        assert!(point.segments().is_empty());
        assert_eq!(point.x(), Some(9.0));
    }

    #[test]
    fn segment_spans_reject_uncovered_vertices() {
        // FirstLine + Line covers 3 of the 4 curve vertices
        let buf = BlobBuilder::new()
            .i32(0)
            .u8(2)
            .u8(0x04)
            .i32(4)
            .xy(0.0, 0.0)
            .xy(1.0, 0.0)
            .xy(2.0, 0.0)
            .xy(3.0, 0.0)
            .i32(1)
            .figure(0x03, 0)
            .i32(1)
            .shape(-1, 0, 9)
            .i32(2)
            .u8(0x02)
            .u8(0x00)
            .build();
        let value = decode(&buf).unwrap();
        let err = value.segment_spans().unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));
    }

    #[test]
    fn segment_spans_reject_unclaimed_records() {
        // A straight-line figure cannot claim the segment record
        let buf = BlobBuilder::new()
            .i32(0)
            .u8(2)
            .u8(0x04)
            .i32(2)
            .xy(0.0, 0.0)
            .xy(1.0, 0.0)
            .i32(1)
            .figure(0x01, 0)
            .i32(1)
            .shape(-1, 0, 2)
            .i32(1)
            .u8(0x02)
            .build();
        let value = decode(&buf).unwrap();
        let err = value.segment_spans().unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));
    }

    #[test]
    fn nested_collection_extraction() {
        // GeometryCollection( MultiPoint(P, P), P )
        let buf = BlobBuilder::new()
            .i32(0)
            .u8(1)
            .u8(0x04)
            .i32(3)
            .xy(0.0, 0.0)
            .xy(1.0, 1.0)
            .xy(2.0, 2.0)
            .i32(3)
            .figure(0x01, 0)
            .figure(0x01, 1)
            .figure(0x01, 2)
            .i32(5)
            .shape(-1, 0, 7)
            .shape(0, 0, 4)
            .shape(1, 0, 1)
            .shape(1, 1, 1)
            .shape(0, 2, 1)
            .build();
        let value = decode(&buf).unwrap();
        assert_eq!(value.num_geometries(), 2);

        let multi = value.geometry_n(1).unwrap();
        assert_eq!(multi.geometry_type(), GeometryType::MultiPoint);
        assert_eq!(multi.num_geometries(), 2);
        assert_eq!(multi.num_points(), 2);
        assert_eq!(multi.geometry_n(2).unwrap().x(), Some(1.0));

        let point = value.geometry_n(2).unwrap();
        assert_eq!(point.x(), Some(2.0));
    }
}
