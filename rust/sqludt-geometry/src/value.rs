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
use geo_traits::Dimensions;

use crate::error::GeometryError;
use crate::types::{FigureAttribute, GeometryType, SegmentType};

/// SRID sentinel for a geometry with no spatial reference
pub const SRID_NONE: i32 = -1;

/// A single vertex of the shared vertex table
///
/// Z and M hold the NaN bit pattern when the value is unknown for
/// this vertex or when the geometry lacks the capability entirely;
/// the distinction lives on [GeometryValue::has_z]/[GeometryValue::has_m].
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: f64::NAN,
            m: f64::NAN,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn with_m(mut self, m: f64) -> Self {
        self.m = m;
        self
    }
}

// Structural equality: NaN positions must compare equal so that a
// round-tripped value equals its source.
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.m.to_bits() == other.m.to_bits()
    }
}

/// A contiguous run of vertices forming one ring, stroke, or curve
///
/// `point_offset` indexes the start of the run in the global vertex
/// table; the run ends where the next figure begins (or at the end of
/// the table for the last figure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figure {
    pub attribute: FigureAttribute,
    pub point_offset: i32,
}

impl Figure {
    pub fn new(attribute: FigureAttribute, point_offset: i32) -> Self {
        Self {
            attribute,
            point_offset,
        }
    }
}

/// One node of the geometry's logical tree
///
/// Shapes are stored in preorder; `parent_offset` is −1 for the root
/// only. `figure_offset` is where this shape's direct figures begin,
/// or −1 when the shape owns none (the empty-geometry encoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub parent_offset: i32,
    pub figure_offset: i32,
    pub shape_type: GeometryType,
}

impl Shape {
    pub fn new(parent_offset: i32, figure_offset: i32, shape_type: GeometryType) -> Self {
        Self {
            parent_offset,
            figure_offset,
            shape_type,
        }
    }
}

/// A decoded geometry value
///
/// Flat vertex/figure/shape/segment tables plus the header fields.
/// Immutable once constructed; owns copies of all numeric data, so the
/// source buffer may be discarded as soon as decoding returns.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryValue {
    pub(crate) srid: i32,
    pub(crate) version: u8,
    pub(crate) has_z: bool,
    pub(crate) has_m: bool,
    pub(crate) is_valid: bool,
    pub(crate) is_larger_than_hemisphere: bool,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) figures: Vec<Figure>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) segments: Vec<SegmentType>,
}

impl GeometryValue {
    /// Construct a geometry value from flat tables, validating the
    /// same invariants the decoder enforces
    pub fn new(
        srid: i32,
        version: u8,
        dimensions: Dimensions,
        vertices: Vec<Vertex>,
        figures: Vec<Figure>,
        shapes: Vec<Shape>,
        segments: Vec<SegmentType>,
    ) -> Result<Self, GeometryError> {
        let (has_z, has_m) = match dimensions {
            Dimensions::Xy => (false, false),
            Dimensions::Xyz => (true, false),
            Dimensions::Xym => (false, true),
            Dimensions::Xyzm => (true, true),
            Dimensions::Unknown(n) => {
                return Err(GeometryError::Invalid(format!(
                    "Unsupported dimensions Unknown({n})"
                )))
            }
        };
        let value = Self {
            srid,
            version,
            has_z,
            has_m,
            is_valid: true,
            is_larger_than_hemisphere: false,
            vertices,
            figures,
            shapes,
            segments,
        };
        value.validate()?;
        Ok(value)
    }

    /// A version 1 XY point
    pub fn point(srid: i32, x: f64, y: f64) -> Self {
        Self::single_vertex(srid, false, false, Vertex::new(x, y))
    }

    /// An empty geometry of the given type: no vertices, no figures,
    /// a single shape with figure offset −1
    pub fn empty(srid: i32, geometry_type: GeometryType, dimensions: Dimensions) -> Self {
        let version = if geometry_type.requires_version_2() {
            2
        } else {
            1
        };
        Self {
            srid,
            version,
            has_z: matches!(dimensions, Dimensions::Xyz | Dimensions::Xyzm),
            has_m: matches!(dimensions, Dimensions::Xym | Dimensions::Xyzm),
            is_valid: true,
            is_larger_than_hemisphere: false,
            vertices: vec![],
            figures: vec![],
            shapes: vec![Shape::new(-1, -1, geometry_type)],
            segments: vec![],
        }
    }

    pub(crate) fn single_vertex(srid: i32, has_z: bool, has_m: bool, vertex: Vertex) -> Self {
        Self {
            srid,
            version: 1,
            has_z,
            has_m,
            is_valid: true,
            is_larger_than_hemisphere: false,
            vertices: vec![vertex],
            figures: vec![Figure::new(FigureAttribute::Stroke, 0)],
            shapes: vec![Shape::new(-1, 0, GeometryType::Point)],
            segments: vec![],
        }
    }

    /// Replace the informational header flags (IsValid,
    /// IsLargerThanHemisphere)
    pub fn with_flags(mut self, is_valid: bool, is_larger_than_hemisphere: bool) -> Self {
        self.is_valid = is_valid;
        self.is_larger_than_hemisphere = is_larger_than_hemisphere;
        self
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Whether the per-vertex Z array exists, regardless of NaN slots
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    /// Whether the per-vertex M array exists, regardless of NaN slots
    pub fn has_m(&self) -> bool {
        self.has_m
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_larger_than_hemisphere(&self) -> bool {
        self.is_larger_than_hemisphere
    }

    /// The declared capability pair as [Dimensions]
    pub fn dimensions(&self) -> Dimensions {
        match (self.has_z, self.has_m) {
            (false, false) => Dimensions::Xy,
            (true, false) => Dimensions::Xyz,
            (false, true) => Dimensions::Xym,
            (true, true) => Dimensions::Xyzm,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn segments(&self) -> &[SegmentType] {
        &self.segments
    }

    /// Validate the table invariants: preorder forest rooted at shape
    /// 0, offsets non-decreasing and in bounds, curve tables only in
    /// version 2
    pub(crate) fn validate(&self) -> Result<(), GeometryError> {
        if self.shapes.is_empty() {
            return Err(GeometryError::InvalidTopology(
                "a geometry requires at least one shape".to_string(),
            ));
        }
        if self.shapes[0].parent_offset != -1 {
            return Err(GeometryError::InvalidTopology(format!(
                "root shape parent offset must be -1, found {}",
                self.shapes[0].parent_offset
            )));
        }
        for (i, shape) in self.shapes.iter().enumerate().skip(1) {
            if shape.parent_offset < 0 || shape.parent_offset as usize >= i {
                return Err(GeometryError::InvalidTopology(format!(
                    "shape {i} parent offset {} is not a preceding shape",
                    shape.parent_offset
                )));
            }
        }

        let num_figures = self.figures.len() as i32;
        let mut last_figure_offset = 0i32;
        for (i, shape) in self.shapes.iter().enumerate() {
            if shape.figure_offset == -1 {
                continue;
            }
            if shape.figure_offset < last_figure_offset || shape.figure_offset > num_figures {
                return Err(GeometryError::InvalidTopology(format!(
                    "shape {i} figure offset {} out of order or out of bounds",
                    shape.figure_offset
                )));
            }
            last_figure_offset = shape.figure_offset;
        }

        let num_points = self.vertices.len() as i32;
        let mut last_point_offset = 0i32;
        for (i, figure) in self.figures.iter().enumerate() {
            if figure.point_offset < last_point_offset || figure.point_offset > num_points {
                return Err(GeometryError::InvalidTopology(format!(
                    "figure {i} point offset {} out of order or out of bounds",
                    figure.point_offset
                )));
            }
            last_point_offset = figure.point_offset;
        }

        if self.version < 2 {
            if !self.segments.is_empty() {
                return Err(GeometryError::Invalid(
                    "segment table requires a version 2 geometry".to_string(),
                ));
            }
            for shape in &self.shapes {
                if shape.shape_type.requires_version_2() {
                    return Err(GeometryError::Invalid(format!(
                        "{} requires a version 2 geometry",
                        shape.shape_type
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vertex_equality_includes_nan() {
        let a = Vertex::new(1.0, 2.0).with_z(f64::NAN);
        let b = Vertex::new(1.0, 2.0).with_z(f64::NAN);
        assert_eq!(a, b);
        assert_ne!(a, Vertex::new(1.0, 2.0).with_z(3.0));
        assert_ne!(Vertex::new(0.0, 0.0), Vertex::new(-0.0, 0.0));
    }

    #[test]
    fn point_constructor() {
        let point = GeometryValue::point(4326, 5.0, 10.0);
        assert_eq!(point.srid(), 4326);
        assert_eq!(point.version(), 1);
        assert!(!point.has_z());
        assert!(!point.has_m());
        assert!(point.is_valid());
        assert_eq!(point.dimensions(), Dimensions::Xy);
        assert_eq!(point.vertices().len(), 1);
        assert_eq!(point.shapes()[0].shape_type, GeometryType::Point);
    }

    #[test]
    fn empty_constructor() {
        let empty = GeometryValue::empty(0, GeometryType::Point, Dimensions::Xy);
        assert!(empty.vertices().is_empty());
        assert!(empty.figures().is_empty());
        assert_eq!(empty.shapes()[0].figure_offset, -1);
        assert_eq!(empty.version(), 1);

        let globe = GeometryValue::empty(SRID_NONE, GeometryType::FullGlobe, Dimensions::Xy);
        assert_eq!(globe.version(), 2);
    }

    #[test]
    fn new_rejects_forward_parent() {
        let err = GeometryValue::new(
            0,
            1,
            Dimensions::Xy,
            vec![Vertex::new(0.0, 0.0)],
            vec![Figure::new(FigureAttribute::Stroke, 0)],
            vec![
                Shape::new(-1, 0, GeometryType::GeometryCollection),
                Shape::new(2, 0, GeometryType::Point),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidTopology(_)));
    }

    #[test]
    fn new_rejects_decreasing_point_offsets() {
        let err = GeometryValue::new(
            0,
            1,
            Dimensions::Xy,
            vec![Vertex::new(0.0, 0.0), Vertex::new(1.0, 1.0)],
            vec![
                Figure::new(FigureAttribute::Stroke, 1),
                Figure::new(FigureAttribute::Stroke, 0),
            ],
            vec![Shape::new(-1, 0, GeometryType::MultiPoint)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::InvalidTopology(_)));
    }

    #[test]
    fn new_rejects_curve_tables_in_version_1() {
        let err = GeometryValue::new(
            0,
            1,
            Dimensions::Xy,
            vec![Vertex::new(0.0, 0.0)],
            vec![Figure::new(FigureAttribute::Stroke, 0)],
            vec![Shape::new(-1, 0, GeometryType::Point)],
            vec![SegmentType::FirstLine],
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));

        let err = GeometryValue::new(
            0,
            1,
            Dimensions::Xy,
            vec![],
            vec![],
            vec![Shape::new(-1, -1, GeometryType::FullGlobe)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));
    }

    #[test]
    fn new_rejects_unknown_dimensions() {
        let err = GeometryValue::new(
            0,
            1,
            Dimensions::Unknown(3),
            vec![],
            vec![],
            vec![Shape::new(-1, -1, GeometryType::Point)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::Invalid(_)));
    }
}
