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
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Geometry types
///
/// The shape-type tags of the UDT serialization, in serialized order.
/// CircularString and later tags only appear in version 2 buffers.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Hash, Clone, Copy)]
pub enum GeometryType {
    /// Point geometry type
    Point,
    /// LineString geometry type
    LineString,
    /// Polygon geometry type
    Polygon,
    /// MultiPoint geometry type
    MultiPoint,
    /// MultiLineString geometry type
    MultiLineString,
    /// MultiPolygon geometry type
    MultiPolygon,
    /// GeometryCollection geometry type
    GeometryCollection,
    /// CircularString geometry type (version 2)
    CircularString,
    /// CompoundCurve geometry type (version 2)
    CompoundCurve,
    /// CurvePolygon geometry type (version 2)
    CurvePolygon,
    /// FullGlobe geometry type (version 2)
    FullGlobe,
}

impl GeometryType {
    /// Construct a geometry type from a serialized shape-type byte
    pub fn try_from_udt_id(udt_id: u8) -> Result<Self, GeometryError> {
        match udt_id {
            1 => Ok(Self::Point),
            2 => Ok(Self::LineString),
            3 => Ok(Self::Polygon),
            4 => Ok(Self::MultiPoint),
            5 => Ok(Self::MultiLineString),
            6 => Ok(Self::MultiPolygon),
            7 => Ok(Self::GeometryCollection),
            8 => Ok(Self::CircularString),
            9 => Ok(Self::CompoundCurve),
            10 => Ok(Self::CurvePolygon),
            11 => Ok(Self::FullGlobe),
            _ => Err(GeometryError::Invalid(format!(
                "Unknown shape type identifier {udt_id}"
            ))),
        }
    }

    /// The serialized shape-type byte
    pub fn udt_id(&self) -> u8 {
        match self {
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
            Self::MultiPoint => 4,
            Self::MultiLineString => 5,
            Self::MultiPolygon => 6,
            Self::GeometryCollection => 7,
            Self::CircularString => 8,
            Self::CompoundCurve => 9,
            Self::CurvePolygon => 10,
            Self::FullGlobe => 11,
        }
    }

    /// The name reported to callers (e.g. by `STGeometryType`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::CircularString => "CircularString",
            Self::CompoundCurve => "CompoundCurve",
            Self::CurvePolygon => "CurvePolygon",
            Self::FullGlobe => "FullGlobe",
        }
    }

    /// True for the types whose direct children are sub-geometries
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon | Self::GeometryCollection
        )
    }

    /// True for the types only expressible in version 2 buffers
    pub fn requires_version_2(&self) -> bool {
        matches!(
            self,
            Self::CircularString | Self::CompoundCurve | Self::CurvePolygon | Self::FullGlobe
        )
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value_lower = value.to_ascii_lowercase();
        match value_lower.as_str() {
            "point" => Ok(Self::Point),
            "linestring" => Ok(Self::LineString),
            "polygon" => Ok(Self::Polygon),
            "multipoint" => Ok(Self::MultiPoint),
            "multilinestring" => Ok(Self::MultiLineString),
            "multipolygon" => Ok(Self::MultiPolygon),
            "geometrycollection" => Ok(Self::GeometryCollection),
            "circularstring" => Ok(Self::CircularString),
            "compoundcurve" => Ok(Self::CompoundCurve),
            "curvepolygon" => Ok(Self::CurvePolygon),
            "fullglobe" => Ok(Self::FullGlobe),
            _ => Err(GeometryError::Invalid(format!(
                "Invalid geometry type string: '{value}'"
            ))),
        }
    }
}

/// Figure attributes
///
/// The attribute byte of a figure record. Version 1 buffers use
/// InteriorRing/Stroke/ExteriorRing; version 2 reinterprets the same
/// numeric space as point/line/arc/composite-curve, with
/// [Curve](Self::Curve) figures consuming the segment table. The raw
/// byte round-trips either way.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum FigureAttribute {
    /// A closed ring that is not the first ring of its shape (0x00)
    InteriorRing,
    /// A straight-line path (0x01)
    Stroke,
    /// The first, outermost ring of its shape (0x02)
    ExteriorRing,
    /// A run joined per the segment table (0x03, version 2)
    Curve,
}

impl FigureAttribute {
    pub fn try_from_u8(value: u8) -> Result<Self, GeometryError> {
        match value {
            0 => Ok(Self::InteriorRing),
            1 => Ok(Self::Stroke),
            2 => Ok(Self::ExteriorRing),
            3 => Ok(Self::Curve),
            _ => Err(GeometryError::Invalid(format!(
                "Unknown figure attribute {value}"
            ))),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::InteriorRing => 0,
            Self::Stroke => 1,
            Self::ExteriorRing => 2,
            Self::Curve => 3,
        }
    }
}

/// Segment types
///
/// Version 2 curve figures partition their vertex run into sub-paths;
/// each segment record says how the next vertices join the path.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum SegmentType {
    /// A straight line to the next vertex (0x00)
    Line,
    /// A circular arc through the next two vertices (0x01)
    Arc,
    /// A straight line opening a new sub-path (0x02)
    FirstLine,
    /// A circular arc opening a new sub-path (0x03)
    FirstArc,
}

impl SegmentType {
    pub fn try_from_u8(value: u8) -> Result<Self, GeometryError> {
        match value {
            0 => Ok(Self::Line),
            1 => Ok(Self::Arc),
            2 => Ok(Self::FirstLine),
            3 => Ok(Self::FirstArc),
            _ => Err(GeometryError::Invalid(format!(
                "Unknown segment type {value}"
            ))),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Line => 0,
            Self::Arc => 1,
            Self::FirstLine => 2,
            Self::FirstArc => 3,
        }
    }

    /// Vertices consumed when this segment opens a figure's path
    pub fn vertex_count_initial(&self) -> usize {
        match self {
            Self::Line | Self::FirstLine => 2,
            Self::Arc | Self::FirstArc => 3,
        }
    }

    /// Vertices consumed when this segment continues from the
    /// previous segment's end point
    pub fn vertex_count_chained(&self) -> usize {
        match self {
            Self::Line | Self::FirstLine => 1,
            Self::Arc | Self::FirstArc => 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn geometry_type_udt_id_roundtrip(
        #[values(
            (GeometryType::Point, 1, "Point"),
            (GeometryType::LineString, 2, "LineString"),
            (GeometryType::Polygon, 3, "Polygon"),
            (GeometryType::MultiPoint, 4, "MultiPoint"),
            (GeometryType::MultiLineString, 5, "MultiLineString"),
            (GeometryType::MultiPolygon, 6, "MultiPolygon"),
            (GeometryType::GeometryCollection, 7, "GeometryCollection"),
            (GeometryType::CircularString, 8, "CircularString"),
            (GeometryType::CompoundCurve, 9, "CompoundCurve"),
            (GeometryType::CurvePolygon, 10, "CurvePolygon"),
            (GeometryType::FullGlobe, 11, "FullGlobe")
        )]
        case: (GeometryType, u8, &str),
    ) {
        let (geometry_type, udt_id, name) = case;
        assert_eq!(geometry_type.udt_id(), udt_id);
        assert_eq!(GeometryType::try_from_udt_id(udt_id).unwrap(), geometry_type);
        assert_eq!(geometry_type.name(), name);
        assert_eq!(geometry_type.to_string(), name);
        assert_eq!(GeometryType::from_str(name).unwrap(), geometry_type);
    }

    #[test]
    fn geometry_type_errors() {
        let err = GeometryType::try_from_udt_id(0).unwrap_err();
        assert_eq!(err.to_string(), "Unknown shape type identifier 0");
        let err = GeometryType::try_from_udt_id(12).unwrap_err();
        assert_eq!(err.to_string(), "Unknown shape type identifier 12");
        let err = GeometryType::from_str("gazornenplat").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid geometry type string: 'gazornenplat'"
        );
    }

    #[test]
    fn collection_and_version_predicates() {
        assert!(GeometryType::GeometryCollection.is_collection());
        assert!(GeometryType::MultiPoint.is_collection());
        assert!(!GeometryType::Polygon.is_collection());
        assert!(!GeometryType::CompoundCurve.is_collection());

        assert!(GeometryType::CurvePolygon.requires_version_2());
        assert!(GeometryType::FullGlobe.requires_version_2());
        assert!(!GeometryType::GeometryCollection.requires_version_2());
    }

    #[rstest]
    fn figure_attribute_roundtrip(#[values(0u8, 1, 2, 3)] raw: u8) {
        assert_eq!(FigureAttribute::try_from_u8(raw).unwrap().as_u8(), raw);
    }

    #[test]
    fn figure_attribute_invalid() {
        let err = FigureAttribute::try_from_u8(4).unwrap_err();
        assert_eq!(err.to_string(), "Unknown figure attribute 4");
    }

    #[rstest]
    fn segment_type_roundtrip(#[values(0u8, 1, 2, 3)] raw: u8) {
        assert_eq!(SegmentType::try_from_u8(raw).unwrap().as_u8(), raw);
    }

    #[test]
    fn segment_vertex_counts() {
        assert_eq!(SegmentType::FirstLine.vertex_count_initial(), 2);
        assert_eq!(SegmentType::Line.vertex_count_chained(), 1);
        assert_eq!(SegmentType::FirstArc.vertex_count_initial(), 3);
        assert_eq!(SegmentType::FirstArc.vertex_count_chained(), 2);
        assert_eq!(SegmentType::Arc.vertex_count_chained(), 2);
        let err = SegmentType::try_from_u8(9).unwrap_err();
        assert_eq!(err.to_string(), "Unknown segment type 9");
    }
}
