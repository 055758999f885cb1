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

//! Canonical serialized blobs with their layouts spelled out byte by
//! byte. All multi-byte fields are little-endian.

use crate::create::BlobBuilder;

/// POINT (5 10), SRID 4326, single-point shortcut layout
pub const POINT_5_10_SRID_4326: [u8; 22] = [
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x01, // version 1
    0x0c, // props: IsValid | IsSinglePoint
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x40, // x = 5.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x24, 0x40, // y = 10.0
];

/// LINESTRING (0 1, 3 2), SRID 4326, single-line-segment shortcut
pub const LINE_SEGMENT_SRID_4326: [u8; 38] = [
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x01, // version 1
    0x14, // props: IsValid | IsSingleLineSegment
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y1 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x40, // x2 = 3.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y2 = 2.0
];

/// POINT EMPTY, SRID 0: no vertices, no figures, one shape with
/// figure offset -1
pub const EMPTY_POINT: [u8; 27] = [
    0x00, 0x00, 0x00, 0x00, // SRID 0
    0x01, // version 1
    0x04, // props: IsValid
    0x00, 0x00, 0x00, 0x00, // 0 points
    0x00, 0x00, 0x00, 0x00, // 0 figures
    0x01, 0x00, 0x00, 0x00, // 1 shape
    0xff, 0xff, 0xff, 0xff, // parent offset -1
    0xff, 0xff, 0xff, 0xff, // figure offset -1
    0x01, // shape type Point
];

/// LINESTRING Z (0 1 1, 3 2 2, 4 5 NaN), SRID 4326
///
/// The third Z slot holds the NaN pattern: the geometry has the Z
/// capability but that one vertex has no Z value.
pub const LINESTRING_Z_NAN_SRID_4326: [u8; 104] = [
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x01, // version 1
    0x05, // props: IsValid | HasZ
    0x03, 0x00, 0x00, 0x00, // 3 points
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y1 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x40, // x2 = 3.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y2 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x40, // x3 = 4.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x40, // y3 = 5.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // z1 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // z2 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf8, 0x7f, // z3 = NaN
    0x01, 0x00, 0x00, 0x00, // 1 figure
    0x01, // figure attribute Stroke
    0x00, 0x00, 0x00, 0x00, // figure point offset 0
    0x01, 0x00, 0x00, 0x00, // 1 shape
    0xff, 0xff, 0xff, 0xff, // parent offset -1
    0x00, 0x00, 0x00, 0x00, // figure offset 0
    0x02, // shape type LineString
];

/// CURVEPOLYGON (COMPOUNDCURVE (...)), SRID 4326, version 2
///
/// One curve figure over five vertices, partitioned by the segment
/// table into a first line, a chained line, and a chained arc. Also
/// carries the IsLargerThanHemisphere flag.
pub const CURVE_POLYGON_SRID_4326: [u8; 119] = [
    0xe6, 0x10, 0x00, 0x00, // SRID 4326
    0x02, // version 2
    0x24, // props: IsValid | IsLargerThanHemisphere
    0x05, 0x00, 0x00, 0x00, // 5 points
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y1 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // x2 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y2 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // x3 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, // y3 = 2.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x4 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xf0, 0x3f, // y4 = 1.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // x5 = 0.0
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // y5 = 0.0
    0x01, 0x00, 0x00, 0x00, // 1 figure
    0x03, // figure attribute Curve
    0x00, 0x00, 0x00, 0x00, // figure point offset 0
    0x01, 0x00, 0x00, 0x00, // 1 shape
    0xff, 0xff, 0xff, 0xff, // parent offset -1
    0x00, 0x00, 0x00, 0x00, // figure offset 0
    0x0a, // shape type CurvePolygon
    0x03, 0x00, 0x00, 0x00, // 3 segments
    0x02, // FirstLine
    0x00, // Line
    0x03, // FirstArc
];

/// GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (4 5, 6 7),
/// POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 1 2, 2 2, 2 1, 1 1))),
/// SRID 4326
pub fn geometry_collection_srid_4326() -> Vec<u8> {
    BlobBuilder::new()
        .i32(4326)
        .u8(1) // version
        .u8(0x04) // props: IsValid
        .i32(13) // point count
        .xy(1.0, 2.0) // the point
        .xy(4.0, 5.0) // linestring start
        .xy(6.0, 7.0) // linestring end
        .xy(0.0, 0.0) // exterior ring
        .xy(4.0, 0.0)
        .xy(4.0, 4.0)
        .xy(0.0, 4.0)
        .xy(0.0, 0.0)
        .xy(1.0, 1.0) // interior ring
        .xy(1.0, 2.0)
        .xy(2.0, 2.0)
        .xy(2.0, 1.0)
        .xy(1.0, 1.0)
        .i32(4) // figure count
        .figure(0x01, 0) // point stroke
        .figure(0x01, 1) // linestring stroke
        .figure(0x02, 3) // exterior ring
        .figure(0x00, 8) // interior ring
        .i32(4) // shape count
        .shape(-1, 0, 0x07) // GeometryCollection root
        .shape(0, 0, 0x01) // Point
        .shape(0, 1, 0x02) // LineString
        .shape(0, 2, 0x03) // Polygon
        .build()
}

/// hierarchyid "/1/": one level, label 1, real
///
/// Selector 01, field bits 01 (label = 0 + 1), real flag 1, padded
/// with three zero bits.
pub const HIERARCHY_LEVEL_1: [u8; 1] = [0x58];

/// hierarchyid "/1/-2.18/": three levels
///
/// Level 1: `01|01|1` (label 1, real). Level 2: `00111|111|0` (stored
/// label -1 in the -8..-1 range; the fake flag subtracts one, giving
/// -2). Level 3: `110|00001010|1` (the six value bits of the
/// `xx0x1xxx` field hold 2, so the label is 16 + 2 = 18, real). The
/// remaining six bits are zero padding.
pub const HIERARCHY_THREE_LEVELS: [u8; 4] = [0x59, 0xfb, 0x05, 0x40];
