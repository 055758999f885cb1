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

//! Codec for the SQL Server `geometry`/`geography` UDT binary format.
//!
//! [decode](decode::decode) turns a serialized blob into a
//! [GeometryValue](value::GeometryValue): flat vertex, figure, shape,
//! and curve-segment tables plus the header flags. Tree navigation
//! (sub-geometries, points, polygon rings) is computed over those
//! tables on demand; [encode](encode::encode) is the exact inverse.

pub mod decode;
pub mod encode;
pub mod error;
pub mod navigate;
pub mod types;
pub mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::GeometryError;
pub use types::{FigureAttribute, GeometryType, SegmentType};
pub use value::{Figure, GeometryValue, Shape, Vertex, SRID_NONE};
