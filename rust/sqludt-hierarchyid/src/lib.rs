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

//! Codec for the SQL Server `hierarchyid` UDT binary format.
//!
//! A path like `/1/-2.18/` is stored as a variable-width bit stream:
//! per level a selector prefix picks a label range, the range's value
//! bits hold the label offset, and a trailing flag bit distinguishes
//! real labels from the fake ones that position uncommitted siblings.
//! The encoding orders byte-wise exactly like the depth-first order of
//! the paths.

pub mod codec;
pub mod error;
pub mod path;

pub use codec::{decode, encode};
pub use error::HierarchyError;
pub use path::{HierarchyPath, Level};
