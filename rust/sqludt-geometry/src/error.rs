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
use sqludt_cursor::CursorError;
use thiserror::Error;

/// Errors raised by the geometry codec and tree navigation
///
/// Every decode failure is fatal for that call: no partial value is
/// ever returned. [IndexOutOfRange](Self::IndexOutOfRange) is the one
/// recoverable variant, signalling a bad 1-based argument to a
/// navigation call rather than a bad buffer.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Buffer shorter than the fixed header, or an unsupported version
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    /// A declared table count requires more bytes than remain
    #[error("truncated table: {0}")]
    TruncatedTable(String),
    /// Parent or offset tables that do not describe a preorder forest
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
    /// A navigation call with an out-of-range 1-based index
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),
    /// Anything else structurally wrong with the value or buffer
    #[error("{0}")]
    Invalid(String),
}

impl From<CursorError> for GeometryError {
    fn from(value: CursorError) -> Self {
        GeometryError::TruncatedTable(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_errors_become_truncated_table() {
        let err: GeometryError = CursorError::UnexpectedEnd {
            offset: 10,
            needed: 4,
        }
        .into();
        assert!(matches!(err, GeometryError::TruncatedTable(_)));
        assert_eq!(
            err.to_string(),
            "truncated table: buffer too small at offset 10: need 4 more byte(s)"
        );
    }
}
