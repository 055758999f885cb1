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

/// Errors raised by the hierarchyid codec and path parser
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HierarchyError {
    /// The bit stream ended inside a level's selector or field
    #[error("insufficient bits: {0}")]
    InsufficientBits(String),
    /// A selector, label, or path string outside the format
    #[error("{0}")]
    Invalid(String),
}

impl From<CursorError> for HierarchyError {
    fn from(value: CursorError) -> Self {
        HierarchyError::InsufficientBits(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_errors_become_insufficient_bits() {
        let err: HierarchyError = CursorError::UnexpectedEndOfBits {
            offset: 12,
            needed: 3,
        }
        .into();
        assert!(matches!(err, HierarchyError::InsufficientBits(_)));
    }
}
