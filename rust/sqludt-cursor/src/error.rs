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
use thiserror::Error;

/// Errors raised by the byte and bit cursors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CursorError {
    /// A byte-level read past the end of the buffer
    #[error("buffer too small at offset {offset}: need {needed} more byte(s)")]
    UnexpectedEnd { offset: usize, needed: usize },
    /// A bit-level read past the end of the stream
    #[error("bit stream too small at bit {offset}: need {needed} more bit(s)")]
    UnexpectedEndOfBits { offset: usize, needed: usize },
    /// A bit-field wider than the 64 bits a single read can return
    #[error("unsupported bit-field width {0}")]
    UnsupportedWidth(u32),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        let err = CursorError::UnexpectedEnd {
            offset: 4,
            needed: 8,
        };
        assert_eq!(
            err.to_string(),
            "buffer too small at offset 4: need 8 more byte(s)"
        );

        let err = CursorError::UnexpectedEndOfBits {
            offset: 5,
            needed: 3,
        };
        assert_eq!(
            err.to_string(),
            "bit stream too small at bit 5: need 3 more bit(s)"
        );

        let err = CursorError::UnsupportedWidth(65);
        assert_eq!(err.to_string(), "unsupported bit-field width 65");
    }
}
