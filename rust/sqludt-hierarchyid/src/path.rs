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
use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::HierarchyError;

/// One stored component of a hierarchy path
///
/// Real components are the labels a caller handed out; fake components
/// only exist to slot a node between two existing siblings and never
/// terminate a path. In the canonical string form a real component is
/// followed by `/`, a fake one by `.`, so `/1.2/` is the node wedged
/// between `/1/` and `/2/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    pub label: i64,
    pub is_real: bool,
}

impl Level {
    pub fn real(label: i64) -> Self {
        Self {
            label,
            is_real: true,
        }
    }

    pub fn fake(label: i64) -> Self {
        Self {
            label,
            is_real: false,
        }
    }

    /// Sort key matching the serialized byte order
    ///
    /// A fake component with label `l` is stored as `l + 1` with a
    /// zero flag bit, which places it directly before the real `l + 1`.
    fn sort_key(&self) -> (i128, bool) {
        let adjustment = if self.is_real { 0 } else { 1 };
        (self.label as i128 + adjustment, self.is_real)
    }
}

/// A hierarchyid path such as `/`, `/1/`, or `/1/-2.18/`
///
/// Stored as the flat component list. A logical level of the path is a
/// run of fake components terminated by one real component; depth and
/// ancestry operate on logical levels, while ordering and the codec
/// operate on components. The comparison order equals the byte order
/// of the serialized form, which is the depth-first order of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct HierarchyPath {
    levels: Vec<Level>,
}

impl HierarchyPath {
    /// The root path `/`
    pub fn root() -> Self {
        Self { levels: vec![] }
    }

    /// Build a path from components; the last component must be real
    pub fn new(levels: Vec<Level>) -> Result<Self, HierarchyError> {
        if let Some(last) = levels.last() {
            if !last.is_real {
                return Err(HierarchyError::Invalid(
                    "a path cannot end with a fake component".to_string(),
                ));
            }
        }
        Ok(Self { levels })
    }

    pub fn is_root(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The number of logical levels below the root
    pub fn depth(&self) -> usize {
        self.levels.iter().filter(|level| level.is_real).count()
    }

    /// The path `n` logical levels up; `ancestor(0)` is the path itself
    pub fn ancestor(&self, n: usize) -> Result<Self, HierarchyError> {
        if n > self.depth() {
            return Err(HierarchyError::Invalid(format!(
                "ancestor {n} of a path at depth {}",
                self.depth()
            )));
        }
        let mut levels = self.levels.clone();
        for _ in 0..n {
            // Drop the terminating real component along with the fake
            // components of the same logical level
            levels.pop();
            while levels.last().is_some_and(|level| !level.is_real) {
                levels.pop();
            }
        }
        Ok(Self { levels })
    }

    /// The immediate parent path
    pub fn parent(&self) -> Result<Self, HierarchyError> {
        self.ancestor(1)
    }

    /// True when `other` lies on the path from the root to this node,
    /// inclusive of the node itself
    pub fn is_descendant_of(&self, other: &Self) -> bool {
        self.levels.starts_with(&other.levels)
    }

    /// Append one real child label
    pub fn child(&self, label: i64) -> Self {
        let mut levels = self.levels.clone();
        levels.push(Level::real(label));
        Self { levels }
    }
}

impl Ord for HierarchyPath {
    fn cmp(&self, other: &Self) -> Ordering {
        let keys = self.levels.iter().map(Level::sort_key);
        let other_keys = other.levels.iter().map(Level::sort_key);
        keys.cmp(other_keys)
    }
}

impl PartialOrd for HierarchyPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for HierarchyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('/')?;
        for level in &self.levels {
            write!(f, "{}", level.label)?;
            f.write_char(if level.is_real { '/' } else { '.' })?;
        }
        Ok(())
    }
}

impl FromStr for HierarchyPath {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.strip_prefix('/').ok_or_else(|| {
            HierarchyError::Invalid(format!("path '{s}' does not start with '/'"))
        })?;
        let mut levels = vec![];
        while !rest.is_empty() {
            let at = rest.find(['/', '.']).ok_or_else(|| {
                HierarchyError::Invalid(format!("path '{s}' does not end with '/'"))
            })?;
            let token = &rest[..at];
            let label = i64::from_str(token).map_err(|_| {
                HierarchyError::Invalid(format!("invalid label '{token}' in path '{s}'"))
            })?;
            let is_real = rest.as_bytes()[at] == b'/';
            levels.push(Level { label, is_real });
            rest = &rest[at + 1..];
        }
        Self::new(levels)
    }
}
