// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Version handling for published BFG releases.
//!
//! BFG versions are plain dotted numbers (`1.13.0`, `1.14.0`, `1.15.0`). The
//! comparison here is deliberately simple: it knows nothing about
//! pre-release or build suffixes, and a component that is not a number
//! counts as `0`.

use crate::error::{BfgError, Result};
use std::cmp::Ordering;

/// Compare two dotted version strings numerically.
///
/// The shorter version is padded with zero components, so `1.2` equals
/// `1.2.0`. Non-numeric components (`1.15.0-RC1` splits into `1`, `15`,
/// `0-RC1`) are treated as `0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<u64> = a.split('.').map(numeric_component).collect();
    let right: Vec<u64> = b.split('.').map(numeric_component).collect();

    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

fn numeric_component(part: &str) -> u64 {
    part.trim().parse::<u64>().unwrap_or(0)
}

/// Reject version strings that cannot safely be embedded in a file name
/// and URL path.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        return Err(BfgError::InvalidVersion("version is empty".to_string()));
    }

    if version == "." || version == ".." || version.contains("..") {
        return Err(BfgError::InvalidVersion(format!(
            "'{version}' is not a release version"
        )));
    }

    if let Some(ch) = version
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')))
    {
        return Err(BfgError::InvalidVersion(format!(
            "'{version}' contains unsupported character '{ch}'"
        )));
    }

    Ok(())
}
