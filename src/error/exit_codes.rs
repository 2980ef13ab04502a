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

use crate::error::BfgError;

pub fn get_exit_code(error: &BfgError) -> i32 {
    match error {
        BfgError::InvalidVersion(_)
        | BfgError::ConfigError(_)
        | BfgError::ValidationError(_) => 2,

        BfgError::JarNotFound { .. } | BfgError::RepositoryNotFound(_) => 4,

        BfgError::PermissionDenied(_) => 13,

        BfgError::DownloadInProgress => 16,

        BfgError::NetworkError(_) | BfgError::MetadataParse(_) => 20,

        BfgError::JavaNotFound(_) => 127, // Standard "command not found" exit code

        BfgError::CommandFailed { code: Some(code), .. } if *code > 0 => *code,

        _ => 1,
    }
}
