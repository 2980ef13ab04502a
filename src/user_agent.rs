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

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn metadata_client() -> String {
    format!("bfgm/metadata/{VERSION}")
}

pub fn download_client() -> String {
    format!("bfgm/download/{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agents() {
        assert_eq!(metadata_client(), format!("bfgm/metadata/{VERSION}"));
        assert_eq!(download_client(), format!("bfgm/download/{VERSION}"));
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "Version should have 3 parts (major.minor.patch)"
        );

        for part in parts {
            assert!(
                part.parse::<u32>().is_ok(),
                "Version part should be a number"
            );
        }
    }
}
