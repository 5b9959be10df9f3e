// Copyright 2025 CI/CD Training Contributors
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

//! Text rendering helpers shared by the GUI and the headless mode.

use serde_json::Value;

/// Placeholder shown while a resource has not been loaded yet.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Pretty-print a JSON value with two-space indentation, keeping the key
/// order of the response body.
#[must_use]
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// [`pretty`] for a loaded resource, or the loading placeholder when absent.
#[must_use]
pub fn pretty_or_placeholder(value: Option<&Value>) -> String {
    value.map_or_else(|| LOADING_PLACEHOLDER.to_string(), pretty)
}

/// Banner text for a non-empty error message.
#[must_use]
pub fn error_banner(error: &str) -> Option<String> {
    if error.is_empty() {
        None
    } else {
        Some(format!("Error: {error}"))
    }
}
