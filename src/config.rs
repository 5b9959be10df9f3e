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

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format
//! (via `confy`) and resolves the backend base URL from the command line,
//! the environment and the config file.

use std::fmt;
use std::time::Duration;

use backend_client::JoinPolicy;
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::overlay::DEFAULT_PERIOD;

/// Application name used for the config directory
const APP_NAME: &str = "cicd-training-desktop";

/// Config file name (without extension)
const CONFIG_NAME: &str = "config";

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "API_URL";

/// The video behind the easter egg
pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Which easter egg the dashboard shows next to the reload button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EasterEgg {
    /// A button that opens the video in the system browser
    #[default]
    Link,
    /// A full-screen overlay whose video card jumps around
    Overlay,
}

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Backend base URL; empty means the bare endpoint paths are used
    #[serde(default)]
    pub api_url: String,

    /// Easter egg variant
    #[serde(default)]
    pub easter_egg: EasterEgg,

    /// Video opened by the easter egg
    #[serde(default = "default_video_url")]
    pub video_url: String,

    /// How the three requests of a reload are combined
    #[serde(default)]
    pub join_policy: JoinPolicy,

    /// Overlay repositioning period in milliseconds
    #[serde(default = "default_overlay_period_ms")]
    pub overlay_period_ms: u64,

    /// Initial window width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Initial window height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1 // Current schema version
}

fn default_video_url() -> String {
    DEFAULT_VIDEO_URL.to_string()
}

fn default_overlay_period_ms() -> u64 {
    500
}

fn default_window_width() -> f32 {
    900.0
}

fn default_window_height() -> f32 {
    760.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            api_url: String::new(),
            easter_egg: EasterEgg::default(),
            video_url: default_video_url(),
            join_policy: JoinPolicy::default(),
            overlay_period_ms: default_overlay_period_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Overlay repositioning period, falling back to the default for zero
    #[must_use]
    pub fn overlay_period(&self) -> Duration {
        if self.overlay_period_ms == 0 {
            warn!(
                "overlay_period_ms must be positive, using {} ms",
                DEFAULT_PERIOD.as_millis()
            );
            return DEFAULT_PERIOD;
        }
        Duration::from_millis(self.overlay_period_ms)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }
}

/// Where the effective backend base URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiUrlSource {
    CommandLine,
    Environment,
    ConfigFile,
}

impl fmt::Display for ApiUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ApiUrlSource::CommandLine => "command line",
            ApiUrlSource::Environment => "environment variable",
            ApiUrlSource::ConfigFile => "config file",
        })
    }
}

/// Resolve the backend base URL.
///
/// The `--api-url` flag wins (an explicit empty value included), then a
/// non-empty `API_URL`, then the config file.
pub fn resolve_api_url(
    cli: Option<&str>,
    env: Option<&str>,
    config: &str,
) -> (String, ApiUrlSource) {
    if let Some(url) = cli {
        return (url.to_string(), ApiUrlSource::CommandLine);
    }

    if let Some(url) = env.filter(|url| !url.is_empty()) {
        return (url.to_string(), ApiUrlSource::Environment);
    }

    (config.to_string(), ApiUrlSource::ConfigFile)
}
