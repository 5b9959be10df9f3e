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

//! Command-line arguments.
//!
//! Flags override the persisted configuration for this run only, unless
//! `--save` is given.

use clap::Parser;

use crate::config::{AppConfig, EasterEgg};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Backend base URL, e.g. `http://localhost:3000`. Overrides `API_URL`
    /// and the config file. An empty value uses the bare endpoint paths.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Easter egg shown next to the reload button.
    #[arg(long, value_enum)]
    pub easter_egg: Option<EasterEgg>,

    /// Load the three resources once, print them and exit (no window).
    #[arg(long)]
    pub once: bool,

    /// Persist `--api-url` and `--easter-egg` to the config file.
    #[arg(long)]
    pub save: bool,

    /// Print the configuration file path and exit.
    #[arg(long)]
    pub config_path: bool,
}

impl Args {
    /// Copy overrides into `config`. Returns true if anything changed.
    pub fn apply_to(&self, config: &mut AppConfig) -> bool {
        let mut changed = false;

        if let Some(url) = &self.api_url {
            if config.api_url != *url {
                config.api_url.clone_from(url);
                changed = true;
            }
        }

        if let Some(easter_egg) = self.easter_egg {
            if config.easter_egg != easter_egg {
                config.easter_egg = easter_egg;
                changed = true;
            }
        }

        changed
    }
}
