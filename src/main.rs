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

//! CI/CD Training Desktop: a dashboard for the training backend.
//!
//! Fetches `/health`, `/api/info` and `/api/quote` from the configured
//! backend and shows them side by side, with a reload button and an easter
//! egg. `--once` runs the same load headless, which is what pipelines call.
//!
//! Usage example:
//! ```bash
//! API_URL=http://localhost:3000 cicd-training-desktop
//! cicd-training-desktop --api-url https://api.example.test --once
//! ```

mod app;
mod cli;
mod config;
mod error;
mod overlay;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use backend_client::{render, Dashboard, Endpoints, HttpFetcher, Resource};
use clap::Parser;
use log::{error, info, warn};
use tokio::runtime::Runtime;

use crate::app::{AppSettings, DashboardApp, APP_TITLE};
use crate::cli::Args;
use crate::config::{resolve_api_url, AppConfig, API_URL_ENV};
use crate::error::AppError;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

fn main() -> ExitCode {
    init_logger();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    if args.config_path {
        println!("{}", AppConfig::get_config_path()?.display());
        return Ok(());
    }

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Could not load configuration, using defaults: {}", e);
        AppConfig::default()
    });

    if args.apply_to(&mut config) && args.save {
        config.save()?;
        info!("Configuration saved to {}", AppConfig::get_config_path()?.display());
    }

    let env_url = std::env::var(API_URL_ENV).ok();
    let (api_url, source) =
        resolve_api_url(args.api_url.as_deref(), env_url.as_deref(), &config.api_url);
    info!("Backend base URL: '{}' (from {})", api_url, source);

    let runtime = Runtime::new()?;
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let dashboard = Dashboard::new(
        Endpoints::from_base(&api_url),
        Arc::new(HttpFetcher::with_client(client)),
        config.join_policy,
    );

    if args.once {
        return run_headless(&runtime, &dashboard);
    }

    let settings = AppSettings {
        easter_egg: config.easter_egg,
        video_url: config.video_url.clone(),
        overlay_period: config.overlay_period(),
    };
    run_gui(&runtime, dashboard, settings, &config)
}

/// Load once and print every resource, like the window would show it.
fn run_headless(runtime: &Runtime, dashboard: &Dashboard) -> Result<(), AppError> {
    let result = runtime.block_on(dashboard.load_all());
    let state = dashboard.state();

    for resource in Resource::ALL {
        println!(
            "== {} ({})",
            resource.title(),
            dashboard.endpoints().url(resource)
        );
        let body = state
            .snapshot
            .get(resource)
            .map_or_else(|| "(not loaded)".to_string(), render::pretty);
        println!("{body}");
    }

    if let Some(banner) = render::error_banner(&state.error) {
        println!("{banner}");
    }

    result.map_err(AppError::from)
}

fn run_gui(
    runtime: &Runtime,
    dashboard: Dashboard,
    settings: AppSettings,
    config: &AppConfig,
) -> Result<(), AppError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, handle, dashboard, settings)))),
    )?;

    info!("Window closed");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
