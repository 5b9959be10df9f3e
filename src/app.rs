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

//! The dashboard window.
//!
//! [`DashboardApp`] renders a [`Dashboard`] snapshot every frame and turns
//! button clicks into reloads or easter egg actions. Network I/O and the
//! overlay timer run on the tokio runtime behind `runtime`, never on the UI
//! thread.

use std::time::Duration;

use backend_client::{render, Dashboard, Resource};
use chrono::Local;
use egui::RichText;
use log::info;
use tokio::runtime::Handle;

use crate::config::EasterEgg;
use crate::overlay::Overlay;
use crate::ui::cards;
use crate::ui::easter_egg::{self, OverlayAction};

/// Window and heading title
pub const APP_TITLE: &str = "CI/CD Training App !";

const MAX_CONTENT_WIDTH: f32 = 900.0;

/// Repaint cadence while something changes without user input
const ACTIVE_REPAINT: Duration = Duration::from_millis(100);

/// Settings that shape the window, resolved once at startup
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub easter_egg: EasterEgg,
    pub video_url: String,
    pub overlay_period: Duration,
}

/// Clicks collected while building the frame, applied afterwards
#[derive(Debug, Default)]
struct FrameActions {
    reload: bool,
    open_video: bool,
    open_overlay: bool,
}

#[derive(Debug)]
pub struct DashboardApp {
    dashboard: Dashboard,
    runtime: Handle,
    settings: AppSettings,
    overlay: Overlay,
}

impl DashboardApp {
    /// Create the app and kick off the initial load
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Handle,
        dashboard: Dashboard,
        settings: AppSettings,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let app = Self {
            dashboard,
            runtime,
            overlay: Overlay::new(settings.overlay_period),
            settings,
        };
        app.reload(&cc.egui_ctx);
        app
    }

    fn reload(&self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        self.dashboard
            .spawn_reload(&self.runtime, move || ctx.request_repaint());
    }

    fn draw_dashboard(&self, ui: &mut egui::Ui, actions: &mut FrameActions) {
        let state = self.dashboard.state();

        ui.set_max_width(MAX_CONTENT_WIDTH);
        ui.heading(APP_TITLE);
        ui.label(
            RichText::new(
                "Desktop front end ↔ HTTP back end. No database. \
                 Everything is configured through environment variables.",
            )
            .weak(),
        );

        ui.add_space(16.0);
        ui.horizontal_wrapped(|ui| {
            cards::chip(ui, "API URL", self.dashboard.endpoints().base());
            for resource in Resource::ALL {
                cards::chip(ui, resource.label(), resource.path());
            }
        });

        if state.has_error() {
            ui.add_space(16.0);
            cards::error_banner(ui, &state.error);
        }

        ui.add_space(24.0);
        for resource in Resource::ALL {
            let body = render::pretty_or_placeholder(state.snapshot.get(resource));
            cards::resource_card(ui, resource.title(), &body);
            ui.add_space(16.0);
        }

        ui.horizontal(|ui| {
            if ui.button("Reload").clicked() {
                actions.reload = true;
            }

            if easter_egg::video_button(ui).clicked() {
                match self.settings.easter_egg {
                    EasterEgg::Link => actions.open_video = true,
                    EasterEgg::Overlay => actions.open_overlay = true,
                }
            }

            if state.loading {
                ui.spinner();
            } else if let Some(loaded) = state.last_loaded {
                ui.label(
                    RichText::new(format!(
                        "Updated {}",
                        loaded.with_timezone(&Local).format("%H:%M:%S")
                    ))
                    .weak(),
                );
            }
        });

        ui.add_space(24.0);
        ui.label(
            RichText::new(
                "CI/CD tip: inject APP_VERSION, GIT_SHA and BUILD_DATE on the \
                 back end to see your deployments here.",
            )
            .weak(),
        );
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = FrameActions::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_dashboard(ui, &mut actions);
            });
        });

        if self.overlay.is_open() {
            match easter_egg::show_overlay(ctx, self.overlay.position()) {
                OverlayAction::Close => self.overlay.close(),
                OverlayAction::Watch => easter_egg::open_in_browser(&self.settings.video_url),
                OverlayAction::None => {}
            }
        }

        if actions.reload {
            info!("Manual reload requested");
            self.reload(ctx);
        }
        if actions.open_video {
            easter_egg::open_in_browser(&self.settings.video_url);
        }
        if actions.open_overlay {
            self.overlay.open(&self.runtime);
        }

        // Overlay positions and the spinner change without input events
        if self.overlay.is_open() || self.dashboard.state().loading {
            ctx.request_repaint_after(ACTIVE_REPAINT);
        }
    }
}
