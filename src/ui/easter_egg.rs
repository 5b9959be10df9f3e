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

//! Easter egg widgets: the video link button and the jumping overlay.

use egui::{Align2, Color32, FontId, RichText};
use log::warn;

use crate::overlay::OverlayPosition;

const YOUTUBE_RED: Color32 = Color32::from_rgb(255, 0, 0);
const VIDEO_TITLE: &str = "🎵 Never Gonna Give You Up";
const VIDEO_SIZE: egui::Vec2 = egui::vec2(320.0, 180.0);

/// What the user did with the overlay this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    Close,
    Watch,
}

/// Red call-to-action button used by both variants
pub fn video_button(ui: &mut egui::Ui) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(VIDEO_TITLE).color(Color32::WHITE).strong())
            .fill(YOUTUBE_RED)
            .corner_radius(4.0),
    )
}

/// Open `url` in the system browser, logging failures
pub fn open_in_browser(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warn!("Failed to open {} in the browser: {}", url, e);
    }
}

/// Render the backdrop and the video card at `position`.
///
/// Clicking the backdrop or the close button asks to close; clicking the
/// video asks to watch it.
pub fn show_overlay(ctx: &egui::Context, position: OverlayPosition) -> OverlayAction {
    let screen = ctx.screen_rect();
    let mut action = OverlayAction::None;

    egui::Area::new(egui::Id::new("easter_egg_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(200));
            if response.clicked() {
                action = OverlayAction::Close;
            }
        });

    egui::Area::new(egui::Id::new("easter_egg_video"))
        .order(egui::Order::Foreground)
        .fixed_pos(content_origin(screen, position))
        .show(ctx, |ui| {
            egui::Frame::window(ui.style())
                .fill(Color32::from_rgb(20, 20, 20))
                .corner_radius(8.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(VIDEO_TITLE).color(Color32::WHITE).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("✕").clicked() {
                                action = OverlayAction::Close;
                            }
                        });
                    });
                    ui.add_space(8.0);

                    let (rect, response) =
                        ui.allocate_exact_size(VIDEO_SIZE, egui::Sense::click());
                    let painter = ui.painter();
                    painter.rect_filled(rect, 4.0, Color32::BLACK);
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "▶",
                        FontId::proportional(48.0),
                        YOUTUBE_RED,
                    );
                    if response.clicked() {
                        action = OverlayAction::Watch;
                    }

                    ui.add_space(8.0);
                    if ui.button("Watch on YouTube").clicked() {
                        action = OverlayAction::Watch;
                    }
                });
        });

    action
}

/// Screen coordinates of the card's top-left corner, kept inside the window
fn content_origin(screen: egui::Rect, position: OverlayPosition) -> egui::Pos2 {
    let x = screen.min.x + screen.width() * position.x_pct / 100.0;
    let y = screen.min.y + screen.height() * position.y_pct / 100.0;
    let max_x = (screen.max.x - VIDEO_SIZE.x - 24.0).max(screen.min.x);
    let max_y = (screen.max.y - VIDEO_SIZE.y - 80.0).max(screen.min.y);
    egui::pos2(x.min(max_x), y.min(max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_origin_scales_with_screen() {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(2000.0, 1000.0));
        let origin = content_origin(
            screen,
            OverlayPosition {
                x_pct: 10.0,
                y_pct: 20.0,
            },
        );
        assert_eq!(origin, egui::pos2(200.0, 200.0));
    }

    #[test]
    fn test_content_origin_stays_on_screen() {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(400.0, 300.0));
        let origin = content_origin(
            screen,
            OverlayPosition {
                x_pct: 70.0,
                y_pct: 70.0,
            },
        );
        assert!(origin.x + VIDEO_SIZE.x <= screen.max.x);
        assert!(origin.x >= screen.min.x && origin.y >= screen.min.y);
    }
}
