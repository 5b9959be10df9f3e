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

//! Resource cards, endpoint chips and the error banner.

use egui::{Color32, RichText, Stroke};

const BORDER: Color32 = Color32::from_rgb(221, 221, 221);

/// One backend resource rendered as preformatted text under a title
pub fn resource_card(ui: &mut egui::Ui, title: &str, body: &str) {
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(18.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new(body).monospace());
        });
}

/// Rounded "label: value" pill
pub fn chip(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::new()
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{label}:")).strong());
                ui.label(RichText::new(value).weak());
            });
        });
}

/// Banner for the last reload failure; callers skip it when there is none
pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .stroke(Stroke::new(1.0, Color32::from_gray(204)))
        .fill(Color32::from_rgb(255, 240, 240))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    RichText::new("Error:")
                        .strong()
                        .color(Color32::from_rgb(180, 30, 30)),
                );
                ui.label(message);
            });
        });
}
