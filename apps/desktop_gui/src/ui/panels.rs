//! Page regions. Each function renders from session data and records what the user asked for.

use std::time::Duration;

use client_core::{
    session::{FileLabel, ResultsView},
    Panels,
};
use eframe::egui::{self, RichText};

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    OpenPicker,
    RemoveFile,
    Submit,
    NewPrediction,
    Retry,
}

pub fn header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.heading(RichText::new("Animal Voice Detection").size(26.0).strong());
        ui.label("Upload an animal sound and find out who is making it.");
        ui.add_space(12.0);
    });
}

pub fn upload_zone(ui: &mut egui::Ui, drag_over: bool, intents: &mut Vec<Intent>) {
    let (stroke_color, fill) = if drag_over {
        (theme::ACCENT, theme::DRAG_FILL)
    } else {
        (
            ui.visuals().widgets.noninteractive.bg_stroke.color,
            ui.visuals().extreme_bg_color,
        )
    };

    let response = egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .fill(fill)
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Drop an audio file here").size(18.0).strong());
                ui.label("or click to browse");
                ui.small("MP3, WAV, FLAC, OGG, M4A");
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        intents.push(Intent::OpenPicker);
    }
}

pub fn file_chip(ui: &mut egui::Ui, label: &FileLabel, intents: &mut Vec<Intent>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.strong(label.name.as_str());
                ui.weak(label.size_text.as_str());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Remove").clicked() {
                    intents.push(Intent::RemoveFile);
                }
            });
        });
    });
}

pub fn predict_controls(ui: &mut egui::Ui, panels: Panels, intents: &mut Vec<Intent>) {
    ui.vertical_centered(|ui| {
        if panels.submit_visible {
            let button = egui::Button::new(RichText::new("Predict").size(16.0))
                .min_size(egui::vec2(160.0, 36.0));
            if ui.add_enabled(panels.submit_enabled, button).clicked() {
                intents.push(Intent::Submit);
            }
        }
        if panels.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing audio...");
            });
        }
    });
}

pub fn results_panel(
    ui: &mut egui::Ui,
    view: &ResultsView,
    shown_for: Duration,
    intents: &mut Vec<Intent>,
) -> egui::Response {
    let tier_color = theme::tier_color(view.tier);
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Predicted animal").weak());
            ui.label(RichText::new(&view.label).size(30.0).strong());
            ui.horizontal(|ui| {
                ui.label("Confidence");
                ui.label(
                    RichText::new(&view.confidence_text)
                        .color(tier_color)
                        .strong(),
                );
                ui.weak(format!("({})", view.tier.as_str()));
            });
            ui.add(
                egui::ProgressBar::new(view.confidence_fill)
                    .fill(tier_color)
                    .desired_width(ui.available_width()),
            );

            ui.separator();
            ui.label(RichText::new("All probabilities").strong());
            for row in &view.rows {
                ui.scope(|ui| {
                    ui.set_opacity(theme::row_opacity(shown_for, row.entrance_delay));
                    ui.horizontal(|ui| {
                        ui.add_sized(
                            [120.0, 18.0],
                            egui::Label::new(row.label.as_str()).truncate(),
                        );
                        ui.add(
                            egui::ProgressBar::new(row.fill)
                                .text(row.value_text.as_str())
                                .desired_width(ui.available_width()),
                        );
                    });
                });
            }

            ui.add_space(8.0);
            if ui.button("New prediction").clicked() {
                intents.push(Intent::NewPrediction);
            }
        })
        .response
}

pub fn error_panel(ui: &mut egui::Ui, message: &str, intents: &mut Vec<Intent>) -> egui::Response {
    egui::Frame::group(ui.style())
        .fill(theme::ERROR_FILL)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                RichText::new("Something went wrong")
                    .strong()
                    .color(theme::ERROR_TEXT),
            );
            ui.label(message);
            if ui.button("Try again").clicked() {
                intents.push(Intent::Retry);
            }
        })
        .response
}

/// Time left until every row has faded in.
pub fn entrance_remaining(view: &ResultsView, shown_for: Duration) -> Option<Duration> {
    let last = view.rows.last()?.entrance_delay + theme::ROW_FADE;
    last.checked_sub(shown_for).filter(|rest| !rest.is_zero())
}
