use std::time::{Duration, Instant};

use client_core::{Action, Effect, PageSession, Panel, Phase};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{accepted_extension_names, StagedFile};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::run_action;
use crate::media::{display_name, read_staged_file};
use crate::ui::panels::{self, Intent};

#[derive(Debug, Clone, Copy)]
struct PendingScroll {
    panel: Panel,
    due: Instant,
}

pub struct PredictorApp {
    session: PageSession,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint_url: String,
    status: String,
    pending_scroll: Option<PendingScroll>,
    scroll_to_top: bool,
    results_shown_at: Option<Instant>,
}

impl PredictorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint_url: String,
    ) -> Self {
        Self {
            session: PageSession::new(),
            cmd_tx,
            ui_rx,
            endpoint_url,
            status: "Starting backend worker...".to_string(),
            pending_scroll: None,
            scroll_to_top: false,
            results_shown_at: None,
        }
    }

    fn dispatch(&mut self, action: Action) {
        let had_results = self.session.panels().results;
        for effect in run_action(&mut self.session, &self.cmd_tx, action) {
            match effect {
                Effect::ScrollIntoView { panel, after } => {
                    self.pending_scroll = Some(PendingScroll {
                        panel,
                        due: Instant::now() + after,
                    });
                }
                Effect::ScrollToTop => {
                    self.pending_scroll = None;
                    self.scroll_to_top = true;
                }
                Effect::SendPrediction(_) => {}
            }
        }

        let has_results = self.session.panels().results;
        if has_results && !had_results {
            self.results_shown_at = Some(Instant::now());
        } else if !has_results {
            self.results_shown_at = None;
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::PredictionFinished(outcome) => {
                    self.dispatch(Action::PredictionFinished(outcome));
                    self.status = match self.session.phase() {
                        Phase::Succeeded => "Prediction complete".to_string(),
                        _ => "Prediction failed".to_string(),
                    };
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        if let Some(dropped) = dropped {
            let action = action_for_dropped_file(dropped);
            self.dispatch(action);
        }

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if hovering != self.session.panels().drag_over {
            self.dispatch(if hovering {
                Action::DragEnter
            } else {
                Action::DragLeave
            });
        }
    }

    fn open_file_picker(&mut self) {
        let extensions: Vec<&str> = accepted_extension_names().collect();
        let mut dialog = rfd::FileDialog::new().add_filter("Audio", &extensions);
        if let Some(dir) = dirs::audio_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        let action = match read_staged_file(&path, None) {
            Ok(file) => Action::FilePicked { path, file },
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read picked file: {err}");
                Action::SelectionFailed(format!(
                    "Could not read {}: {err}",
                    display_name(&path)
                ))
            }
        };
        self.dispatch(action);
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::OpenPicker => self.open_file_picker(),
            Intent::RemoveFile => self.dispatch(Action::RemoveFile),
            Intent::Submit => {
                self.status = "Sending audio for prediction...".to_string();
                self.dispatch(Action::Submit);
            }
            Intent::NewPrediction => self.dispatch(Action::NewPrediction),
            Intent::Retry => self.dispatch(Action::Retry),
        }
    }

    fn scroll_if_due(&mut self, panel: Panel, response: &egui::Response) {
        let Some(pending) = self.pending_scroll else {
            return;
        };
        if pending.panel == panel && Instant::now() >= pending.due {
            response.scroll_to_me(Some(egui::Align::Max));
            self.pending_scroll = None;
        }
    }

    fn show_page(&mut self, ui: &mut egui::Ui) -> Vec<Intent> {
        let mut intents = Vec::new();
        if std::mem::take(&mut self.scroll_to_top) {
            ui.scroll_to_cursor(Some(egui::Align::TOP));
        }

        panels::header(ui);

        let panel_state = self.session.panels();
        if panel_state.upload_zone {
            panels::upload_zone(ui, panel_state.drag_over, &mut intents);
        }
        if panel_state.file_info {
            if let Some(label) = self.session.file_label() {
                panels::file_chip(ui, label, &mut intents);
            }
        }

        ui.add_space(12.0);
        panels::predict_controls(ui, panel_state, &mut intents);
        ui.add_space(12.0);

        if panel_state.results {
            if let Some(view) = self.session.results().cloned() {
                let shown_for = self
                    .results_shown_at
                    .map(|at| at.elapsed())
                    .unwrap_or(Duration::MAX);
                let response = panels::results_panel(ui, &view, shown_for, &mut intents);
                self.scroll_if_due(Panel::Results, &response);
                if let Some(rest) = panels::entrance_remaining(&view, shown_for) {
                    ui.ctx().request_repaint_after(rest.min(Duration::from_millis(16)));
                }
            }
        }
        if panel_state.error {
            let message = self.session.error_message().unwrap_or_default().to_string();
            let response = panels::error_panel(ui, &message, &mut intents);
            self.scroll_if_due(Panel::Error, &response);
        }

        intents
    }
}

fn action_for_dropped_file(dropped: egui::DroppedFile) -> Action {
    let mime_type = Some(dropped.mime).filter(|mime| !mime.is_empty());
    if let Some(bytes) = dropped.bytes {
        let name = match (&dropped.path, dropped.name.is_empty()) {
            (Some(path), true) => display_name(path),
            _ => dropped.name,
        };
        return Action::FileDropped(StagedFile::from_parts(name, mime_type, bytes));
    }

    match dropped.path {
        Some(path) => match read_staged_file(&path, mime_type) {
            Ok(file) => Action::FileDropped(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read dropped file: {err}");
                Action::SelectionFailed(format!(
                    "Could not read {}: {err}",
                    display_name(&path)
                ))
            }
        },
        None => Action::SelectionFailed("The dropped item is not a readable file.".to_string()),
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.endpoint_url.as_str());
                });
            });
        });

        let intents = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.set_max_width(640.0_f32.min(ui.available_width()));
                        self.show_page(ui)
                    })
                    .inner
            })
            .inner;

        for intent in intents {
            self.apply_intent(intent);
        }

        if self.session.panels().loading || self.pending_scroll.is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
