use std::time::Duration;

use eframe::egui;

use crate::data::fetch::SourceConfig;
use crate::state::{AppState, LoadPhase};
use crate::ui::loading::{close_viewport, failure_screen, loading_screen, FailureAction};
use crate::ui::{detail, ranking};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LifeExpApp {
    pub state: AppState,
}

impl LifeExpApp {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for LifeExpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll_load() {
            // Keep polling the worker while the spinner runs.
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        match &mut self.state.phase {
            LoadPhase::Loading(_) => {
                egui::CentralPanel::default().show(ctx, loading_screen);
            }
            LoadPhase::Failed(message) => {
                let message = message.clone();
                let action = egui::CentralPanel::default()
                    .show(ctx, |ui| {
                        let action = failure_screen(ui, &message);
                        if action == FailureAction::Quit {
                            close_viewport(ui);
                        }
                        action
                    })
                    .inner;
                if action == FailureAction::Retry {
                    self.state.retry();
                }
            }
            LoadPhase::Ready(session) => {
                // ---- Top panel: year and sort ----
                egui::TopBottomPanel::top("ranking_controls").show(ctx, |ui| {
                    ranking::controls(ui, session);
                });

                // ---- Bottom panel: search and quit ----
                egui::TopBottomPanel::bottom("ranking_search").show(ctx, |ui| {
                    ranking::search_bar(ui, session);
                });

                // ---- Central panel: ranking table ----
                egui::CentralPanel::default().show(ctx, |ui| {
                    ranking::ranking_page(ui, session);
                });

                // ---- Floating detail windows ----
                for view in &mut session.details {
                    detail::detail_window(ctx, view, &session.dataset);
                }
                session.prune_details();
            }
        }
    }
}
