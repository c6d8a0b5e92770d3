use eframe::egui::{self, Color32, RichText, Ui};

// ---------------------------------------------------------------------------
// Startup screens
// ---------------------------------------------------------------------------

pub fn loading_screen(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label("Downloading data...");
            ui.add_space(8.0);
            ui.spinner();
        });
    });
}

/// What the user chose on the failure screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    None,
    Retry,
    Quit,
}

/// Terminal startup failure: show the diagnostic and nothing else.
pub fn failure_screen(ui: &mut Ui, message: &str) -> FailureAction {
    let mut action = FailureAction::None;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("Could not load life expectancy data");
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(Color32::RED));
        ui.add_space(16.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Retry").clicked() {
                action = FailureAction::Retry;
            }
            if ui.button("Quit").clicked() {
                action = FailureAction::Quit;
            }
        });
    });
    action
}

pub fn close_viewport(ui: &Ui) {
    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
}
