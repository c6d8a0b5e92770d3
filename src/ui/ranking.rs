use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::rank::RankedEntry;
use crate::state::Session;
use crate::ui::loading::close_viewport;

// ---------------------------------------------------------------------------
// Top bar – year and sort order
// ---------------------------------------------------------------------------

pub fn controls(ui: &mut Ui, session: &mut Session) {
    let years = session.dataset.years();
    let before = (session.filters.year, session.filters.sort_ascending);

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select year:");
        egui::ComboBox::from_id_salt("ranking_year")
            .selected_text(session.filters.year.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for year in &years {
                    ui.selectable_value(&mut session.filters.year, *year, year.to_string());
                }
            });

        ui.separator();
        ui.strong("Sort:");
        ui.radio_value(&mut session.filters.sort_ascending, false, "Highest to Lowest");
        ui.radio_value(&mut session.filters.sort_ascending, true, "Lowest to Highest");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.button("?")
                .on_hover_text("Double click a row in the table to see details of that country");
        });
    });

    if before != (session.filters.year, session.filters.sort_ascending) {
        log::debug!(
            "ranking filters changed: year {}, ascending {}",
            session.filters.year,
            session.filters.sort_ascending
        );
        session.scroll_to = None;
    }
}

// ---------------------------------------------------------------------------
// Bottom bar – search and quit
// ---------------------------------------------------------------------------

pub fn search_bar(ui: &mut Ui, session: &mut Session) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search Country:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut session.search_input)
                .hint_text("country name")
                .desired_width(220.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let countries = session.dataset.countries();
        egui::ComboBox::from_id_salt("search_suggestions")
            .selected_text("Pick…")
            .show_ui(ui, |ui: &mut Ui| {
                let query = session.search_input.trim().to_lowercase();
                for country in countries
                    .iter()
                    .filter(|c| c.to_lowercase().starts_with(&query))
                {
                    if ui.selectable_label(false, country).clicked() {
                        session.search_input = country.clone();
                    }
                }
            });

        if ui.button("Search").clicked() || submitted {
            session.search();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                close_viewport(ui);
            }
        });
    });

    if let Some(msg) = session.search_message {
        ui.label(msg);
    }
}

// ---------------------------------------------------------------------------
// Central table
// ---------------------------------------------------------------------------

pub fn ranking_page(ui: &mut Ui, session: &mut Session) {
    let entries = match session.ranking() {
        Ok(entries) => entries,
        Err(e) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(e.to_string());
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!(
                "Life expectancy rank of {} countries in {}",
                entries.len(),
                session.filters.year
            ))
            .size(18.0),
        );
    });
    ui.add_space(4.0);

    let scroll_to = session.scroll_to.take();
    let clicked = ranking_table(ui, &entries, session.highlighted.as_deref(), scroll_to);
    if let Some(country) = clicked {
        session.open_detail(&country);
    }
}

/// Draw the table; returns the country whose row was double-clicked.
fn ranking_table(
    ui: &mut Ui,
    entries: &[RankedEntry],
    highlighted: Option<&str>,
    scroll_to: Option<usize>,
) -> Option<String> {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;
    let mut double_clicked = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(70.0))
        .column(Column::remainder().at_least(200.0).clip(true))
        .column(Column::exact(320.0));
    if let Some(row) = scroll_to {
        table = table.scroll_to_row(row, Some(egui::Align::Center));
    }

    table
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Rank#");
            });
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Average Life expectancy (years) (Both sexes)");
            });
        })
        .body(|body| {
            body.rows(text_height + 8.0, entries.len(), |mut row| {
                let entry = &entries[row.index()];
                row.set_selected(highlighted == Some(entry.country.as_str()));
                row.col(|ui| {
                    ui.label(entry.rank.to_string());
                });
                row.col(|ui| {
                    ui.label(&entry.country);
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", entry.value));
                });
                if row.response().double_clicked() {
                    double_clicked = Some(entry.country.clone());
                }
            });
        });

    double_clicked
}
