use eframe::egui::{self, Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, Text};

use crate::color::sex_color;
use crate::data::model::{CanonicalDataset, Sex};
use crate::data::series::{line_points, year_values, DetailSeries};
use crate::state::{DetailMode, DetailView};

// ---------------------------------------------------------------------------
// Detail window
// ---------------------------------------------------------------------------

/// Show one country's detail window; clears `view.open` when closed.
pub fn detail_window(ctx: &egui::Context, view: &mut DetailView, dataset: &CanonicalDataset) {
    let mut open = view.open;
    egui::Window::new(view.filters.country.clone())
        .id(egui::Id::new(("detail", view.id)))
        .open(&mut open)
        .default_size([1000.0, 500.0])
        .resizable(true)
        .show(ctx, |ui: &mut Ui| {
            egui::SidePanel::left(egui::Id::new(("detail_filters", view.id)))
                .default_width(220.0)
                .show_inside(ui, |ui: &mut Ui| filter_panel(ui, view, dataset));

            if view.mode == DetailMode::SpecificYear {
                egui::SidePanel::right(egui::Id::new(("detail_year", view.id)))
                    .resizable(false)
                    .show_inside(ui, |ui: &mut Ui| year_slider(ui, view, dataset));
            }

            egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
                let series = view.series(dataset);
                match view.mode {
                    DetailMode::Overall => line_plot(ui, view, &series, dataset),
                    DetailMode::SpecificYear => bar_plot(ui, view, &series, dataset),
                }
            });
        });
    if !open {
        view.open = false;
    }
}

fn filter_panel(ui: &mut Ui, view: &mut DetailView, dataset: &CanonicalDataset) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.button("?").on_hover_text(
                "Use the year slider to change the year you want to observe.\n\
                 Use overall mode to see the trend across every year.\n\
                 You can also change the sexes or the country in Filters.",
            );
        });
    });
    ui.separator();

    ui.strong("Country");
    let countries = dataset.countries();
    egui::ComboBox::from_id_salt(("detail_country", view.id))
        .selected_text(&view.filters.country)
        .show_ui(ui, |ui: &mut Ui| {
            for country in &countries {
                ui.selectable_value(&mut view.filters.country, country.clone(), country);
            }
        });

    ui.add_space(6.0);
    ui.strong("Sex");
    for sex in Sex::ALL {
        let mut checked = view.filters.sexes.contains(sex);
        let locked = view.filters.sexes.is_locked(sex);
        let text = RichText::new(sex.label()).color(sex_color(sex));
        if ui
            .add_enabled(!locked, egui::Checkbox::new(&mut checked, text))
            .changed()
        {
            view.toggle_sex(sex);
        }
    }

    ui.add_space(6.0);
    ui.strong("Mode");
    ui.radio_value(&mut view.mode, DetailMode::SpecificYear, "Specific year");
    ui.radio_value(&mut view.mode, DetailMode::Overall, "Overall");

    ui.add_space(6.0);
    ui.separator();
    ui.strong("Country description");
    ui.label(&view.filters.country);
    ui.label(format!("- {}", view.rank_description(dataset)));

    ui.add_space(12.0);
    if ui.button("Close").clicked() {
        view.open = false;
    }
}

fn year_slider(ui: &mut Ui, view: &mut DetailView, dataset: &CanonicalDataset) {
    let (Some(earliest), Some(latest)) = (dataset.earliest_year(), dataset.latest_year()) else {
        return;
    };
    ui.add(
        egui::Slider::new(&mut view.filters.year, earliest..=latest)
            .vertical()
            .text("Year"),
    );
}

/// Y-axis bounds: the dataset's full value range, so views stay comparable.
fn y_bounds(dataset: &CanonicalDataset) -> (f64, f64) {
    dataset.value_range().unwrap_or((0.0, 100.0))
}

fn line_plot(ui: &mut Ui, view: &DetailView, series: &DetailSeries, dataset: &CanonicalDataset) {
    if let (Some(earliest), Some(latest)) = (dataset.earliest_year(), dataset.latest_year()) {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(format!(
                "Life Expectancy in {} from {earliest} to {latest}",
                view.filters.country
            ));
        });
    }
    if series.is_empty() {
        ui.label("No life expectancy records for this country.");
    }

    let (lo, hi) = y_bounds(dataset);
    let earliest = dataset.earliest_year().unwrap_or_default() as f64;
    let latest = dataset.latest_year().unwrap_or_default() as f64;
    Plot::new(("detail_line", view.id))
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Life expectancy (years)")
        .include_x(earliest)
        .include_x(latest)
        .include_y(lo)
        .include_y(hi)
        .show(ui, |plot_ui| {
            for sex in view.filters.sexes.iter() {
                let points = line_points(series, sex);
                if points.is_empty() {
                    continue;
                }
                plot_ui.line(
                    Line::new(points)
                        .name(sex.label())
                        .color(sex_color(sex))
                        .width(1.5),
                );
            }
        });
}

fn bar_plot(ui: &mut Ui, view: &DetailView, series: &DetailSeries, dataset: &CanonicalDataset) {
    let year = view.filters.year;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(format!("Life Expectancy in {} in {year}", view.filters.country));
    });

    let values = year_values(series, year, &view.filters.sexes);
    if values.is_empty() {
        ui.label(format!("No data for the selected sexes in {year}."));
    }

    let (lo, hi) = y_bounds(dataset);
    Plot::new(("detail_bar", view.id))
        .legend(Legend::default())
        .x_axis_label("Sex")
        .y_axis_label("Life expectancy (years)")
        .include_y(lo)
        .include_y(hi)
        .include_x(-0.5)
        .include_x(values.len() as f64 - 0.5)
        .show(ui, |plot_ui| {
            for (i, (sex, value)) in values.iter().enumerate() {
                let x = i as f64;
                let bar = Bar::new(x, *value).width(0.6).name(sex.label());
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(sex.label())
                        .color(sex_color(*sex)),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(x, *value), format!("{value:.2}"))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
