use eframe::egui::{self, ScrollArea, Slider, Ui};

use super::{plot, table};
use crate::charts::map::{MapKind, MapStyle};
use crate::charts::scatter::ScatterColor;
use crate::charts::treemap::ColorMetric;
use crate::data::aggregate::GroupKey;
use crate::state::AppState;

const MAP_HEIGHT: f32 = 550.0;
const TREEMAP_HEIGHT: f32 = 500.0;
const SCATTER_HEIGHT: f32 = 500.0;

// ---------------------------------------------------------------------------
// Central panel – the three chart sections
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let mut options = state.options;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- 1. Map ----
            ui.heading("1. Turkey Earthquake Map");
            ui.horizontal(|ui: &mut Ui| {
                combo(
                    ui,
                    "map_kind",
                    "Map Type:",
                    &mut options.map.kind,
                    &MapKind::ALL,
                    MapKind::label,
                );
                combo(
                    ui,
                    "map_style",
                    "Map Style:",
                    &mut options.map.style,
                    &MapStyle::ALL,
                    MapStyle::label,
                );
            });
            plot::draw_figure(ui, "map", &state.map, MAP_HEIGHT);
            ui.small("Density sums magnitudes per cell; scatter marker size grows with xM².");
            ui.separator();

            // ---- 2. Treemap ----
            ui.heading("2. Regional Earthquake Distribution - Treemap");
            ui.horizontal(|ui: &mut Ui| {
                combo(
                    ui,
                    "treemap_metric",
                    "Color Metric:",
                    &mut options.treemap.metric,
                    &ColorMetric::ALL,
                    ColorMetric::label,
                );
                combo(
                    ui,
                    "group_by",
                    "Group by:",
                    &mut options.group_by,
                    &GroupKey::ALL,
                    GroupKey::label,
                );
            });
            plot::draw_figure(ui, "treemap", &state.treemap, TREEMAP_HEIGHT);
            ui.small(format!(
                "Top {} regions with at least {} earthquakes; tile size is the event count.",
                options.treemap.max_regions, options.treemap.min_count
            ));
            egui::CollapsingHeader::new("Region statistics")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::region_table(ui, &state.regions);
                });
            ui.separator();

            // ---- 3. Depth scatter ----
            ui.heading("3. Depth Distribution by Geography");
            ui.horizontal(|ui: &mut Ui| {
                combo(
                    ui,
                    "scatter_color",
                    "Color by:",
                    &mut options.scatter.color_by,
                    &ScatterColor::ALL,
                    ScatterColor::label,
                );
                ui.add(
                    Slider::new(&mut options.scatter.sample_percent, 10..=100)
                        .step_by(10.0)
                        .suffix("%")
                        .text("Data Sample"),
                );
            });
            plot::draw_figure(ui, "scatter", &state.scatter, SCATTER_HEIGHT);
            ui.small("Points are a reproducible random sample of the filtered events.");
            ui.separator();

            ui.weak("Data source: Kandilli Observatory (KOERI) earthquake catalogue.");
        });

    state.set_options(options);
}

/// Labelled combo box over a closed set of choices.
fn combo<T: Copy + PartialEq>(
    ui: &mut Ui,
    id: &str,
    label: &str,
    value: &mut T,
    choices: &[T],
    name: fn(T) -> &'static str,
) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(name(*value))
        .show_ui(ui, |ui: &mut Ui| {
            for &choice in choices {
                ui.selectable_value(value, choice, name(choice));
            }
        });
}
