use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::filter::DEPTH_SLIDER_CAP;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
///
/// Widgets edit a copy of the current [`FilterConfig`](crate::data::filter::FilterConfig);
/// the state only recomputes when the copy differs.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut filters = state.filters.clone();

    if let Some(years) = state.dataset.year_span() {
        ui.strong("Year Range");
        ui.add(Slider::new(&mut filters.year_range.min, years.min..=years.max).text("from"));
        ui.add(Slider::new(&mut filters.year_range.max, years.min..=years.max).text("to"));
        ui.add_space(6.0);
    }

    if let Some(mags) = state.dataset.magnitude_span() {
        ui.strong("Magnitude Range (xM)");
        ui.add(
            Slider::new(&mut filters.magnitude_min, mags.min..=mags.max)
                .step_by(0.1)
                .fixed_decimals(1)
                .text("min"),
        );
        let mut max = filters.magnitude_max.unwrap_or(mags.max);
        let response = ui.add(
            Slider::new(&mut max, mags.min..=mags.max)
                .step_by(0.1)
                .fixed_decimals(1)
                .text("max"),
        );
        if response.changed() {
            filters.magnitude_max = Some(max);
        }
        ui.add_space(6.0);
    }

    if let Some(depths) = state.dataset.depth_span() {
        let cap = depths.max.min(DEPTH_SLIDER_CAP);
        ui.strong("Depth Range (km)");
        let mut min = filters.depth_min.unwrap_or(0.0);
        if ui
            .add(Slider::new(&mut min, 0.0..=cap).step_by(1.0).text("min"))
            .changed()
        {
            filters.depth_min = Some(min);
        }
        let mut max = filters.depth_max.unwrap_or(cap);
        if ui
            .add(Slider::new(&mut max, 0.0..=cap).step_by(1.0).text("max"))
            .changed()
        {
            filters.depth_max = Some(max);
        }
        ui.add_space(6.0);
    }

    ui.checkbox(
        &mut filters.large_only,
        format!(
            "Large Earthquakes Only (xM >= {:.1})",
            filters.large_threshold
        ),
    );

    if let Some(reason) = state.view.rejection() {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("Invalid filter: {reason}")).color(Color32::RED));
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
        return;
    }

    state.set_filters(filters);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        ui.menu_button("Filters", |ui: &mut Ui| {
            if ui.button("Reset").clicked() {
                state.reset_filters();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Turkey Earthquake Analysis");
        ui.separator();

        ui.label(format!(
            "{} events loaded, {} visible",
            state.dataset.len(),
            state.view.len()
        ));

        ui.separator();
        ui.weak(state.source_name.as_str());
    });
}
