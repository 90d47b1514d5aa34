use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::RegionalAggregate;

const HEADERS: [&str; 5] = ["Region", "Count", "Avg xM", "Max xM", "Avg depth (km)"];

/// Per-region statistics, busiest regions first.
pub fn region_table(ui: &mut Ui, regions: &[RegionalAggregate]) {
    if regions.is_empty() {
        ui.weak("No earthquakes match the current filters.");
        return;
    }

    let rows = by_count(regions);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(260.0)
        .column(Column::remainder().at_least(160.0))
        .columns(Column::auto().at_least(70.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let agg = rows[row.index()];
                row.col(|ui| {
                    ui.label(agg.region.as_str());
                });
                row.col(|ui| {
                    ui.label(agg.count.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", agg.avg_magnitude));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", agg.max_magnitude));
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", agg.avg_depth));
                });
            });
        });
}

/// Stable sort by descending count.
fn by_count(regions: &[RegionalAggregate]) -> Vec<&RegionalAggregate> {
    let mut rows: Vec<&RegionalAggregate> = regions.iter().collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busiest_regions_come_first() {
        let agg = |region: &str, count| RegionalAggregate {
            region: region.to_string(),
            count,
            avg_magnitude: 3.0,
            max_magnitude: 4.0,
            avg_depth: 7.0,
        };
        let regions = vec![agg("A", 2), agg("B", 9), agg("C", 2)];
        let names: Vec<&str> = by_count(&regions)
            .iter()
            .map(|a| a.region.as_str())
            .collect();
        assert_eq!(names, ["B", "A", "C"]);
    }
}
