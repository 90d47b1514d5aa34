use eframe::egui::{self, Color32, Rect, RichText, Sense, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::charts::{ColorBar, Figure, Mark};

const COLORBAR_WIDTH: f32 = 64.0;
const COLORBAR_STEPS: usize = 48;

// ---------------------------------------------------------------------------
// Figure renderer
// ---------------------------------------------------------------------------

/// Draw a chart figure with its colour bar to the right.
pub fn draw_figure(ui: &mut Ui, id: &str, figure: &Figure, height: f32) {
    ui.horizontal(|ui: &mut Ui| {
        let bar_width = if figure.colorbar.is_some() {
            COLORBAR_WIDTH
        } else {
            0.0
        };
        let plot_width = (ui.available_width() - bar_width).max(120.0);
        figure_plot(ui, id, figure, plot_width, height);

        if let Some(bar) = &figure.colorbar {
            colorbar(ui, bar, height);
        }
    });
}

fn figure_plot(ui: &mut Ui, id: &str, figure: &Figure, width: f32, height: f32) {
    let message_color = ui.visuals().weak_text_color();

    let mut plot = Plot::new(id)
        .width(width)
        .height(height)
        .allow_scroll(false)
        .show_axes(figure.show_axes)
        .show_grid(figure.show_axes)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.2}, {:.2}", value.x, value.y)
            } else {
                name.to_string()
            }
        });
    if figure.show_axes {
        plot = plot
            .x_axis_label(figure.x_label.as_str())
            .y_axis_label(figure.y_label.as_str());
    }
    if figure.equal_aspect {
        plot = plot.data_aspect(1.0);
    }
    if let Some((min, max)) = figure.frame {
        plot = plot
            .include_x(min[0])
            .include_x(max[0])
            .include_y(min[1])
            .include_y(max[1]);
    }

    plot.show(ui, |plot_ui| {
        for mark in figure.backdrop.iter().chain(&figure.marks) {
            match mark {
                Mark::Points {
                    points,
                    radius,
                    color,
                } => {
                    let series: PlotPoints = points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(series)
                            .radius(*radius)
                            .color(*color)
                            .filled(true),
                    );
                }
                Mark::Rect {
                    min,
                    max,
                    fill,
                    stroke,
                    label,
                    hover,
                } => {
                    let corners: PlotPoints = vec![
                        [min[0], min[1]],
                        [max[0], min[1]],
                        [max[0], max[1]],
                        [min[0], max[1]],
                    ]
                    .into();
                    let mut polygon = Polygon::new(corners)
                        .fill_color(*fill)
                        .stroke(Stroke::new(1.0, *stroke));
                    if let Some(hover) = hover {
                        polygon = polygon.name(hover);
                    }
                    plot_ui.polygon(polygon);

                    if let Some(label) = label {
                        let center =
                            PlotPoint::new((min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0);
                        plot_ui.text(Text::new(
                            center,
                            RichText::new(label)
                                .color(contrasting_text(*fill))
                                .size(12.0),
                        ));
                    }
                }
                Mark::Line {
                    points,
                    color,
                    width,
                } => {
                    let series: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(series).color(*color).width(*width));
                }
            }
        }

        if figure.is_empty() {
            let [x, y] = figure.frame_center();
            plot_ui.text(Text::new(
                PlotPoint::new(x, y),
                RichText::new(&figure.empty_message)
                    .size(16.0)
                    .color(message_color),
            ));
        }
    });
}

/// Black or white, whichever reads better on `fill`.
fn contrasting_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Colour bar
// ---------------------------------------------------------------------------

fn colorbar(ui: &mut Ui, bar: &ColorBar, height: f32) {
    ui.vertical(|ui: &mut Ui| {
        ui.small(bar.title.as_str());
        ui.small(format!("{:.1}", bar.max));

        let bar_height = (height - 64.0).max(40.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, bar_height), Sense::hover());
        let painter = ui.painter();
        let step = rect.height() / COLORBAR_STEPS as f32;
        for i in 0..COLORBAR_STEPS {
            let top = rect.top() + i as f32 * step;
            let slice = Rect::from_min_max(
                egui::pos2(rect.left(), top),
                egui::pos2(rect.right(), top + step + 0.5),
            );
            // Top of the bar is the maximum.
            let t = 1.0 - (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            painter.rect_filled(slice, 0.0, bar.scale.sample(t));
        }

        ui.small(format!("{:.1}", bar.min));
        ui.small(bar.scale.name());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_contrasts_with_fill() {
        let cream = Color32::from_rgb(0xff, 0xff, 0xbf);
        let navy = Color32::from_rgb(0x31, 0x36, 0x95);
        assert_eq!(contrasting_text(cream), Color32::BLACK);
        assert_eq!(contrasting_text(navy), Color32::WHITE);
    }
}
