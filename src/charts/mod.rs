//! Chart adapters: turn filtered views and aggregates into [`Figure`]s.
//!
//! Adapters never filter. They shape already-selected data into marks with
//! final positions and colours; `ui::plot` draws a figure without looking
//! at the dataset.

pub mod map;
pub mod scatter;
pub mod treemap;

use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color::ColorScale;

/// A renderable chart: data marks plus axis and legend metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub x_label: String,
    pub y_label: String,
    /// Region the plot should frame, as `(min, max)` corners in plot units.
    pub frame: Option<([f64; 2], [f64; 2])>,
    /// Keep x and y on the same scale (maps).
    pub equal_aspect: bool,
    pub show_axes: bool,
    /// Decoration drawn under the data marks (map background, graticule).
    pub backdrop: Vec<Mark>,
    pub marks: Vec<Mark>,
    pub colorbar: Option<ColorBar>,
    /// Shown instead of data when `marks` is empty.
    pub empty_message: String,
}

impl Figure {
    pub fn new(x_label: &str, y_label: &str) -> Self {
        Self {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            frame: None,
            equal_aspect: false,
            show_axes: true,
            backdrop: Vec::new(),
            marks: Vec::new(),
            colorbar: None,
            empty_message: "No earthquakes match the current filters".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Centre of the framed region, where the empty-state message goes.
    pub fn frame_center(&self) -> [f64; 2] {
        match self.frame {
            Some((min, max)) => [(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0],
            None => [0.0, 0.0],
        }
    }
}

/// Primitive shapes understood by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// A batch of same-sized, same-coloured markers.
    Points {
        points: Vec<[f64; 2]>,
        radius: f32,
        color: Color32,
    },
    /// An axis-aligned rectangle, optionally labelled at its centre.
    Rect {
        min: [f64; 2],
        max: [f64; 2],
        fill: Color32,
        stroke: Color32,
        label: Option<String>,
        hover: Option<String>,
    },
    /// A straight polyline.
    Line {
        points: Vec<[f64; 2]>,
        color: Color32,
        width: f32,
    },
}

/// Legend for a continuous colour encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub title: String,
    pub scale: ColorScale,
    pub min: f64,
    pub max: f64,
}

/// Number of colour levels marker batches are quantized to.
const COLOR_LEVELS: f64 = 32.0;

/// One marker before batching.
pub(crate) struct Marker {
    pub position: [f64; 2],
    /// Position on the colour scale, `0..=1`.
    pub t: f64,
    pub radius: f32,
}

/// Group markers sharing a quantized colour and radius into one
/// [`Mark::Points`] each; egui_plot styles a whole series at once.
pub(crate) fn batch_markers(
    markers: impl IntoIterator<Item = Marker>,
    scale: ColorScale,
    opacity: f32,
) -> Vec<Mark> {
    let mut batches: BTreeMap<(u32, u32), Vec<[f64; 2]>> = BTreeMap::new();
    for m in markers {
        let level = (m.t.clamp(0.0, 1.0) * COLOR_LEVELS).round() as u32;
        let radius_key = (m.radius.max(0.0) * 2.0).round() as u32;
        batches.entry((radius_key, level)).or_default().push(m.position);
    }

    // Largest markers first so small ones stay visible on top.
    batches
        .into_iter()
        .rev()
        .map(|((radius_key, level), points)| Mark::Points {
            points,
            radius: radius_key as f32 / 2.0,
            color: scale
                .sample(f64::from(level) / COLOR_LEVELS)
                .gamma_multiply(opacity),
        })
        .collect()
}

/// `(min, max)` of an iterator of finite values.
pub(crate) fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_batched_by_radius_and_colour() {
        let markers = vec![
            Marker {
                position: [1.0, 1.0],
                t: 0.0,
                radius: 2.0,
            },
            Marker {
                position: [2.0, 2.0],
                t: 0.0,
                radius: 2.0,
            },
            Marker {
                position: [3.0, 3.0],
                t: 1.0,
                radius: 2.0,
            },
            Marker {
                position: [4.0, 4.0],
                t: 1.0,
                radius: 6.0,
            },
        ];
        let marks = batch_markers(markers, ColorScale::Viridis, 1.0);
        assert_eq!(marks.len(), 3);

        let Mark::Points { radius, points, .. } = &marks[0] else {
            panic!("expected points");
        };
        assert_eq!(*radius, 6.0);
        assert_eq!(points, &vec![[4.0, 4.0]]);

        let total: usize = marks
            .iter()
            .map(|m| match m {
                Mark::Points { points, .. } => points.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn extent_skips_non_finite() {
        let values = [3.0, f64::NAN, -1.0, 8.0, f64::INFINITY];
        assert_eq!(extent(values.into_iter()), Some((-1.0, 8.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
