use super::map::normalized;
use super::{batch_markers, extent, ColorBar, Figure, Marker};
use crate::color::ColorScale;
use crate::data::aggregate::{sample_points, ScatterPoint, SCATTER_SAMPLE_SEED};
use crate::data::model::GeoBounds;

const MAX_MARKER_DIAMETER: f64 = 20.0;
const SCATTER_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterColor {
    #[default]
    Depth,
    Magnitude,
}

impl ScatterColor {
    pub const ALL: [ScatterColor; 2] = [ScatterColor::Depth, ScatterColor::Magnitude];

    pub fn label(self) -> &'static str {
        match self {
            ScatterColor::Depth => "Depth",
            ScatterColor::Magnitude => "Magnitude",
        }
    }

    fn scale(self) -> ColorScale {
        match self {
            ScatterColor::Depth => ColorScale::Viridis,
            ScatterColor::Magnitude => ColorScale::Turbo,
        }
    }

    fn value(self, p: &ScatterPoint) -> f64 {
        match self {
            ScatterColor::Depth => p.depth,
            ScatterColor::Magnitude => p.magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterOptions {
    pub color_by: ScatterColor,
    /// Share of points drawn, 10–100.
    pub sample_percent: u8,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            color_by: ScatterColor::default(),
            sample_percent: 50,
        }
    }
}

/// Depth-by-geography scatter: longitude against latitude, marker diameter
/// proportional to magnitude.
pub fn build_scatter(points: &[ScatterPoint], options: &ScatterOptions) -> Figure {
    let mut figure = Figure::new("Longitude", "Latitude");
    let area = GeoBounds::TURKEY;
    figure.frame = Some(([area.lon_min, area.lat_min], [area.lon_max, area.lat_max]));

    let sampled = sample_points(points, options.sample_percent, SCATTER_SAMPLE_SEED);
    let color_by = options.color_by;
    let (Some((lo, hi)), Some((_, max_mag))) = (
        extent(sampled.iter().map(|p| color_by.value(p))),
        extent(sampled.iter().map(|p| p.magnitude)),
    ) else {
        return figure;
    };

    let lon = extent(sampled.iter().map(|p| p.longitude)).unwrap_or((0.0, 0.0));
    let lat = extent(sampled.iter().map(|p| p.latitude)).unwrap_or((0.0, 0.0));
    figure.frame = Some(([lon.0, lat.0], [lon.1, lat.1]));

    let markers = sampled.iter().map(|p| Marker {
        position: [p.longitude, p.latitude],
        t: normalized(color_by.value(p), lo, hi),
        radius: (MAX_MARKER_DIAMETER * p.magnitude / max_mag / 2.0).max(1.0) as f32,
    });
    figure.marks = batch_markers(markers, color_by.scale(), SCATTER_OPACITY);
    figure.colorbar = Some(ColorBar {
        title: color_by.label().to_string(),
        scale: color_by.scale(),
        min: lo,
        max: hi,
    });
    figure
}
