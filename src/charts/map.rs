use eframe::egui::Color32;

use super::{batch_markers, extent, ColorBar, Figure, Mark, Marker};
use crate::color::ColorScale;
use crate::data::aggregate::{bin_for_scatter, density_grid};
use crate::data::filter::FilteredView;
use crate::data::model::GeoBounds;

/// Side of a density cell, in degrees.
pub const DENSITY_CELL_DEG: f64 = 0.25;
/// Largest marker diameter on the scatter map, in points.
const MAX_MARKER_DIAMETER: f64 = 20.0;
const SCATTER_OPACITY: f32 = 0.7;
const GRATICULE_STEP_DEG: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapKind {
    #[default]
    Density,
    Scatter,
}

impl MapKind {
    pub const ALL: [MapKind; 2] = [MapKind::Density, MapKind::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            MapKind::Density => "Density Map",
            MapKind::Scatter => "Scatter Map",
        }
    }
}

/// Background palette of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStyle {
    #[default]
    OpenStreetMap,
    CartoPositron,
    CartoDarkmatter,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [
        MapStyle::OpenStreetMap,
        MapStyle::CartoPositron,
        MapStyle::CartoDarkmatter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "open-street-map",
            MapStyle::CartoPositron => "carto-positron",
            MapStyle::CartoDarkmatter => "carto-darkmatter",
        }
    }

    fn land(self) -> Color32 {
        match self {
            MapStyle::OpenStreetMap => Color32::from_rgb(0xf2, 0xef, 0xe9),
            MapStyle::CartoPositron => Color32::from_rgb(0xfa, 0xfa, 0xf8),
            MapStyle::CartoDarkmatter => Color32::from_rgb(0x1b, 0x1b, 0x1d),
        }
    }

    fn grid(self) -> Color32 {
        match self {
            MapStyle::OpenStreetMap => Color32::from_rgb(0xc8, 0xc4, 0xbc),
            MapStyle::CartoPositron => Color32::from_rgb(0xdc, 0xdc, 0xdc),
            MapStyle::CartoDarkmatter => Color32::from_rgb(0x3c, 0x3c, 0x40),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub kind: MapKind,
    pub style: MapStyle,
    /// Area framed by the map; its centre is the map centre.
    pub area: GeoBounds,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            kind: MapKind::default(),
            style: MapStyle::default(),
            area: GeoBounds::TURKEY,
        }
    }
}

/// Build the earthquake map for a view.
pub fn build_map(view: &FilteredView, options: &MapOptions) -> Figure {
    let mut figure = Figure::new("Longitude", "Latitude");
    let area = options.area;
    figure.frame = Some(([area.lon_min, area.lat_min], [area.lon_max, area.lat_max]));
    figure.equal_aspect = true;
    figure.backdrop = backdrop(area, options.style);

    match options.kind {
        MapKind::Density => density_layer(view, &mut figure),
        MapKind::Scatter => scatter_layer(view, &mut figure),
    }
    figure
}

fn backdrop(area: GeoBounds, style: MapStyle) -> Vec<Mark> {
    let mut marks = vec![Mark::Rect {
        min: [area.lon_min, area.lat_min],
        max: [area.lon_max, area.lat_max],
        fill: style.land(),
        stroke: style.grid(),
        label: None,
        hover: None,
    }];

    let grid = style.grid();
    let mut lat = (area.lat_min / GRATICULE_STEP_DEG).ceil() * GRATICULE_STEP_DEG;
    while lat <= area.lat_max {
        marks.push(Mark::Line {
            points: vec![[area.lon_min, lat], [area.lon_max, lat]],
            color: grid,
            width: 0.5,
        });
        lat += GRATICULE_STEP_DEG;
    }
    let mut lon = (area.lon_min / GRATICULE_STEP_DEG).ceil() * GRATICULE_STEP_DEG;
    while lon <= area.lon_max {
        marks.push(Mark::Line {
            points: vec![[lon, area.lat_min], [lon, area.lat_max]],
            color: grid,
            width: 0.5,
        });
        lon += GRATICULE_STEP_DEG;
    }
    marks
}

/// Cells weighted by summed magnitude on the Hot scale.
fn density_layer(view: &FilteredView, figure: &mut Figure) {
    let cells = density_grid(view, DENSITY_CELL_DEG);
    let Some((_, max_weight)) = extent(cells.iter().map(|c| c.weight)) else {
        return;
    };

    figure.marks = cells
        .iter()
        .map(|cell| {
            // Keep the faintest cells off pure black so they read on dark styles.
            let t = 0.15 + 0.85 * (cell.weight / max_weight);
            Mark::Rect {
                min: [cell.longitude, cell.latitude],
                max: [cell.longitude + cell.size_deg, cell.latitude + cell.size_deg],
                fill: ColorScale::Hot.sample(t).gamma_multiply(0.85),
                stroke: Color32::TRANSPARENT,
                label: None,
                hover: Some(format!(
                    "{} events, Σ magnitude {:.1}",
                    cell.count, cell.weight
                )),
            }
        })
        .collect();
    figure.colorbar = Some(ColorBar {
        title: "Σ xM".to_string(),
        scale: ColorScale::Hot,
        min: 0.0,
        max: max_weight,
    });
}

/// Markers coloured by magnitude (Turbo), diameter ∝ magnitude².
fn scatter_layer(view: &FilteredView, figure: &mut Figure) {
    let points = bin_for_scatter(view);
    let Some((min_mag, max_mag)) = extent(points.iter().map(|p| p.magnitude)) else {
        return;
    };
    let max_size = max_mag * max_mag;

    let markers = points.iter().map(|p| {
        let diameter = MAX_MARKER_DIAMETER * (p.magnitude * p.magnitude) / max_size;
        Marker {
            position: [p.longitude, p.latitude],
            t: normalized(p.magnitude, min_mag, max_mag),
            radius: (diameter / 2.0).max(1.0) as f32,
        }
    });
    figure.marks = batch_markers(markers, ColorScale::Turbo, SCATTER_OPACITY);
    figure.colorbar = Some(ColorBar {
        title: "xM".to_string(),
        scale: ColorScale::Turbo,
        min: min_mag,
        max: max_mag,
    });
}

pub(crate) fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if max - min > f64::EPSILON {
        (value - min) / (max - min)
    } else {
        0.5
    }
}
