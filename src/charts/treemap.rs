use eframe::egui::Color32;

use super::{extent, ColorBar, Figure, Mark};
use crate::color::ColorScale;
use crate::data::aggregate::RegionalAggregate;

/// Treemap canvas size in plot units.
const CANVAS: Tile = Tile {
    x: 0.0,
    y: 0.0,
    w: 160.0,
    h: 100.0,
};

/// Which aggregate column drives tile colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMetric {
    #[default]
    Count,
    AverageMagnitude,
    MaximumMagnitude,
}

impl ColorMetric {
    pub const ALL: [ColorMetric; 3] = [
        ColorMetric::Count,
        ColorMetric::AverageMagnitude,
        ColorMetric::MaximumMagnitude,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorMetric::Count => "Earthquake Count",
            ColorMetric::AverageMagnitude => "Average Magnitude",
            ColorMetric::MaximumMagnitude => "Maximum Magnitude",
        }
    }

    fn value(self, agg: &RegionalAggregate) -> f64 {
        match self {
            ColorMetric::Count => agg.count as f64,
            ColorMetric::AverageMagnitude => agg.avg_magnitude,
            ColorMetric::MaximumMagnitude => agg.max_magnitude,
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            ColorMetric::Count => "Count",
            ColorMetric::AverageMagnitude => "Avg xM",
            ColorMetric::MaximumMagnitude => "Max xM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreemapOptions {
    pub metric: ColorMetric,
    /// Regions with fewer events are left out.
    pub min_count: usize,
    /// At most this many regions, largest counts first.
    pub max_regions: usize,
}

impl Default for TreemapOptions {
    fn default() -> Self {
        Self {
            metric: ColorMetric::default(),
            min_count: 10,
            max_regions: 25,
        }
    }
}

/// Build the regional treemap. Tile area is proportional to event count.
pub fn build_treemap(aggregates: &[RegionalAggregate], options: &TreemapOptions) -> Figure {
    let mut figure = Figure::new("", "");
    figure.show_axes = false;
    figure.frame = Some(([CANVAS.x, CANVAS.y], [CANVAS.x + CANVAS.w, CANVAS.y + CANVAS.h]));

    let shown = top_regions(aggregates, options);
    if shown.is_empty() {
        figure.empty_message = format!(
            "No region has at least {} matching earthquakes",
            options.min_count
        );
        return figure;
    }

    let values: Vec<f64> = shown.iter().map(|a| a.count as f64).collect();
    let tiles = squarify(&values, CANVAS);
    let metric = options.metric;
    let (lo, hi) = extent(shown.iter().map(|a| metric.value(a))).unwrap_or((0.0, 0.0));

    figure.marks = shown
        .iter()
        .zip(tiles)
        .map(|(agg, tile)| Mark::Rect {
            // Plot y grows upwards; lay rows out from the top edge.
            min: [tile.x, CANVAS.h - tile.y - tile.h],
            max: [tile.x + tile.w, CANVAS.h - tile.y],
            fill: ColorScale::RdYlBuR.map(metric.value(agg), lo, hi),
            stroke: Color32::WHITE,
            label: Some(format!("{}\n{}", agg.region, agg.count)),
            hover: Some(format!(
                "{}: {} events, avg xM {:.2}, max xM {:.1}",
                agg.region, agg.count, agg.avg_magnitude, agg.max_magnitude
            )),
        })
        .collect();
    figure.colorbar = Some(ColorBar {
        title: metric.short_name().to_string(),
        scale: ColorScale::RdYlBuR,
        min: lo,
        max: hi,
    });
    figure
}

/// Regions passing `min_count`, the `max_regions` largest by count. Ties keep
/// their input order.
pub fn top_regions<'a>(
    aggregates: &'a [RegionalAggregate],
    options: &TreemapOptions,
) -> Vec<&'a RegionalAggregate> {
    let mut kept: Vec<&RegionalAggregate> = aggregates
        .iter()
        .filter(|a| a.count >= options.min_count && a.count > 0)
        .collect();
    kept.sort_by(|a, b| b.count.cmp(&a.count));
    kept.truncate(options.max_regions);
    kept
}

// ---------------------------------------------------------------------------
// Squarified layout (Bruls, Huizing, van Wijk)
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Tile {
    fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Lay out `values` (sorted descending, all positive) into `bounds` so tile
/// areas are proportional to values and aspect ratios stay close to 1.
/// Returns one tile per value, in input order; nothing if the total is zero.
pub fn squarify(values: &[f64], bounds: Tile) -> Vec<Tile> {
    let total: f64 = values.iter().sum();
    if values.is_empty() || !(total > 0.0) || bounds.area() <= 0.0 {
        return Vec::new();
    }
    let scale = bounds.area() / total;
    let areas: Vec<f64> = values.iter().map(|v| v * scale).collect();

    let mut tiles = Vec::with_capacity(areas.len());
    let mut free = bounds;
    let mut start = 0;

    while start < areas.len() {
        let side = free.w.min(free.h);
        let mut end = start + 1;
        let mut best = worst_ratio(&areas[start..end], side);
        while end < areas.len() {
            let next = worst_ratio(&areas[start..=end], side);
            if next > best {
                break;
            }
            best = next;
            end += 1;
        }

        let row = &areas[start..end];
        let row_area: f64 = row.iter().sum();
        if free.w >= free.h {
            // Column along the left edge.
            let col_w = if free.h > 0.0 { row_area / free.h } else { 0.0 };
            let mut y = free.y;
            for a in row {
                let h = if col_w > 0.0 { a / col_w } else { 0.0 };
                tiles.push(Tile {
                    x: free.x,
                    y,
                    w: col_w,
                    h,
                });
                y += h;
            }
            free = Tile {
                x: free.x + col_w,
                w: (free.w - col_w).max(0.0),
                ..free
            };
        } else {
            // Row along the top edge.
            let row_h = if free.w > 0.0 { row_area / free.w } else { 0.0 };
            let mut x = free.x;
            for a in row {
                let w = if row_h > 0.0 { a / row_h } else { 0.0 };
                tiles.push(Tile {
                    x,
                    y: free.y,
                    w,
                    h: row_h,
                });
                x += w;
            }
            free = Tile {
                y: free.y + row_h,
                h: (free.h - row_h).max(0.0),
                ..free
            };
        }
        start = end;
    }
    tiles
}

/// Worst aspect ratio of a row of `areas` laid along a side of length `side`.
fn worst_ratio(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    let max = areas.iter().copied().fold(f64::MIN, f64::max);
    let min = areas.iter().copied().fold(f64::MAX, f64::min);
    if sum <= 0.0 || min <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let side2 = side * side;
    let sum2 = sum * sum;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}
