use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::filter::FilteredView;
use super::model::EarthquakeRecord;

/// Seed used for the scatter sample so redraws show the same points.
pub const SCATTER_SAMPLE_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Regional aggregates (treemap input)
// ---------------------------------------------------------------------------

/// What rows are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKey {
    /// The raw `location` text, compared exactly.
    #[default]
    Location,
    /// The province derived from the location.
    Province,
}

impl GroupKey {
    pub const ALL: [GroupKey; 2] = [GroupKey::Location, GroupKey::Province];

    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Location => "Location",
            GroupKey::Province => "Province",
        }
    }

    fn key_of(self, record: &EarthquakeRecord) -> &str {
        match self {
            GroupKey::Location => &record.location,
            GroupKey::Province => &record.region,
        }
    }
}

/// Summary of the events sharing one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalAggregate {
    pub region: String,
    pub count: usize,
    pub avg_magnitude: f64,
    pub max_magnitude: f64,
    pub avg_depth: f64,
}

/// Group a view by exact `location` string.
pub fn aggregate_by_region(view: &FilteredView) -> Vec<RegionalAggregate> {
    group(view, GroupKey::Location)
}

/// Group a view by `key`. Groups come out in order of first appearance.
pub fn aggregate_by(view: &FilteredView, key: GroupKey) -> Vec<RegionalAggregate> {
    match key {
        GroupKey::Location => aggregate_by_region(view),
        GroupKey::Province => group(view, key),
    }
}

fn group(view: &FilteredView, key: GroupKey) -> Vec<RegionalAggregate> {
    struct Acc {
        count: usize,
        magnitude_sum: f64,
        magnitude_max: f64,
        depth_sum: f64,
    }

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Acc)> = Vec::new();

    for rec in view.records() {
        let name = key.key_of(rec);
        let slot = *slots.entry(name).or_insert_with(|| {
            groups.push((
                name,
                Acc {
                    count: 0,
                    magnitude_sum: 0.0,
                    magnitude_max: f64::NEG_INFINITY,
                    depth_sum: 0.0,
                },
            ));
            groups.len() - 1
        });
        let acc = &mut groups[slot].1;
        acc.count += 1;
        acc.magnitude_sum += rec.magnitude;
        acc.magnitude_max = acc.magnitude_max.max(rec.magnitude);
        acc.depth_sum += rec.depth;
    }

    groups
        .into_iter()
        .map(|(name, acc)| {
            let n = acc.count as f64;
            RegionalAggregate {
                region: name.to_string(),
                count: acc.count,
                avg_magnitude: acc.magnitude_sum / n,
                max_magnitude: acc.magnitude_max,
                avg_depth: acc.depth_sum / n,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter projection and sampling
// ---------------------------------------------------------------------------

/// Chart-ready tuple of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub magnitude: f64,
}

/// Project every row of the view, in view order.
pub fn bin_for_scatter(view: &FilteredView) -> Vec<ScatterPoint> {
    view.records()
        .map(|r| ScatterPoint {
            latitude: r.latitude,
            longitude: r.longitude,
            depth: r.depth,
            magnitude: r.magnitude,
        })
        .collect()
}

/// Keep `round(len * percent / 100)` points chosen with a seeded RNG,
/// preserving their relative order. `percent >= 100` returns everything.
pub fn sample_points(points: &[ScatterPoint], percent: u8, seed: u64) -> Vec<ScatterPoint> {
    if percent >= 100 {
        return points.to_vec();
    }
    let amount = ((points.len() as f64) * f64::from(percent) / 100.0).round() as usize;
    let amount = amount.min(points.len());

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, points.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| points[i]).collect()
}

// ---------------------------------------------------------------------------
// Density grid (density map input)
// ---------------------------------------------------------------------------

/// One square lat/lon bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityCell {
    /// South-west corner.
    pub latitude: f64,
    pub longitude: f64,
    pub size_deg: f64,
    pub count: usize,
    /// Sum of magnitudes; the density map is weighted by magnitude.
    pub weight: f64,
}

/// Bin the view into `cell_deg`-sized squares. Only non-empty cells are
/// returned, ordered south to north then west to east.
pub fn density_grid(view: &FilteredView, cell_deg: f64) -> Vec<DensityCell> {
    if !(cell_deg.is_finite() && cell_deg > 0.0) {
        return Vec::new();
    }

    let mut cells: BTreeMap<(i64, i64), (usize, f64)> = BTreeMap::new();
    for rec in view.records() {
        let key = (
            (rec.latitude / cell_deg).floor() as i64,
            (rec.longitude / cell_deg).floor() as i64,
        );
        let cell = cells.entry(key).or_insert((0, 0.0));
        cell.0 += 1;
        cell.1 += rec.magnitude;
    }

    cells
        .into_iter()
        .map(|((row, col), (count, weight))| DensityCell {
            latitude: row as f64 * cell_deg,
            longitude: col as f64 * cell_deg,
            size_deg: cell_deg,
            count,
            weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::filter::{apply, FilterConfig, YearRange};
    use super::super::model::fixtures::{record, three_rows};
    use super::super::model::Dataset;
    use super::*;

    fn view_of(ds: Dataset, config: &FilterConfig) -> FilteredView {
        apply(&Arc::new(ds), config)
    }

    #[test]
    fn regional_aggregate_for_recent_years() {
        let config = FilterConfig {
            year_range: YearRange::new(1995, 2024),
            ..FilterConfig::default()
        };
        let aggregates = aggregate_by_region(&view_of(three_rows(), &config));
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].region, "Izmir");
        assert_eq!(aggregates[0].count, 1);
        assert_eq!(aggregates[0].avg_magnitude, 6.5);
        assert_eq!(aggregates[1].region, "Ankara");
        assert_eq!(aggregates[1].count, 1);
        assert_eq!(aggregates[1].avg_magnitude, 3.0);
    }

    #[test]
    fn aggregates_compute_mean_max_and_depth() {
        let aggregates = aggregate_by_region(&view_of(three_rows(), &FilterConfig::default()));
        let izmir = &aggregates[0];
        assert_eq!(izmir.count, 2);
        assert!((izmir.avg_magnitude - 5.25).abs() < 1e-12);
        assert_eq!(izmir.max_magnitude, 6.5);
        assert!((izmir.avg_depth - 7.5).abs() < 1e-12);
    }

    #[test]
    fn location_grouping_is_exact_string_match() {
        let ds = Dataset::from_records(vec![
            record(2001, 4.0, 5.0, "IZMIR"),
            record(2002, 4.0, 5.0, "Izmir"),
            record(2003, 4.0, 5.0, "IZMIR "),
        ]);
        let aggregates = aggregate_by_region(&view_of(ds, &FilterConfig::default()));
        assert_eq!(aggregates.len(), 3);
    }

    #[test]
    fn default_grouping_is_the_location_aggregate() {
        let view = view_of(three_rows(), &FilterConfig::default());
        assert_eq!(
            aggregate_by(&view, GroupKey::default()),
            aggregate_by_region(&view)
        );
    }

    #[test]
    fn province_grouping_uses_extracted_region() {
        let ds = Dataset::from_records(vec![
            record(2001, 4.0, 5.0, "SINDIRGI (BALIKESIR)"),
            record(2002, 5.0, 5.0, "BIGADIC (BALIKESIR)"),
            record(2003, 3.0, 5.0, "GOLCUK-IZMIT KORFEZI"),
        ]);
        let aggregates = aggregate_by(&view_of(ds, &FilterConfig::default()), GroupKey::Province);
        let names: Vec<&str> = aggregates.iter().map(|a| a.region.as_str()).collect();
        assert_eq!(names, ["BALIKESIR", "IZMIT"]);
        assert_eq!(aggregates[0].count, 2);
    }

    #[test]
    fn counts_sum_to_view_size() {
        let places = ["VAN", "IZMIR", "MUGLA", "HATAY"];
        let ds = Arc::new(Dataset::from_records(
            (0..120)
                .map(|i| {
                    let magnitude = 2.0 + (i % 50) as f64 / 10.0;
                    record(1950 + i % 70, magnitude, 10.0, places[(i % 4) as usize])
                })
                .collect(),
        ));
        for magnitude_min in [0.0, 3.0, 5.5, 9.0] {
            let view = apply(
                &ds,
                &FilterConfig {
                    magnitude_min,
                    ..FilterConfig::default()
                },
            );
            for key in GroupKey::ALL {
                let total: usize = aggregate_by(&view, key).iter().map(|a| a.count).sum();
                assert_eq!(total, view.len());
            }
        }
    }

    #[test]
    fn empty_view_has_no_aggregates() {
        let config = FilterConfig {
            year_range: YearRange::new(2020, 1915),
            ..FilterConfig::default()
        };
        let view = view_of(three_rows(), &config);
        assert!(aggregate_by_region(&view).is_empty());
        assert!(bin_for_scatter(&view).is_empty());
        assert!(density_grid(&view, 0.25).is_empty());
    }

    #[test]
    fn scatter_projection_keeps_view_order() {
        let points = bin_for_scatter(&view_of(three_rows(), &FilterConfig::default()));
        let mags: Vec<f64> = points.iter().map(|p| p.magnitude).collect();
        assert_eq!(mags, [4.0, 6.5, 3.0]);
        assert_eq!(points[1].depth, 10.0);
    }

    #[test]
    fn sampling_is_deterministic_and_ordered() {
        let points: Vec<ScatterPoint> = (0..101)
            .map(|i| ScatterPoint {
                latitude: 39.0,
                longitude: 35.0,
                depth: i as f64,
                magnitude: 4.0,
            })
            .collect();

        let half = sample_points(&points, 50, SCATTER_SAMPLE_SEED);
        assert_eq!(half.len(), 51);
        assert!(half.windows(2).all(|w| w[0].depth < w[1].depth));
        assert_eq!(half, sample_points(&points, 50, SCATTER_SAMPLE_SEED));

        assert_eq!(sample_points(&points, 100, 7), points);
        assert_eq!(sample_points(&points, 10, 7).len(), 10);
        assert!(sample_points(&[], 30, 7).is_empty());
    }

    #[test]
    fn density_grid_bins_by_cell() {
        let mut a = record(2001, 4.0, 5.0, "A");
        a.latitude = 39.10;
        a.longitude = 35.10;
        let mut b = record(2002, 5.0, 5.0, "B");
        b.latitude = 39.20;
        b.longitude = 35.24;
        let mut c = record(2003, 6.0, 5.0, "C");
        c.latitude = 39.30;
        c.longitude = 35.10;
        let view = view_of(Dataset::from_records(vec![a, b, c]), &FilterConfig::default());

        let cells = density_grid(&view, 0.25);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].count, 2);
        assert_eq!(cells[0].weight, 9.0);
        assert_eq!(cells[0].latitude, 39.0);
        assert_eq!(cells[0].longitude, 35.0);
        assert_eq!(cells[1].latitude, 39.25);
        assert_eq!(cells.iter().map(|c| c.count).sum::<usize>(), view.len());

        assert!(density_grid(&view, 0.0).is_empty());
    }
}
