use std::sync::Arc;

use thiserror::Error;

use super::model::{Dataset, EarthquakeRecord};

/// Magnitude at or above which an event counts as "large".
pub const LARGE_EARTHQUAKE_MAGNITUDE: f64 = 5.0;

// ---------------------------------------------------------------------------
// Filter configuration: the user's row predicates
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const ALL: YearRange = YearRange {
        min: i32::MIN,
        max: i32::MAX,
    };

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Row predicates selected in the filter panel. All bounds are inclusive.
///
/// The default configuration matches every record.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub year_range: YearRange,
    pub magnitude_min: f64,
    pub magnitude_max: Option<f64>,
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
    pub large_only: bool,
    /// Cut-off used when `large_only` is set.
    pub large_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            year_range: YearRange::ALL,
            magnitude_min: 0.0,
            magnitude_max: None,
            depth_min: None,
            depth_max: None,
            large_only: false,
            large_threshold: LARGE_EARTHQUAKE_MAGNITUDE,
        }
    }
}

/// Upper limit of the depth slider, in kilometres.
pub const DEPTH_SLIDER_CAP: f64 = 200.0;

impl FilterConfig {
    /// The dashboard's initial selection: years from 2000 on, magnitude 3.5
    /// and up, depth 0–100 km. Values are clamped into the dataset's spans.
    pub fn dashboard_initial(dataset: &Dataset) -> Self {
        let mut config = FilterConfig::default();
        if let Some(years) = dataset.year_span() {
            config.year_range = YearRange::new(2000.clamp(years.min, years.max), years.max);
        }
        if let Some(mags) = dataset.magnitude_span() {
            config.magnitude_min = 3.5_f64.clamp(mags.min, mags.max);
            config.magnitude_max = Some(mags.max);
        }
        let depth_cap = dataset
            .depth_span()
            .map_or(DEPTH_SLIDER_CAP, |d| d.max.min(DEPTH_SLIDER_CAP));
        config.depth_min = Some(0.0);
        config.depth_max = Some(100.0_f64.min(depth_cap));
        config
    }

    /// Check the bounds for states the panel cannot normally produce.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        let mut bounds = vec![("magnitude_min", self.magnitude_min)];
        if self.large_only {
            bounds.push(("large_threshold", self.large_threshold));
        }
        bounds.extend(self.magnitude_max.map(|v| ("magnitude_max", v)));
        bounds.extend(self.depth_min.map(|v| ("depth_min", v)));
        bounds.extend(self.depth_max.map(|v| ("depth_max", v)));
        // Infinite bounds are plain unbounded comparisons; only NaN is malformed.
        if let Some((name, _)) = bounds.iter().find(|(_, v)| v.is_nan()) {
            return Err(InvalidConfiguration::NotANumber(name));
        }

        if self.year_range.min > self.year_range.max {
            return Err(InvalidConfiguration::InvertedYears {
                min: self.year_range.min,
                max: self.year_range.max,
            });
        }
        if let Some(max) = self.magnitude_max.filter(|max| *max < self.magnitude_min) {
            return Err(InvalidConfiguration::InvertedMagnitude {
                min: self.magnitude_min,
                max,
            });
        }
        if let (Some(min), Some(max)) = (self.depth_min, self.depth_max) {
            if min > max {
                return Err(InvalidConfiguration::InvertedDepth { min, max });
            }
        }
        Ok(())
    }

    /// The row inclusion predicate.
    pub fn matches(&self, record: &EarthquakeRecord) -> bool {
        self.year_range.contains(record.year())
            && record.magnitude >= self.magnitude_min
            && self.magnitude_max.map_or(true, |max| record.magnitude <= max)
            && self.depth_min.map_or(true, |min| record.depth >= min)
            && self.depth_max.map_or(true, |max| record.depth <= max)
            && (!self.large_only || record.magnitude >= self.large_threshold)
    }
}

/// A configuration that can only produce an empty view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    #[error("year range {min}..={max} is inverted")]
    InvertedYears { min: i32, max: i32 },
    #[error("magnitude range {min}..={max} is inverted")]
    InvertedMagnitude { min: f64, max: f64 },
    #[error("depth range {min}..={max} is inverted")]
    InvertedDepth { min: f64, max: f64 },
    #[error("{0} is not a number")]
    NotANumber(&'static str),
}

// ---------------------------------------------------------------------------
// FilteredView – ordered subset of dataset rows
// ---------------------------------------------------------------------------

/// Rows of a shared [`Dataset`] that passed a [`FilterConfig`], in dataset
/// order. Holds indices only; the records stay in the dataset.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
    rejection: Option<InvalidConfiguration>,
}

impl FilteredView {
    /// A view over every row.
    pub fn all(dataset: &Arc<Dataset>) -> Self {
        Self {
            dataset: Arc::clone(dataset),
            indices: (0..dataset.len()).collect(),
            rejection: None,
        }
    }

    /// Dataset row numbers, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &EarthquakeRecord> + '_ {
        self.indices
            .iter()
            .filter_map(move |&i| self.dataset.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Why the configuration was normalized to an empty view, if it was.
    pub fn rejection(&self) -> Option<&InvalidConfiguration> {
        self.rejection.as_ref()
    }
}

/// Return the rows of `dataset` that pass every active predicate.
///
/// Never fails: a configuration rejected by [`FilterConfig::validate`]
/// yields an empty view carrying the reason.
pub fn apply(dataset: &Arc<Dataset>, config: &FilterConfig) -> FilteredView {
    if let Err(reason) = config.validate() {
        log::warn!("Filter configuration rejected, showing no events: {reason}");
        return FilteredView {
            dataset: Arc::clone(dataset),
            indices: Vec::new(),
            rejection: Some(reason),
        };
    }

    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| config.matches(rec))
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        log::debug!("Filter matched no events: {config:?}");
    }

    FilteredView {
        dataset: Arc::clone(dataset),
        indices,
        rejection: None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::fixtures::{record, three_rows};
    use super::*;

    fn scenario_dataset() -> Arc<Dataset> {
        Arc::new(three_rows())
    }

    fn years(min: i32, max: i32) -> FilterConfig {
        FilterConfig {
            year_range: YearRange::new(min, max),
            ..FilterConfig::default()
        }
    }

    #[test]
    fn year_range_selects_rows_two_and_three() {
        let view = apply(&scenario_dataset(), &years(1995, 2024));
        assert_eq!(view.indices(), &[1, 2]);
        assert!(view.rejection().is_none());
    }

    #[test]
    fn magnitude_floor_selects_row_two() {
        let config = FilterConfig {
            magnitude_min: 5.0,
            ..years(1915, 2024)
        };
        assert_eq!(apply(&scenario_dataset(), &config).indices(), &[1]);
    }

    #[test]
    fn large_only_uses_its_threshold() {
        let config = FilterConfig {
            large_only: true,
            large_threshold: 6.0,
            ..years(1915, 2024)
        };
        assert_eq!(apply(&scenario_dataset(), &config).indices(), &[1]);

        let unbounded_years = FilterConfig {
            large_only: true,
            large_threshold: 6.0,
            ..FilterConfig::default()
        };
        assert_eq!(apply(&scenario_dataset(), &unbounded_years).indices(), &[1]);
    }

    #[test]
    fn inverted_year_range_is_empty_not_an_error() {
        let view = apply(&scenario_dataset(), &years(2020, 1915));
        assert!(view.is_empty());
        assert_eq!(
            view.rejection(),
            Some(&InvalidConfiguration::InvertedYears {
                min: 2020,
                max: 1915,
            })
        );
    }

    #[test]
    fn depth_bounds_are_inclusive() {
        let config = FilterConfig {
            depth_min: Some(2.0),
            depth_max: Some(5.0),
            ..FilterConfig::default()
        };
        assert_eq!(apply(&scenario_dataset(), &config).indices(), &[0, 2]);
    }

    #[test]
    fn magnitude_ceiling_is_inclusive() {
        let config = FilterConfig {
            magnitude_max: Some(4.0),
            ..FilterConfig::default()
        };
        assert_eq!(apply(&scenario_dataset(), &config).indices(), &[0, 2]);
    }

    #[test]
    fn inverted_or_nan_bounds_yield_empty_views() {
        let ds = scenario_dataset();
        let inverted_depth = FilterConfig {
            depth_min: Some(50.0),
            depth_max: Some(10.0),
            ..FilterConfig::default()
        };
        let inverted_mag = FilterConfig {
            magnitude_min: 6.0,
            magnitude_max: Some(4.0),
            ..FilterConfig::default()
        };
        let nan = FilterConfig {
            magnitude_min: f64::NAN,
            ..FilterConfig::default()
        };
        for config in [inverted_depth, inverted_mag, nan] {
            let view = apply(&ds, &config);
            assert!(view.is_empty());
            assert!(view.rejection().is_some());
        }
    }

    #[test]
    fn infinite_bounds_are_unbounded() {
        let ds = scenario_dataset();
        let open_ended = FilterConfig {
            magnitude_min: f64::NEG_INFINITY,
            magnitude_max: Some(f64::INFINITY),
            depth_min: Some(f64::NEG_INFINITY),
            depth_max: Some(f64::INFINITY),
            ..FilterConfig::default()
        };
        let view = apply(&ds, &open_ended);
        assert_eq!(view.indices(), &[0, 1, 2]);
        assert!(view.rejection().is_none());

        let nan_depth = FilterConfig {
            depth_max: Some(f64::NAN),
            ..FilterConfig::default()
        };
        assert_eq!(
            nan_depth.validate(),
            Err(InvalidConfiguration::NotANumber("depth_max"))
        );
    }

    #[test]
    fn default_config_keeps_everything_in_order() {
        let ds = scenario_dataset();
        let view = apply(&ds, &FilterConfig::default());
        assert_eq!(view.indices(), FilteredView::all(&ds).indices());
    }

    #[test]
    fn views_are_ordered_subsets_and_idempotent() {
        let ds = Arc::new(Dataset::from_records(
            (0..200)
                .map(|i| {
                    record(
                        1915 + (i * 7) % 110,
                        1.0 + (i % 70) as f64 / 10.0,
                        (i * 13 % 150) as f64,
                        if i % 3 == 0 { "VAN" } else { "IZMIR" },
                    )
                })
                .collect(),
        ));
        let configs = [
            FilterConfig::default(),
            FilterConfig::dashboard_initial(&ds),
            FilterConfig {
                large_only: true,
                ..years(1950, 2000)
            },
            FilterConfig {
                magnitude_min: 3.3,
                depth_max: Some(40.0),
                ..FilterConfig::default()
            },
        ];
        for config in &configs {
            let view = apply(&ds, config);
            assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            assert!(view.indices().iter().all(|&i| i < ds.len()));
            assert!(view.records().all(|r| config.matches(r)));
            assert_eq!(view.indices(), apply(&ds, config).indices());
        }
    }

    #[test]
    fn dashboard_initial_clamps_to_the_dataset() {
        let ds = three_rows();
        let config = FilterConfig::dashboard_initial(&ds);
        assert_eq!(config.year_range, YearRange::new(2000, 2010));
        assert_eq!(config.magnitude_min, 3.5);
        assert_eq!(config.magnitude_max, Some(6.5));
        assert_eq!(config.depth_min, Some(0.0));
        assert_eq!(config.depth_max, Some(10.0));
    }
}
