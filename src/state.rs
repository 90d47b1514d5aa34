use std::sync::Arc;

use crate::charts::map::{build_map, MapOptions};
use crate::charts::scatter::{build_scatter, ScatterOptions};
use crate::charts::treemap::{build_treemap, TreemapOptions};
use crate::charts::Figure;
use crate::data::aggregate::{aggregate_by, bin_for_scatter, GroupKey, RegionalAggregate};
use crate::data::filter::{apply, FilterConfig, FilteredView};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Presentation options
// ---------------------------------------------------------------------------

/// Chart knobs that change how data is drawn, never which rows are shown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartOptions {
    pub map: MapOptions,
    pub treemap: TreemapOptions,
    pub group_by: GroupKey,
    pub scatter: ScatterOptions,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Everything below `options` is derived: it is recomputed from the shared
/// dataset, `filters` and `options` whenever either of the latter changes.
pub struct AppState {
    /// Catalogue loaded at start-up; never mutated.
    pub dataset: Arc<Dataset>,

    /// Where the catalogue came from, for the top bar.
    pub source_name: String,

    pub filters: FilterConfig,
    pub options: ChartOptions,

    /// Rows passing the current filters.
    pub view: FilteredView,

    /// Aggregates of `view` under `options.group_by`.
    pub regions: Vec<RegionalAggregate>,

    pub map: Figure,
    pub treemap: Figure,
    pub scatter: Figure,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, source_name: String) -> Self {
        let filters = FilterConfig::dashboard_initial(&dataset);
        let view = FilteredView::all(&dataset);
        let mut state = Self {
            dataset,
            source_name,
            filters,
            options: ChartOptions::default(),
            view,
            regions: Vec::new(),
            map: Figure::new("", ""),
            treemap: Figure::new("", ""),
            scatter: Figure::new("", ""),
        };
        state.refilter();
        state
    }

    /// Replace the filter configuration and recompute everything downstream.
    pub fn set_filters(&mut self, filters: FilterConfig) {
        if filters != self.filters {
            self.filters = filters;
            self.refilter();
        }
    }

    /// Back to the dashboard's initial selection.
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterConfig::dashboard_initial(&self.dataset));
    }

    /// Replace presentation options; the filtered view is kept as is.
    pub fn set_options(&mut self, options: ChartOptions) {
        if options == self.options {
            return;
        }
        let regrouped = options.group_by != self.options.group_by;
        self.options = options;
        if regrouped {
            self.regions = aggregate_by(&self.view, self.options.group_by);
        }
        self.rebuild_figures();
    }

    /// Recompute `view` and its aggregates after a filter change.
    fn refilter(&mut self) {
        self.view = apply(&self.dataset, &self.filters);
        self.regions = aggregate_by(&self.view, self.options.group_by);
        log::debug!(
            "{} of {} events visible in {} groups",
            self.view.len(),
            self.dataset.len(),
            self.regions.len()
        );
        self.rebuild_figures();
    }

    fn rebuild_figures(&mut self) {
        self.map = build_map(&self.view, &self.options.map);
        self.treemap = build_treemap(&self.regions, &self.options.treemap);
        self.scatter = build_scatter(&bin_for_scatter(&self.view), &self.options.scatter);
        if let Some(reason) = self.view.rejection() {
            let message = format!("Invalid filter: {reason}");
            for figure in [&mut self.map, &mut self.treemap, &mut self.scatter] {
                figure.empty_message = message.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::map::MapKind;
    use crate::data::filter::YearRange;
    use crate::data::model::fixtures::three_rows;

    fn state() -> AppState {
        AppState::new(Arc::new(three_rows()), "fixture".to_string())
    }

    #[test]
    fn starts_from_the_dashboard_selection() {
        let state = state();
        // Years 2000–2010, magnitude ≥ 3.5: only the 6.5 event.
        assert_eq!(state.view.indices(), &[1]);
        assert_eq!(state.regions.len(), 1);
        assert!(!state.map.is_empty());
    }

    #[test]
    fn filter_change_recomputes_view_and_aggregates() {
        let mut state = state();
        state.set_filters(FilterConfig::default());
        assert_eq!(state.view.len(), 3);
        let total: usize = state.regions.iter().map(|r| r.count).sum();
        assert_eq!(total, 3);

        state.reset_filters();
        assert_eq!(state.view.indices(), &[1]);
    }

    #[test]
    fn invalid_filters_show_empty_charts_with_the_reason() {
        let mut state = state();
        state.set_filters(FilterConfig {
            year_range: YearRange::new(2020, 1915),
            ..FilterConfig::default()
        });
        assert!(state.view.is_empty());
        assert!(state.regions.is_empty());
        for figure in [&state.map, &state.treemap, &state.scatter] {
            assert!(figure.is_empty());
            assert!(figure.empty_message.contains("inverted"));
        }
    }

    #[test]
    fn option_change_keeps_the_view() {
        let mut state = state();
        state.set_filters(FilterConfig::default());
        let before = state.view.indices().to_vec();

        let mut options = state.options;
        options.map.kind = MapKind::Scatter;
        options.group_by = GroupKey::Province;
        state.set_options(options);

        assert_eq!(state.view.indices(), before.as_slice());
        assert_eq!(state.options.map.kind, MapKind::Scatter);
        assert_eq!(state.regions.len(), 2);
    }
}
