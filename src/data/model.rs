use chrono::{Datelike, NaiveDate, NaiveTime};

// ---------------------------------------------------------------------------
// GeoBounds – an inclusive latitude/longitude box
// ---------------------------------------------------------------------------

/// Inclusive lat/lon rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// Valid world coordinates.
    pub const WORLD: GeoBounds = GeoBounds {
        lat_min: -90.0,
        lat_max: 90.0,
        lon_min: -180.0,
        lon_max: 180.0,
    };

    /// Study area of the catalogue (mainland Turkey and its seas).
    pub const TURKEY: GeoBounds = GeoBounds {
        lat_min: 35.0,
        lat_max: 43.0,
        lon_min: 25.0,
        lon_max: 45.0,
    };

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

// ---------------------------------------------------------------------------
// EarthquakeRecord – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single observed seismic event.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres below the surface.
    pub depth: f64,
    pub magnitude: f64,
    /// Free-text place name exactly as it appears in the source.
    pub location: String,
    /// Province derived from `location`, see [`super::region::extract_region`].
    pub region: String,
}

impl EarthquakeRecord {
    pub fn year(&self) -> i32 {
        self.event_date.year()
    }
}

// ---------------------------------------------------------------------------
// Span – closed [min, max] interval of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    fn of(values: impl Iterator<Item = T>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Span { min: v, max: v }),
            Some(Span { min, max }) => Some(Span {
                min: if v < min { v } else { min },
                max: if v > max { v } else { max },
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded catalogue
// ---------------------------------------------------------------------------

/// The full parsed catalogue with pre-computed column spans.
///
/// Fields are private: once built, a dataset is never mutated. Share it with
/// `Arc<Dataset>`.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<EarthquakeRecord>,
    years: Option<Span<i32>>,
    magnitudes: Option<Span<f64>>,
    depths: Option<Span<f64>>,
}

impl Dataset {
    /// Build column spans from the loaded records.
    pub fn from_records(records: Vec<EarthquakeRecord>) -> Self {
        let years = Span::of(records.iter().map(EarthquakeRecord::year));
        let magnitudes = Span::of(records.iter().map(|r| r.magnitude));
        let depths = Span::of(records.iter().map(|r| r.depth));
        Dataset {
            records,
            years,
            magnitudes,
            depths,
        }
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&EarthquakeRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn year_span(&self) -> Option<Span<i32>> {
        self.years
    }

    pub fn magnitude_span(&self) -> Option<Span<f64>> {
        self.magnitudes
    }

    pub fn depth_span(&self) -> Option<Span<f64>> {
        self.depths
    }
}
