use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, EarthquakeRecord, GeoBounds};
use super::region::{extract_region, UNKNOWN_REGION};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(Field),
    #[error("row {row}: missing value for '{field}'")]
    MissingValue { row: usize, field: Field },
    #[error("row {row}: invalid {field} '{value}': {reason}")]
    InvalidValue {
        row: usize,
        field: Field,
        value: String,
        reason: &'static str,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a top-level JSON array of records")]
    JsonShape,
    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed Arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("dataset contains no usable records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Column vocabulary
// ---------------------------------------------------------------------------

/// The columns the loader understands, independent of source naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Date,
    Time,
    Latitude,
    Longitude,
    Depth,
    Magnitude,
    Location,
}

impl Field {
    const REQUIRED: [Field; 5] = [
        Field::Date,
        Field::Latitude,
        Field::Longitude,
        Field::Depth,
        Field::Magnitude,
    ];

    /// Resolve a source header, Turkish catalogue names included.
    pub fn from_header(header: &str) -> Option<Field> {
        let normalized = header.trim().trim_start_matches('\u{feff}').to_lowercase();
        let field = match normalized.as_str() {
            "olus tarihi" | "date" | "event_date" => Field::Date,
            "olus zamani" | "time" | "event_time" => Field::Time,
            "enlem" | "latitude" | "lat" => Field::Latitude,
            "boylam" | "longitude" | "lon" | "lng" => Field::Longitude,
            "derinlik" | "depth" => Field::Depth,
            "xm" | "magnitude" | "mag" => Field::Magnitude,
            "yer" | "location" | "place" => Field::Location,
            _ => return None,
        };
        Some(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Time => "time",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Depth => "depth",
            Field::Magnitude => "magnitude",
            Field::Location => "location",
        };
        f.write_str(name)
    }
}

/// One source cell before type normalization.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

/// A source row keyed by [`Field`]. `row` is 1-based among data rows.
struct RawRow {
    row: usize,
    cells: BTreeMap<Field, Cell>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Knobs for [`load_file`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Rows outside this box are dropped as out-of-area. `None` keeps all.
    pub study_area: Option<GeoBounds>,
    /// Field delimiter for text formats; defaults to the one implied by the extension.
    pub delimiter: Option<u8>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            study_area: Some(GeoBounds::TURKEY),
            delimiter: None,
        }
    }
}

/// Load an earthquake catalogue.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.tab` – delimited text with a header row
/// * `.json`    – `[{ "Olus tarihi": "2023.02.06", "Enlem": 37.2, ... }, ...]`
/// * `.parquet` – flat columns, as written by `df.to_parquet()`
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => read_delimited(path, options.delimiter.unwrap_or(b','))?,
        "tsv" | "tab" => read_delimited(path, options.delimiter.unwrap_or(b'\t'))?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = build_dataset(rows, options)?;
    if let (Some(years), Some(mags)) = (dataset.year_span(), dataset.magnitude_span()) {
        log::info!(
            "Loaded {} events from {} (years {}-{}, magnitude {:.1}-{:.1})",
            dataset.len(),
            path.display(),
            years.min,
            years.max,
            mags.min,
            mags.max
        );
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Normalization and cleaning
// ---------------------------------------------------------------------------

fn build_dataset(rows: Vec<RawRow>, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    let mut negative_depth = 0usize;
    let mut non_positive_magnitude = 0usize;
    let mut out_of_area = 0usize;

    for raw in rows {
        let record = normalize(raw)?;
        if record.depth < 0.0 {
            negative_depth += 1;
        } else if record.magnitude <= 0.0 {
            non_positive_magnitude += 1;
        } else if options
            .study_area
            .is_some_and(|area| !area.contains(record.latitude, record.longitude))
        {
            out_of_area += 1;
        } else {
            records.push(record);
        }
    }

    let dropped = negative_depth + non_positive_magnitude + out_of_area;
    if dropped > 0 {
        log::info!(
            "Dropped {dropped} of {total} rows ({negative_depth} negative depth, \
             {non_positive_magnitude} non-positive magnitude, {out_of_area} outside study area)"
        );
    }

    let dataset = Dataset::from_records(records);
    if dataset.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(dataset)
}

fn normalize(mut raw: RawRow) -> Result<EarthquakeRecord, LoadError> {
    let row = raw.row;
    let mut take = |field: Field| raw.cells.remove(&field).unwrap_or(Cell::Missing);

    let (event_date, embedded_time) = date_cell(row, take(Field::Date))?;
    let event_time = time_cell(row, take(Field::Time))?.or(embedded_time);
    let latitude = number_cell(row, Field::Latitude, take(Field::Latitude))?;
    let longitude = number_cell(row, Field::Longitude, take(Field::Longitude))?;
    let depth = number_cell(row, Field::Depth, take(Field::Depth))?;
    let magnitude = number_cell(row, Field::Magnitude, take(Field::Magnitude))?;

    if !GeoBounds::WORLD.contains(latitude, longitude) {
        return Err(LoadError::InvalidValue {
            row,
            field: if (-90.0..=90.0).contains(&latitude) {
                Field::Longitude
            } else {
                Field::Latitude
            },
            value: format!("{latitude}, {longitude}"),
            reason: "outside world coordinate bounds",
        });
    }

    let location = match take(Field::Location) {
        Cell::Text(s) if !s.trim().is_empty() => s.trim().to_string(),
        Cell::Number(n) => n.to_string(),
        _ => UNKNOWN_REGION.to_string(),
    };
    let region = extract_region(&location);

    Ok(EarthquakeRecord {
        event_date,
        event_time,
        latitude,
        longitude,
        depth,
        magnitude,
        location,
        region,
    })
}

fn number_cell(row: usize, field: Field, cell: Cell) -> Result<f64, LoadError> {
    let (value, text) = match cell {
        Cell::Number(n) => (Some(n), n.to_string()),
        Cell::Text(s) => (s.trim().parse::<f64>().ok(), s),
        Cell::Date(d) => (None, d.to_string()),
        Cell::Missing => return Err(LoadError::MissingValue { row, field }),
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(LoadError::InvalidValue {
            row,
            field,
            value: text,
            reason: "not a finite number",
        }),
        None => Err(LoadError::InvalidValue {
            row,
            field,
            value: text,
            reason: "not a number",
        }),
    }
}

fn date_cell(row: usize, cell: Cell) -> Result<(NaiveDate, Option<NaiveTime>), LoadError> {
    match cell {
        Cell::Date(d) => Ok((d, None)),
        Cell::Text(s) => parse_date(s.trim()).ok_or(LoadError::InvalidValue {
            row,
            field: Field::Date,
            value: s,
            reason: "unrecognized date format",
        }),
        Cell::Number(n) => Err(LoadError::InvalidValue {
            row,
            field: Field::Date,
            value: n.to_string(),
            reason: "unrecognized date format",
        }),
        Cell::Missing => Err(LoadError::MissingValue {
            row,
            field: Field::Date,
        }),
    }
}

fn time_cell(row: usize, cell: Cell) -> Result<Option<NaiveTime>, LoadError> {
    match cell {
        Cell::Missing => Ok(None),
        Cell::Text(s) => parse_time(s.trim()).map(Some).ok_or(LoadError::InvalidValue {
            row,
            field: Field::Time,
            value: s,
            reason: "unrecognized time format",
        }),
        Cell::Number(n) => Err(LoadError::InvalidValue {
            row,
            field: Field::Time,
            value: n.to_string(),
            reason: "unrecognized time format",
        }),
        Cell::Date(d) => Err(LoadError::InvalidValue {
            row,
            field: Field::Time,
            value: d.to_string(),
            reason: "unrecognized time format",
        }),
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y.%m.%d", "%Y-%m-%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

fn parse_date(s: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| (d, None))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| (dt.date(), Some(dt.time())))
        })
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

fn ensure_required(present: &[Field]) -> Result<(), LoadError> {
    match Field::REQUIRED.iter().find(|f| !present.contains(f)) {
        Some(missing) => Err(LoadError::MissingColumn(*missing)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; unknown columns are ignored.
fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let columns: Vec<Option<Field>> = reader.headers()?.iter().map(Field::from_header).collect();
    let present: Vec<Field> = columns.iter().flatten().copied().collect();
    ensure_required(&present)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let cells = columns
            .iter()
            .zip(record.iter())
            .filter_map(|(field, value)| {
                let field = (*field)?;
                let cell = if value.is_empty() {
                    Cell::Missing
                } else {
                    Cell::Text(value.to_string())
                };
                Some((field, cell))
            })
            .collect();
        rows.push(RawRow { row: i + 1, cells });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn read_json(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::JsonShape)?;

    let mut present: Vec<Field> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(LoadError::JsonShape)?;
        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            let Some(field) = Field::from_header(key) else {
                continue;
            };
            if !present.contains(&field) {
                present.push(field);
            }
            cells.insert(field, json_to_cell(val));
        }
        rows.push(RawRow { row: i + 1, cells });
    }

    if !rows.is_empty() {
        ensure_required(&present)?;
    }
    Ok(rows)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::String(s) if s.trim().is_empty() => Cell::Missing,
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat Parquet columns, as written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`). Dates may be strings or `Date32`.
fn read_parquet(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let columns: Vec<(usize, Field)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| Field::from_header(f.name()).map(|field| (i, field)))
            .collect();
        let present: Vec<Field> = columns.iter().map(|(_, f)| *f).collect();
        ensure_required(&present)?;

        for row in 0..batch.num_rows() {
            let mut cells = BTreeMap::new();
            for (col_idx, field) in &columns {
                cells.insert(*field, arrow_cell(batch.column(*col_idx), row)?);
            }
            rows.push(RawRow {
                row: rows.len() + 1,
                cells,
            });
        }
    }
    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Missing);
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| Cell::Text(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| Cell::Text(s.value(row).to_string())),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| Cell::Number(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| Cell::Number(a.value(row) as f64)),
        DataType::Date32 => any
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row))
            .map(Cell::Date),
        _ => None,
    };
    match cell {
        Some(cell) => Ok(cell),
        None => Ok(Cell::Text(array_value_to_string(col, row)?)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field as ArrowField, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const TURKISH_HEADER: &str =
        "No,Deprem Kodu,Olus tarihi,Olus zamani,Enlem,Boylam,Derinlik,xM,MD,ML,Mw,Ms,Mb,Tip,Yer";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn load(suffix: &str, contents: &str) -> Result<Dataset, LoadError> {
        let file = write_temp(suffix, contents);
        load_file(file.path(), &LoadOptions::default())
    }

    #[test]
    fn loads_turkish_catalogue_columns() {
        let csv = format!(
            "{TURKISH_HEADER}\n\
             1,20230206011734,2023.02.06,01:17:34.00,37.288,37.043,8.6,7.7,0,0,7.7,0,0,Ke,SOFULAR-SEHITKAMIL (GAZIANTEP)\n\
             2,19990817000139,1999.08.17,00:01:39.80,40.760,29.970,17.0,7.6,0,0,7.6,0,0,Ke,GOLCUK-IZMIT KORFEZI\n"
        );
        let ds = load(".csv", &csv).expect("load");
        assert_eq!(ds.len(), 2);

        let first = &ds.records()[0];
        assert_eq!(first.year(), 2023);
        assert_eq!(
            first.event_time,
            NaiveTime::from_hms_milli_opt(1, 17, 34, 0)
        );
        assert_eq!(first.magnitude, 7.7);
        assert_eq!(first.location, "SOFULAR-SEHITKAMIL (GAZIANTEP)");
        assert_eq!(first.region, "GAZIANTEP");
        assert_eq!(ds.records()[1].region, "IZMIT");
    }

    #[test]
    fn loads_english_headers_with_iso_datetime() {
        let csv = "date,latitude,longitude,depth,magnitude,location\n\
                   2011-10-23 10:41:23,38.72,43.51,19.0,7.2,VAN\n";
        let ds = load(".csv", csv).expect("load");
        let rec = &ds.records()[0];
        assert_eq!(rec.event_date, NaiveDate::from_ymd_opt(2011, 10, 23).unwrap());
        assert_eq!(rec.event_time, NaiveTime::from_hms_opt(10, 41, 23));
    }

    #[test]
    fn tab_separated_by_extension() {
        let tsv = "date\tlat\tlon\tdepth\tmag\tplace\n1999.11.12\t40.82\t31.20\t10\t7.2\tDUZCE\n";
        let ds = load(".tsv", tsv).expect("load");
        assert_eq!(ds.records()[0].location, "DUZCE");
    }

    #[test]
    fn missing_location_becomes_unknown() {
        let csv = "date,lat,lon,depth,mag,place\n2000.01.01,39.0,35.0,5,4.1,\n";
        let ds = load(".csv", csv).expect("load");
        assert_eq!(ds.records()[0].location, UNKNOWN_REGION);
        assert_eq!(ds.records()[0].region, UNKNOWN_REGION);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("/nonexistent/quakes.csv"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load(".xlsx", "whatever").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn unparseable_date_is_an_error() {
        let csv = "date,lat,lon,depth,mag\n06/02/2023,37.2,37.0,8.6,7.7\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { row: 1, field: Field::Date, .. }
        ));
    }

    #[test]
    fn non_numeric_magnitude_is_an_error() {
        let csv = "date,lat,lon,depth,mag\n2023.02.06,37.2,37.0,8.6,strong\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { field: Field::Magnitude, .. }
        ));
    }

    #[test]
    fn nan_depth_is_an_error() {
        let csv = "date,lat,lon,depth,mag\n2023.02.06,37.2,37.0,NaN,4.0\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { field: Field::Depth, reason: "not a finite number", .. }
        ));
    }

    #[test]
    fn blank_required_value_is_an_error() {
        let csv = "date,lat,lon,depth,mag\n2023.02.06,,37.0,5,4.0\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingValue { row: 1, field: Field::Latitude }
        ));
    }

    #[test]
    fn coordinates_outside_the_world_are_an_error() {
        let csv = "date,lat,lon,depth,mag\n2023.02.06,37.2,190.0,5,4.0\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { field: Field::Longitude, .. }
        ));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "date,lat,lon,mag\n2023.02.06,37.2,37.0,4.0\n";
        let err = load(".csv", csv).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(Field::Depth)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = load(".csv", "date,lat,lon,depth,mag\n").unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn outliers_and_out_of_area_rows_are_dropped() {
        let csv = "date,lat,lon,depth,mag\n\
                   2001.01.01,39.0,35.0,-1.0,4.0\n\
                   2001.01.02,39.0,35.0,5.0,0.0\n\
                   2001.01.03,48.8,2.3,5.0,4.0\n\
                   2001.01.04,39.0,35.0,5.0,4.0\n";
        let ds = load(".csv", csv).expect("load");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].event_date.to_string(), "2001-01-04");

        let file = write_temp(".csv", csv);
        let options = LoadOptions {
            study_area: None,
            ..LoadOptions::default()
        };
        let all = load_file(file.path(), &options).expect("load");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn everything_dropped_is_empty() {
        let csv = "date,lat,lon,depth,mag\n2001.01.01,48.8,2.3,5.0,4.0\n";
        assert!(matches!(load(".csv", csv).unwrap_err(), LoadError::Empty));
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Olus tarihi": "1939.12.26", "Enlem": 39.8, "Boylam": 39.51, "Derinlik": 20, "xM": 7.9, "Yer": "ERZINCAN", "Tip": "Ke"},
            {"Olus tarihi": "1976.11.24", "Enlem": 39.05, "Boylam": 44.04, "Derinlik": 10, "xM": 7.5, "Yer": null}
        ]"#;
        let ds = load(".json", json).expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].region, "ERZINCAN");
        assert_eq!(ds.records()[1].location, UNKNOWN_REGION);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(load(".json", "{}").unwrap_err(), LoadError::JsonShape));
        assert!(matches!(load(".json", "[1, 2]").unwrap_err(), LoadError::JsonShape));
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            ArrowField::new("date", DataType::Utf8, false),
            ArrowField::new("latitude", DataType::Float64, false),
            ArrowField::new("longitude", DataType::Float64, false),
            ArrowField::new("depth", DataType::Float32, false),
            ArrowField::new("magnitude", DataType::Float64, false),
            ArrowField::new("location", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2020.01.24", "2020.10.30"])),
                Arc::new(Float64Array::from(vec![38.36, 37.90])),
                Arc::new(Float64Array::from(vec![39.06, 26.79])),
                Arc::new(Float32Array::from(vec![8.0, 16.5])),
                Arc::new(Float64Array::from(vec![6.8, 6.6])),
                Arc::new(StringArray::from(vec![Some("SIVRICE (ELAZIG)"), None])),
            ],
        )
        .expect("record batch");

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("temp file");
        let mut writer =
            ArrowWriter::try_new(file.reopen().expect("reopen"), schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");

        let ds = load_file(file.path(), &LoadOptions::default()).expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].region, "ELAZIG");
        assert_eq!(ds.records()[1].depth, 16.5);
        assert_eq!(ds.records()[1].location, UNKNOWN_REGION);
    }
}
