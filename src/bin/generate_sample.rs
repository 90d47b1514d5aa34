//! Write a synthetic Turkish-header earthquake catalogue for trying out the
//! dashboard without the real KOERI export.
//!
//! ```text
//! cargo run --bin generate_sample -- --count 5000 --output sample_earthquakes.csv
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Generate a synthetic Turkey earthquake catalogue")]
struct Args {
    /// Number of events to write.
    #[arg(short, long, default_value_t = 5000)]
    count: usize,

    /// Output file; `.parquet` writes Parquet, anything else CSV.
    #[arg(short, long, default_value = "sample_earthquakes.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// A seismic source zone: events scatter normally around its centre.
struct Zone {
    province: &'static str,
    districts: &'static [&'static str],
    latitude: f64,
    longitude: f64,
    spread_deg: f64,
    mean_depth_km: f64,
}

#[rustfmt::skip]
const ZONES: &[Zone] = &[
    Zone { province: "IZMIR", districts: &["SEFERIHISAR", "KARABURUN", "BERGAMA"], latitude: 38.4, longitude: 26.9, spread_deg: 0.35, mean_depth_km: 12.0 },
    Zone { province: "MUGLA", districts: &["DATCA", "MARMARIS", "FETHIYE"], latitude: 36.8, longitude: 28.2, spread_deg: 0.45, mean_depth_km: 25.0 },
    Zone { province: "KAHRAMANMARAS", districts: &["PAZARCIK", "ELBISTAN", "GOKSUN"], latitude: 37.8, longitude: 37.1, spread_deg: 0.4, mean_depth_km: 10.0 },
    Zone { province: "HATAY", districts: &["ANTAKYA", "DEFNE", "SAMANDAG"], latitude: 36.2, longitude: 36.2, spread_deg: 0.3, mean_depth_km: 12.0 },
    Zone { province: "VAN", districts: &["ERCIS", "MURADIYE", "TUSBA"], latitude: 38.7, longitude: 43.4, spread_deg: 0.35, mean_depth_km: 9.0 },
    Zone { province: "ELAZIG", districts: &["SIVRICE", "MADEN", "PALU"], latitude: 38.5, longitude: 39.2, spread_deg: 0.3, mean_depth_km: 11.0 },
    Zone { province: "DUZCE", districts: &["AKCAKOCA", "KAYNASLI", "GOLYAKA"], latitude: 40.8, longitude: 31.2, spread_deg: 0.25, mean_depth_km: 13.0 },
    Zone { province: "KOCAELI", districts: &["GOLCUK", "IZMIT", "KARAMURSEL"], latitude: 40.7, longitude: 29.9, spread_deg: 0.25, mean_depth_km: 15.0 },
    Zone { province: "ERZINCAN", districts: &["TERCAN", "KEMAH", "UZUMLU"], latitude: 39.7, longitude: 39.5, spread_deg: 0.3, mean_depth_km: 14.0 },
    Zone { province: "ANTALYA", districts: &["KAS", "FINIKE", "KEMER"], latitude: 36.3, longitude: 30.2, spread_deg: 0.5, mean_depth_km: 45.0 },
];

const FIRST_YEAR: i32 = 1915;
const LAST_YEAR: i32 = 2024;
/// Gutenberg-Richter b-value; magnitudes above the floor are exponential
/// with rate b * ln 10.
const B_VALUE: f64 = 1.0;
const MAGNITUDE_FLOOR: f64 = 2.0;
const MAGNITUDE_CEILING: f64 = 7.9;

/// One catalogue row, serialized under the KOERI column names.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "No")]
    number: usize,
    #[serde(rename = "Deprem Kodu")]
    code: String,
    #[serde(rename = "Olus tarihi")]
    date: String,
    #[serde(rename = "Olus zamani")]
    time: String,
    #[serde(rename = "Enlem")]
    latitude: f64,
    #[serde(rename = "Boylam")]
    longitude: f64,
    #[serde(rename = "Derinlik")]
    depth: f64,
    #[serde(rename = "xM")]
    magnitude: f64,
    #[serde(rename = "Tip")]
    kind: &'static str,
    #[serde(rename = "Yer")]
    location: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let rows = generate(&mut rng, args.count)?;

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&args.output, &rows)?;
    } else {
        write_csv(&args.output, &rows)?;
    }

    println!("Wrote {} earthquakes to {}", rows.len(), args.output.display());
    Ok(())
}

fn generate(rng: &mut StdRng, count: usize) -> Result<Vec<Row>> {
    if ZONES.is_empty() {
        bail!("no seismic zones configured");
    }
    let magnitudes = Exp::new(B_VALUE * std::f64::consts::LN_10)?;
    let offset = Normal::new(0.0, 1.0)?;

    let mut rows = Vec::with_capacity(count);
    for number in 1..=count {
        let zone = &ZONES[rng.random_range(0..ZONES.len())];
        let when = random_moment(rng)?;

        let latitude = zone.latitude + zone.spread_deg * offset.sample(rng);
        let longitude = zone.longitude + zone.spread_deg * offset.sample(rng);
        let depth = Exp::new(1.0 / zone.mean_depth_km)?.sample(rng).min(180.0);
        let magnitude = (MAGNITUDE_FLOOR + magnitudes.sample(rng)).min(MAGNITUDE_CEILING);

        let village = zone.districts[rng.random_range(0..zone.districts.len())];
        let district = zone.districts[rng.random_range(0..zone.districts.len())];
        let location = if village == district {
            format!("{district} ({})", zone.province)
        } else {
            format!("{village}-{district} ({})", zone.province)
        };

        rows.push(Row {
            number,
            code: when.format("%Y%m%d%H%M%S").to_string(),
            date: when.format("%Y.%m.%d").to_string(),
            time: when.format("%H:%M:%S%.3f").to_string(),
            latitude: round_to(latitude, 4),
            longitude: round_to(longitude, 4),
            depth: round_to(depth, 1),
            magnitude: round_to(magnitude, 1),
            kind: "Ke",
            location,
        });
    }
    Ok(rows)
}

/// Recent decades are denser, as instrument coverage grew.
fn random_moment(rng: &mut StdRng) -> Result<NaiveDateTime> {
    let span = (LAST_YEAR - FIRST_YEAR) as f64;
    let year = FIRST_YEAR + (span * rng.random::<f64>().powf(0.35)).round() as i32;
    let date = NaiveDate::from_ymd_opt(year, rng.random_range(1..=12), rng.random_range(1..=28))
        .with_context(|| format!("invalid generated date in {year}"))?;
    let time = NaiveTime::from_hms_milli_opt(
        rng.random_range(0..24),
        rng.random_range(0..60),
        rng.random_range(0..60),
        rng.random_range(0..100) * 10,
    )
    .context("invalid generated time")?;
    Ok(date.and_time(time))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let text = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Olus tarihi", DataType::Utf8, false),
        Field::new("Olus zamani", DataType::Utf8, false),
        Field::new("Enlem", DataType::Float64, false),
        Field::new("Boylam", DataType::Float64, false),
        Field::new("Derinlik", DataType::Float64, false),
        Field::new("xM", DataType::Float64, false),
        Field::new("Tip", DataType::Utf8, false),
        Field::new("Yer", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| r.date.as_str()),
            text(|r| r.time.as_str()),
            number(|r| r.latitude),
            number(|r| r.longitude),
            number(|r| r.depth),
            number(|r| r.magnitude),
            text(|r| r.kind),
            text(|r| r.location.as_str()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
