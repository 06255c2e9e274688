use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use ultra_trends::config::DEFAULT_DATA_PATH;
use ultra_trends::data::model::columns;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (label, typical finish hours, relative popularity)
const DISTANCES: [(&str, f64, f64); 5] = [
    ("50km", 5.5, 1.0),
    ("100km", 11.5, 0.6),
    ("50mi", 9.5, 0.45),
    ("6h", 6.0, 0.15),
    ("100mi", 26.0, 0.1),
];

const COUNTRIES: [&str; 12] = [
    "USA", "FRA", "GER", "GBR", "JPN", "RSA", "ITA", "ESP", "AUS", "CAN", "BRA", "POL",
];

struct Row {
    event_name: String,
    year: i64,
    distance: &'static str,
    finishers: i64,
    performance: Option<String>,
    country: &'static str,
    age: f64,
}

fn format_duration(hours: f64) -> String {
    let total = (hours * 3600.0).round().max(0.0) as u64;
    format!("{}:{:02}:{:02} h", total / 3600, total % 3600 / 60, total % 60)
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();

    for year in 1940..=2023_i64 {
        // Participation grows roughly exponentially after 1970.
        let growth = ((year - 1940) as f64 / 12.0).exp().min(60.0);
        // Fields get slightly slower as the sport broadens.
        let drift = 1.0 + (year - 1940) as f64 * 0.002;
        let countries = &COUNTRIES[..(2 + (year - 1940) as usize / 8).min(COUNTRIES.len())];

        for (d_idx, &(distance, hours, popularity)) in DISTANCES.iter().enumerate() {
            let events = (growth * popularity).round() as usize;
            for e in 0..events {
                let finishers = (20.0 + rng.next_f64() * 40.0 * popularity) as i64;
                let event_name = format!("{} {} Ultra #{}", rng.pick(countries), distance, d_idx * 100 + e);

                for _ in 0..finishers {
                    // A few results are DNFs or typos the cleaner must drop.
                    let performance = if rng.next_f64() < 0.01 {
                        Some("DNF".to_string())
                    } else if rng.next_f64() < 0.005 {
                        None
                    } else {
                        let h = rng.gauss(hours * drift, hours * 0.15).max(hours * 0.4);
                        Some(format_duration(h))
                    };
                    // Occasional bogus ages fall outside the accepted range.
                    let age = if rng.next_f64() < 0.01 {
                        0.0
                    } else {
                        rng.gauss(38.0 + (year - 1940) as f64 * 0.08, 9.0).round()
                    };

                    rows.push(Row {
                        event_name: event_name.clone(),
                        year,
                        distance,
                        finishers,
                        performance,
                        country: rng.pick(countries),
                        age,
                    });
                }
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns::REQUIRED)?;
    for row in rows {
        writer.write_record([
            row.event_name.clone(),
            row.year.to_string(),
            row.distance.to_string(),
            row.finishers.to_string(),
            row.performance.clone().unwrap_or_default(),
            row.country.to_string(),
            row.age.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new(columns::EVENT_NAME, DataType::Utf8, false),
        Field::new(columns::YEAR, DataType::Int64, false),
        Field::new(columns::DISTANCE, DataType::Utf8, false),
        Field::new(columns::FINISHERS, DataType::Int64, false),
        Field::new(columns::PERFORMANCE, DataType::Utf8, true),
        Field::new(columns::COUNTRY, DataType::Utf8, false),
        Field::new(columns::AGE, DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.event_name.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.distance))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.finishers))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.performance.as_deref()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.country))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.age))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let csv_path = Path::new(DEFAULT_DATA_PATH);
    if let Some(dir) = csv_path.parent() {
        std::fs::create_dir_all(dir).expect("Failed to create data directory");
    }
    write_csv(csv_path, &rows).expect("Failed to write CSV");

    let parquet_path = csv_path.with_extension("parquet");
    write_parquet(&parquet_path, &rows);

    println!(
        "Wrote {} results to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
}
