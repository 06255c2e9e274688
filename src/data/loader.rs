use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{CellValue, RawTable};

/// Cell texts a CSV reader treats as missing.
const NA_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a race-results table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row of column names, one result per line
/// * `.json`    – `[{ "Event name": "...", "Year of event": 2018, ... }, ...]`
/// * `.parquet` – one column per field (what `df.to_parquet()` writes)
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.column_names.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; every other row is one result.
/// Ragged rows are tolerated and padded with `Null`.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = RawTable::new(headers);

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push_row(record.iter().map(guess_cell_type).collect());
    }

    Ok(table)
}

fn guess_cell_type(s: &str) -> CellValue {
    if NA_MARKERS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
/// Columns are the union of all keys, in the order they are first seen.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().ok_or(DataError::NotARecordArray)?;

    let mut objects = Vec::with_capacity(records.len());
    let mut column_names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(DataError::NotAnObject(i))?;
        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut table = RawTable::new(column_names);
    for obj in objects {
        let cells = table
            .column_names
            .iter()
            .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
            .collect();
        table.push_row(cells);
    }

    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file; every column becomes a table column.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let column_names = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let mut table = RawTable::new(column_names);

    let reader = builder.build().context("building parquet reader")?;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect();
            table.push_row(cells);
        }
    }

    Ok(table)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }

    macro_rules! int_cell {
        ($t:ty) => {
            col.as_primitive_opt::<$t>()
                .map(|a| CellValue::Integer(a.value(row) as i64))
        };
    }

    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Int8 => int_cell!(Int8Type),
        DataType::Int16 => int_cell!(Int16Type),
        DataType::Int32 => int_cell!(Int32Type),
        DataType::Int64 => int_cell!(Int64Type),
        DataType::UInt8 => int_cell!(UInt8Type),
        DataType::UInt16 => int_cell!(UInt16Type),
        DataType::UInt32 => int_cell!(UInt32Type),
        DataType::UInt64 => int_cell!(UInt64Type),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };

    // Dates, decimals, views: fall back to the Arrow display form.
    cell.or_else(|| {
        array_value_to_string(col.as_ref(), row)
            .ok()
            .map(CellValue::String)
    })
    .unwrap_or(CellValue::Null)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_infers_cell_types() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "races.csv",
            "Year of event,Event distance/length,Athlete performance,Age\n\
             2018,50km,4:51:39 h,34.5\n\
             2019,100km,,NA\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(
            table.column_names,
            vec!["Year of event", "Event distance/length", "Athlete performance", "Age"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], CellValue::Integer(2018));
        assert_eq!(table.rows[0][1], CellValue::String("50km".into()));
        assert_eq!(table.rows[0][2], CellValue::String("4:51:39 h".into()));
        assert_eq!(table.rows[0][3], CellValue::Float(34.5));
        assert!(table.rows[1][2].is_null());
        assert!(table.rows[1][3].is_null());
    }

    #[test]
    fn csv_tolerates_ragged_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "ragged.csv", "a,b,c\n1,2\n1,2,3\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows[0][2].is_null());
        assert_eq!(table.rows[1][2], CellValue::Integer(3));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("absent.csv"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "races.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn json_records_become_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "races.json",
            r#"[{"Year of event": 2001, "Age": 40.5},
                {"Year of event": 2002, "Athlete country": "FRA"}]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names.len(), 3);
        let country = table.column_index("Athlete country").unwrap();
        assert!(table.rows[0][country].is_null());
        assert_eq!(table.rows[1][country], CellValue::String("FRA".into()));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.json", r#"[{"a": 1}, 3]"#);
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NotAnObject(1))
        ));
    }

    #[test]
    fn parquet_columns_map_to_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("races.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Year of event", DataType::Int64, false),
            Field::new("Athlete performance", DataType::Utf8, true),
            Field::new("Age", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2010, 2011])),
                Arc::new(StringArray::from(vec![Some("3:15:42 h"), None])),
                Arc::new(Float64Array::from(vec![Some(41.0), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], CellValue::Integer(2010));
        assert_eq!(table.rows[0][1], CellValue::String("3:15:42 h".into()));
        assert_eq!(table.rows[0][2], CellValue::Float(41.0));
        assert!(table.rows[1][1].is_null());
        assert!(table.rows[1][2].is_null());
    }
}
